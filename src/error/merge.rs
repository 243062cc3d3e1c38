//! Merge tool errors

use super::{AppError, MergeFailureReason};

const SPLIT_SET_HINT: &str =
    "The split set may be incomplete, corrupted, or unsupported. Re-export all splits of the app and try again.";
const TOOL_OUTPUT_HINT: &str = "Run with --verbose to see the full merge tool output";

/// Creates a merge failed error, with a hint matching the failure reason
pub fn failed(reason: MergeFailureReason, detail: impl Into<String>) -> AppError {
    let hint = match reason {
        MergeFailureReason::Corrupted | MergeFailureReason::Unsupported => SPLIT_SET_HINT,
        MergeFailureReason::Unknown => TOOL_OUTPUT_HINT,
    };
    AppError::MergeFailed {
        reason,
        detail: detail.into(),
        hint: Some(hint.to_string()),
    }
}

/// Creates a merge tool unavailable error
pub fn tool_unavailable(program: impl Into<String>, reason: impl ToString) -> AppError {
    AppError::MergeToolUnavailable {
        program: program.into(),
        reason: reason.to_string(),
    }
}
