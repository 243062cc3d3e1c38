//! Merge tool output handling
//!
//! Tool output is kept as a bounded tail for error reports. Noise lines are not
//! forwarded to the logger, and `Merging ...` lines become progress events.

use std::collections::VecDeque;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::OutputConfig;
use crate::error::MergeFailureReason;

#[allow(clippy::expect_used)]
static MERGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Merging\s*:?\s*(.+)").expect("merge pattern is valid"));

const NOISE_PREFIXES: [&str; 4] = ["Added:", "Added [", "Loading:", "ORDER:"];
const CORRUPTION_MARKERS: [&str; 2] = ["CoderMalfunctionError", "newPosition > limit"];
const UNSUPPORTED_MARKER: &str = "unsupported";
const ELLIPSIS: char = '…';

/// Bounded record of what the merge tool printed
#[derive(Debug)]
pub struct ToolOutput {
    lines: VecDeque<String>,
    max_lines: usize,
    max_line_length: usize,
    reason: MergeFailureReason,
}

impl ToolOutput {
    pub fn new(limits: &OutputConfig) -> Self {
        Self {
            lines: VecDeque::with_capacity(limits.max_lines.min(64)),
            max_lines: limits.max_lines,
            max_line_length: limits.max_line_length,
            reason: MergeFailureReason::Unknown,
        }
    }

    /// Record one raw line; returns the stored form, or `None` for blank lines
    pub fn record(&mut self, raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        self.note_failure_markers(trimmed);

        let line = limit_line_length(trimmed, self.max_line_length);
        if self.lines.len() == self.max_lines {
            self.lines.pop_front();
        }
        self.lines.push_back(line.clone());
        Some(line)
    }

    // Corruption outranks unsupported; markers are remembered even after the
    // line falls out of the tail.
    fn note_failure_markers(&mut self, line: &str) {
        if CORRUPTION_MARKERS.iter().any(|marker| line.contains(marker)) {
            self.reason = MergeFailureReason::Corrupted;
        } else if self.reason == MergeFailureReason::Unknown
            && line.to_lowercase().contains(UNSUPPORTED_MARKER)
        {
            self.reason = MergeFailureReason::Unsupported;
        }
    }

    /// Failure reason suggested by everything recorded so far
    pub fn failure_reason(&self) -> MergeFailureReason {
        self.reason
    }

    /// The retained lines joined with newlines
    pub fn tail(&self) -> String {
        self.lines.iter().map(String::as_str).collect::<Vec<_>>().join("\n")
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

/// Whether a tool line is worth forwarding to the logger
pub fn should_emit(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !NOISE_PREFIXES.iter().any(|p| trimmed.starts_with(p))
}

/// Turn a `Merging: name` tool line into a `Merging name.apk` progress event
pub fn merge_progress(line: &str) -> Option<String> {
    let captures = MERGE_PATTERN.captures(line)?;
    let module = captures.get(1)?.as_str().trim();
    if module.is_empty() {
        return None;
    }
    if module.to_lowercase().ends_with(".apk") {
        Some(format!("Merging {module}"))
    } else {
        Some(format!("Merging {module}.apk"))
    }
}

/// Truncate to `max` characters, marking the cut with an ellipsis
pub fn limit_line_length(line: &str, max: usize) -> String {
    match line.char_indices().nth(max) {
        Some((cut, _)) => {
            let mut truncated = line[..cut].to_string();
            truncated.push(ELLIPSIS);
            truncated
        }
        None => line.to_string(),
    }
}
