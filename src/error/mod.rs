//! Error types and handling for splitmerge
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Constructors are grouped by error domain:
//! - [`bundle`]: module discovery and planning errors
//! - [`merge`]: merge tool errors
//! - [`config`]: configuration errors
//! - [`fs`]: file system errors

pub mod bundle;
pub mod config;
pub mod fs;
pub mod merge;

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// Why the merge tool rejected a split set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeFailureReason {
    /// Resource or manifest data could not be decoded
    Corrupted,
    /// The split set uses something the tool cannot merge
    Unsupported,
    Unknown,
}

impl fmt::Display for MergeFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MergeFailureReason::Corrupted => "corrupted split set",
            MergeFailureReason::Unsupported => "unsupported split set",
            MergeFailureReason::Unknown => "merge tool failed",
        };
        f.write_str(text)
    }
}

/// Main error type for splitmerge operations
#[derive(Error, Diagnostic, Debug)]
pub enum AppError {
    // Bundle errors
    #[error("Nothing to merge, no modules found in: {path}")]
    #[diagnostic(
        code(splitmerge::bundle::no_modules),
        help("Point to a directory containing split .apk files, or to an .apks/.apkm/.xapk archive")
    )]
    NoModulesFound { path: String },

    #[error("Nothing to merge, empty module set")]
    #[diagnostic(code(splitmerge::bundle::empty))]
    EmptyModuleSet,

    #[error("Failed to read split archive: {path}: {reason}")]
    #[diagnostic(code(splitmerge::bundle::archive_read_failed))]
    ArchiveReadFailed { path: String, reason: String },

    #[error("Failed to inspect module '{name}': {reason}")]
    #[diagnostic(code(splitmerge::bundle::module_read_failed))]
    ModuleReadFailed { name: String, reason: String },

    #[error("More than one module would be merged as '{file_name}'")]
    #[diagnostic(
        code(splitmerge::bundle::duplicate_module),
        help("Rename or skip one of the modules so every module has a distinct file name")
    )]
    DuplicateModuleName { file_name: String },

    // CLI errors
    #[error("Unknown action: {action}")]
    #[diagnostic(
        code(splitmerge::cli::invalid_action),
        help("Supported actions: list, merge")
    )]
    InvalidAction { action: String },

    #[error("Missing argument: {name}")]
    #[diagnostic(
        code(splitmerge::cli::missing_argument),
        help("Usage: splitmerge merge <MODULES_DIR> <OUTPUT_APK> [SKIP_MODULES] [SORT_ENTRIES]")
    )]
    MissingArgument { name: String },

    // Merge errors
    #[error("Failed to merge split APK: {reason}")]
    #[diagnostic(code(splitmerge::merge::failed))]
    MergeFailed {
        reason: MergeFailureReason,
        detail: String,
        #[help]
        hint: Option<String>,
    },

    #[error("Merge tool '{program}' could not be started: {reason}")]
    #[diagnostic(
        code(splitmerge::merge::tool_unavailable),
        help("Set merge_tool.command in the configuration file to a working merge command")
    )]
    MergeToolUnavailable { program: String, reason: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(splitmerge::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(splitmerge::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(splitmerge::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(splitmerge::config::invalid))]
    ConfigInvalid { message: String },

    // File system errors
    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(splitmerge::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(splitmerge::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, AppError>;
