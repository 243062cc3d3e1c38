//! File system errors

use super::AppError;

/// Creates a file write failed error
pub fn write_failed(path: impl Into<String>, reason: impl ToString) -> AppError {
    AppError::FileWriteFailed {
        path: path.into(),
        reason: reason.to_string(),
    }
}

/// Creates an IO error with operation context
pub fn io_error(message: impl Into<String>) -> AppError {
    AppError::IoError {
        message: message.into(),
    }
}
