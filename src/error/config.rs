//! Configuration errors

use super::AppError;

/// Creates a config not found error
pub fn not_found(path: impl Into<String>) -> AppError {
    AppError::ConfigNotFound { path: path.into() }
}

/// Creates a config read failed error
pub fn read_failed(path: impl Into<String>, reason: impl ToString) -> AppError {
    AppError::ConfigReadFailed {
        path: path.into(),
        reason: reason.to_string(),
    }
}

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl ToString) -> AppError {
    AppError::ConfigParseFailed {
        path: path.into(),
        reason: reason.to_string(),
    }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> AppError {
    AppError::ConfigInvalid {
        message: message.into(),
    }
}
