//! Module discovery errors

use super::AppError;

/// Creates a no modules found error
pub fn no_modules(path: impl Into<String>) -> AppError {
    AppError::NoModulesFound { path: path.into() }
}

/// Creates an archive read failed error
pub fn archive_read_failed(path: impl Into<String>, reason: impl ToString) -> AppError {
    AppError::ArchiveReadFailed {
        path: path.into(),
        reason: reason.to_string(),
    }
}

/// Creates a module read failed error
pub fn module_read_failed(name: impl Into<String>, reason: impl ToString) -> AppError {
    AppError::ModuleReadFailed {
        name: name.into(),
        reason: reason.to_string(),
    }
}

/// Creates an error for two modules that share a staged file name
pub fn duplicate_module(file_name: impl Into<String>) -> AppError {
    AppError::DuplicateModuleName {
        file_name: file_name.into(),
    }
}
