//! Error types module
//!
//! All application errors are unified under the [`AppError`] enum. The
//! [`ErrorMetadata`] trait lets each variant self-describe its HTTP response
//! characteristics so the API crate can render them without matching on
//! variants itself.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Detail string included in the response body for diagnosability,
    /// when the variant carries one.
    fn client_details(&self) -> Option<String>;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("No file provided")]
    NoFile,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            AppError::MethodNotAllowed => 405,
            AppError::NoFile => 400,
            AppError::InvalidInput(_) => 400,
            AppError::PayloadTooLarge(_) => 413,
            AppError::Storage(_) => 500,
            AppError::Internal(_) => 500,
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::MethodNotAllowed => "method not allowed".to_string(),
            AppError::NoFile => "no file provided".to_string(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::PayloadTooLarge(msg) => msg.clone(),
            // Storage and parse failures share the upload-failed contract;
            // the underlying cause goes into details.
            AppError::Storage(_) | AppError::Internal(_) => "upload failed".to_string(),
        }
    }

    fn client_details(&self) -> Option<String> {
        match self {
            AppError::Storage(msg) | AppError::Internal(msg) => Some(msg.clone()),
            _ => None,
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::MethodNotAllowed | AppError::NoFile | AppError::InvalidInput(_) => {
                LogLevel::Debug
            }
            AppError::PayloadTooLarge(_) => LogLevel::Warn,
            AppError::Storage(_) | AppError::Internal(_) => LogLevel::Error,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}
