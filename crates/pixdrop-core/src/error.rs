//! Error types module
//!
//! All request-level failures are unified under [`AppError`]. Validation
//! failures are client errors with fixed messages; everything raised while
//! talking to storage or reading the request body is a server error whose text
//! is passed through to the caller unchanged.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "FILE_TYPE_NOT_ALLOWED")
    fn error_code(&self) -> &'static str;

    /// Client-facing message, rendered as the `error` field of the body
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No file part")]
    NoFilePart,

    #[error("No selected file")]
    NoSelectedFile,

    #[error("File type not allowed")]
    FileTypeNotAllowed,

    #[error("{0}")]
    Storage(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Whether the caller caused this error (maps to a 4xx response).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::NoFilePart | AppError::NoSelectedFile | AppError::FileTypeNotAllowed
        )
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        if self.is_client_error() {
            400
        } else {
            500
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::NoFilePart => "NO_FILE_PART",
            AppError::NoSelectedFile => "NO_SELECTED_FILE",
            AppError::FileTypeNotAllowed => "FILE_TYPE_NOT_ALLOWED",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }

    fn log_level(&self) -> LogLevel {
        if self.is_client_error() {
            LogLevel::Debug
        } else {
            LogLevel::Error
        }
    }
}
