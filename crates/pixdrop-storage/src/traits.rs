//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use pixdrop_core::AppError;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl StorageError {
    /// The underlying failure text, without the variant prefix.
    pub fn reason(&self) -> String {
        match self {
            StorageError::UploadFailed(msg)
            | StorageError::InvalidKey(msg)
            | StorageError::BackendError(msg)
            | StorageError::ConfigError(msg) => msg.clone(),
            StorageError::IoError(err) => err.to_string(),
        }
    }
}

/// Every storage failure reaches the client as a server error carrying the raw reason.
impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err.reason())
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Byte source for a streamed upload. May borrow from the request it is read from.
pub type StorageReader<'a> = Pin<Box<dyn AsyncRead + Send + 'a>>;

/// Storage abstraction trait
///
/// The process holds exactly one implementation behind an `Arc<dyn Storage>`,
/// configured at startup; handlers never choose a target per request.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload the content of `reader` under `storage_key` and return the object location.
    ///
    /// The reader is consumed until EOF. A read error aborts the upload and is
    /// reported as [`StorageError::UploadFailed`].
    async fn upload_stream<'a>(
        &self,
        storage_key: &str,
        content_type: &str,
        reader: StorageReader<'a>,
    ) -> StorageResult<String>;

    /// Check if an object exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;

    /// Human-readable name of the write target (bucket or directory), for logs.
    fn target(&self) -> String;
}
