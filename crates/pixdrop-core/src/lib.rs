//! Pixdrop Core Library
//!
//! Configuration, the unified error type and the storage backend enum shared by
//! the storage and API crates.

pub mod config;
pub mod error;
pub mod storage_types;

pub use config::{Config, StorageSettings};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
