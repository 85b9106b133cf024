//! Pixdrop Storage Library
//!
//! This crate provides the storage abstraction uploads are written through and
//! its implementations for S3 and the local filesystem.
//!
//! # Storage key format
//!
//! Objects are stored under the sanitized upload filename, at the root of the
//! configured bucket (or directory). Keys must not be empty, contain `..` path
//! segments or start with `/`; every backend enforces this through the `keys` module.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use pixdrop_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageReader, StorageResult};
