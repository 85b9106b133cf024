//! Pixdrop API Library
//!
//! This crate provides the upload handler, its HTTP error mapping, and the
//! application setup (storage, routes, telemetry, server).

// Module declarations
pub mod constants;
mod handlers;
pub mod setup;
mod telemetry;
mod utils;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError, UploadResponse};
pub use state::AppState;
pub use utils::upload::{allowed_file, file_extension, sanitize_filename};
