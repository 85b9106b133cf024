//! Test helpers: build the router around a substitute storage.
//!
//! Run from workspace root: `cargo test -p pixdrop-api`.

#![allow(dead_code)]

pub mod storage;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use pixdrop_api::setup::routes;
use pixdrop_api::AppState;
use pixdrop_storage::Storage;
use std::sync::Arc;

pub const UPLOAD_PATH: &str = "/upload";

/// The default extension allow-set.
pub fn allowed_extensions() -> Vec<String> {
    ["png", "jpg", "jpeg", "gif"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Test server wired to the given storage.
pub fn test_server(storage: Arc<dyn Storage>) -> TestServer {
    let state = Arc::new(AppState::new(storage, allowed_extensions()));
    TestServer::new(routes::setup_routes(state)).expect("Failed to create test server")
}

/// Multipart form with a single `file` part.
pub fn file_form(filename: &str, data: &[u8]) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::copy_from_slice(data))
        .file_name(filename)
        .mime_type("application/octet-stream");
    MultipartForm::new().add_part("file", part)
}

/// Raw multipart body with one `file` part whose Content-Disposition is written verbatim.
pub fn raw_multipart(boundary: &str, disposition: &str, data: &[u8]) -> bytes::Bytes {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(format!("Content-Disposition: {}\r\n", disposition).as_bytes());
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    bytes::Bytes::from(body)
}
