//! Route paths and fixed response text.

pub const UPLOAD_PATH: &str = "/upload";
pub const HEALTH_PATH: &str = "/health";

/// Multipart field the upload is expected in.
pub const FILE_FIELD: &str = "file";

pub const UPLOAD_SUCCESS_MESSAGE: &str = "File successfully uploaded";

/// Content type recorded when the client did not send one for the file part.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
