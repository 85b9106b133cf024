//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`; any [`AppError`] (or anything that
//! converts into one, such as a `StorageError`) renders as
//! `{"error": "<message>"}` with the status code the error carries.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pixdrop_core::{AppError, ErrorMetadata, LogLevel};
use pixdrop_storage::StorageError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
}

/// Wrapper type for AppError to implement IntoResponse
/// (orphan rules: both IntoResponse and AppError are foreign to this crate)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError(err.into())
    }
}

fn log_error(error: &AppError) {
    let error_code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_code, "Upload rejected");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_code, "Upload failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = Json(ErrorResponse {
            error: app_error.client_message(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: HttpAppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn validation_error_renders_bad_request() {
        let (status, body) = render(AppError::FileTypeNotAllowed.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "File type not allowed" }));
    }

    #[tokio::test]
    async fn storage_error_renders_raw_text_as_500() {
        let err = StorageError::UploadFailed("dispatch failure: timed out".to_string());
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "dispatch failure: timed out" }));
    }
}
