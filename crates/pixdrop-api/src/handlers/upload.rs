use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use pixdrop_core::AppError;

use crate::constants::{DEFAULT_CONTENT_TYPE, FILE_FIELD, UPLOAD_SUCCESS_MESSAGE};
use crate::error::{HttpAppError, UploadResponse};
use crate::state::AppState;
use crate::utils::upload::{allowed_file, field_reader, sanitize_filename};

/// Upload file handler
///
/// Looks for the multipart part named `file`, checks its filename against the
/// extension allow-set and streams its content to the configured storage under
/// the sanitized filename.
///
/// # Errors
/// - `AppError::NoFilePart` - no `file` part carrying a filename (or the body is not multipart)
/// - `AppError::NoSelectedFile` - the `file` part has an empty filename
/// - `AppError::FileTypeNotAllowed` - extension missing or not in the allow-set
/// - `AppError::Storage` - the storage write or the body stream failed
/// - `AppError::Internal` - the multipart body could not be read
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_file"))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            tracing::debug!(rejection = %rejection, "Request body is not multipart");
            return Err(AppError::NoFilePart.into());
        }
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Internal(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        // A `file` part without a filename is a plain form value, not an upload.
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        if filename.is_empty() {
            return Err(AppError::NoSelectedFile.into());
        }

        if !allowed_file(&filename, &state.allowed_extensions) {
            tracing::debug!(filename = %filename, "Rejected file extension");
            return Err(AppError::FileTypeNotAllowed.into());
        }

        let storage_key = sanitize_filename(&filename);
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let location = state
            .storage
            .upload_stream(&storage_key, &content_type, field_reader(field))
            .await?;

        tracing::info!(
            filename = %filename,
            storage_key = %storage_key,
            content_type = %content_type,
            location = %location,
            "File uploaded"
        );

        return Ok(Json(UploadResponse {
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
        }));
    }

    Err(AppError::NoFilePart.into())
}
