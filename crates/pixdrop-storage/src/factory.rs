#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::{s3::S3Credentials, S3Storage};
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use pixdrop_core::Config;
use std::sync::Arc;

/// Create the storage backend this process writes every upload to.
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let settings = config.storage();

    match settings.backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let credentials = match (
                settings.aws_access_key_id.clone(),
                settings.aws_secret_access_key.clone(),
            ) {
                (Some(access_key_id), Some(secret_access_key)) => Some(S3Credentials {
                    access_key_id,
                    secret_access_key,
                }),
                (None, None) => None,
                _ => {
                    return Err(StorageError::ConfigError(
                        "AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must be set together"
                            .to_string(),
                    ))
                }
            };

            let storage = S3Storage::new(
                settings.s3_bucket.clone(),
                settings.s3_region.clone(),
                settings.s3_endpoint.clone(),
                credentials,
            )?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = settings.local_storage_path.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
            })?;

            let storage = LocalStorage::new(base_path).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}
