use crate::keys::validate_key;
use crate::traits::{Storage, StorageError, StorageReader, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tokio::fs;
use tokio::io::AsyncWriteExt;

static PART_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance rooted at `base_path` (created if missing).
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        validate_key(storage_key)?;
        Ok(self.base_path.join(storage_key))
    }

    /// Unique sibling path the upload is written to before being renamed into place.
    ///
    /// The key is left out so a key at the filename length limit still gets a valid temp name.
    fn part_path(&self) -> PathBuf {
        let n = PART_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.base_path
            .join(format!(".upload.{}.{}.part", std::process::id(), n))
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload_stream<'a>(
        &self,
        storage_key: &str,
        _content_type: &str,
        mut reader: StorageReader<'a>,
    ) -> StorageResult<String> {
        let path = self.key_to_path(storage_key)?;
        let part = self.part_path();
        let start = Instant::now();

        let written = async {
            let mut file = fs::File::create(&part).await?;
            let size = tokio::io::copy(&mut reader, &mut file).await?;
            file.flush().await?;
            file.sync_all().await?;
            fs::rename(&part, &path).await?;
            Ok::<u64, std::io::Error>(size)
        }
        .await;

        let size = match written {
            Ok(size) => size,
            Err(e) => {
                if let Err(cleanup_err) = fs::remove_file(&part).await {
                    if cleanup_err.kind() != std::io::ErrorKind::NotFound {
                        tracing::warn!(
                            error = %cleanup_err,
                            path = %part.display(),
                            "Failed to remove partial upload"
                        );
                    }
                }
                tracing::error!(
                    error = %e,
                    key = %storage_key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Local upload failed"
                );
                return Err(StorageError::UploadFailed(e.to_string()));
            }
        };

        tracing::info!(
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local upload successful"
        );

        Ok(path.to_string_lossy().into_owned())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(storage_key)?;
        Ok(fs::try_exists(&path).await?)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }

    fn target(&self) -> String {
        self.base_path.display().to_string()
    }
}
