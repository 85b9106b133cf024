use crate::keys::validate_key;
use crate::traits::{Storage, StorageError, StorageReader, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{ObjectStore, ObjectStoreExt, PutPayload, WriteMultipart};
use std::fmt::Display;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::AsyncReadExt;

/// Bodies up to this size go out as a single PUT; larger ones switch to a multipart upload.
const SINGLE_PUT_THRESHOLD: usize = 8 * 1024 * 1024;
const READ_CHUNK_SIZE: usize = 64 * 1024;
const MAX_CONCURRENT_PARTS: usize = 4;

/// Static credentials for the bucket. When absent, the builder's environment discovery applies.
#[derive(Clone)]
pub struct S3Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    /// * `credentials` - Optional static access key pair
    pub fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
        credentials: Option<S3Credentials>,
    ) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region.clone())
            .with_bucket_name(bucket.clone());

        if let Some(creds) = credentials {
            builder = builder
                .with_access_key_id(creds.access_key_id)
                .with_secret_access_key(creds.secret_access_key);
        }

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Storage {
            store: Arc::new(store),
            bucket,
            region,
            endpoint_url,
        })
    }

    /// Wrap an already-built object store (any `ObjectStore` speaking for `bucket`).
    pub fn with_store(store: Arc<dyn ObjectStore>, bucket: String, region: String) -> Self {
        S3Storage {
            store,
            bucket,
            region,
            endpoint_url: None,
        }
    }

    /// Generate public URL for S3 object
    ///
    /// For AWS S3, uses the standard format: https://{bucket}.s3.{region}.amazonaws.com/{key}
    /// For S3-compatible providers, uses path-style `{endpoint}/{bucket}/{key}`
    fn generate_url(&self, key: &str) -> String {
        if let Some(ref endpoint) = self.endpoint_url {
            let base_url = endpoint.trim_end_matches('/');
            format!("{}/{}/{}", base_url, self.bucket, key)
        } else {
            format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            )
        }
    }

    fn upload_failed(
        &self,
        key: &str,
        size: usize,
        start: Instant,
        message: &str,
        error: impl Display,
    ) -> StorageError {
        tracing::error!(
            error = %error,
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "{}",
            message
        );
        StorageError::UploadFailed(error.to_string())
    }

    async fn upload_multipart(
        &self,
        location: &Path,
        key: &str,
        head: Vec<u8>,
        reader: &mut StorageReader<'_>,
        start: Instant,
    ) -> StorageResult<usize> {
        let upload = self
            .store
            .put_multipart(location)
            .await
            .map_err(|e| self.upload_failed(key, head.len(), start, "S3 multipart start failed", e))?;

        let mut writer = WriteMultipart::new(upload);
        let mut size = head.len();
        writer.write(&head);
        drop(head);

        let mut chunk = vec![0u8; READ_CHUNK_SIZE];
        loop {
            let step = match reader.read(&mut chunk).await {
                Ok(0) => break,
                Ok(n) => writer
                    .wait_for_capacity(MAX_CONCURRENT_PARTS)
                    .await
                    .map(|_| n)
                    .map_err(|e| e.to_string()),
                Err(e) => Err(format!("Failed to read upload stream: {}", e)),
            };

            match step {
                Ok(n) => {
                    writer.write(&chunk[..n]);
                    size += n;
                }
                Err(reason) => {
                    if let Err(abort_err) = writer.abort().await {
                        tracing::warn!(
                            error = %abort_err,
                            bucket = %self.bucket,
                            key = %key,
                            "Failed to abort S3 multipart upload"
                        );
                    }
                    return Err(self.upload_failed(
                        key,
                        size,
                        start,
                        "S3 multipart upload failed",
                        reason,
                    ));
                }
            }
        }

        writer
            .finish()
            .await
            .map_err(|e| self.upload_failed(key, size, start, "S3 multipart upload failed", e))?;

        Ok(size)
    }
}

/// Read from `reader` until `buffer` holds at least `limit` bytes. Returns `true` on EOF.
async fn read_up_to(
    reader: &mut StorageReader<'_>,
    buffer: &mut Vec<u8>,
    limit: usize,
) -> std::io::Result<bool> {
    let mut chunk = vec![0u8; READ_CHUNK_SIZE];
    while buffer.len() < limit {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            return Ok(true);
        }
        buffer.extend_from_slice(&chunk[..n]);
    }
    Ok(false)
}

#[async_trait]
impl Storage for S3Storage {
    async fn upload_stream<'a>(
        &self,
        storage_key: &str,
        _content_type: &str,
        mut reader: StorageReader<'a>,
    ) -> StorageResult<String> {
        validate_key(storage_key)?;

        let start = Instant::now();
        let location = Path::from(storage_key);

        let mut buffer = Vec::new();
        let eof = read_up_to(&mut reader, &mut buffer, SINGLE_PUT_THRESHOLD)
            .await
            .map_err(|e| {
                self.upload_failed(
                    storage_key,
                    buffer.len(),
                    start,
                    "S3 upload stream read failed",
                    format!("Failed to read upload stream: {}", e),
                )
            })?;

        let size = if eof {
            let size = buffer.len();
            self.store
                .put(&location, PutPayload::from(Bytes::from(buffer)))
                .await
                .map_err(|e| self.upload_failed(storage_key, size, start, "S3 upload failed", e))?;
            size
        } else {
            self.upload_multipart(&location, storage_key, buffer, &mut reader, start)
                .await?
        };

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            size_bytes = size,
            multipart = !eof,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(self.generate_url(storage_key))
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        validate_key(storage_key)?;
        let location = Path::from(storage_key);
        match self.store.head(&location).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }

    fn target(&self) -> String {
        format!("s3://{}", self.bucket)
    }
}
