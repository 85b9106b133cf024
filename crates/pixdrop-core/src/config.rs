//! Configuration module
//!
//! Process-wide settings are read once at startup, validated, and then handed to
//! the storage factory and the router as an immutable value. Nothing here is
//! reloadable at runtime.

use std::env;
use std::fmt;

use crate::storage_types::StorageBackend;

const SERVER_PORT: u16 = 5000;
const S3_BUCKET: &str = "my-unique-image-storage";
const S3_REGION: &str = "us-west-1";
const ALLOWED_EXTENSIONS: &str = "png,jpg,jpeg,gif";

/// Where uploads are written: the single storage target of this process.
#[derive(Clone)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub s3_bucket: String,
    pub s3_region: String,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, etc.)
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub local_storage_path: Option<String>,
}

impl fmt::Debug for StorageSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageSettings")
            .field("backend", &self.backend)
            .field("s3_bucket", &self.s3_bucket)
            .field("s3_region", &self.s3_region)
            .field("s3_endpoint", &self.s3_endpoint)
            .field("aws_access_key_id", &self.aws_access_key_id)
            .field(
                "aws_secret_access_key",
                &self.aws_secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .field("local_storage_path", &self.local_storage_path)
            .finish()
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub storage: StorageSettings,
    pub allowed_extensions: Vec<String>,
}

impl Config {
    /// Load configuration from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let server_port = match var("SERVER_PORT") {
            Some(port) => port
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("Invalid SERVER_PORT '{}': {}", port, e))?,
            None => SERVER_PORT,
        };

        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let backend = match var("STORAGE_BACKEND") {
            Some(backend) => backend.parse::<StorageBackend>()?,
            None => StorageBackend::S3,
        };

        let storage = StorageSettings {
            backend,
            s3_bucket: var("S3_BUCKET").unwrap_or_else(|| S3_BUCKET.to_string()),
            s3_region: var("S3_REGION")
                .or_else(|| var("AWS_REGION"))
                .unwrap_or_else(|| S3_REGION.to_string()),
            s3_endpoint: var("S3_ENDPOINT"),
            aws_access_key_id: var("AWS_ACCESS_KEY_ID"),
            aws_secret_access_key: var("AWS_SECRET_ACCESS_KEY"),
            local_storage_path: var("LOCAL_STORAGE_PATH"),
        };

        let allowed_extensions = var("UPLOAD_ALLOWED_EXTENSIONS")
            .unwrap_or_else(|| ALLOWED_EXTENSIONS.to_string())
            .split(',')
            .map(|s| s.trim().trim_start_matches('.').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Config {
            server_port,
            environment,
            storage,
            allowed_extensions,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "UPLOAD_ALLOWED_EXTENSIONS must list at least one extension"
            ));
        }

        let storage = &self.storage;
        match storage.backend {
            StorageBackend::S3 => {
                if storage.s3_bucket.is_empty() {
                    return Err(anyhow::anyhow!("S3_BUCKET must not be empty"));
                }
                if storage.aws_access_key_id.is_some() != storage.aws_secret_access_key.is_some() {
                    return Err(anyhow::anyhow!(
                        "AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must be set together"
                    ));
                }
            }
            StorageBackend::Local => {
                if storage.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when STORAGE_BACKEND=local"
                    ));
                }
            }
        }

        Ok(())
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn storage(&self) -> &StorageSettings {
        &self.storage
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }
}
