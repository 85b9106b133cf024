use async_trait::async_trait;
use pixdrop_storage::{Storage, StorageBackend, StorageError, StorageReader, StorageResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::io::AsyncReadExt;

/// In-memory storage that records every object written to it.
#[derive(Clone, Default)]
pub struct RecordingStorage {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl RecordingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn is_empty(&self) -> bool {
        self.objects.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn upload_stream<'a>(
        &self,
        storage_key: &str,
        _content_type: &str,
        mut reader: StorageReader<'a>,
    ) -> StorageResult<String> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data).await?;
        self.objects
            .lock()
            .unwrap()
            .insert(storage_key.to_string(), data);
        Ok(format!("memory://{}", storage_key))
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        Ok(self.objects.lock().unwrap().contains_key(storage_key))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }

    fn target(&self) -> String {
        "memory".to_string()
    }
}

/// Storage whose every write fails with the given message.
pub struct FailingStorage {
    message: String,
}

impl FailingStorage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl Storage for FailingStorage {
    async fn upload_stream<'a>(
        &self,
        _storage_key: &str,
        _content_type: &str,
        _reader: StorageReader<'a>,
    ) -> StorageResult<String> {
        Err(StorageError::UploadFailed(self.message.clone()))
    }

    async fn exists(&self, _storage_key: &str) -> StorageResult<bool> {
        Ok(false)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }

    fn target(&self) -> String {
        "s3://unreachable".to_string()
    }
}
