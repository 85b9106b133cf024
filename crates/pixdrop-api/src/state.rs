//! Application state shared by all handlers.

use pixdrop_core::Config;
use pixdrop_storage::Storage;
use std::sync::Arc;

/// Read-only after startup: the single storage target and the extension allow-set.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub allowed_extensions: Vec<String>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, allowed_extensions: Vec<String>) -> Self {
        Self {
            storage,
            allowed_extensions,
        }
    }

    pub fn from_config(config: &Config, storage: Arc<dyn Storage>) -> Self {
        Self::new(storage, config.allowed_extensions().to_vec())
    }
}
