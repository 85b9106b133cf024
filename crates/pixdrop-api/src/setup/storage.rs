//! Storage setup and initialization

use anyhow::{Context, Result};
use pixdrop_core::Config;
use pixdrop_storage::{create_storage, Storage};
use std::sync::Arc;

/// Build the process-wide storage target from configuration.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage...");
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage")?;
    tracing::info!(
        backend = %storage.backend_type(),
        target = %storage.target(),
        "Storage initialized successfully"
    );
    Ok(storage)
}
