//! Application setup and initialization
//!
//! Everything built here is constructed once, before the listener starts, and
//! is read-only afterwards.

pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use pixdrop_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let storage = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState::from_config(&config, storage));

    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}
