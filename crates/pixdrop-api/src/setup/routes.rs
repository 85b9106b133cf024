//! Route configuration and setup

use crate::constants::{HEALTH_PATH, UPLOAD_PATH};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(UPLOAD_PATH, post(handlers::upload::upload_file))
        .route(HEALTH_PATH, get(handlers::health::liveness_check))
        // Uploads are not size-limited
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
