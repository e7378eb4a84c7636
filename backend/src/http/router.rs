//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use super::handlers;
use super::state::AppState;

/// Largest accepted request body.
pub const BODY_LIMIT_BYTES: usize = 50 * 1024 * 1024;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/generate-pdf", post(handlers::generate_pdf))
        .fallback(handlers::not_found)
        // Allow large schedule payloads.
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
