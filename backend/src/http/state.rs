//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::AppConfig;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Layout, labels and page settings used for every render
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new application state with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
