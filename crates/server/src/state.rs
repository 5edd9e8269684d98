//! Application state shared across handlers.

use filecat_core::config::AppConfig;
use filecat_registry::FileRegistry;
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// File record registry.
    pub registry: Arc<dyn FileRegistry>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(config: AppConfig, registry: Arc<dyn FileRegistry>) -> Self {
        Self {
            config: Arc::new(config),
            registry,
        }
    }
}
