//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::router::Dispatcher;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// HTTP server state shared across handlers
///
/// Everything is behind `Arc`; cloning the state per worker is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Dispatch orchestrator over the frozen provider registry
    pub dispatcher: Arc<Dispatcher>,
    /// Fired on shutdown; every in-flight dispatch runs under a child token
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, dispatcher: Dispatcher) -> Self {
        Self {
            config: Arc::new(config),
            dispatcher: Arc::new(dispatcher),
            shutdown: CancellationToken::new(),
        }
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
