//! Server builder and run_server function

use crate::config::Config;
use crate::core::router::Dispatcher;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
    dispatcher: Option<Dispatcher>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a prebuilt dispatcher instead of building providers from config
    pub fn with_dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        match self.dispatcher {
            Some(dispatcher) => Ok(HttpServer::with_dispatcher(config, dispatcher)),
            None => HttpServer::new(&config),
        }
    }
}

/// Build the server from `config` and serve until shutdown
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting inference dispatch gateway");

    let server = ServerBuilder::new().with_config(config).build()?;
    info!(
        "Server starting at: http://{}",
        server.config().address()
    );

    server.start().await
}
