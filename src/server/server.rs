//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and its core methods.

use crate::config::{Config, CorsConfig, ServerConfig};
use crate::core::providers::{HttpTransport, build_registry};
use crate::core::router::Dispatcher;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_cors::Cors;
use actix_web::{App, HttpServer as ActixHttpServer, middleware::DefaultHeaders, web};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

/// User agent sent to every vendor
const USER_AGENT: &str = concat!("inference-dispatch/", env!("CARGO_PKG_VERSION"));

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    ///
    /// Builds the provider registry from configuration and freezes it behind
    /// the dispatcher.
    pub fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let transport = HttpTransport::new(USER_AGENT)?;
        let registry = build_registry(config.providers(), transport)?;
        let dispatcher = Dispatcher::new(
            Arc::new(registry),
            config.dispatch().to_router_config(),
        );

        Ok(Self::with_dispatcher(config.clone(), dispatcher))
    }

    /// Create a server around an existing dispatcher
    pub fn with_dispatcher(config: Config, dispatcher: Dispatcher) -> Self {
        Self {
            config: config.gateway.server.clone(),
            state: AppState::new(config, dispatcher),
        }
    }

    /// Build CORS middleware from configuration
    pub fn cors(cors_config: &CorsConfig) -> Cors {
        let mut cors = Cors::default();
        if !cors_config.enabled {
            return cors;
        }

        if cors_config.allows_all_origins() {
            cors = cors.allow_any_origin();
        } else {
            for origin in &cors_config.allowed_origins {
                cors = cors.allowed_origin(origin);
            }
        }

        let methods: Vec<actix_web::http::Method> = cors_config
            .allowed_methods
            .iter()
            .filter_map(|m| m.parse().ok())
            .collect();
        if !methods.is_empty() {
            cors = cors.allowed_methods(methods);
        }

        let headers: Vec<actix_web::http::header::HeaderName> = cors_config
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        if !headers.is_empty() {
            cors = cors.allowed_headers(headers);
        }

        cors.max_age(cors_config.max_age)
    }

    /// Shared app configuration: state, body limit and routes
    pub fn configure_app(state: web::Data<AppState>) -> impl FnOnce(&mut web::ServiceConfig) {
        move |cfg: &mut web::ServiceConfig| {
            let json_config = web::JsonConfig::default()
                .limit(state.config.server().max_body_size)
                .error_handler(|err, _req| GatewayError::validation(err.to_string()).into());
            cfg.app_data(state)
                .app_data(json_config)
                .configure(routes::configure_routes);
        }
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        info!("Starting HTTP server on {}", bind_addr);

        let shutdown = self.state.shutdown.clone();
        let state = web::Data::new(self.state);

        let mut server = ActixHttpServer::new(move || {
            let cors = Self::cors(&state.config.server().cors);
            App::new()
                .wrap(cors)
                .wrap(TracingLogger::default())
                .wrap(DefaultHeaders::new().add(("Server", "inference-dispatch")))
                .configure(Self::configure_app(state.clone()))
        });
        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }

        let server = server
            .bind(&bind_addr)
            .map_err(|e| {
                GatewayError::config(format!("Failed to bind to {}: {}", bind_addr, e))
            })?
            .run();

        info!("HTTP server listening on {}", bind_addr);
        info!("   GET  /health - Health check");
        info!("   GET  /v1/providers - Provider list");
        info!("   POST /v1/generate - Inference dispatch");

        // Actix drains in-flight requests on shutdown; cancel their dispatches
        // so they stop waiting out backoff or Horde polling
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown signal received, cancelling in-flight dispatches");
                shutdown.cancel();
            }
        });

        server.await.map_err(|e| {
            warn!(error = %e, "HTTP server error");
            GatewayError::Io(e)
        })?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
