//! # inference-dispatch
//!
//! Resilient multi-provider inference dispatcher. A request goes to the
//! highest-priority vendor able to serve its mode; failures are classified,
//! retried locally with exponential backoff when transient, and otherwise
//! failed over to the next vendor until one succeeds, all are exhausted or
//! the dispatch budget runs out.
//!
//! ## Features
//!
//! - **Error classification**: every failure maps to one of eight kinds with a
//!   fixed retryability
//! - **Bounded calls**: per-call deadline, whole-dispatch budget and
//!   cancellation
//! - **Failover**: priority order with per-mode preferred providers
//! - **Vendors**: OpenRouter, HuggingFace, Together AI and AI Horde
//!
//! ## Library use
//!
//! ```rust,no_run
//! use inference_dispatch::core::providers::{HttpTransport, build_registry};
//! use inference_dispatch::core::router::Dispatcher;
//! use inference_dispatch::core::types::{InferenceRequest, RequestMode};
//! use inference_dispatch::Config;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let registry = build_registry(config.providers(), HttpTransport::new("my-app")?)?;
//!     let dispatcher = Dispatcher::new(Arc::new(registry), config.dispatch().to_router_config());
//!
//!     let request = InferenceRequest::new("Explain backoff", RequestMode::Chat);
//!     let outcome = dispatcher.dispatch(&request).await?;
//!     println!("{} answered: {:?}", outcome.result.provider_name, outcome.result.payload);
//!     Ok(())
//! }
//! ```
//!
//! ## Gateway Mode
//!
//! ```rust,no_run
//! use inference_dispatch::{Config, server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     server::run_server(config).await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::providers::{InferenceProvider, ProviderRegistry, ProviderType};
pub use core::router::{DispatchError, DispatchOutcome, Dispatcher, ErrorKind, RouterConfig};
pub use core::types::{InferenceRequest, InferenceResult, Payload, RequestMode};
pub use utils::error::{GatewayError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
