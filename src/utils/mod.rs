//! Utility modules for the gateway
//!
//! - **error**: Gateway error type and its HTTP rendering
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;

pub use error::{GatewayError, Result};
pub use logging::init_logging;
