//! Logging setup
//!
//! Filtering follows `RUST_LOG`, defaulting to `info` for this crate and
//! `warn` for dependencies.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "warn,inference_dispatch=info,dispatch_gateway=info";

/// Filter from `RUST_LOG`, or the default when unset or invalid
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber
///
/// `json` switches to one JSON object per line for log shippers. Returns an
/// error if a global subscriber is already installed.
pub fn init_logging(json: bool) -> Result<(), tracing_subscriber::util::TryInitError> {
    let registry = tracing_subscriber::registry().with(env_filter());

    if json {
        registry
            .with(fmt::layer().json().with_current_span(true).with_target(true))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_thread_ids(false))
            .try_init()
    }
}
