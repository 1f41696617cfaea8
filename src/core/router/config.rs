//! Router configuration types
//!
//! Runtime settings for retry, deadlines and mode-specific provider pinning.

use crate::core::types::RequestMode;
use std::collections::HashMap;
use std::time::Duration;

/// Router configuration
///
/// ## Defaults
///
/// - `max_retries`: 3 (4 tries per provider)
/// - `base_delay`: 1s
/// - `max_delay`: 10s
/// - `call_timeout`: 30s
/// - `total_timeout`: 120s
/// - `preferred_providers`: none
#[derive(Debug, Clone, PartialEq)]
pub struct RouterConfig {
    /// Local retries against the same provider after the first try
    pub max_retries: u32,

    /// Backoff before the first retry
    pub base_delay: Duration,

    /// Upper bound for any single backoff
    pub max_delay: Duration,

    /// Deadline for one outbound call
    pub call_timeout: Duration,

    /// Wall-clock ceiling for a whole dispatch across all providers
    pub total_timeout: Duration,

    /// Provider tried first for a mode regardless of its general priority
    pub preferred_providers: HashMap<RequestMode, String>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
            call_timeout: Duration::from_secs(30),
            total_timeout: Duration::from_secs(120),
            preferred_providers: HashMap::new(),
        }
    }
}

impl RouterConfig {
    /// Pin a preferred provider for a mode (builder pattern)
    pub fn with_preferred(mut self, mode: RequestMode, provider: impl Into<String>) -> Self {
        self.preferred_providers.insert(mode, provider.into());
        self
    }

    /// Set the local retry budget (builder pattern)
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set backoff base and cap (builder pattern)
    pub fn with_backoff(mut self, base_delay: Duration, max_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self.max_delay = max_delay;
        self
    }

    /// Set per-call and whole-dispatch deadlines (builder pattern)
    pub fn with_timeouts(mut self, call_timeout: Duration, total_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self.total_timeout = total_timeout;
        self
    }
}
