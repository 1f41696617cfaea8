//! Dispatch configuration

use super::*;
use crate::core::router::RouterConfig;
use crate::core::types::RequestMode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Retry, deadline and provider-pinning settings as written in config files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchSettings {
    /// Retries per provider after the first attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// First backoff delay in milliseconds
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    /// Backoff cap in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    /// Per-call timeout in seconds
    #[serde(default = "default_call_timeout")]
    pub call_timeout: u64,
    /// Whole-dispatch budget in seconds
    #[serde(default = "default_total_timeout")]
    pub total_timeout: u64,
    /// Provider tried first for a mode, ahead of priority order
    #[serde(default = "default_preferred_providers")]
    pub preferred_providers: HashMap<RequestMode, String>,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            call_timeout: default_call_timeout(),
            total_timeout: default_total_timeout(),
            preferred_providers: default_preferred_providers(),
        }
    }
}

/// Research and image requests go to Together first
pub fn default_preferred_providers() -> HashMap<RequestMode, String> {
    HashMap::from([
        (RequestMode::Research, "together".to_string()),
        (RequestMode::Image, "together".to_string()),
    ])
}

impl DispatchSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.call_timeout == 0 {
            return Err("Call timeout cannot be 0".to_string());
        }
        if self.total_timeout == 0 {
            return Err("Total timeout cannot be 0".to_string());
        }
        if self.max_delay_ms < self.base_delay_ms {
            return Err(format!(
                "max_delay_ms ({}) cannot be smaller than base_delay_ms ({})",
                self.max_delay_ms, self.base_delay_ms
            ));
        }
        Ok(())
    }

    /// Router settings these values describe
    pub fn to_router_config(&self) -> RouterConfig {
        RouterConfig {
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.base_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
            call_timeout: Duration::from_secs(self.call_timeout),
            total_timeout: Duration::from_secs(self.total_timeout),
            preferred_providers: self.preferred_providers.clone(),
        }
    }
}
