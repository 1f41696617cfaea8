//! Provider configuration

use super::*;
use crate::core::providers::ProviderType;
use crate::core::types::RequestMode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Provider configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider name, unique within the gateway
    pub name: String,
    /// Provider type (openrouter, huggingface, together, ai_horde); defaults to `name`
    #[serde(default)]
    pub provider_type: String,
    /// API key; `${VAR}` references are resolved from the environment
    #[serde(default)]
    pub api_key: String,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<String>,
    /// Lower is tried first
    #[serde(default)]
    pub priority: i32,
    /// Whether provider is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Models per mode; the first entry is the default and unlisted modes use built-ins
    #[serde(default)]
    pub models: HashMap<RequestMode, Vec<String>>,
    /// Per-call timeout in seconds, overriding the dispatch default
    #[serde(default)]
    pub timeout: Option<u64>,
    /// Provider-specific settings (`site_url`, `site_name`, `poll_interval_ms`)
    #[serde(default)]
    pub settings: HashMap<String, serde_json::Value>,
}

impl ProviderConfig {
    pub fn new(name: impl Into<String>, priority: i32) -> Self {
        Self {
            name: name.into(),
            provider_type: String::new(),
            api_key: String::new(),
            base_url: None,
            priority,
            enabled: default_true(),
            models: HashMap::new(),
            timeout: None,
            settings: HashMap::new(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_type(mut self, provider_type: impl Into<String>) -> Self {
        self.provider_type = provider_type.into();
        self
    }

    /// Resolved provider type
    pub fn kind(&self) -> ProviderType {
        if self.provider_type.trim().is_empty() {
            ProviderType::from(self.name.as_str())
        } else {
            ProviderType::from(self.provider_type.as_str())
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    /// String setting, if present
    pub fn setting_str(&self, key: &str) -> Option<&str> {
        self.settings.get(key).and_then(|v| v.as_str())
    }

    /// Unsigned integer setting, if present
    pub fn setting_u64(&self, key: &str) -> Option<u64> {
        self.settings.get(key).and_then(|v| v.as_u64())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Provider name cannot be empty".to_string());
        }
        if let ProviderType::Custom(kind) = self.kind() {
            return Err(format!(
                "Unknown provider type '{}' for provider '{}'",
                kind, self.name
            ));
        }
        if self.timeout == Some(0) {
            return Err(format!("Timeout for provider '{}' cannot be 0", self.name));
        }
        if let Some(base_url) = &self.base_url {
            url::Url::parse(base_url)
                .map_err(|e| format!("Invalid base_url for provider '{}': {}", self.name, e))?;
        }
        Ok(())
    }
}
