//! Main gateway configuration

use super::*;
use crate::core::providers::{ProviderType, ai_horde, huggingface, openrouter, together};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// Main gateway configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Retry, deadline and pinning settings
    #[serde(default)]
    pub dispatch: DispatchSettings,
    /// Provider configurations
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderConfig>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            dispatch: DispatchSettings::default(),
            providers: default_providers(),
        }
    }
}

/// The four built-in vendors, cheapest general-purpose first
pub fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::new("openrouter", 1).with_base_url(openrouter::DEFAULT_BASE_URL),
        ProviderConfig::new("huggingface", 2).with_base_url(huggingface::DEFAULT_BASE_URL),
        ProviderConfig::new("together", 3).with_base_url(together::DEFAULT_BASE_URL),
        ProviderConfig::new("ai_horde", 4).with_base_url(ai_horde::DEFAULT_BASE_URL),
    ]
}

impl GatewayConfig {
    /// Find a provider by name
    pub fn provider(&self, name: &str) -> Option<&ProviderConfig> {
        self.providers.iter().find(|p| p.name == name)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.server
            .validate()
            .map_err(|e| format!("Server config error: {}", e))?;
        self.dispatch
            .validate()
            .map_err(|e| format!("Dispatch config error: {}", e))?;

        if self.providers.is_empty() {
            return Err("At least one provider must be configured".to_string());
        }

        let mut provider_names = HashSet::new();
        for provider in &self.providers {
            provider.validate()?;
            if !provider_names.insert(provider.name.as_str()) {
                return Err(format!("Duplicate provider name: {}", provider.name));
            }
        }

        for (mode, name) in &self.dispatch.preferred_providers {
            match self.provider(name) {
                None => warn!(mode = %mode, provider = %name, "Preferred provider is not configured"),
                Some(p) if !p.enabled => {
                    warn!(mode = %mode, provider = %name, "Preferred provider is disabled")
                }
                Some(_) => {}
            }
        }

        let usable = self
            .providers
            .iter()
            .filter(|p| p.enabled && (!p.api_key.is_empty() || p.kind() == ProviderType::AiHorde))
            .count();
        if usable == 0 {
            warn!("No provider has credentials; every dispatch will fail");
        }

        Ok(())
    }
}
