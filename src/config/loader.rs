//! Configuration loading utilities
//!
//! Environment handling shared by file and env-only loading.

use super::models::*;
use crate::core::providers::ProviderType;
use std::env;
use tracing::{debug, warn};

/// Environment variable holding the API key for a provider type
pub fn api_key_env_var(kind: &ProviderType) -> Option<&'static str> {
    match kind {
        ProviderType::OpenRouter => Some("OPENROUTER_API_KEY"),
        ProviderType::HuggingFace => Some("HUGGINGFACE_API_KEY"),
        ProviderType::Together => Some("TOGETHER_API_KEY"),
        ProviderType::AiHorde => Some("AI_HORDE_API_KEY"),
        ProviderType::Custom(_) => None,
    }
}

/// Expand `${VAR}` references using `lookup`
///
/// Unresolved references expand to the empty string.
pub fn expand_with<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match lookup(name) {
                    Some(value) => output.push_str(&value),
                    None => warn!(variable = %name, "Environment variable not set"),
                }
                rest = &after[end + 1..];
            }
            None => {
                // Unterminated reference, keep it verbatim
                output.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    output.push_str(rest);
    output
}

impl GatewayConfig {
    /// Load configuration from environment variables
    ///
    /// Starts from the built-in four-provider setup; `GATEWAY_HOST`,
    /// `GATEWAY_PORT` and the per-vendor API key variables override it.
    pub fn from_env() -> crate::utils::error::Result<Self> {
        debug!("Loading configuration from environment variables");

        let mut config = Self::default();
        if let Ok(host) = env::var("GATEWAY_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = env::var("GATEWAY_PORT") {
            config.server.port = port.parse().map_err(|_| {
                crate::utils::error::GatewayError::config(format!("Invalid GATEWAY_PORT '{}'", port))
            })?;
        }

        config.resolve_api_keys(|name| env::var(name).ok());
        Ok(config)
    }

    /// Expand `${VAR}` references in API keys, then fill still-empty keys
    /// from the vendor's conventional variable
    pub fn resolve_api_keys<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for provider in &mut self.providers {
            if provider.api_key.contains("${") {
                provider.api_key = expand_with(&provider.api_key, &lookup);
            }
            if provider.api_key.trim().is_empty() {
                if let Some(key) = api_key_env_var(&provider.kind()).and_then(&lookup) {
                    debug!(provider = %provider.name, "Using API key from environment");
                    provider.api_key = key;
                }
            }
        }
    }
}
