//! Provider factory
//!
//! Turns configured provider entries into registered adapters.

use super::ai_horde::{self, AiHordeProvider};
use super::huggingface::{self, HuggingFaceProvider};
use super::openrouter::{self, OpenRouterProvider};
use super::shared::ProviderSettings;
use super::together::{self, TogetherProvider};
use super::{HttpTransport, InferenceProvider, ProviderRegistry, ProviderType};
use crate::config::ProviderConfig;
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Adapter settings for `config`, falling back to the vendor's base URL
fn settings_for(config: &ProviderConfig, default_base_url: &str) -> ProviderSettings {
    let mut settings = ProviderSettings::new(
        &config.name,
        config.base_url.as_deref().unwrap_or(default_base_url),
    )
    .with_api_key(&config.api_key)
    .with_priority(config.priority)
    .with_enabled(config.enabled);
    for (mode, models) in &config.models {
        settings = settings.with_models(*mode, models.iter().cloned());
    }
    if let Some(timeout) = config.timeout() {
        settings = settings.with_timeout(timeout);
    }
    settings
}

/// Create a provider from configuration
pub fn build_provider(
    config: &ProviderConfig,
    transport: HttpTransport,
) -> Result<Arc<dyn InferenceProvider>> {
    let provider: Arc<dyn InferenceProvider> = match config.kind() {
        ProviderType::OpenRouter => {
            let settings = settings_for(config, openrouter::DEFAULT_BASE_URL);
            Arc::new(OpenRouterProvider::new(settings, transport).with_site(
                config.setting_str("site_url").map(str::to_string),
                config.setting_str("site_name").map(str::to_string),
            ))
        }
        ProviderType::HuggingFace => {
            let settings = settings_for(config, huggingface::DEFAULT_BASE_URL);
            Arc::new(HuggingFaceProvider::new(settings, transport))
        }
        ProviderType::Together => {
            let settings = settings_for(config, together::DEFAULT_BASE_URL);
            Arc::new(TogetherProvider::new(settings, transport))
        }
        ProviderType::AiHorde => {
            let settings = settings_for(config, ai_horde::DEFAULT_BASE_URL);
            let mut horde = AiHordeProvider::new(settings, transport);
            if let Some(ms) = config.setting_u64("poll_interval_ms") {
                horde = horde.with_poll_interval(Duration::from_millis(ms));
            }
            Arc::new(horde)
        }
        ProviderType::Custom(name) => {
            return Err(GatewayError::config(format!(
                "Unknown provider type '{}' for provider '{}'",
                name, config.name
            )));
        }
    };
    Ok(provider)
}

/// Build the registry for every configured provider
///
/// Disabled or key-less providers are still registered so they can be listed;
/// the registry skips them when selecting.
pub fn build_registry(
    configs: &[ProviderConfig],
    transport: HttpTransport,
) -> Result<ProviderRegistry> {
    let mut registry = ProviderRegistry::new();
    for config in configs {
        let provider = build_provider(config, transport.clone())?;
        if provider.is_configured() {
            info!(
                provider = %provider.name(),
                priority = provider.priority(),
                modes = ?provider.descriptor().modes(),
                "Registered provider"
            );
        } else {
            warn!(provider = %provider.name(), "Provider registered but not configured");
        }
        registry.register(provider)?;
    }
    Ok(registry)
}
