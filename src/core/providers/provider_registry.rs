//! Provider Registry
//!
//! Holds the vendor adapters registered at startup. The registry is built once,
//! then shared behind an `Arc` and only read; dispatches never lock it.

use super::InferenceProvider;
use crate::core::types::RequestMode;
use std::sync::Arc;

/// Registration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Provider already registered: {0}")]
    DuplicateProvider(String),

    #[error("Provider name cannot be empty")]
    EmptyName,
}

/// Provider Registry
#[derive(Default)]
pub struct ProviderRegistry {
    /// Registration order; used as the tie-breaker between equal priorities
    providers: Vec<Arc<dyn InferenceProvider>>,
}

impl ProviderRegistry {
    /// Create new provider registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider
    pub fn register(&mut self, provider: Arc<dyn InferenceProvider>) -> Result<(), RegistryError> {
        let name = provider.name();
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.contains(name) {
            return Err(RegistryError::DuplicateProvider(name.to_string()));
        }
        self.providers.push(provider);
        Ok(())
    }

    /// Register a provider (builder pattern)
    pub fn with_provider(
        mut self,
        provider: Arc<dyn InferenceProvider>,
    ) -> Result<Self, RegistryError> {
        self.register(provider)?;
        Ok(self)
    }

    /// Providers that support `mode` and are configured, ascending by priority
    pub fn list_eligible(&self, mode: RequestMode) -> Vec<Arc<dyn InferenceProvider>> {
        let mut eligible: Vec<_> = self
            .providers
            .iter()
            .filter(|p| p.supports_mode(mode) && p.is_configured())
            .cloned()
            .collect();
        // sort_by_key is stable, so registration order breaks ties
        eligible.sort_by_key(|p| p.priority());
        eligible
    }

    /// Get provider by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn InferenceProvider>> {
        self.providers.iter().find(|p| p.name() == name)
    }

    /// Check if provider is registered
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All registered providers in registration order
    pub fn all(&self) -> &[Arc<dyn InferenceProvider>] {
        &self.providers
    }

    /// Registered provider names
    pub fn names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("provider_count", &self.providers.len())
            .field("providers", &self.names())
            .finish()
    }
}
