//! Fallback provider selection
//!
//! Picks the next provider to try for a mode. A mode may pin a preferred
//! provider that is tried before the general priority order; once it is
//! excluded, selection falls through to the priority-ordered eligible list.

use super::error::DispatchError;
use crate::core::providers::{InferenceProvider, ProviderRegistry};
use crate::core::types::RequestMode;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Fallback manager
#[derive(Debug, Clone)]
pub struct FallbackManager {
    registry: Arc<ProviderRegistry>,
    /// mode -> provider name tried first for that mode
    preferred: HashMap<RequestMode, String>,
}

impl FallbackManager {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self {
            registry,
            preferred: HashMap::new(),
        }
    }

    /// Pin a preferred provider for a mode (builder pattern)
    pub fn with_preferred(mut self, mode: RequestMode, provider: impl Into<String>) -> Self {
        self.preferred.insert(mode, provider.into());
        self
    }

    /// Replace all pinned providers (builder pattern)
    pub fn with_preferences(mut self, preferred: HashMap<RequestMode, String>) -> Self {
        self.preferred = preferred;
        self
    }

    pub fn registry(&self) -> &Arc<ProviderRegistry> {
        &self.registry
    }

    /// Pinned provider for a mode, if any
    pub fn preferred_for(&self, mode: RequestMode) -> Option<&str> {
        self.preferred.get(&mode).map(String::as_str)
    }

    /// All providers still worth trying, in the order they would be tried
    pub fn candidates(
        &self,
        mode: RequestMode,
        excluded: &HashSet<String>,
    ) -> Vec<Arc<dyn InferenceProvider>> {
        let mut candidates: Vec<_> = self
            .registry
            .list_eligible(mode)
            .into_iter()
            .filter(|p| !excluded.contains(p.name()))
            .collect();

        if let Some(preferred) = self.preferred_for(mode) {
            match candidates.iter().position(|p| p.name() == preferred) {
                Some(index) => {
                    let pinned = candidates.remove(index);
                    candidates.insert(0, pinned);
                }
                None if !excluded.contains(preferred) => debug!(
                    mode = %mode,
                    provider = preferred,
                    "Preferred provider not eligible, using priority order"
                ),
                None => {}
            }
        }

        candidates
    }

    /// Next provider to try; never one in `excluded`
    pub fn next_provider(
        &self,
        mode: RequestMode,
        excluded: &HashSet<String>,
    ) -> Result<Arc<dyn InferenceProvider>, DispatchError> {
        self.candidates(mode, excluded)
            .into_iter()
            .next()
            .ok_or(DispatchError::NoProvidersAvailable { mode })
    }
}
