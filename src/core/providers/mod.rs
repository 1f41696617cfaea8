//! AI provider adapters
//!
//! Each vendor is an [`InferenceProvider`] implementation exposing one
//! capability, `generate_text`. The router never inspects concrete types; it
//! works purely through the trait and the provider's [`ProviderDescriptor`].

// Provider modules
pub mod ai_horde;
pub mod huggingface;
pub mod openrouter;
pub mod together;

// Shared infrastructure
pub mod factory;
pub mod provider_registry;
pub mod shared;
pub mod transport;

use crate::core::types::{InferenceRequest, InferenceResult, RequestMode};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::time::Duration;

pub use factory::{build_provider, build_registry};
pub use provider_registry::{ProviderRegistry, RegistryError};
pub use transport::{CallContext, CallFailure, HttpTransport};

/// Provider type enumeration
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ProviderType {
    OpenRouter,
    HuggingFace,
    Together,
    AiHorde,
    Custom(String),
}

impl From<&str> for ProviderType {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "openrouter" | "open-router" => ProviderType::OpenRouter,
            "huggingface" | "hugging-face" | "hf" => ProviderType::HuggingFace,
            "together" | "together_ai" | "togetherai" | "together-ai" => ProviderType::Together,
            "ai_horde" | "aihorde" | "ai-horde" | "horde" | "stablehorde" => ProviderType::AiHorde,
            _ => ProviderType::Custom(s.to_string()),
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderType::OpenRouter => write!(f, "openrouter"),
            ProviderType::HuggingFace => write!(f, "huggingface"),
            ProviderType::Together => write!(f, "together"),
            ProviderType::AiHorde => write!(f, "ai_horde"),
            ProviderType::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// Static description of a provider: identity, priority and supported modes
///
/// The first model listed for a mode is that mode's default model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderDescriptor {
    name: String,
    priority: i32,
    capabilities: HashMap<RequestMode, Vec<String>>,
}

impl ProviderDescriptor {
    /// Create a descriptor with no supported modes
    pub fn new(name: impl Into<String>, priority: i32) -> Self {
        Self {
            name: name.into(),
            priority,
            capabilities: HashMap::new(),
        }
    }

    /// Declare support for a mode (builder pattern)
    ///
    /// A mode declared with no models is not considered supported.
    pub fn with_mode<I, S>(mut self, mode: RequestMode, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capabilities
            .insert(mode, models.into_iter().map(Into::into).collect());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lower value is tried first
    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn supports(&self, mode: RequestMode) -> bool {
        self.capabilities
            .get(&mode)
            .is_some_and(|models| !models.is_empty())
    }

    /// Models declared for `mode`, default first
    pub fn models_for(&self, mode: RequestMode) -> &[String] {
        self.capabilities
            .get(&mode)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Supported modes in declaration order of [`RequestMode::ALL`]
    pub fn modes(&self) -> Vec<RequestMode> {
        RequestMode::ALL
            .into_iter()
            .filter(|mode| self.supports(*mode))
            .collect()
    }

    /// Pick the model for a request: the first hint this provider declares for
    /// the mode, else the mode's default model
    pub fn resolve_model(&self, mode: RequestMode, hints: &[String]) -> Option<&str> {
        let models = self.models_for(mode);
        hints
            .iter()
            .find_map(|hint| models.iter().find(|m| *m == hint))
            .or_else(|| models.first())
            .map(String::as_str)
    }
}

/// Uniform provider interface
///
/// Adapters own their vendor's HTTP contract (endpoint, auth header, payload
/// shape) and report failures as raw [`CallFailure`]s; classification and
/// retry happen in the router.
#[async_trait]
pub trait InferenceProvider: Send + Sync + Debug {
    /// Identity, priority and supported modes
    fn descriptor(&self) -> &ProviderDescriptor;

    fn name(&self) -> &str {
        self.descriptor().name()
    }

    fn priority(&self) -> i32 {
        self.descriptor().priority()
    }

    fn supports_mode(&self, mode: RequestMode) -> bool {
        self.descriptor().supports(mode)
    }

    /// Whether credentials and enable flags make this provider usable
    fn is_configured(&self) -> bool {
        true
    }

    /// Per-call timeout for this provider, if it differs from the router's
    fn call_timeout(&self) -> Option<Duration> {
        None
    }

    /// Generate content for `request` within the bounds of `ctx`
    async fn generate_text(
        &self,
        request: &InferenceRequest,
        ctx: &CallContext,
    ) -> Result<InferenceResult, CallFailure>;
}
