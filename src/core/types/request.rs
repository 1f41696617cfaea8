//! Inbound inference request

use super::mode::RequestMode;
use serde::{Deserialize, Serialize};

/// A single inference request as received from the chat client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceRequest {
    /// User prompt
    pub prompt: String,
    /// System prompt prepended to the conversation
    #[serde(default)]
    pub system_prompt: String,
    /// Task category
    #[serde(default)]
    pub mode: RequestMode,
    /// Preferred model identifiers, most preferred first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub model_hints: Vec<String>,
}

impl InferenceRequest {
    /// Create a request with an empty system prompt and no model hints
    pub fn new(prompt: impl Into<String>, mode: RequestMode) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: String::new(),
            mode,
            model_hints: Vec::new(),
        }
    }

    /// Set the system prompt (builder pattern)
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    /// Add a model hint (builder pattern)
    pub fn with_model_hint(mut self, model: impl Into<String>) -> Self {
        self.model_hints.push(model.into());
        self
    }

    /// Reject requests that no provider could serve
    pub fn validate(&self) -> Result<(), String> {
        if self.prompt.trim().is_empty() {
            return Err("Prompt cannot be empty".to_string());
        }
        if self.model_hints.iter().any(|m| m.trim().is_empty()) {
            return Err("Model hints cannot contain empty identifiers".to_string());
        }
        Ok(())
    }
}
