//! Shared utilities for all providers
//!
//! Settings every adapter carries, plus the OpenAI-compatible chat schema
//! spoken by OpenRouter and Together.

use super::transport::CallFailure;
use super::ProviderDescriptor;
use crate::core::types::{InferenceRequest, RequestMode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

// ============================================================================
// Adapter settings
// ============================================================================

/// Settings common to every adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub name: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub priority: i32,
    pub enabled: bool,
    /// Models per mode; the first entry is the default
    pub models: HashMap<RequestMode, Vec<String>>,
    /// Per-call timeout overriding the router default
    pub timeout: Option<Duration>,
}

impl ProviderSettings {
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            api_key: None,
            base_url: base_url.into(),
            priority: 0,
            enabled: true,
            models: HashMap::new(),
            timeout: None,
        }
    }

    /// Set API key; blank keys count as absent
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let key = api_key.into();
        self.api_key = (!key.trim().is_empty()).then_some(key);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set models for a mode, replacing any previous list
    pub fn with_models<I, S>(mut self, mode: RequestMode, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models
            .insert(mode, models.into_iter().map(Into::into).collect());
        self
    }

    /// Fill in modes not configured explicitly
    pub fn or_default_models(mut self, defaults: &[(RequestMode, &[&str])]) -> Self {
        for (mode, models) in defaults {
            self.models
                .entry(*mode)
                .or_insert_with(|| models.iter().map(|m| m.to_string()).collect());
        }
        self
    }

    pub fn descriptor(&self) -> ProviderDescriptor {
        self.models
            .iter()
            .fold(
                ProviderDescriptor::new(&self.name, self.priority),
                |descriptor, (mode, models)| descriptor.with_mode(*mode, models.iter().cloned()),
            )
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Join a path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Model for the request's mode, honouring hints
pub fn select_model(
    descriptor: &ProviderDescriptor,
    request: &InferenceRequest,
) -> Result<String, CallFailure> {
    descriptor
        .resolve_model(request.mode, &request.model_hints)
        .map(str::to_string)
        .ok_or_else(|| {
            CallFailure::other(format!(
                "{} has no model configured for mode '{}'",
                descriptor.name(),
                request.mode
            ))
        })
}

// ============================================================================
// OpenAI-compatible chat schema
// ============================================================================

/// Chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// `POST /chat/completions` body
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>, request: &InferenceRequest) -> Self {
        Self {
            model: model.into(),
            messages: build_messages(request),
            max_tokens: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first choice; empty output is a decode failure
    pub fn into_text(self) -> Result<String, CallFailure> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| CallFailure::decode("response contained no completion text"))
    }
}

/// System prompt (when non-empty) followed by the user prompt
pub fn build_messages(request: &InferenceRequest) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(2);
    if !request.system_prompt.trim().is_empty() {
        messages.push(ChatMessage::system(&request.system_prompt));
    }
    messages.push(ChatMessage::user(&request.prompt));
    messages
}

/// Single prompt string for completion-style APIs
pub fn flatten_prompt(request: &InferenceRequest) -> String {
    if request.system_prompt.trim().is_empty() {
        request.prompt.clone()
    } else {
        format!("{}\n\n{}", request.system_prompt, request.prompt)
    }
}

/// Guess an image type from its magic bytes
pub fn image_mime_type(data: &[u8]) -> &'static str {
    match data {
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        _ => "application/octet-stream",
    }
}
