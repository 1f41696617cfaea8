//! Wire types for the HTTP API

use crate::core::providers::InferenceProvider;
use crate::core::router::DispatchOutcome;
use crate::core::types::{Payload, RequestMode};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Successful `/v1/generate` response
///
/// Text results carry `text`; image results carry base64 `image` plus
/// `mimeType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub provider_name: String,
    pub model_id: String,
    /// Tries across all providers, including the one that succeeded
    pub attempts: u32,
    pub latency_ms: u64,
}

impl From<DispatchOutcome> for GenerateResponse {
    fn from(outcome: DispatchOutcome) -> Self {
        let attempts = outcome.total_attempts();
        let latency_ms = outcome.latency.as_millis() as u64;
        let result = outcome.result;
        let (text, image, mime_type) = match result.payload {
            Payload::Text(text) => (Some(text), None, None),
            Payload::Binary { mime_type, data } => (None, Some(STANDARD.encode(&data)), Some(mime_type)),
        };
        Self {
            text,
            image,
            mime_type,
            provider_name: result.provider_name,
            model_id: result.model_id,
            attempts,
            latency_ms,
        }
    }
}

/// Health check body
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: Cow<'static, str>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: Cow<'static, str>,
}

/// One entry of `/v1/providers`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub name: String,
    pub priority: i32,
    pub modes: Vec<RequestMode>,
    pub configured: bool,
}

impl ProviderInfo {
    pub fn from_provider(provider: &dyn InferenceProvider) -> Self {
        Self {
            name: provider.name().to_string(),
            priority: provider.priority(),
            modes: provider.descriptor().modes(),
            configured: provider.is_configured(),
        }
    }
}
