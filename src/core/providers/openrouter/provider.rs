//! OpenRouter Provider Implementation

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::core::providers::shared::{
    ChatCompletionRequest, ChatCompletionResponse, ProviderSettings, select_model,
};
use crate::core::providers::transport::{CallContext, CallFailure, HttpTransport};
use crate::core::providers::{InferenceProvider, ProviderDescriptor};
use crate::core::types::{InferenceRequest, InferenceResult, RequestMode};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

const DEFAULT_MODELS: &[(RequestMode, &[&str])] = &[
    (
        RequestMode::Chat,
        &[
            "mistralai/mistral-7b-instruct:free",
            "meta-llama/llama-3.2-3b-instruct:free",
        ],
    ),
    (RequestMode::Code, &["qwen/qwen-2.5-coder-32b-instruct:free"]),
    (RequestMode::Research, &["google/gemini-2.0-flash-exp:free"]),
];

/// OpenRouter provider implementation
#[derive(Debug, Clone)]
pub struct OpenRouterProvider {
    settings: ProviderSettings,
    descriptor: ProviderDescriptor,
    transport: HttpTransport,
    site_url: Option<String>,
    site_name: Option<String>,
}

impl OpenRouterProvider {
    /// Create a provider; modes without configured models get the defaults
    pub fn new(settings: ProviderSettings, transport: HttpTransport) -> Self {
        let settings = settings.or_default_models(DEFAULT_MODELS);
        let descriptor = settings.descriptor();
        Self {
            settings,
            descriptor,
            transport,
            site_url: None,
            site_name: None,
        }
    }

    /// Set attribution headers (`HTTP-Referer`, `X-Title`)
    pub fn with_site(mut self, site_url: Option<String>, site_name: Option<String>) -> Self {
        self.site_url = site_url;
        self.site_name = site_name;
        self
    }

    fn request_headers(&self) -> Vec<(&str, &str)> {
        let mut headers = Vec::with_capacity(2);
        if let Some(site_url) = &self.site_url {
            headers.push(("HTTP-Referer", site_url.as_str()));
        }
        if let Some(site_name) = &self.site_name {
            headers.push(("X-Title", site_name.as_str()));
        }
        headers
    }
}

#[async_trait]
impl InferenceProvider for OpenRouterProvider {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    fn is_configured(&self) -> bool {
        self.settings.enabled && self.settings.api_key().is_some()
    }

    fn call_timeout(&self) -> Option<Duration> {
        self.settings.timeout
    }

    async fn generate_text(
        &self,
        request: &InferenceRequest,
        ctx: &CallContext,
    ) -> Result<InferenceResult, CallFailure> {
        let model = select_model(&self.descriptor, request)?;
        let api_key = self
            .settings
            .api_key()
            .ok_or_else(|| CallFailure::other("OpenRouter API key not configured"))?;

        let body = ChatCompletionRequest::new(&model, request);
        let url = self.settings.endpoint("chat/completions");
        debug!(provider = %self.name(), model = %model, "Sending OpenRouter chat completion");

        let response: ChatCompletionResponse = self
            .transport
            .post_json(&url, Some(api_key), &self.request_headers(), &body, ctx)
            .await?;

        Ok(InferenceResult::text(response.into_text()?, self.name(), model))
    }
}
