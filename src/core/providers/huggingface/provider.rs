//! HuggingFace Provider Implementation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::core::providers::shared::{ProviderSettings, flatten_prompt, select_model};
use crate::core::providers::transport::{CallContext, CallFailure, HttpTransport};
use crate::core::providers::{InferenceProvider, ProviderDescriptor};
use crate::core::types::{InferenceRequest, InferenceResult, RequestMode};

pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";

const DEFAULT_MAX_NEW_TOKENS: u32 = 512;

const DEFAULT_MODELS: &[(RequestMode, &[&str])] = &[
    (
        RequestMode::Chat,
        &[
            "mistralai/Mistral-7B-Instruct-v0.3",
            "HuggingFaceH4/zephyr-7b-beta",
        ],
    ),
    (RequestMode::Code, &["bigcode/starcoder2-15b"]),
    (
        RequestMode::Image,
        &["stabilityai/stable-diffusion-xl-base-1.0"],
    ),
];

#[derive(Debug, Serialize)]
struct TextGenerationRequest<'a> {
    inputs: &'a str,
    parameters: TextGenerationParameters,
}

#[derive(Debug, Serialize)]
struct TextGenerationParameters {
    max_new_tokens: u32,
    return_full_text: bool,
}

#[derive(Debug, Serialize)]
struct ImageGenerationRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    #[serde(default)]
    generated_text: String,
}

/// Some models return a bare object instead of a one-element list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextGenerationResponse {
    Many(Vec<GeneratedText>),
    One(GeneratedText),
}

impl TextGenerationResponse {
    fn into_text(self) -> Result<String, CallFailure> {
        let first = match self {
            TextGenerationResponse::Many(items) => items.into_iter().next(),
            TextGenerationResponse::One(item) => Some(item),
        };
        first
            .map(|g| g.generated_text)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| CallFailure::decode("response contained no generated text"))
    }
}

/// HuggingFace provider implementation
#[derive(Debug, Clone)]
pub struct HuggingFaceProvider {
    settings: ProviderSettings,
    descriptor: ProviderDescriptor,
    transport: HttpTransport,
}

impl HuggingFaceProvider {
    pub fn new(settings: ProviderSettings, transport: HttpTransport) -> Self {
        let settings = settings.or_default_models(DEFAULT_MODELS);
        let descriptor = settings.descriptor();
        Self {
            settings,
            descriptor,
            transport,
        }
    }

    async fn generate_image(
        &self,
        url: &str,
        api_key: &str,
        request: &InferenceRequest,
        model: String,
        ctx: &CallContext,
    ) -> Result<InferenceResult, CallFailure> {
        let body = ImageGenerationRequest {
            inputs: &request.prompt,
        };
        let (content_type, data) = self
            .transport
            .post_for_bytes(url, Some(api_key), &[], &body, ctx)
            .await?;

        if !content_type.starts_with("image/") {
            return Err(CallFailure::decode(format!(
                "expected image content, got '{}'",
                content_type
            )));
        }
        if data.is_empty() {
            return Err(CallFailure::decode("image response was empty"));
        }

        Ok(InferenceResult::binary(content_type, data, self.name(), model))
    }
}

#[async_trait]
impl InferenceProvider for HuggingFaceProvider {
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
            .ok_or_else(|| CallFailure::other("HuggingFace API key not configured"))?;
        let url = self.settings.endpoint(&format!("models/{}", model));
        debug!(provider = %self.name(), model = %model, mode = %request.mode, "Calling HuggingFace inference");

        if request.mode.is_binary() {
            return self.generate_image(&url, api_key, request, model, ctx).await;
        }

        let prompt = flatten_prompt(request);
        let body = TextGenerationRequest {
            inputs: &prompt,
            parameters: TextGenerationParameters {
                max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
                return_full_text: false,
            },
        };
        let response: TextGenerationResponse = self
            .transport
            .post_json(&url, Some(api_key), &[], &body, ctx)
            .await?;

        Ok(InferenceResult::text(response.into_text()?, self.name(), model))
    }
}
