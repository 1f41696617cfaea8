//! Together AI Provider Implementation

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::core::providers::shared::{
    ChatCompletionRequest, ChatCompletionResponse, ProviderSettings, flatten_prompt, image_mime_type,
    select_model,
};
use crate::core::providers::transport::{CallContext, CallFailure, HttpTransport};
use crate::core::providers::{InferenceProvider, ProviderDescriptor};
use crate::core::types::{InferenceRequest, InferenceResult, RequestMode};

pub const DEFAULT_BASE_URL: &str = "https://api.together.xyz/v1";

const DEFAULT_MODELS: &[(RequestMode, &[&str])] = &[
    (
        RequestMode::Chat,
        &["meta-llama/Llama-3.3-70B-Instruct-Turbo-Free"],
    ),
    (
        RequestMode::Code,
        &["Qwen/Qwen2.5-Coder-32B-Instruct"],
    ),
    (
        RequestMode::Research,
        &["deepseek-ai/DeepSeek-R1-Distill-Llama-70B-free"],
    ),
    (
        RequestMode::Image,
        &["black-forest-labs/FLUX.1-schnell-Free"],
    ),
];

#[derive(Debug, Serialize)]
struct ImageGenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    steps: u32,
    width: u32,
    height: u32,
    response_format: &'static str,
}

#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    #[serde(default)]
    b64_json: Option<String>,
}

impl ImageGenerationResponse {
    fn into_image(self) -> Result<Vec<u8>, CallFailure> {
        let encoded = self
            .data
            .into_iter()
            .next()
            .and_then(|d| d.b64_json)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CallFailure::decode("response contained no image data"))?;

        STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| CallFailure::decode(format!("invalid base64 image: {}", e)))
    }
}

/// Together AI provider implementation
#[derive(Debug, Clone)]
pub struct TogetherProvider {
    settings: ProviderSettings,
    descriptor: ProviderDescriptor,
    transport: HttpTransport,
}

impl TogetherProvider {
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
        api_key: &str,
        request: &InferenceRequest,
        model: String,
        ctx: &CallContext,
    ) -> Result<InferenceResult, CallFailure> {
        let prompt = flatten_prompt(request);
        let body = ImageGenerationRequest {
            model: &model,
            prompt: &prompt,
            n: 1,
            steps: 4,
            width: 1024,
            height: 1024,
            response_format: "b64_json",
        };
        let url = self.settings.endpoint("images/generations");
        let response: ImageGenerationResponse = self
            .transport
            .post_json(&url, Some(api_key), &[], &body, ctx)
            .await?;

        let data = response.into_image()?;
        Ok(InferenceResult::binary(
            image_mime_type(&data),
            data,
            self.name(),
            model,
        ))
    }
}

#[async_trait]
impl InferenceProvider for TogetherProvider {
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
            .ok_or_else(|| CallFailure::other("Together API key not configured"))?;
        debug!(provider = %self.name(), model = %model, mode = %request.mode, "Calling Together AI");

        if request.mode.is_binary() {
            return self.generate_image(api_key, request, model, ctx).await;
        }

        let body = ChatCompletionRequest::new(&model, request);
        let url = self.settings.endpoint("chat/completions");
        let response: ChatCompletionResponse = self
            .transport
            .post_json(&url, Some(api_key), &[], &body, ctx)
            .await?;

        Ok(InferenceResult::text(response.into_text()?, self.name(), model))
    }
}
