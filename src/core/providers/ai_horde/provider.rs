//! AI Horde Provider Implementation

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use super::models::{
    Generation, ImageJobRequest, ImageParams, JobStatus, JobSubmitted, TextJobRequest, TextParams,
};
use crate::core::providers::shared::{
    ProviderSettings, flatten_prompt, image_mime_type, select_model,
};
use crate::core::providers::transport::{CallContext, CallFailure, HttpTransport, with_deadline};
use crate::core::providers::{InferenceProvider, ProviderDescriptor};
use crate::core::types::{InferenceRequest, InferenceResult, RequestMode};

pub const DEFAULT_BASE_URL: &str = "https://stablehorde.net/api/v2";

/// Key accepted by the Horde for unauthenticated, lowest-priority use
pub const ANONYMOUS_API_KEY: &str = "0000000000";

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

const CLIENT_AGENT: &str = concat!("inference-dispatch:", env!("CARGO_PKG_VERSION"), ":unknown");

const DEFAULT_MODELS: &[(RequestMode, &[&str])] = &[
    (RequestMode::Chat, &["koboldcpp/LLaMA2-13B-Psyfighter2"]),
    (RequestMode::Image, &["stable_diffusion"]),
];

/// AI Horde provider implementation
#[derive(Debug, Clone)]
pub struct AiHordeProvider {
    settings: ProviderSettings,
    descriptor: ProviderDescriptor,
    transport: HttpTransport,
    poll_interval: Duration,
}

impl AiHordeProvider {
    pub fn new(settings: ProviderSettings, transport: HttpTransport) -> Self {
        let settings = settings.or_default_models(DEFAULT_MODELS);
        let descriptor = settings.descriptor();
        Self {
            settings,
            descriptor,
            transport,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Set the delay between status polls
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    fn api_key(&self) -> &str {
        self.settings.api_key().unwrap_or(ANONYMOUS_API_KEY)
    }

    fn request_headers(&self) -> [(&str, &str); 2] {
        [("apikey", self.api_key()), ("Client-Agent", CLIENT_AGENT)]
    }

    /// Submit a job and poll it until a worker finishes
    async fn run_job<B>(
        &self,
        submit_path: &str,
        status_path: &str,
        body: &B,
        ctx: &CallContext,
    ) -> Result<Generation, CallFailure>
    where
        B: Serialize + Sync,
    {
        let headers = self.request_headers();
        let submitted: JobSubmitted = self
            .transport
            .post_json(&self.settings.endpoint(submit_path), None, &headers, body, ctx)
            .await?;
        debug!(provider = %self.name(), job_id = %submitted.id, "Horde job submitted");

        let status_url = self
            .settings
            .endpoint(&format!("{}/{}", status_path, submitted.id));
        loop {
            tokio::time::sleep(self.poll_interval).await;

            let status: JobStatus = self
                .transport
                .get_json(&status_url, None, &headers, ctx)
                .await?;

            if status.faulted {
                return Err(CallFailure::other(format!(
                    "Horde job {} faulted",
                    submitted.id
                )));
            }
            if !status.is_possible {
                return Err(CallFailure::other(format!(
                    "No Horde worker can serve job {}",
                    submitted.id
                )));
            }
            if status.done {
                return status
                    .generations
                    .into_iter()
                    .next()
                    .ok_or_else(|| CallFailure::decode("finished job has no generations"));
            }
        }
    }

    async fn generate_text_job(
        &self,
        request: &InferenceRequest,
        model: String,
        ctx: &CallContext,
    ) -> Result<InferenceResult, CallFailure> {
        let prompt = flatten_prompt(request);
        let body = TextJobRequest {
            prompt: &prompt,
            params: TextParams::default(),
            models: vec![model.as_str()],
        };
        let generation = self
            .run_job("generate/text/async", "generate/text/status", &body, ctx)
            .await?;

        let text = generation
            .text
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| CallFailure::decode("generation contained no text"))?;
        let model_id = generation.model.unwrap_or(model);
        Ok(InferenceResult::text(text, self.name(), model_id))
    }

    async fn generate_image_job(
        &self,
        request: &InferenceRequest,
        model: String,
        ctx: &CallContext,
    ) -> Result<InferenceResult, CallFailure> {
        let body = ImageJobRequest {
            prompt: &request.prompt,
            params: ImageParams::default(),
            models: vec![model.as_str()],
            r2: false,
        };
        let generation = self
            .run_job("generate/async", "generate/status", &body, ctx)
            .await?;

        let encoded = generation
            .img
            .filter(|img| !img.is_empty())
            .ok_or_else(|| CallFailure::decode("generation contained no image"))?;
        let data = STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| CallFailure::decode(format!("invalid base64 image: {}", e)))?;
        let model_id = generation.model.unwrap_or(model);

        Ok(InferenceResult::binary(
            image_mime_type(&data),
            data,
            self.name(),
            model_id,
        ))
    }
}

#[async_trait]
impl InferenceProvider for AiHordeProvider {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    /// Always keyed, falling back to the anonymous key
    fn is_configured(&self) -> bool {
        self.settings.enabled
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

        // Polling must finish inside the per-call deadline
        with_deadline(ctx.timeout, &ctx.cancel, async {
            if request.mode.is_binary() {
                self.generate_image_job(request, model, ctx).await
            } else {
                self.generate_text_job(request, model, ctx).await
            }
        })
        .await
    }
}
