//! Test fixtures and data factories

use inference_dispatch::config::ProviderConfig;
use inference_dispatch::core::types::{InferenceRequest, RequestMode};
use inference_dispatch::RouterConfig;
use std::time::Duration;

/// Factory for inference requests
pub struct RequestFactory;

impl RequestFactory {
    pub fn chat(prompt: &str) -> InferenceRequest {
        InferenceRequest::new(prompt, RequestMode::Chat).with_system_prompt("You are terse.")
    }

    pub fn image(prompt: &str) -> InferenceRequest {
        InferenceRequest::new(prompt, RequestMode::Image)
    }

    pub fn research(prompt: &str) -> InferenceRequest {
        InferenceRequest::new(prompt, RequestMode::Research)
    }
}

/// Provider config pointing at a mock server
pub fn mock_provider(name: &str, priority: i32, base_url: &str) -> ProviderConfig {
    ProviderConfig::new(name, priority)
        .with_api_key(format!("{}-test-key", name))
        .with_base_url(base_url)
}

/// Router settings with millisecond backoff so wall-clock tests stay fast
pub fn fast_router() -> RouterConfig {
    RouterConfig::default()
        .with_backoff(Duration::from_millis(10), Duration::from_millis(40))
        .with_timeouts(Duration::from_secs(2), Duration::from_secs(10))
}
