//! Scripted providers for router tests

use crate::core::providers::{
    CallContext, CallFailure, InferenceProvider, ProviderDescriptor, ProviderRegistry,
};
use crate::core::router::config::RouterConfig;
use crate::core::types::{InferenceRequest, InferenceResult, RequestMode};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// Provider whose responses are scripted up front
///
/// Queued outcomes are consumed first; once empty, `fallback` repeats forever.
#[derive(Debug)]
pub(crate) struct ScriptedProvider {
    descriptor: ProviderDescriptor,
    queue: Mutex<VecDeque<Result<(), CallFailure>>>,
    fallback: Result<(), CallFailure>,
    latency: Option<Duration>,
    calls: AtomicU32,
    call_times: Mutex<Vec<Instant>>,
}

impl ScriptedProvider {
    pub(crate) fn healthy(name: &str, priority: i32) -> Self {
        Self::new(name, priority, Ok(()))
    }

    pub(crate) fn failing(name: &str, priority: i32, failure: CallFailure) -> Self {
        Self::new(name, priority, Err(failure))
    }

    pub(crate) fn status(name: &str, priority: i32, status: u16) -> Self {
        Self::failing(
            name,
            priority,
            CallFailure::Http {
                status,
                body: format!("status {}", status),
            },
        )
    }

    fn new(name: &str, priority: i32, fallback: Result<(), CallFailure>) -> Self {
        let descriptor = ProviderDescriptor::new(name, priority)
            .with_mode(RequestMode::Chat, [format!("{}-chat", name)])
            .with_mode(RequestMode::Code, [format!("{}-code", name)]);
        Self {
            descriptor,
            queue: Mutex::new(VecDeque::new()),
            fallback,
            latency: None,
            calls: AtomicU32::new(0),
            call_times: Mutex::new(Vec::new()),
        }
    }

    /// Also serve `mode` (builder pattern)
    pub(crate) fn with_mode(mut self, mode: RequestMode) -> Self {
        let model = format!("{}-{}", self.descriptor.name(), mode);
        self.descriptor = self.descriptor.with_mode(mode, [model]);
        self
    }

    /// Queue outcomes consumed before the fallback (builder pattern)
    pub(crate) fn then(self, outcome: Result<(), CallFailure>) -> Self {
        self.queue.lock().unwrap().push_back(outcome);
        self
    }

    /// Take this long to answer (builder pattern)
    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub(crate) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn call_times(&self) -> Vec<Instant> {
        self.call_times.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceProvider for ScriptedProvider {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    async fn generate_text(
        &self,
        request: &InferenceRequest,
        _ctx: &CallContext,
    ) -> Result<InferenceResult, CallFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.call_times.lock().unwrap().push(Instant::now());

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let outcome = self
            .queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        outcome.map(|()| {
            let model = self
                .descriptor
                .resolve_model(request.mode, &request.model_hints)
                .unwrap_or("unknown")
                .to_string();
            InferenceResult::text(format!("answer from {}", self.name()), self.name(), model)
        })
    }
}

/// Registry over the given providers, in the given order
pub(crate) fn registry(providers: &[Arc<ScriptedProvider>]) -> Arc<ProviderRegistry> {
    let mut registry = ProviderRegistry::new();
    for provider in providers {
        registry
            .register(Arc::clone(provider) as Arc<dyn InferenceProvider>)
            .unwrap();
    }
    Arc::new(registry)
}

/// Router config with the default retry budget and short, exact delays
pub(crate) fn fast_config() -> RouterConfig {
    RouterConfig::default()
        .with_backoff(Duration::from_millis(100), Duration::from_millis(1000))
        .with_timeouts(Duration::from_secs(5), Duration::from_secs(60))
}

pub(crate) fn chat(prompt: &str) -> InferenceRequest {
    InferenceRequest::new(prompt, RequestMode::Chat)
}
