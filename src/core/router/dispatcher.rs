//! Dispatch orchestration
//!
//! Drives one request through provider selection, local retries and failover
//! until it succeeds, runs out of providers, runs out of time or is cancelled.
//!
//! ```text
//!              ┌──────────── FailingOver <───────────┐
//!              v                                     │
//! start ──> Selecting ──> Attempting ──(failed)──────┘
//!              │              │
//!              │              └──(ok)──> Succeeded
//!              └──(none left / budget spent)──> Exhausted
//! ```
//!
//! Retrying the same provider happens inside `Attempting`, through the
//! [`RetryExecutor`]. Non-retryable failures skip local retries but still fail
//! over, since a different vendor may accept what this one rejected.

use super::classifier::{ClassifiedError, ErrorKind};
use super::config::RouterConfig;
use super::error::DispatchError;
use super::fallback::FallbackManager;
use super::retry::{Attempted, RetryBounds, RetryExecutor, RetryFailure, RetryPolicy};
use crate::core::providers::transport::{CallContext, with_deadline};
use crate::core::providers::{InferenceProvider, ProviderRegistry};
use crate::core::types::{InferenceRequest, InferenceResult};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

/// One try against one provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchAttempt {
    /// Provider name
    pub provider: String,
    /// 0-based try index against this provider
    pub attempt_index: u32,
    /// `None` for the try that succeeded
    pub error: Option<ClassifiedError>,
}

/// Successful dispatch with its attempt trail
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub result: InferenceResult,
    /// Every try in the order it happened
    pub attempts: Vec<DispatchAttempt>,
    /// Wall-clock time for the whole dispatch
    pub latency: Duration,
}

impl DispatchOutcome {
    pub fn total_attempts(&self) -> u32 {
        self.attempts.len() as u32
    }

    /// Whether a provider other than the first one tried served the request
    pub fn used_fallback(&self) -> bool {
        self.attempts
            .first()
            .is_some_and(|first| first.provider != self.result.provider_name)
    }

    /// Distinct providers in the order they were tried
    pub fn providers_tried(&self) -> Vec<&str> {
        let mut tried: Vec<&str> = Vec::new();
        for attempt in &self.attempts {
            if tried.last() != Some(&attempt.provider.as_str()) {
                tried.push(&attempt.provider);
            }
        }
        tried
    }
}

enum DispatchState {
    Selecting,
    Attempting(Arc<dyn InferenceProvider>),
    FailingOver {
        provider: String,
        error: ClassifiedError,
    },
    Succeeded(InferenceResult),
    Exhausted(DispatchError),
}

/// Per-dispatch bookkeeping; never shared between requests
struct DispatchRun<'a> {
    request: &'a InferenceRequest,
    deadline: Instant,
    cancel: CancellationToken,
    excluded: HashSet<String>,
    attempts: Vec<DispatchAttempt>,
    last_error: Option<ClassifiedError>,
}

impl DispatchRun<'_> {
    fn attempt_count(&self) -> u32 {
        self.attempts.len() as u32
    }

    fn exhausted(&self, fallback: ClassifiedError) -> DispatchError {
        DispatchError::Exhausted {
            attempts: self.attempt_count(),
            last_error: self.last_error.clone().unwrap_or(fallback),
        }
    }
}

/// Dispatch orchestrator
///
/// Constructed once at startup and shared by handle; holds no per-request
/// mutable state.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    fallback: FallbackManager,
    retry: RetryExecutor,
    config: RouterConfig,
}

impl Dispatcher {
    /// Create a dispatcher over a frozen registry
    pub fn new(registry: Arc<ProviderRegistry>, config: RouterConfig) -> Self {
        let fallback =
            FallbackManager::new(registry).with_preferences(config.preferred_providers.clone());
        let retry = RetryExecutor::new(RetryPolicy::from(&config));
        Self {
            fallback,
            retry,
            config,
        }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<ProviderRegistry> {
        self.fallback.registry()
    }

    pub fn fallback(&self) -> &FallbackManager {
        &self.fallback
    }

    /// Dispatch a request
    pub async fn dispatch(
        &self,
        request: &InferenceRequest,
    ) -> Result<DispatchOutcome, DispatchError> {
        self.dispatch_with_cancel(request, CancellationToken::new())
            .await
    }

    /// Dispatch a request, aborting in-flight work when `cancel` fires
    pub async fn dispatch_with_cancel(
        &self,
        request: &InferenceRequest,
        cancel: CancellationToken,
    ) -> Result<DispatchOutcome, DispatchError> {
        let span = info_span!(
            "dispatch",
            request_id = %Uuid::new_v4(),
            mode = %request.mode,
        );
        self.run(request, cancel).instrument(span).await
    }

    async fn run(
        &self,
        request: &InferenceRequest,
        cancel: CancellationToken,
    ) -> Result<DispatchOutcome, DispatchError> {
        let started = Instant::now();
        let mut run = DispatchRun {
            request,
            deadline: started + self.config.total_timeout,
            cancel,
            excluded: HashSet::new(),
            attempts: Vec::new(),
            last_error: None,
        };

        let mut state = DispatchState::Selecting;
        loop {
            state = match state {
                DispatchState::Selecting => self.select(&run),
                DispatchState::Attempting(provider) => self.attempt(&mut run, provider).await,
                DispatchState::FailingOver { provider, error } => {
                    warn!(
                        provider = %provider,
                        kind = %error.kind(),
                        status = ?error.http_status(),
                        "Provider failed, failing over"
                    );
                    run.excluded.insert(provider);
                    run.last_error = Some(error);
                    DispatchState::Selecting
                }
                DispatchState::Succeeded(result) => {
                    let latency = started.elapsed();
                    info!(
                        provider = %result.provider_name,
                        model = %result.model_id,
                        attempts = run.attempt_count(),
                        latency_ms = latency.as_millis() as u64,
                        "Dispatch succeeded"
                    );
                    return Ok(DispatchOutcome {
                        result,
                        attempts: run.attempts,
                        latency,
                    });
                }
                DispatchState::Exhausted(err) => {
                    error!(attempts = err.attempts(), error = %err, "Dispatch failed");
                    return Err(err);
                }
            };
        }
    }

    fn select(&self, run: &DispatchRun<'_>) -> DispatchState {
        if run.cancel.is_cancelled() {
            return DispatchState::Exhausted(DispatchError::Cancelled {
                attempts: run.attempt_count(),
            });
        }

        if Instant::now() >= run.deadline {
            let budget = ClassifiedError::new(
                ErrorKind::Timeout,
                None,
                format!(
                    "Dispatch budget of {:?} exhausted",
                    self.config.total_timeout
                ),
            );
            return DispatchState::Exhausted(run.exhausted(budget));
        }

        match self.fallback.next_provider(run.request.mode, &run.excluded) {
            Ok(provider) => DispatchState::Attempting(provider),
            Err(no_providers) => match &run.last_error {
                Some(last_error) => DispatchState::Exhausted(DispatchError::Exhausted {
                    attempts: run.attempt_count(),
                    last_error: last_error.clone(),
                }),
                None => DispatchState::Exhausted(no_providers),
            },
        }
    }

    async fn attempt(
        &self,
        run: &mut DispatchRun<'_>,
        provider: Arc<dyn InferenceProvider>,
    ) -> DispatchState {
        let name = provider.name().to_string();
        debug!(provider = %name, priority = provider.priority(), "Attempting provider");

        let request = run.request;
        let deadline = run.deadline;
        let call_timeout = provider.call_timeout().unwrap_or(self.config.call_timeout);
        let cancel = run.cancel.clone();
        let bounds = RetryBounds {
            deadline: Some(deadline),
            cancel: cancel.clone(),
        };
        let before = run.attempt_count();
        let attempts = &mut run.attempts;

        let outcome = self
            .retry
            .execute_within(
                |_| {
                    let provider = Arc::clone(&provider);
                    let cancel = cancel.clone();
                    async move {
                        // Per-call deadline never outlives the dispatch budget
                        let remaining = deadline.saturating_duration_since(Instant::now());
                        let timeout = call_timeout.min(remaining);
                        let ctx = CallContext::new(timeout, cancel.child_token());
                        with_deadline(timeout, &cancel, provider.generate_text(request, &ctx)).await
                    }
                },
                &bounds,
                |failed| {
                    attempts.push(DispatchAttempt {
                        provider: name.clone(),
                        attempt_index: failed.attempt_index,
                        error: Some(failed.error.clone()),
                    })
                },
            )
            .await;

        match outcome {
            Ok(Attempted { value, attempts }) => {
                run.attempts.push(DispatchAttempt {
                    provider: name,
                    attempt_index: attempts.saturating_sub(1),
                    error: None,
                });
                DispatchState::Succeeded(value)
            }
            Err(RetryFailure::Failed {
                error,
                attempts,
                reason,
            }) => {
                debug!(provider = %name, attempts, ?reason, "Provider attempts ended");
                DispatchState::FailingOver {
                    provider: name,
                    error,
                }
            }
            Err(RetryFailure::Cancelled { attempts }) => {
                DispatchState::Exhausted(DispatchError::Cancelled {
                    attempts: before + attempts,
                })
            }
        }
    }
}
