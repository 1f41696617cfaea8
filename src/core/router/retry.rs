//! Retry with exponential backoff
//!
//! Retries one provider call while its failures classify as retryable.
//! Backoff is `min(max_delay, base_delay * 2^retry)`, so delays never decrease
//! and never exceed the cap. Sleeping suspends only the calling task.

use super::classifier::{ClassifiedError, classify};
use super::config::RouterConfig;
use crate::core::providers::transport::CallFailure;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Backoff parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first try
    pub max_retries: u32,
    /// Delay before the first retry
    pub base_delay: Duration,
    /// Cap for every delay
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl From<&RouterConfig> for RetryPolicy {
    fn from(config: &RouterConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: config.base_delay,
            max_delay: config.max_delay,
        }
    }
}

impl RetryPolicy {
    /// Total tries per provider
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay before retry number `retry` (0-based)
    pub fn delay_for(&self, retry: u32) -> Duration {
        2u32.checked_pow(retry)
            .and_then(|factor| self.base_delay.checked_mul(factor))
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }
}

/// Why the executor stopped retrying
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The failure is not retryable
    NotRetryable,
    /// All tries were used
    BudgetExhausted,
    /// The next backoff would overrun the caller's deadline
    DeadlineReached,
}

/// Terminal result of a retried operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryFailure {
    /// The last classified error, after `attempts` tries
    Failed {
        error: ClassifiedError,
        attempts: u32,
        reason: StopReason,
    },
    /// The caller cancelled during a try or a backoff
    Cancelled { attempts: u32 },
}

impl RetryFailure {
    pub fn attempts(&self) -> u32 {
        match self {
            RetryFailure::Failed { attempts, .. } | RetryFailure::Cancelled { attempts } => *attempts,
        }
    }
}

/// Successful value and the number of tries it took
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempted<T> {
    pub value: T,
    pub attempts: u32,
}

/// One failed try, as reported to the observer
#[derive(Debug, Clone)]
pub struct FailedAttempt<'a> {
    /// 0-based index of the try
    pub attempt_index: u32,
    pub error: &'a ClassifiedError,
    /// Backoff before the next try, if there will be one
    pub next_delay: Option<Duration>,
}

/// Bounds imposed by the caller on top of the policy
#[derive(Debug, Clone, Default)]
pub struct RetryBounds {
    /// No backoff may end after this instant
    pub deadline: Option<Instant>,
    pub cancel: CancellationToken,
}

/// Retry executor
#[derive(Debug, Clone, Default)]
pub struct RetryExecutor {
    policy: RetryPolicy,
}

impl RetryExecutor {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Execute `operation` with the policy's retry budget and no extra bounds
    pub async fn execute<T, F, Fut>(&self, operation: F) -> Result<Attempted<T>, RetryFailure>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, CallFailure>>,
    {
        self.execute_within(operation, &RetryBounds::default(), |_| {})
            .await
    }

    /// Execute `operation`, retrying retryable failures
    ///
    /// `operation` receives the 0-based try index. `observer` is told about
    /// every failed try before any backoff starts.
    pub async fn execute_within<T, F, Fut, O>(
        &self,
        mut operation: F,
        bounds: &RetryBounds,
        mut observer: O,
    ) -> Result<Attempted<T>, RetryFailure>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, CallFailure>>,
        O: FnMut(FailedAttempt<'_>),
    {
        let max_attempts = self.policy.max_attempts();
        let mut attempt = 0;

        loop {
            if bounds.cancel.is_cancelled() {
                return Err(RetryFailure::Cancelled { attempts: attempt });
            }

            let failure = match operation(attempt).await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!(attempt = attempt + 1, "Retry succeeded");
                    }
                    return Ok(Attempted {
                        value,
                        attempts: attempt + 1,
                    });
                }
                Err(CallFailure::Cancelled) => {
                    return Err(RetryFailure::Cancelled {
                        attempts: attempt + 1,
                    });
                }
                Err(failure) => failure,
            };

            let error = classify(&failure);
            let tries = attempt + 1;

            let stop = if !error.is_retryable() {
                Some(StopReason::NotRetryable)
            } else if tries >= max_attempts {
                Some(StopReason::BudgetExhausted)
            } else if bounds
                .deadline
                .is_some_and(|d| Instant::now() + self.policy.delay_for(attempt) >= d)
            {
                Some(StopReason::DeadlineReached)
            } else {
                None
            };

            let next_delay = stop.is_none().then(|| self.policy.delay_for(attempt));
            observer(FailedAttempt {
                attempt_index: attempt,
                error: &error,
                next_delay,
            });

            match (stop, next_delay) {
                (None, Some(delay)) => {
                    debug!(
                        attempt = tries,
                        kind = %error.kind(),
                        delay_ms = delay.as_millis() as u64,
                        "Attempt failed, retrying"
                    );
                    tokio::select! {
                        biased;
                        _ = bounds.cancel.cancelled() => {
                            return Err(RetryFailure::Cancelled { attempts: tries });
                        }
                        _ = tokio::time::sleep(delay) => {}
                    }
                    attempt += 1;
                }
                (stop, _) => {
                    let reason = stop.unwrap_or(StopReason::BudgetExhausted);
                    debug!(attempts = tries, kind = %error.kind(), ?reason, "Giving up on provider");
                    return Err(RetryFailure::Failed {
                        error,
                        attempts: tries,
                        reason,
                    });
                }
            }
        }
    }
}
