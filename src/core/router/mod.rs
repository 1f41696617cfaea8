//! Resilient multi-provider routing
//!
//! This module decides which provider serves a request and how failures are
//! absorbed.
//!
//! ## Module Structure
//!
//! - `classifier` - Failure classification and retryability
//! - `config` - Retry, deadline and provider-pinning settings
//! - `error` - Terminal dispatch errors
//! - `retry` - Exponential backoff against a single provider
//! - `fallback` - Next-provider selection with mode preferences
//! - `dispatcher` - The dispatch state machine tying it all together

pub mod classifier;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod fallback;
pub mod retry;

#[cfg(test)]
mod tests;

pub use classifier::{ClassifiedError, ErrorKind, classify};
pub use config::RouterConfig;
pub use dispatcher::{DispatchAttempt, DispatchOutcome, Dispatcher};
pub use error::DispatchError;
pub use fallback::FallbackManager;
pub use retry::{RetryExecutor, RetryFailure, RetryPolicy, StopReason};
