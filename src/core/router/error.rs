//! Dispatch error types
//!
//! Per-attempt failures are absorbed by retry and failover. Only these
//! terminal outcomes ever reach the caller.

use super::classifier::ClassifiedError;
use crate::core::types::RequestMode;

/// Terminal dispatch failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// No eligible provider was left to try
    #[error("No providers available for mode '{mode}'")]
    NoProvidersAvailable { mode: RequestMode },

    /// Every eligible provider failed, or the dispatch budget ran out
    #[error("All providers failed after {attempts} attempts: {last_error}")]
    Exhausted {
        attempts: u32,
        last_error: ClassifiedError,
    },

    /// The caller cancelled the request
    #[error("Dispatch cancelled after {attempts} attempts")]
    Cancelled { attempts: u32 },
}

impl DispatchError {
    /// Name used for `errorKind` in responses
    pub fn kind_name(&self) -> &'static str {
        match self {
            DispatchError::NoProvidersAvailable { .. } => "NoProvidersAvailable",
            DispatchError::Exhausted { last_error, .. } => last_error.kind().as_str(),
            DispatchError::Cancelled { .. } => "Cancelled",
        }
    }

    /// Most recent classified error, if any attempt was made
    pub fn last_error(&self) -> Option<&ClassifiedError> {
        match self {
            DispatchError::Exhausted { last_error, .. } => Some(last_error),
            _ => None,
        }
    }

    /// Total attempts made before the dispatch ended
    pub fn attempts(&self) -> u32 {
        match self {
            DispatchError::NoProvidersAvailable { .. } => 0,
            DispatchError::Exhausted { attempts, .. } | DispatchError::Cancelled { attempts } => {
                *attempts
            }
        }
    }
}
