//! Failure classification
//!
//! Turns a raw [`CallFailure`] into a [`ClassifiedError`] carrying one of eight
//! [`ErrorKind`]s and a retryability verdict.
//!
//! | Failure | Kind | Retryable |
//! |---|---|---|
//! | connection failure, no response | Network | Yes |
//! | 401 | Authentication | No |
//! | 403 | Authorization | No |
//! | 400, 422 | Validation | No |
//! | 429 | RateLimit | Yes |
//! | >= 500 | ServerFault | Yes |
//! | deadline exceeded | Timeout | Yes |
//! | anything else | Unknown | No |

use crate::core::providers::transport::CallFailure;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest vendor error body kept in a classified message
const MAX_BODY_CHARS: usize = 256;

/// Failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Network,
    Authentication,
    Authorization,
    Validation,
    RateLimit,
    ServerFault,
    Timeout,
    Unknown,
}

impl ErrorKind {
    /// Whether the same call may succeed if attempted again unchanged
    pub const fn is_retryable(self) -> bool {
        matches!(
            self,
            ErrorKind::RateLimit | ErrorKind::ServerFault | ErrorKind::Timeout | ErrorKind::Network
        )
    }

    /// Stable name used in logs and error bodies
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Network => "Network",
            ErrorKind::Authentication => "Authentication",
            ErrorKind::Authorization => "Authorization",
            ErrorKind::Validation => "Validation",
            ErrorKind::RateLimit => "RateLimit",
            ErrorKind::ServerFault => "ServerFault",
            ErrorKind::Timeout => "Timeout",
            ErrorKind::Unknown => "Unknown",
        }
    }

    /// Kind for an HTTP status that came back from a vendor
    pub const fn from_status(status: u16) -> Self {
        match status {
            401 => ErrorKind::Authentication,
            403 => ErrorKind::Authorization,
            400 | 422 => ErrorKind::Validation,
            429 => ErrorKind::RateLimit,
            s if s >= 500 => ErrorKind::ServerFault,
            _ => ErrorKind::Unknown,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed call, classified
///
/// Fields are private so `retryable` always agrees with `kind`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ClassifiedError {
    kind: ErrorKind,
    http_status: Option<u16>,
    message: String,
    retryable: bool,
}

impl ClassifiedError {
    /// Create a classified error; retryability is derived from `kind`
    pub fn new(kind: ErrorKind, http_status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            kind,
            http_status,
            message: message.into(),
            retryable: kind.is_retryable(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_retryable(&self) -> bool {
        self.retryable
    }
}

/// Classify a failed call
///
/// `Cancelled` is not a vendor failure; callers intercept it before
/// classification. If one does reach here it is reported as `Unknown`.
pub fn classify(failure: &CallFailure) -> ClassifiedError {
    match failure {
        CallFailure::Connect(message) => ClassifiedError::new(
            ErrorKind::Network,
            None,
            format!("Connection failed: {}", message),
        ),
        CallFailure::Http { status, body } => ClassifiedError::new(
            ErrorKind::from_status(*status),
            Some(*status),
            http_message(*status, body),
        ),
        CallFailure::DeadlineExceeded(deadline) => ClassifiedError::new(
            ErrorKind::Timeout,
            None,
            format!("Deadline of {:?} exceeded", deadline),
        ),
        CallFailure::Decode(message) => ClassifiedError::new(
            ErrorKind::Unknown,
            None,
            format!("Malformed provider response: {}", message),
        ),
        CallFailure::Cancelled => {
            ClassifiedError::new(ErrorKind::Unknown, None, "Call cancelled".to_string())
        }
        CallFailure::Other(message) => ClassifiedError::new(ErrorKind::Unknown, None, message.clone()),
    }
}

fn http_message(status: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return format!("HTTP {}", status);
    }

    let mut truncated: String = body.chars().take(MAX_BODY_CHARS).collect();
    if body.chars().count() > MAX_BODY_CHARS {
        truncated.push_str("...");
    }
    format!("HTTP {}: {}", status, truncated)
}
