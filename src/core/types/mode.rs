//! Request mode definitions
//!
//! The mode is the task category of a request. It decides which providers
//! are eligible to serve it and, for some modes, which provider is tried first.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task category of an inference request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum RequestMode {
    /// Conversational chat
    #[default]
    Chat,
    /// Code generation and review
    Code,
    /// Long-form research answers
    Research,
    /// Image generation
    Image,
}

impl RequestMode {
    /// All known modes, in declaration order
    pub const ALL: [RequestMode; 4] = [
        RequestMode::Chat,
        RequestMode::Code,
        RequestMode::Research,
        RequestMode::Image,
    ];

    /// Lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMode::Chat => "chat",
            RequestMode::Code => "code",
            RequestMode::Research => "research",
            RequestMode::Image => "image",
        }
    }

    /// Whether the mode produces a binary payload rather than text
    pub fn is_binary(&self) -> bool {
        matches!(self, RequestMode::Image)
    }
}

impl fmt::Display for RequestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a mode name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown request mode: {0}")]
pub struct UnknownModeError(pub String);

impl FromStr for RequestMode {
    type Err = UnknownModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chat" => Ok(RequestMode::Chat),
            "code" => Ok(RequestMode::Code),
            "research" => Ok(RequestMode::Research),
            "image" => Ok(RequestMode::Image),
            other => Err(UnknownModeError(other.to_string())),
        }
    }
}

impl TryFrom<String> for RequestMode {
    type Error = UnknownModeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
