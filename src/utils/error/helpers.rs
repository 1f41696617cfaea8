//! Helper functions for creating specific error types

use super::types::GatewayError;

impl GatewayError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    /// Value for `errorKind` in response bodies
    pub fn kind_name(&self) -> &'static str {
        match self {
            GatewayError::Dispatch(err) => err.kind_name(),
            GatewayError::Validation(_) | GatewayError::Serialization(_) => "Validation",
            GatewayError::NotFound(_) => "NotFound",
            GatewayError::Config(_) | GatewayError::Yaml(_) => "Configuration",
            _ => "Internal",
        }
    }
}
