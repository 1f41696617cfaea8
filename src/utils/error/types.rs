//! Error types for the Gateway

use crate::core::providers::RegistryError;
use crate::core::router::DispatchError;
use thiserror::Error;

/// Result type alias for the Gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the Gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Request validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown route
    #[error("Not found: {0}")]
    NotFound(String),

    /// Terminal dispatch failures
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// Provider registration errors
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}
