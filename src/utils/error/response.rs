//! HTTP response handling for errors

use super::types::GatewayError;
use crate::core::router::{DispatchError, ErrorKind};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

/// Error body returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_kind: String,
    pub message: String,
}

/// HTTP status for a terminal dispatch failure
pub fn dispatch_status(err: &DispatchError) -> StatusCode {
    match err {
        DispatchError::NoProvidersAvailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        DispatchError::Exhausted { last_error, .. } => match last_error.kind() {
            ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
            ErrorKind::Authorization => StatusCode::FORBIDDEN,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::RateLimit => StatusCode::TOO_MANY_REQUESTS,
            ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ErrorKind::ServerFault | ErrorKind::Network | ErrorKind::Unknown => {
                StatusCode::BAD_GATEWAY
            }
        },
        DispatchError::Cancelled { .. } => StatusCode::BAD_GATEWAY,
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Dispatch(err) => dispatch_status(err),
            GatewayError::Validation(_) | GatewayError::Serialization(_) => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = if status.is_server_error() && !matches!(self, GatewayError::Dispatch(_)) {
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(status).json(ErrorResponse {
            error_kind: self.kind_name().to_string(),
            message,
        })
    }
}
