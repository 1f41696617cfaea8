//! HTTP route modules
//!
//! This module contains all HTTP route handlers organized by functionality.

pub mod generate;
pub mod health;

use crate::utils::error::{GatewayError, Result};
use actix_web::{HttpRequest, HttpResponse, web};

/// Register every route on the app
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(generate::configure_routes)
        .default_service(web::to(not_found));
}

/// Fallback for unknown paths
async fn not_found(req: HttpRequest) -> Result<HttpResponse> {
    Err(GatewayError::not_found(format!(
        "No route for {} {}",
        req.method(),
        req.path()
    )))
}
