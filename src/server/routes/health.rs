//! Health check and provider listing endpoints

use crate::server::state::AppState;
use crate::server::types::{HealthStatus, ProviderInfo};
use actix_web::{HttpResponse, Result as ActixResult, web};
use std::borrow::Cow;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/v1/providers", web::get().to(list_providers));
}

/// Basic health check endpoint
///
/// Returns a simple health status indicating if the service is running.
/// This endpoint is typically used by load balancers and monitoring systems.
pub async fn health_check() -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let health_status = HealthStatus {
        status: Cow::Borrowed("healthy"),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
    };

    Ok(HttpResponse::Ok().json(health_status))
}

/// Registered providers in registration order
async fn list_providers(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let providers: Vec<ProviderInfo> = state
        .dispatcher
        .registry()
        .all()
        .iter()
        .map(|p| ProviderInfo::from_provider(p.as_ref()))
        .collect();

    Ok(HttpResponse::Ok().json(providers))
}
