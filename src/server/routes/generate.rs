//! Inference endpoint

use crate::core::types::InferenceRequest;
use crate::server::state::AppState;
use crate::server::types::GenerateResponse;
use crate::utils::error::GatewayError;
use actix_web::{HttpResponse, web};
use tracing::{info, warn};

/// Configure inference routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/v1/generate", web::post().to(generate));
}

/// Dispatch one request to the first provider able to serve it
///
/// The dispatch is cancelled if the client goes away or the server shuts
/// down.
pub async fn generate(
    state: web::Data<AppState>,
    request: web::Json<InferenceRequest>,
) -> Result<HttpResponse, GatewayError> {
    let request = request.into_inner();
    if let Err(e) = request.validate() {
        warn!("Invalid generate request: {}", e);
        return Err(GatewayError::validation(e));
    }

    info!(mode = %request.mode, hints = request.model_hints.len(), "Generate request");

    let cancel = state.shutdown.child_token();
    // Dropping the handler future (client disconnect) cancels the dispatch
    let _guard = cancel.clone().drop_guard();

    let outcome = state
        .dispatcher
        .dispatch_with_cancel(&request, cancel)
        .await?;

    Ok(HttpResponse::Ok().json(GenerateResponse::from(outcome)))
}
