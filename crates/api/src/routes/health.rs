use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether an object store backs the gallery.
    pub blob_configured: bool,
    /// Whether the mailer has credentials.
    pub mail_configured: bool,
}

/// GET /health -- returns service status and which integrations are set up.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let mail_configured = state.dispatcher.mailer().is_configured();

    let status = if mail_configured { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        blob_configured: state.gallery.has_remote(),
        mail_configured,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
