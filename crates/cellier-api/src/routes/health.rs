//! Liveness endpoint, served outside the versioned API prefix.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Body reported by the liveness probe.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always "ok" while the process is serving.
    pub status: String,
    /// Crate version, to check what is deployed.
    pub version: String,
}

/// GET /health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Router for the liveness probe.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
