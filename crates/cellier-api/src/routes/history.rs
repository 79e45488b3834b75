//! Routes over the history ledger.

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use cellier_history::application::service::{DEFAULT_MAX_AGE_DAYS, DEFAULT_RECENT_DAYS};
use cellier_history::domain::events::HistoryEvent;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct RecentParams {
    days: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct CleanupRequest {
    max_age_days: Option<u32>,
}

/// Result of a cleanup run.
#[derive(Debug, Serialize)]
pub struct CleanupResponse {
    /// Events remaining in the ledger.
    pub retained: usize,
}

/// GET / — the full ledger, most recent first.
async fn list_history(State(state): State<AppState>) -> Json<Vec<HistoryEvent>> {
    Json(state.history.history().await)
}

/// GET /recent?days=30
async fn recent_history(
    State(state): State<AppState>,
    Query(params): Query<RecentParams>,
) -> Json<Vec<HistoryEvent>> {
    let days = params.days.unwrap_or(DEFAULT_RECENT_DAYS);
    Json(state.history.recent(days).await)
}

/// GET /bottle/{id}
async fn bottle_history(
    State(state): State<AppState>,
    Path(bottle_id): Path<i64>,
) -> Json<Vec<HistoryEvent>> {
    Json(state.history.bottle_history(bottle_id).await)
}

/// POST /cleanup
async fn cleanup(
    State(state): State<AppState>,
    Json(request): Json<CleanupRequest>,
) -> Result<Json<CleanupResponse>, ApiError> {
    let max_age_days = request.max_age_days.unwrap_or(DEFAULT_MAX_AGE_DAYS);
    let retained = state.history.cleanup(max_age_days).await?;
    Ok(Json(CleanupResponse { retained }))
}

/// Returns the router for the history ledger.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_history))
        .route("/recent", get(recent_history))
        .route("/bottle/{id}", get(bottle_history))
        .route("/cleanup", post(cleanup))
}
