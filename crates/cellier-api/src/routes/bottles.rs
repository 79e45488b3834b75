//! Routes for bottle operations orchestrated through the cellar.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use cellier_cellar::domain::transitions::CellarOutcome;
use cellier_core::bottle::{Bottle, NewBottle};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct QuantityRequest {
    quantity: u32,
}

/// GET / — all bottles; backfills the ledger as a side effect.
async fn list_bottles(State(state): State<AppState>) -> Result<Json<Vec<Bottle>>, ApiError> {
    Ok(Json(state.cellar.list_bottles().await?))
}

/// POST / — create a bottle and record its `added` event.
async fn create_bottle(
    State(state): State<AppState>,
    Json(data): Json<NewBottle>,
) -> Result<Json<Bottle>, ApiError> {
    Ok(Json(state.cellar.add_bottle(data).await?))
}

/// POST /{id}/consume
async fn consume(
    State(state): State<AppState>,
    Path(bottle_id): Path<i64>,
    Json(request): Json<QuantityRequest>,
) -> Result<Json<CellarOutcome>, ApiError> {
    Ok(Json(state.cellar.consume(bottle_id, request.quantity).await?))
}

/// POST /{id}/remove
async fn remove(
    State(state): State<AppState>,
    Path(bottle_id): Path<i64>,
    Json(request): Json<QuantityRequest>,
) -> Result<Json<CellarOutcome>, ApiError> {
    Ok(Json(state.cellar.remove(bottle_id, request.quantity).await?))
}

/// Returns the router for bottle operations.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bottles).post(create_bottle))
        .route("/{id}/consume", post(consume))
        .route("/{id}/remove", post(remove))
}
