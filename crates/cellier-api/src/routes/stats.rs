//! Routes for derived statistics.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use cellier_history::application::stats::{DEFAULT_STATS_MONTHS, LedgerSummary, MonthlyBucket};
use serde::Deserialize;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct MonthsParams {
    months: Option<u32>,
}

/// GET /monthly-consumption?months=12
async fn monthly_consumption(
    State(state): State<AppState>,
    Query(params): Query<MonthsParams>,
) -> Json<Vec<MonthlyBucket>> {
    let months = params.months.unwrap_or(DEFAULT_STATS_MONTHS);
    Json(state.history.monthly_consumption(months).await)
}

/// GET /monthly-additions?months=12
async fn monthly_additions(
    State(state): State<AppState>,
    Query(params): Query<MonthsParams>,
) -> Json<Vec<MonthlyBucket>> {
    let months = params.months.unwrap_or(DEFAULT_STATS_MONTHS);
    Json(state.history.monthly_additions(months).await)
}

/// GET /summary
async fn summary(State(state): State<AppState>) -> Json<LedgerSummary> {
    Json(state.history.summary().await)
}

/// Returns the router for the statistics endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/monthly-consumption", get(monthly_consumption))
        .route("/monthly-additions", get(monthly_additions))
        .route("/summary", get(summary))
}
