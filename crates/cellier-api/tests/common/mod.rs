//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use cellier_api::routes;
use cellier_api::state::AppState;
use cellier_cellar::application::cellar_service::CellarService;
use cellier_core::bottle::{Bottle, BottleStatus};
use cellier_history::application::service::HistoryService;
use cellier_history::domain::events::{EventKind, HistoryEvent};
use cellier_test_support::{FixedClock, InMemoryHistoryStore, StubBottleService};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

/// Fixed timestamp used across all integration tests.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
}

/// The app under test plus handles on its fakes for assertions.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryHistoryStore>,
    pub bottles: Arc<StubBottleService>,
}

/// Build the full app router over an in-memory ledger, a stub bottle
/// API, and a fixed clock. Uses the same route structure as `main.rs`.
pub fn build_test_app(events: Vec<HistoryEvent>, bottles: Vec<Bottle>) -> TestApp {
    build_test_app_with(events, Arc::new(StubBottleService::with_bottles(bottles)))
}

/// Same as [`build_test_app`] but with a caller-provided bottle stub,
/// e.g. one whose mutations fail.
pub fn build_test_app_with(
    events: Vec<HistoryEvent>,
    bottles: Arc<StubBottleService>,
) -> TestApp {
    let store = Arc::new(InMemoryHistoryStore::with_events(events));
    let clock = Arc::new(FixedClock(fixed_now()));
    let history = Arc::new(HistoryService::new(Arc::clone(&store) as _, clock));
    let cellar = Arc::new(CellarService::new(
        Arc::clone(&history),
        Arc::clone(&bottles) as _,
    ));
    let app_state = AppState::new(history, cellar);

    let router = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/history", routes::history::router())
        .nest("/api/v1/stats", routes::stats::router())
        .nest("/api/v1/bottles", routes::bottles::router())
        .with_state(app_state);

    TestApp {
        router,
        store,
        bottles,
    }
}

/// A ledger event fixture with sensible snapshot defaults.
pub fn event(kind: EventKind, bottle_id: i64, quantity: u32, date: DateTime<Utc>) -> HistoryEvent {
    HistoryEvent {
        id: Uuid::new_v4(),
        kind,
        bottle_id,
        bottle_name: format!("Bottle {bottle_id}"),
        bottle_productor: Some("Producer".to_owned()),
        bottle_year: Some(2020),
        bottle_color: Some("Rouge".to_owned()),
        quantity,
        date,
    }
}

/// A bottle fixture dated 2024-01-01.
pub fn bottle(id: i64, quantity: u32, status: BottleStatus) -> Bottle {
    Bottle {
        id,
        name: format!("Bottle {id}"),
        productor: Some("Producer".to_owned()),
        year: Some(2020),
        color: Some("Rouge".to_owned()),
        quantity,
        status,
        date_added: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    }
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    router: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return only the status, for routes whose
/// response body is not JSON (e.g. the fallback 404).
pub async fn get_status(router: Router, uri: &str) -> StatusCode {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    router.oneshot(request).await.unwrap().status()
}

/// Send a GET request and return the response.
pub async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
