//! Cellier API server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use cellier_bottles::HttpBottleService;
use cellier_cellar::application::cellar_service::CellarService;
use cellier_core::clock::SystemClock;
use cellier_history::application::service::HistoryService;
use cellier_store::{DEFAULT_LEDGER_FILE, JsonFileHistoryStore};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use cellier_api::error::AppError;
use cellier_api::routes;
use cellier_api::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Cellier API server");

    // Read configuration from environment.
    let bottle_api_url = std::env::var("BOTTLE_API_URL")
        .map_err(|_| AppError::Config("BOTTLE_API_URL environment variable must be set".into()))?;
    let bottle_api_token = std::env::var("BOTTLE_API_TOKEN").ok();
    let history_file =
        std::env::var("HISTORY_FILE").unwrap_or_else(|_| DEFAULT_LEDGER_FILE.to_string());
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;

    // Wire the services.
    let store = Arc::new(JsonFileHistoryStore::new(history_file));
    let clock = Arc::new(SystemClock);
    let history = Arc::new(HistoryService::new(store, clock));
    let bottles = Arc::new(HttpBottleService::new(bottle_api_url, bottle_api_token));
    let cellar = Arc::new(CellarService::new(Arc::clone(&history), bottles));
    let app_state = AppState::new(history, cellar);

    // Build router.
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/history", routes::history::router())
        .nest("/api/v1/stats", routes::stats::router())
        .nest("/api/v1/bottles", routes::bottles::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server.
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
