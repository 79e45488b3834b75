//! Shared application state.

use std::sync::Arc;

use cellier_cellar::application::cellar_service::CellarService;
use cellier_history::application::service::HistoryService;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Ledger recording and queries.
    pub history: Arc<HistoryService>,
    /// Bottle orchestration against the upstream API.
    pub cellar: Arc<CellarService>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(history: Arc<HistoryService>, cellar: Arc<CellarService>) -> Self {
        Self { history, cellar }
    }
}
