//! Cellier API — axum HTTP surface over the cellar services.

pub mod error;
pub mod routes;
pub mod state;
