//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A bottle was not found by the upstream bottle API.
    #[error("bottle not found: {0}")]
    BottleNotFound(i64),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// The history ledger could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// The upstream bottle API failed or was unreachable.
    #[error("upstream error: {0}")]
    Upstream(String),
}
