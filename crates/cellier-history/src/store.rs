//! Port for ledger persistence.

use async_trait::async_trait;
use cellier_core::error::DomainError;

use crate::domain::events::HistoryEvent;

/// Repository trait for loading and replacing the history ledger.
///
/// The ledger is persisted as a whole: every `save` replaces the full
/// collection (read-modify-write at ledger granularity, not per-event).
/// Implementations must treat an absent or unparseable ledger as empty
/// on `load` rather than failing; only genuine I/O failures are errors.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Load the stored ledger, or an empty list if none exists.
    async fn load(&self) -> Result<Vec<HistoryEvent>, DomainError>;

    /// Persist the full ledger, overwriting the previous value.
    async fn save(&self, events: &[HistoryEvent]) -> Result<(), DomainError>;
}
