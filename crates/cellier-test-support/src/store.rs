//! Test stores — mock `HistoryStore` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use cellier_core::error::DomainError;
use cellier_history::domain::events::HistoryEvent;
use cellier_history::store::HistoryStore;

/// An in-memory ledger store. `load` returns the current contents and
/// `save` replaces them, mirroring the real store's whole-ledger
/// read-modify-write granularity.
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    events: Mutex<Vec<HistoryEvent>>,
}

impl InMemoryHistoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with events.
    #[must_use]
    pub fn with_events(events: Vec<HistoryEvent>) -> Self {
        Self {
            events: Mutex::new(events),
        }
    }

    /// Returns a snapshot of the currently persisted ledger.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn snapshot(&self) -> Vec<HistoryEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn load(&self) -> Result<Vec<HistoryEvent>, DomainError> {
        Ok(self.events.lock().unwrap().clone())
    }

    async fn save(&self, events: &[HistoryEvent]) -> Result<(), DomainError> {
        *self.events.lock().unwrap() = events.to_vec();
        Ok(())
    }
}

/// A store where every operation fails with a storage error. Useful for
/// testing degradation and error-surfacing paths.
#[derive(Debug)]
pub struct FailingHistoryStore;

#[async_trait]
impl HistoryStore for FailingHistoryStore {
    async fn load(&self) -> Result<Vec<HistoryEvent>, DomainError> {
        Err(DomainError::Storage("disk unavailable".into()))
    }

    async fn save(&self, _events: &[HistoryEvent]) -> Result<(), DomainError> {
        Err(DomainError::Storage("disk unavailable".into()))
    }
}

/// A store that loads its seed events fine but rejects every save.
/// Useful for testing the write path when only persistence fails.
#[derive(Debug, Default)]
pub struct ReadOnlyHistoryStore {
    events: Vec<HistoryEvent>,
}

impl ReadOnlyHistoryStore {
    /// Creates a read-only store pre-seeded with events.
    #[must_use]
    pub fn with_events(events: Vec<HistoryEvent>) -> Self {
        Self { events }
    }
}

#[async_trait]
impl HistoryStore for ReadOnlyHistoryStore {
    async fn load(&self) -> Result<Vec<HistoryEvent>, DomainError> {
        Ok(self.events.clone())
    }

    async fn save(&self, _events: &[HistoryEvent]) -> Result<(), DomainError> {
        Err(DomainError::Storage("write rejected".into()))
    }
}
