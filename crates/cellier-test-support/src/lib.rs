//! Shared test mocks and utilities for the Cellier service.

mod bottles;
mod clock;
mod store;

pub use bottles::StubBottleService;
pub use clock::FixedClock;
pub use store::{FailingHistoryStore, InMemoryHistoryStore, ReadOnlyHistoryStore};
