//! Domain model for the history ledger.

pub mod events;
