//! Application services for the history ledger.

pub mod service;
pub mod stats;
