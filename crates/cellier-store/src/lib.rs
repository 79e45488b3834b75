//! File-backed persistence for the history ledger.

mod json_file;

pub use json_file::{DEFAULT_LEDGER_FILE, JsonFileHistoryStore};
