//! Route modules organized by concern.

pub mod bottles;
pub mod health;
pub mod history;
pub mod stats;
