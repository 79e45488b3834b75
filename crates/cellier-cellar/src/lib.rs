//! Cellier — the cellar bounded context.
//!
//! Governs how a bottle's quantity decreases through consumption or
//! removal, and coordinates event recording with the external bottle
//! API: the history event is always recorded before the upstream
//! mutation is issued.

pub mod application;
pub mod domain;
