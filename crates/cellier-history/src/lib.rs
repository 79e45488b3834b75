//! Cellier — the bottle history bounded context.
//!
//! An append-only ledger of `added`/`consumed`/`deleted` events with
//! denormalized bottle snapshots, plus the read-side derivations built
//! on top of it: per-bottle history, recent-window history, monthly
//! rollups, and the idempotent backfill from bottle snapshots.

pub mod application;
pub mod domain;
pub mod store;
