//! Cellier Core — shared domain abstractions.
//!
//! This crate defines the fundamental traits and types that the cellar
//! bounded contexts depend on. It contains no infrastructure code.

pub mod bottle;
pub mod clock;
pub mod error;
pub mod service;
