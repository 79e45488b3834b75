//! Domain logic for the cellar context.

pub mod transitions;
