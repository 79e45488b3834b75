//! Application services for the cellar context.

pub mod cellar_service;
