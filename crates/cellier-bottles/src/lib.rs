//! HTTP implementation of the bottle collaborator port.

mod http;

pub use http::HttpBottleService;
