//! HTTP middleware

pub mod cors;
pub mod logging;

pub use cors::cors_layer;
pub use logging::log_requests;
