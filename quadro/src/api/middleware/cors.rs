//! CORS middleware

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

/// Create the CORS layer for the browser frontend.
///
/// An `allow_origin` of "*" is permissive; anything else is taken as one
/// explicit origin (the React dev server in the original deployment).
pub fn cors_layer(allow_origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allow_origin == "*" {
        return layer.allow_origin(Any);
    }
    match allow_origin.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            warn!(origin = allow_origin, "origem CORS inválida; liberando todas");
            layer.allow_origin(Any)
        }
    }
}
