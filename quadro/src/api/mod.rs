//! HTTP surface assembly.

pub mod error;
pub mod middleware;
pub mod routes;
pub mod types;

use axum::Router;
use quadro_agent::AnalysisAgent;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared state for all routes.
#[derive(Clone)]
pub struct AppContext {
    pub agent: Arc<AnalysisAgent>,
    pub files_dir: PathBuf,
}

/// Build the application router.
pub fn router(context: AppContext, cors_origin: &str) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::file_routes(context.clone()))
        .merge(routes::ask_routes(context))
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .layer(middleware::cors_layer(cors_origin))
}
