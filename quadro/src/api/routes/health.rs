//! Liveness endpoint

use crate::api::types::RootResponse;
use axum::{Json, Router, routing::get};

/// Create the liveness route
pub fn health_routes() -> Router {
    Router::new().route("/", get(root))
}

/// GET / - API liveness message
async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "API Quadro de análise de CSV funcionando!".to_string(),
    })
}
