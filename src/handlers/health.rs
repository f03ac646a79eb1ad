//! Health check handlers

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: bool,
    pub queue: bool,
}

/// Health check endpoint. Reports reachability of the entity store and the
/// grading queue; the process answers even when a backend is down.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = state.store().ping().await.is_ok();
    let queue = state.queue().ping().await.is_ok();

    let status = if database && queue {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
        queue,
    })
}

/// Health routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
