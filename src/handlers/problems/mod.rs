//! Problem handlers

mod handler;

pub use handler::*;

use axum::{Router, routing::post};

use crate::state::AppState;

/// Problem routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/{id}/rejudge", post(handler::rejudge_problem))
}
