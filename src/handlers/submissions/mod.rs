//! Submission handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Submission routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/{id}/error", get(handler::error_message))
        .route("/{id}/source", get(handler::view_source))
        .route("/{id}/rejudge", post(handler::rejudge_submission))
        .route("/rejudge", post(handler::rejudge_batch))
}
