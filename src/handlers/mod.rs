//! HTTP Request Handlers
//!
//! Thin handlers organized by domain; all decision logic lives in the
//! service and access layers.

pub mod health;
pub mod problems;
pub mod submissions;

use axum::{Router, middleware};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest(
            "/submissions",
            submissions::routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        .nest(
            "/problems",
            problems::routes().route_layer(middleware::from_fn_with_state(state, auth_middleware)),
        )
}
