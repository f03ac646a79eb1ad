//! Problem handler implementations

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::AppResult, handlers::submissions::response::RejudgeResponse,
    middleware::auth::AuthenticatedUser, services::StatusService, state::AppState,
};

/// Reset every submission of a problem to `wait`, e.g. after a judge
/// configuration change
pub async fn rejudge_problem(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RejudgeResponse>> {
    let response = StatusService::rejudge_problem(
        state.store(),
        state.queue(),
        auth_user.id,
        id,
        Utc::now(),
    )
    .await?;
    Ok(Json(response))
}
