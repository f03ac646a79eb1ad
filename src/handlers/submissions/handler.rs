//! Submission handler implementations

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::StatusService,
    state::AppState,
};

use super::{
    request::BatchRejudgeRequest,
    response::{ErrorMessageResponse, RejudgeResponse, SourceResponse},
};

/// View a submission's error message
pub async fn error_message(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ErrorMessageResponse>> {
    let response = StatusService::error_message(state.store(), auth_user.id, id, Utc::now()).await?;
    Ok(Json(response))
}

/// View a submission's source code
pub async fn view_source(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SourceResponse>> {
    let response = StatusService::source(state.store(), auth_user.id, id, Utc::now()).await?;
    Ok(Json(response))
}

/// Reset a single submission to `wait` for re-grading
pub async fn rejudge_submission(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RejudgeResponse>> {
    let response = StatusService::rejudge(
        state.store(),
        state.queue(),
        auth_user.id,
        id,
        Utc::now(),
    )
    .await?;
    Ok(Json(response))
}

/// Reset a set of submissions to `wait` for re-grading
pub async fn rejudge_batch(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<BatchRejudgeRequest>,
) -> AppResult<Json<RejudgeResponse>> {
    payload.validate()?;

    let response = StatusService::rejudge_batch(
        state.store(),
        state.queue(),
        auth_user.id,
        &payload.submission_ids,
        Utc::now(),
    )
    .await?;
    Ok(Json(response))
}
