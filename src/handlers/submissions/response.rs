//! Submission response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Error message response
#[derive(Debug, Serialize)]
pub struct ErrorMessageResponse {
    pub submission_id: Uuid,
    pub status: String,
    pub error_message: Option<String>,
}

/// Source code response
#[derive(Debug, Serialize)]
pub struct SourceResponse {
    pub submission_id: Uuid,
    pub language: String,
    pub source_code: String,
    pub created_at: DateTime<Utc>,
}

/// Rejudge response
#[derive(Debug, Serialize)]
pub struct RejudgeResponse {
    /// Number of submissions actually reset to `wait`
    pub updated: u64,
}
