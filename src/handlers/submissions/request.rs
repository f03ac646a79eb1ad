//! Submission request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Batch rejudge request
#[derive(Debug, Deserialize, Validate)]
pub struct BatchRejudgeRequest {
    /// Submission ids to reset to `wait`
    #[validate(length(min = 1, max = 1000))]
    pub submission_ids: Vec<Uuid>,
}
