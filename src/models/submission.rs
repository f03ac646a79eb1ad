//! Submission model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Submission database model
///
/// `status` and `error_message` are written by the grading worker; the
/// rejudge executor only ever resets `status` back to `wait`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub user_id: Uuid,
    pub problem_id: Uuid,
    pub language: String,
    #[serde(skip_serializing)]
    pub source_code: String,
    pub status: String,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub judged_at: Option<DateTime<Utc>>,
}

/// Submission status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Wait,
    Judging,
    Accepted,
    NotAccepted,
    CompileError,
    RestrictedFunction,
    JudgeError,
}

impl Status {
    /// Get status as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wait => "wait",
            Self::Judging => "judging",
            Self::Accepted => "accepted",
            Self::NotAccepted => "not_accepted",
            Self::CompileError => "compile_error",
            Self::RestrictedFunction => "restricted_function",
            Self::JudgeError => "judge_error",
        }
    }

    /// Parse status from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "wait" => Some(Self::Wait),
            "judging" => Some(Self::Judging),
            "accepted" => Some(Self::Accepted),
            "not_accepted" => Some(Self::NotAccepted),
            "compile_error" => Some(Self::CompileError),
            "restricted_function" => Some(Self::RestrictedFunction),
            "judge_error" => Some(Self::JudgeError),
            _ => None,
        }
    }

    /// Check if the submission is waiting for (or undergoing) grading
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Wait | Self::Judging)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
