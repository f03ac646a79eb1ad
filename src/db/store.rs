//! Store trait
//!
//! The persistence contract the decision services depend on. Keeping it a
//! trait makes the service layer unit-testable with a mocked store; the real
//! implementation is [`super::PgStore`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{ContestSnapshot, Problem, Status, Submission, User};

/// Read access to judge entities plus the one status write the rejudge
/// executor needs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    /// Fetch a submission by id.
    async fn submission(&self, id: Uuid) -> AppResult<Option<Submission>>;

    /// Fetch a user by id.
    async fn user(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Fetch a problem by id.
    async fn problem(&self, id: Uuid) -> AppResult<Option<Problem>>;

    /// Resolve the contest whose problem set contains `problem_id` and whose
    /// window contained `ts`, evaluated against the contest's *current*
    /// schedule. Returns the contest together with its coowner and
    /// contestant id sets.
    ///
    /// If the data ever violates the at-most-one-owning-contest assumption,
    /// the contest with the earliest start_time wins, deterministically.
    async fn contest_for_problem_at(
        &self,
        problem_id: Uuid,
        ts: DateTime<Utc>,
    ) -> AppResult<Option<ContestSnapshot>>;

    /// Atomically set one submission's status. Only the status column is
    /// written; error_message and source_code belong to the grading worker.
    /// Returns false when the submission does not exist.
    async fn set_submission_status(&self, id: Uuid, status: Status) -> AppResult<bool>;

    /// Set the status of every submission referencing `problem_id`,
    /// returning the ids actually updated.
    async fn reset_problem_status(&self, problem_id: Uuid, status: Status)
    -> AppResult<Vec<Uuid>>;
}
