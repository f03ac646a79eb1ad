//! PostgreSQL store implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Contest, ContestSnapshot, Problem, Status, Submission, User};

use super::store::Store;

/// Store backed by a PostgreSQL connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Check that the database is reachable.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        super::connection::test_connection(&self.pool).await
    }
}

#[async_trait]
impl Store for PgStore {
    async fn submission(&self, id: Uuid) -> AppResult<Option<Submission>> {
        let submission =
            sqlx::query_as::<_, Submission>(r#"SELECT * FROM submissions WHERE id = $1"#)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(submission)
    }

    async fn user(&self, id: Uuid) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn problem(&self, id: Uuid) -> AppResult<Option<Problem>> {
        let problem = sqlx::query_as::<_, Problem>(r#"SELECT * FROM problems WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(problem)
    }

    async fn contest_for_problem_at(
        &self,
        problem_id: Uuid,
        ts: DateTime<Utc>,
    ) -> AppResult<Option<ContestSnapshot>> {
        let contest = sqlx::query_as::<_, Contest>(
            r#"
            SELECT c.*
            FROM contests c
            JOIN contest_problems cp ON cp.contest_id = c.id
            WHERE cp.problem_id = $1
              AND c.start_time <= $2
              AND c.end_time >= $2
            ORDER BY c.start_time
            LIMIT 1
            "#,
        )
        .bind(problem_id)
        .bind(ts)
        .fetch_optional(&self.pool)
        .await?;

        let Some(contest) = contest else {
            return Ok(None);
        };

        let coowners: Vec<Uuid> = sqlx::query_scalar(
            r#"SELECT user_id FROM contest_coowners WHERE contest_id = $1"#,
        )
        .bind(contest.id)
        .fetch_all(&self.pool)
        .await?;

        let contestants: Vec<Uuid> = sqlx::query_scalar(
            r#"SELECT user_id FROM contest_contestants WHERE contest_id = $1"#,
        )
        .bind(contest.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(ContestSnapshot {
            contest,
            coowners: coowners.into_iter().collect(),
            contestants: contestants.into_iter().collect(),
        }))
    }

    async fn set_submission_status(&self, id: Uuid, status: Status) -> AppResult<bool> {
        // Single-row UPDATE: atomic with respect to concurrent grading
        // worker writes, and a state-wise no-op when already in `status`.
        let result = sqlx::query(r#"UPDATE submissions SET status = $2 WHERE id = $1"#)
            .bind(id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn reset_problem_status(
        &self,
        problem_id: Uuid,
        status: Status,
    ) -> AppResult<Vec<Uuid>> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            r#"
            UPDATE submissions
            SET status = $2
            WHERE problem_id = $1
            RETURNING id
            "#,
        )
        .bind(problem_id)
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}
