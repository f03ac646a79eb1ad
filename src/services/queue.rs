//! Grading queue
//!
//! Submissions reset to `wait` are handed to the external grading worker
//! pool through a Redis list. The trait exists so service tests can verify
//! enqueueing without a Redis server.

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use uuid::Uuid;

use crate::constants::JUDGE_QUEUE_KEY;
use crate::error::AppResult;

/// Hand-off point to the external grading workers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JudgeQueue: Send + Sync {
    /// Queue a submission id for (re-)grading.
    async fn enqueue(&self, submission_id: Uuid) -> AppResult<()>;
}

/// Redis-backed grading queue
#[derive(Clone)]
pub struct RedisJudgeQueue {
    conn: ConnectionManager,
}

impl RedisJudgeQueue {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    /// Check that the queue backend is reachable.
    pub async fn ping(&self) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

#[async_trait]
impl JudgeQueue for RedisJudgeQueue {
    async fn enqueue(&self, submission_id: Uuid) -> AppResult<()> {
        let mut conn = self.conn.clone();
        conn.lpush::<_, _, ()>(JUDGE_QUEUE_KEY, submission_id.to_string())
            .await?;
        Ok(())
    }
}
