//! Application state management
//!
//! Shared application state passed to all request handlers via Axum's State
//! extractor.

use std::sync::Arc;

use crate::config::Config;
use crate::db::PgStore;
use crate::services::RedisJudgeQueue;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Entity store backed by PostgreSQL
    pub store: PgStore,

    /// Grading queue backed by Redis
    pub queue: RedisJudgeQueue,

    /// Application configuration
    pub config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(store: PgStore, queue: RedisJudgeQueue, config: Config) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                queue,
                config,
            }),
        }
    }

    /// Get a reference to the store
    pub fn store(&self) -> &PgStore {
        &self.inner.store
    }

    /// Get a reference to the grading queue
    pub fn queue(&self) -> &RedisJudgeQueue {
        &self.inner.queue
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
