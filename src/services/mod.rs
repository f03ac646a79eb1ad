//! Business logic services

pub mod auth_service;
pub mod queue;
pub mod status_service;

pub use auth_service::AuthService;
pub use queue::{JudgeQueue, RedisJudgeQueue};
pub use status_service::StatusService;
