//! JudgeGate - Submission Visibility & Rejudge Engine
//!
//! This library implements the access-control core of a programming contest
//! judge: who may view a submission's error message or source code, who may
//! force a submission back to the pending queue, and the state reset itself.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic and effects
//! - **Access**: Pure role resolution and visibility decisions
//! - **Db**: Store trait and PostgreSQL implementation
//! - **Models**: Domain models and snapshots
//!
//! The decision core (`access`) is pure: it operates on immutable snapshots
//! of contest, problem, user and submission records and never touches the
//! database, so it is unit-testable in isolation.

pub mod access;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
