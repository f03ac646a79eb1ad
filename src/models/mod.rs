//! Domain models
//!
//! Database row types plus the immutable snapshots the decision core
//! operates on.

pub mod contest;
pub mod problem;
pub mod submission;
pub mod user;

pub use contest::{Contest, ContestPhase, ContestSnapshot};
pub use problem::Problem;
pub use submission::{Status, Submission};
pub use user::{User, UserLevel};
