//! Application-wide constants
//!
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

/// How long to wait for a pooled connection before giving up
pub const DATABASE_ACQUIRE_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

// =============================================================================
// GRADING QUEUE
// =============================================================================

/// Redis list the external grading workers consume from
pub const JUDGE_QUEUE_KEY: &str = "judge_queue";

// =============================================================================
// USER LEVELS
// =============================================================================

/// User level identifiers
pub mod levels {
    /// Full administrative access
    pub const ADMIN: &str = "admin";
    /// Privileged non-admin tier: may own contests and problems
    pub const JUDGE: &str = "judge";
    /// Regular account
    pub const USER: &str = "user";

    /// All user levels
    pub const ALL: &[&str] = &[ADMIN, JUDGE, USER];
}

// =============================================================================
// SUBMISSION STATUSES
// =============================================================================

/// Submission status identifiers
pub mod statuses {
    pub const WAIT: &str = "wait";
    pub const JUDGING: &str = "judging";
    pub const ACCEPTED: &str = "accepted";
    pub const NOT_ACCEPTED: &str = "not_accepted";
    pub const COMPILE_ERROR: &str = "compile_error";
    pub const RESTRICTED_FUNCTION: &str = "restricted_function";
    pub const JUDGE_ERROR: &str = "judge_error";

    /// All submission statuses
    pub const ALL: &[&str] = &[
        WAIT,
        JUDGING,
        ACCEPTED,
        NOT_ACCEPTED,
        COMPILE_ERROR,
        RESTRICTED_FUNCTION,
        JUDGE_ERROR,
    ];
}

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";
