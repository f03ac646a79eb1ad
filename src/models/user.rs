//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub level: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check if user has admin privileges
    pub fn is_admin(&self) -> bool {
        self.level == UserLevel::Admin.as_str()
    }

    /// Check if user may own contests and problems (judge tier or above)
    pub fn can_own_contests(&self) -> bool {
        matches!(
            UserLevel::from_str(&self.level),
            Some(UserLevel::Admin) | Some(UserLevel::Judge)
        )
    }
}

/// User level enum
///
/// Levels are set at account creation/administration time; nothing in this
/// service mutates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserLevel {
    Admin,
    Judge,
    User,
}

impl UserLevel {
    /// Get level as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Judge => "judge",
            Self::User => "user",
        }
    }

    /// Parse level from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "judge" => Some(Self::Judge),
            "user" => Some(Self::User),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_level(level: UserLevel) -> User {
        User {
            id: Uuid::new_v4(),
            username: "someone".to_string(),
            level: level.as_str().to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_level_round_trip() {
        for s in crate::constants::levels::ALL {
            let parsed = UserLevel::from_str(s).expect("known level string");
            assert_eq!(parsed.as_str(), *s);
        }
        assert_eq!(UserLevel::from_str("superuser"), None);
    }

    #[test]
    fn test_ownership_tiers() {
        assert!(user_with_level(UserLevel::Admin).is_admin());
        assert!(user_with_level(UserLevel::Admin).can_own_contests());
        assert!(!user_with_level(UserLevel::Judge).is_admin());
        assert!(user_with_level(UserLevel::Judge).can_own_contests());
        assert!(!user_with_level(UserLevel::User).can_own_contests());
    }
}
