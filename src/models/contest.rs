//! Contest model and schedule evaluation

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Contest database model
///
/// Invariant (enforced by the excluded CRUD layer): start_time < end_time.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Contest {
    pub id: Uuid,
    pub title: String,
    pub owner_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Minutes before end_time after which standings freeze. Standings are
    /// out of scope here; the field never influences visibility or rejudge.
    pub freeze_minutes: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Contest {
    /// Classify the contest schedule relative to an explicit instant.
    ///
    /// The window is inclusive on both ends. Taking `now` as a parameter
    /// keeps this a pure function of three timestamps, so the same code
    /// classifies both "is the contest running now" and "was it running
    /// when a submission was made".
    pub fn phase_at(&self, now: DateTime<Utc>) -> ContestPhase {
        if now < self.start_time {
            ContestPhase::NotStarted
        } else if now <= self.end_time {
            ContestPhase::Running
        } else {
            ContestPhase::Ended
        }
    }

    /// Whether the contest window contained the given historical timestamp.
    pub fn was_running_at(&self, ts: DateTime<Utc>) -> bool {
        self.phase_at(ts) == ContestPhase::Running
    }
}

/// Contest schedule phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContestPhase {
    NotStarted,
    Running,
    Ended,
}

impl std::fmt::Display for ContestPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not_started"),
            Self::Running => write!(f, "running"),
            Self::Ended => write!(f, "ended"),
        }
    }
}

/// Immutable snapshot of a contest and its membership sets, as loaded by the
/// store for one decision. The decision core never queries beyond this.
#[derive(Debug, Clone)]
pub struct ContestSnapshot {
    pub contest: Contest,
    pub coowners: HashSet<Uuid>,
    pub contestants: HashSet<Uuid>,
}

impl ContestSnapshot {
    pub fn is_owner(&self, user_id: Uuid) -> bool {
        self.contest.owner_id == user_id
    }

    pub fn is_coowner(&self, user_id: Uuid) -> bool {
        self.coowners.contains(&user_id)
    }

    pub fn is_contestant(&self, user_id: Uuid) -> bool {
        self.contestants.contains(&user_id)
    }

    /// Whether the contest is running at the given instant.
    pub fn is_running_at(&self, now: DateTime<Utc>) -> bool {
        self.contest.phase_at(now) == ContestPhase::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn contest(start: DateTime<Utc>, end: DateTime<Utc>) -> Contest {
        Contest {
            id: Uuid::new_v4(),
            title: "Weekly Round".to_string(),
            owner_id: Uuid::new_v4(),
            start_time: start,
            end_time: end,
            freeze_minutes: Some(30),
            created_at: start - Duration::days(1),
        }
    }

    #[test]
    fn test_phase_classification() {
        let now = Utc::now();
        let c = contest(now - Duration::hours(1), now + Duration::hours(4));

        assert_eq!(c.phase_at(now - Duration::hours(2)), ContestPhase::NotStarted);
        assert_eq!(c.phase_at(now), ContestPhase::Running);
        assert_eq!(c.phase_at(now + Duration::hours(5)), ContestPhase::Ended);
    }

    #[test]
    fn test_window_is_inclusive() {
        let now = Utc::now();
        let c = contest(now, now + Duration::hours(2));

        assert_eq!(c.phase_at(c.start_time), ContestPhase::Running);
        assert_eq!(c.phase_at(c.end_time), ContestPhase::Running);
    }

    #[test]
    fn test_was_running_is_independent_of_now() {
        let now = Utc::now();
        // Contest already over
        let c = contest(now - Duration::hours(6), now - Duration::hours(1));

        assert!(c.was_running_at(now - Duration::hours(3)));
        assert!(!c.was_running_at(now));
        assert_eq!(c.phase_at(now), ContestPhase::Ended);
    }

    #[test]
    fn test_snapshot_membership() {
        let now = Utc::now();
        let c = contest(now - Duration::hours(1), now + Duration::hours(1));
        let owner = c.owner_id;
        let coowner = Uuid::new_v4();
        let contestant = Uuid::new_v4();

        let snapshot = ContestSnapshot {
            contest: c,
            coowners: HashSet::from([coowner]),
            contestants: HashSet::from([contestant]),
        };

        assert!(snapshot.is_owner(owner));
        assert!(snapshot.is_coowner(coowner));
        assert!(!snapshot.is_coowner(owner));
        assert!(snapshot.is_contestant(contestant));
        assert!(!snapshot.is_contestant(coowner));
        assert!(snapshot.is_running_at(now));
    }
}
