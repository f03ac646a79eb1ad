//! Role resolution
//!
//! Computes the set of roles a user holds with respect to a problem and the
//! contest (if any) that owns the submission under consideration. A user can
//! hold several roles at once, e.g. a contest coowner who also owns one of
//! the contest's problems.

use std::collections::HashSet;

use crate::models::{ContestSnapshot, Problem, User};

/// A role a user holds relative to a contest/problem pair.
///
/// "Self" (viewer == submission author) is a relation to a specific
/// submission, not a role; the visibility engine resolves it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    ContestOwner,
    ContestCoowner,
    ProblemOwner,
    Contestant,
}

/// Explicit set-of-tags value returned by [`roles_of`].
#[derive(Debug, Clone, Default)]
pub struct RoleSet {
    roles: HashSet<Role>,
}

impl RoleSet {
    pub fn has(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn insert(&mut self, role: Role) {
        self.roles.insert(role);
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Contest staff: owner or coowner of the contest in scope.
    pub fn is_contest_staff(&self) -> bool {
        self.has(Role::ContestOwner) || self.has(Role::ContestCoowner)
    }
}

/// Resolve the roles `user` holds over `problem` and the optional `contest`.
///
/// Contest-scoped roles are simply absent when no contest is supplied; this
/// never fails.
pub fn roles_of(user: &User, contest: Option<&ContestSnapshot>, problem: &Problem) -> RoleSet {
    let mut roles = RoleSet::default();

    if user.is_admin() {
        roles.insert(Role::Admin);
    }

    if problem.owner_id == user.id {
        roles.insert(Role::ProblemOwner);
    }

    if let Some(contest) = contest {
        if contest.is_owner(user.id) {
            roles.insert(Role::ContestOwner);
        }
        if contest.is_coowner(user.id) {
            roles.insert(Role::ContestCoowner);
        }
        if contest.is_contestant(user.id) {
            roles.insert(Role::Contestant);
        }
    }

    roles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Contest, UserLevel};
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn user(level: UserLevel) -> User {
        User {
            id: Uuid::new_v4(),
            username: "tester".to_string(),
            level: level.as_str().to_string(),
            created_at: Utc::now(),
        }
    }

    fn problem(owner_id: Uuid) -> Problem {
        Problem {
            id: Uuid::new_v4(),
            title: "A + B".to_string(),
            owner_id,
            is_public: true,
            created_at: Utc::now(),
        }
    }

    fn snapshot(owner_id: Uuid, coowners: &[Uuid], contestants: &[Uuid]) -> ContestSnapshot {
        let now = Utc::now();
        ContestSnapshot {
            contest: Contest {
                id: Uuid::new_v4(),
                title: "Round 1".to_string(),
                owner_id,
                start_time: now - Duration::hours(1),
                end_time: now + Duration::hours(4),
                freeze_minutes: None,
                created_at: now - Duration::days(1),
            },
            coowners: coowners.iter().copied().collect(),
            contestants: contestants.iter().copied().collect(),
        }
    }

    #[test]
    fn test_admin_role_is_context_free() {
        let admin = user(UserLevel::Admin);
        let p = problem(Uuid::new_v4());

        let roles = roles_of(&admin, None, &p);
        assert!(roles.has(Role::Admin));
        assert!(!roles.has(Role::ProblemOwner));
    }

    #[test]
    fn test_contest_roles_absent_without_contest() {
        let judge = user(UserLevel::Judge);
        let p = problem(Uuid::new_v4());

        let roles = roles_of(&judge, None, &p);
        assert!(roles.is_empty());
        assert!(!roles.is_contest_staff());
    }

    #[test]
    fn test_owner_coowner_contestant() {
        let owner = user(UserLevel::Judge);
        let coowner = user(UserLevel::Judge);
        let contestant = user(UserLevel::User);
        let p = problem(Uuid::new_v4());
        let c = snapshot(owner.id, &[coowner.id], &[contestant.id]);

        assert!(roles_of(&owner, Some(&c), &p).has(Role::ContestOwner));
        assert!(roles_of(&owner, Some(&c), &p).is_contest_staff());
        assert!(roles_of(&coowner, Some(&c), &p).has(Role::ContestCoowner));
        assert!(roles_of(&contestant, Some(&c), &p).has(Role::Contestant));
        assert!(!roles_of(&contestant, Some(&c), &p).is_contest_staff());
    }

    #[test]
    fn test_roles_can_co_occur() {
        // A contest coowner who also owns the problem and is registered as a
        // contestant holds all three tags at once.
        let multi = user(UserLevel::Judge);
        let p = problem(multi.id);
        let c = snapshot(Uuid::new_v4(), &[multi.id], &[multi.id]);

        let roles = roles_of(&multi, Some(&c), &p);
        assert!(roles.has(Role::ContestCoowner));
        assert!(roles.has(Role::ProblemOwner));
        assert!(roles.has(Role::Contestant));
        assert!(!roles.has(Role::Admin));
    }
}
