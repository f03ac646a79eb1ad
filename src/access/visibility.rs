//! Visibility and rejudge decision tables
//!
//! The authorization state machine at the center of the service. Inputs are
//! the submission's author, the viewing user, the resolved role set, the
//! contest that owned the submission at creation time (if any), and the
//! current time. Two operations are decided:
//!
//! - **view-detail**: error message / source code access
//! - **rejudge**: forcing the submission back to the `wait` status
//!
//! While a contest runs, the contest's integrity takes precedence: only its
//! own staff may look at contestants' submissions, and even the authors
//! themselves are denied. Once it ends ("normal mode") self-view and
//! problem-owner view come back, and staff keep visibility into their own
//! contestants.

use chrono::{DateTime, Utc};

use crate::models::{ContestSnapshot, User};

use super::roles::{Role, RoleSet};

/// Outcome of an authorization decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

impl Access {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Everything a decision needs, gathered by the service layer.
///
/// `contest` is the contest whose problem set contains the submission's
/// problem and whose window contained its creation time, resolved against
/// the contest's current end_time at decision time.
#[derive(Debug)]
pub struct SubmissionScope<'a> {
    pub viewer: &'a User,
    pub author: &'a User,
    pub roles: &'a RoleSet,
    pub contest: Option<&'a ContestSnapshot>,
    pub now: DateTime<Utc>,
}

impl SubmissionScope<'_> {
    fn is_self(&self) -> bool {
        self.viewer.id == self.author.id
    }

    fn staff_over_author(&self, contest: &ContestSnapshot) -> bool {
        self.roles.is_contest_staff() && contest.is_contestant(self.author.id)
    }
}

/// Decide view-detail (error message / source code) access.
pub fn can_view_detail(scope: &SubmissionScope) -> Access {
    // Admins see everything, including other admins' submissions.
    if scope.roles.has(Role::Admin) {
        return Access::Allow;
    }

    // Admin submissions are private from everyone else, whatever other
    // roles the viewer holds.
    if scope.author.is_admin() && !scope.is_self() {
        return Access::Deny;
    }

    let Some(contest) = scope.contest else {
        // Practice submission: the author and the problem owner only.
        if scope.is_self() || scope.roles.has(Role::ProblemOwner) {
            return Access::Allow;
        }
        return Access::Deny;
    };

    if contest.is_running_at(scope.now) {
        // Live contest: only this contest's staff, and only over its own
        // contestants. Authors and problem owners wait until it ends.
        if scope.staff_over_author(contest) {
            return Access::Allow;
        }
        return Access::Deny;
    }

    // Normal mode: the contest ended (or was rescheduled out of its window).
    if scope.is_self()
        || scope.roles.has(Role::ProblemOwner)
        || scope.staff_over_author(contest)
    {
        return Access::Allow;
    }

    Access::Deny
}

/// Decide rejudge access.
///
/// Problem owners may always force a rejudge of their problem's submissions;
/// contest staff only while their contest is live.
pub fn can_rejudge(scope: &SubmissionScope) -> Access {
    if scope.roles.has(Role::Admin) {
        return Access::Allow;
    }

    if scope.roles.has(Role::ProblemOwner) {
        return Access::Allow;
    }

    if let Some(contest) = scope.contest {
        if contest.is_running_at(scope.now) && scope.roles.is_contest_staff() {
            return Access::Allow;
        }
    }

    Access::Deny
}
