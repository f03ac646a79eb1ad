//! Status service
//!
//! Orchestrates one decision: load the submission and its surroundings from
//! the store, resolve roles, ask the pure visibility engine, then either
//! render the detail payload or run the rejudge effect.
//!
//! Existence is always checked before authorization: a dangling reference
//! (submission pointing at a missing problem or author) is a consistency
//! error surfaced as NotFound, never as a permission failure.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    access::{self, Access, SubmissionScope, roles_of},
    db::Store,
    error::{AppError, AppResult},
    handlers::submissions::response::{ErrorMessageResponse, RejudgeResponse, SourceResponse},
    models::{ContestSnapshot, Problem, Status, Submission, User},
    services::queue::JudgeQueue,
};

/// A submission together with everything its authorization decision reads.
struct Resolved {
    submission: Submission,
    problem: Problem,
    author: User,
    viewer: User,
    contest: Option<ContestSnapshot>,
}

/// Status service for visibility decisions and rejudging
pub struct StatusService;

impl StatusService {
    /// View a submission's error message.
    pub async fn error_message<S: Store + ?Sized>(
        store: &S,
        viewer_id: Uuid,
        submission_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<ErrorMessageResponse> {
        let resolved = Self::resolve(store, viewer_id, submission_id).await?;
        Self::authorize_view(&resolved, now)?;

        Ok(ErrorMessageResponse {
            submission_id: resolved.submission.id,
            status: resolved.submission.status,
            error_message: resolved.submission.error_message,
        })
    }

    /// View a submission's source code.
    pub async fn source<S: Store + ?Sized>(
        store: &S,
        viewer_id: Uuid,
        submission_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<SourceResponse> {
        let resolved = Self::resolve(store, viewer_id, submission_id).await?;
        Self::authorize_view(&resolved, now)?;

        Ok(SourceResponse {
            submission_id: resolved.submission.id,
            language: resolved.submission.language,
            source_code: resolved.submission.source_code,
            created_at: resolved.submission.created_at,
        })
    }

    /// Force a single submission back to `wait` and re-enqueue it.
    pub async fn rejudge<S, Q>(
        store: &S,
        queue: &Q,
        viewer_id: Uuid,
        submission_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<RejudgeResponse>
    where
        S: Store + ?Sized,
        Q: JudgeQueue + ?Sized,
    {
        let resolved = Self::resolve(store, viewer_id, submission_id).await?;
        Self::authorize_rejudge(&resolved, now)?;

        let updated = Self::reset_one(store, queue, resolved.submission.id).await?;
        Ok(RejudgeResponse {
            updated: updated as u64,
        })
    }

    /// Force a set of submissions back to `wait`.
    ///
    /// Each id is authorized independently; missing and denied submissions
    /// are skipped, and the reported count is the number actually reset.
    pub async fn rejudge_batch<S, Q>(
        store: &S,
        queue: &Q,
        viewer_id: Uuid,
        submission_ids: &[Uuid],
        now: DateTime<Utc>,
    ) -> AppResult<RejudgeResponse>
    where
        S: Store + ?Sized,
        Q: JudgeQueue + ?Sized,
    {
        let mut updated: u64 = 0;

        for &submission_id in submission_ids {
            let resolved = match Self::resolve(store, viewer_id, submission_id).await {
                Ok(resolved) => resolved,
                Err(AppError::NotFound(_)) => {
                    tracing::debug!(%submission_id, "batch rejudge: submission missing, skipped");
                    continue;
                }
                Err(e) => return Err(e),
            };

            if Self::authorize_rejudge(&resolved, now).is_err() {
                tracing::debug!(%submission_id, %viewer_id, "batch rejudge: denied, skipped");
                continue;
            }

            if Self::reset_one(store, queue, submission_id).await? {
                updated += 1;
            }
        }

        Ok(RejudgeResponse { updated })
    }

    /// Rejudge every submission of a problem, e.g. after its judge
    /// configuration changed.
    pub async fn rejudge_problem<S, Q>(
        store: &S,
        queue: &Q,
        viewer_id: Uuid,
        problem_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<RejudgeResponse>
    where
        S: Store + ?Sized,
        Q: JudgeQueue + ?Sized,
    {
        let problem = store
            .problem(problem_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))?;

        let viewer = store
            .user(viewer_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        // The contest in scope for a whole-problem rejudge is the one
        // currently running over this problem, if any.
        let contest = store.contest_for_problem_at(problem.id, now).await?;

        let roles = roles_of(&viewer, contest.as_ref(), &problem);
        let scope = SubmissionScope {
            viewer: &viewer,
            author: &viewer,
            roles: &roles,
            contest: contest.as_ref(),
            now,
        };
        if !access::can_rejudge(&scope).is_allowed() {
            return Err(AppError::Forbidden(
                "Not allowed to rejudge this problem's submissions".to_string(),
            ));
        }

        let ids = store.reset_problem_status(problem.id, Status::Wait).await?;
        let updated = ids.len() as u64;

        for id in ids {
            // The reset already committed; a queue hiccup must not undo the
            // count we report.
            if let Err(e) = queue.enqueue(id).await {
                tracing::error!(submission_id = %id, error = %e, "failed to enqueue for grading");
            }
        }

        tracing::info!(%problem_id, updated, "problem rejudge completed");
        Ok(RejudgeResponse { updated })
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    /// Load the submission and every record its decision reads.
    async fn resolve<S: Store + ?Sized>(
        store: &S,
        viewer_id: Uuid,
        submission_id: Uuid,
    ) -> AppResult<Resolved> {
        let submission = store
            .submission(submission_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

        let problem = store
            .problem(submission.problem_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Submission references a missing problem".to_string()))?;

        let author = store
            .user(submission.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Submission references a missing author".to_string()))?;

        let viewer = store
            .user(viewer_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        // Resolved at decision time against the contest's current schedule:
        // shortening end_time re-classifies past submissions.
        let contest = store
            .contest_for_problem_at(submission.problem_id, submission.created_at)
            .await?;

        Ok(Resolved {
            submission,
            problem,
            author,
            viewer,
            contest,
        })
    }

    fn authorize_view(resolved: &Resolved, now: DateTime<Utc>) -> AppResult<()> {
        let roles = roles_of(&resolved.viewer, resolved.contest.as_ref(), &resolved.problem);
        let scope = SubmissionScope {
            viewer: &resolved.viewer,
            author: &resolved.author,
            roles: &roles,
            contest: resolved.contest.as_ref(),
            now,
        };

        match access::can_view_detail(&scope) {
            Access::Allow => Ok(()),
            Access::Deny => {
                tracing::debug!(
                    submission_id = %resolved.submission.id,
                    viewer_id = %resolved.viewer.id,
                    "view-detail denied"
                );
                Err(AppError::Forbidden(
                    "Not allowed to view this submission's detail".to_string(),
                ))
            }
        }
    }

    fn authorize_rejudge(resolved: &Resolved, now: DateTime<Utc>) -> AppResult<()> {
        let roles = roles_of(&resolved.viewer, resolved.contest.as_ref(), &resolved.problem);
        let scope = SubmissionScope {
            viewer: &resolved.viewer,
            author: &resolved.author,
            roles: &roles,
            contest: resolved.contest.as_ref(),
            now,
        };

        match access::can_rejudge(&scope) {
            Access::Allow => Ok(()),
            Access::Deny => Err(AppError::Forbidden(
                "Not allowed to rejudge this submission".to_string(),
            )),
        }
    }

    /// Reset one submission to `wait` and enqueue it. Returns whether the
    /// status row was updated (false when it vanished under us).
    async fn reset_one<S, Q>(store: &S, queue: &Q, submission_id: Uuid) -> AppResult<bool>
    where
        S: Store + ?Sized,
        Q: JudgeQueue + ?Sized,
    {
        // Only the status column is touched; error_message and source stay
        // whatever the grader last wrote. Setting an already-waiting
        // submission to `wait` is a state-wise no-op.
        if !store.set_submission_status(submission_id, Status::Wait).await? {
            return Ok(false);
        }

        // The reset already committed; a queue hiccup must not turn a
        // partially applied batch into an error with no count.
        if let Err(e) = queue.enqueue(submission_id).await {
            tracing::error!(submission_id = %submission_id, error = %e, "failed to enqueue for grading");
        }

        tracing::info!(%submission_id, "submission reset to wait for rejudging");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::MockStore;
    use crate::models::{Contest, UserLevel};
    use crate::services::queue::MockJudgeQueue;
    use chrono::Duration;
    use std::collections::HashMap;

    fn user(level: UserLevel) -> User {
        User {
            id: Uuid::new_v4(),
            username: format!("u-{}", Uuid::new_v4().simple()),
            level: level.as_str().to_string(),
            created_at: Utc::now() - Duration::days(10),
        }
    }

    fn problem(owner: &User) -> Problem {
        Problem {
            id: Uuid::new_v4(),
            title: "Shortest Path".to_string(),
            owner_id: owner.id,
            is_public: true,
            created_at: Utc::now() - Duration::days(5),
        }
    }

    fn submission(author: &User, problem: &Problem, status: Status) -> Submission {
        Submission {
            id: Uuid::new_v4(),
            user_id: author.id,
            problem_id: problem.id,
            language: "cpp".to_string(),
            source_code: "int main() {}".to_string(),
            status: status.as_str().to_string(),
            error_message: Some("line 3: expected ';'".to_string()),
            created_at: Utc::now() - Duration::minutes(30),
            judged_at: Some(Utc::now() - Duration::minutes(29)),
        }
    }

    fn running_snapshot(owner: &User, contestants: &[&User]) -> ContestSnapshot {
        let now = Utc::now();
        ContestSnapshot {
            contest: Contest {
                id: Uuid::new_v4(),
                title: "Qualifier".to_string(),
                owner_id: owner.id,
                start_time: now - Duration::hours(1),
                end_time: now + Duration::hours(4),
                freeze_minutes: None,
                created_at: now - Duration::days(1),
            },
            coowners: Default::default(),
            contestants: contestants.iter().map(|u| u.id).collect(),
        }
    }

    /// Expect `user(id)` lookups for any of the given users.
    fn expect_users(store: &mut MockStore, users: &[&User]) {
        let by_id: HashMap<Uuid, User> =
            users.iter().map(|u| (u.id, (*u).clone())).collect();
        store
            .expect_user()
            .returning(move |id| Ok(by_id.get(&id).cloned()));
    }

    #[tokio::test]
    async fn test_error_message_submission_not_found() {
        let mut store = MockStore::new();
        store.expect_submission().returning(|_| Ok(None));

        let err = StatusService::error_message(&store, Uuid::new_v4(), Uuid::new_v4(), Utc::now())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_error_message_self_view_practice() {
        let setter = user(UserLevel::Judge);
        let author = user(UserLevel::User);
        let p = problem(&setter);
        let sub = submission(&author, &p, Status::CompileError);

        let mut store = MockStore::new();
        let sub_clone = sub.clone();
        store
            .expect_submission()
            .returning(move |_| Ok(Some(sub_clone.clone())));
        let p_clone = p.clone();
        store
            .expect_problem()
            .returning(move |_| Ok(Some(p_clone.clone())));
        expect_users(&mut store, &[&author, &setter]);
        store
            .expect_contest_for_problem_at()
            .returning(|_, _| Ok(None));

        let response = StatusService::error_message(&store, author.id, sub.id, Utc::now())
            .await
            .unwrap();

        assert_eq!(response.submission_id, sub.id);
        assert_eq!(response.error_message, sub.error_message);
        assert_eq!(response.status, Status::CompileError.as_str());
    }

    #[tokio::test]
    async fn test_source_denied_for_stranger() {
        let setter = user(UserLevel::Judge);
        let author = user(UserLevel::User);
        let stranger = user(UserLevel::User);
        let p = problem(&setter);
        let sub = submission(&author, &p, Status::Accepted);

        let mut store = MockStore::new();
        let sub_clone = sub.clone();
        store
            .expect_submission()
            .returning(move |_| Ok(Some(sub_clone.clone())));
        let p_clone = p.clone();
        store
            .expect_problem()
            .returning(move |_| Ok(Some(p_clone.clone())));
        expect_users(&mut store, &[&author, &stranger]);
        store
            .expect_contest_for_problem_at()
            .returning(|_, _| Ok(None));

        let err = StatusService::source(&store, stranger.id, sub.id, Utc::now())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_rejudge_by_problem_owner_resets_and_enqueues() {
        let setter = user(UserLevel::Judge);
        let author = user(UserLevel::User);
        let p = problem(&setter);
        let sub = submission(&author, &p, Status::Accepted);

        let mut store = MockStore::new();
        let sub_clone = sub.clone();
        store
            .expect_submission()
            .returning(move |_| Ok(Some(sub_clone.clone())));
        let p_clone = p.clone();
        store
            .expect_problem()
            .returning(move |_| Ok(Some(p_clone.clone())));
        expect_users(&mut store, &[&author, &setter]);
        store
            .expect_contest_for_problem_at()
            .returning(|_, _| Ok(None));
        let sub_id = sub.id;
        store
            .expect_set_submission_status()
            .withf(move |id, status| *id == sub_id && *status == Status::Wait)
            .times(1)
            .returning(|_, _| Ok(true));

        let mut queue = MockJudgeQueue::new();
        queue.expect_enqueue().times(1).returning(|_| Ok(()));

        let response = StatusService::rejudge(&store, &queue, setter.id, sub.id, Utc::now())
            .await
            .unwrap();

        assert_eq!(response.updated, 1);
    }

    #[tokio::test]
    async fn test_rejudge_denied_after_contest_ends() {
        let owner = user(UserLevel::Judge);
        let setter = user(UserLevel::Judge);
        let author = user(UserLevel::User);
        let p = problem(&setter);
        let sub = submission(&author, &p, Status::NotAccepted);

        let mut snapshot = running_snapshot(&owner, &[&author]);
        // The submission fell inside the window, but the window is over.
        snapshot.contest.start_time = sub.created_at - Duration::hours(1);
        snapshot.contest.end_time = Utc::now() - Duration::minutes(5);

        let mut store = MockStore::new();
        let sub_clone = sub.clone();
        store
            .expect_submission()
            .returning(move |_| Ok(Some(sub_clone.clone())));
        let p_clone = p.clone();
        store
            .expect_problem()
            .returning(move |_| Ok(Some(p_clone.clone())));
        expect_users(&mut store, &[&author, &owner]);
        store
            .expect_contest_for_problem_at()
            .returning(move |_, _| Ok(Some(snapshot.clone())));
        // No status write may happen on a denied request.
        store.expect_set_submission_status().times(0);

        let queue = MockJudgeQueue::new();

        let err = StatusService::rejudge(&store, &queue, owner.id, sub.id, Utc::now())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_rejudge_batch_skips_denied_and_counts_updated() {
        let setter = user(UserLevel::Judge);
        let other_setter = user(UserLevel::Judge);
        let author = user(UserLevel::User);
        let own_problem = problem(&setter);
        let foreign_problem = problem(&other_setter);
        let own_sub = submission(&author, &own_problem, Status::Accepted);
        let foreign_sub = submission(&author, &foreign_problem, Status::Accepted);

        let mut store = MockStore::new();
        let subs = vec![own_sub.clone(), foreign_sub.clone()];
        store.expect_submission().returning(move |id| {
            Ok(subs.iter().find(|s| s.id == id).cloned())
        });
        let problems = vec![own_problem.clone(), foreign_problem.clone()];
        store.expect_problem().returning(move |id| {
            Ok(problems.iter().find(|p| p.id == id).cloned())
        });
        expect_users(&mut store, &[&author, &setter]);
        store
            .expect_contest_for_problem_at()
            .returning(|_, _| Ok(None));
        let own_sub_id = own_sub.id;
        store
            .expect_set_submission_status()
            .withf(move |id, _| *id == own_sub_id)
            .times(1)
            .returning(|_, _| Ok(true));

        let mut queue = MockJudgeQueue::new();
        queue.expect_enqueue().times(1).returning(|_| Ok(()));

        let missing = Uuid::new_v4();
        let response = StatusService::rejudge_batch(
            &store,
            &queue,
            setter.id,
            &[own_sub.id, foreign_sub.id, missing],
            Utc::now(),
        )
        .await
        .unwrap();

        // Only the setter's own problem's submission was reset; the foreign
        // one was denied and the unknown id skipped.
        assert_eq!(response.updated, 1);
    }

    #[tokio::test]
    async fn test_rejudge_batch_reports_count_despite_queue_failure() {
        let setter = user(UserLevel::Judge);
        let author = user(UserLevel::User);
        let p = problem(&setter);
        let first = submission(&author, &p, Status::Accepted);
        let second = submission(&author, &p, Status::NotAccepted);

        let mut store = MockStore::new();
        let subs = vec![first.clone(), second.clone()];
        store.expect_submission().returning(move |id| {
            Ok(subs.iter().find(|s| s.id == id).cloned())
        });
        let p_clone = p.clone();
        store
            .expect_problem()
            .returning(move |_| Ok(Some(p_clone.clone())));
        expect_users(&mut store, &[&author, &setter]);
        store
            .expect_contest_for_problem_at()
            .returning(|_, _| Ok(None));
        store
            .expect_set_submission_status()
            .times(2)
            .returning(|_, _| Ok(true));

        // The second enqueue fails; both resets already committed and must
        // still be counted.
        let mut queue = MockJudgeQueue::new();
        let mut calls = 0;
        queue.expect_enqueue().times(2).returning(move |_| {
            calls += 1;
            if calls == 2 {
                Err(AppError::Redis("connection reset".to_string()))
            } else {
                Ok(())
            }
        });

        let response = StatusService::rejudge_batch(
            &store,
            &queue,
            setter.id,
            &[first.id, second.id],
            Utc::now(),
        )
        .await
        .unwrap();

        assert_eq!(response.updated, 2);
    }

    #[tokio::test]
    async fn test_rejudge_already_waiting_submission() {
        let setter = user(UserLevel::Judge);
        let author = user(UserLevel::User);
        let p = problem(&setter);
        let sub = submission(&author, &p, Status::Wait);

        let mut store = MockStore::new();
        let sub_clone = sub.clone();
        store
            .expect_submission()
            .returning(move |_| Ok(Some(sub_clone.clone())));
        let p_clone = p.clone();
        store
            .expect_problem()
            .returning(move |_| Ok(Some(p_clone.clone())));
        expect_users(&mut store, &[&author, &setter]);
        store
            .expect_contest_for_problem_at()
            .returning(|_, _| Ok(None));
        // The write happens regardless of the current status.
        let sub_id = sub.id;
        store
            .expect_set_submission_status()
            .withf(move |id, status| *id == sub_id && *status == Status::Wait)
            .times(1)
            .returning(|_, _| Ok(true));

        let mut queue = MockJudgeQueue::new();
        queue.expect_enqueue().times(1).returning(|_| Ok(()));

        let response = StatusService::rejudge(&store, &queue, setter.id, sub.id, Utc::now())
            .await
            .unwrap();

        assert_eq!(response.updated, 1);
    }

    #[tokio::test]
    async fn test_rejudge_problem_by_admin_counts_all() {
        let admin = user(UserLevel::Admin);
        let setter = user(UserLevel::Judge);
        let p = problem(&setter);
        let ids = vec![Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];

        let mut store = MockStore::new();
        let p_clone = p.clone();
        store
            .expect_problem()
            .returning(move |_| Ok(Some(p_clone.clone())));
        expect_users(&mut store, &[&admin]);
        store
            .expect_contest_for_problem_at()
            .returning(|_, _| Ok(None));
        let ids_clone = ids.clone();
        let problem_id = p.id;
        store
            .expect_reset_problem_status()
            .withf(move |id, status| *id == problem_id && *status == Status::Wait)
            .times(1)
            .returning(move |_, _| Ok(ids_clone.clone()));

        let mut queue = MockJudgeQueue::new();
        queue.expect_enqueue().times(3).returning(|_| Ok(()));

        let response =
            StatusService::rejudge_problem(&store, &queue, admin.id, p.id, Utc::now())
                .await
                .unwrap();

        assert_eq!(response.updated, 3);
    }

    #[tokio::test]
    async fn test_rejudge_problem_denied_for_normal_user() {
        let setter = user(UserLevel::Judge);
        let normal = user(UserLevel::User);
        let p = problem(&setter);

        let mut store = MockStore::new();
        let p_clone = p.clone();
        store
            .expect_problem()
            .returning(move |_| Ok(Some(p_clone.clone())));
        expect_users(&mut store, &[&normal]);
        store
            .expect_contest_for_problem_at()
            .returning(|_, _| Ok(None));
        store.expect_reset_problem_status().times(0);

        let queue = MockJudgeQueue::new();

        let err = StatusService::rejudge_problem(&store, &queue, normal.id, p.id, Utc::now())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
