// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Answer operations.
//!
//! Each operation runs the guard with its own policy. Edit and delete read
//! the answer's version inside the policy and write only if it is unchanged,
//! so a concurrent modification surfaces as `Conflict` instead of being lost.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::auth::{AuthError, AuthorizationGuard, Resource};
use crate::storage::{
    Answer, AnswerRepository, OwnershipEnforcer, QuestionRepository, ResourceLookup,
    StorageError,
};

const EDIT_DENIED: &str = "Only the answer owner can edit the answer";
const DELETE_DENIED: &str = "Only the answer owner or admin can delete the answer";

pub struct AnswerService {
    guard: AuthorizationGuard,
    answers: Arc<dyn AnswerRepository>,
    questions: Arc<dyn QuestionRepository>,
}

/// Map a failed versioned write. The answer vanishing between read and write
/// is reported as not found.
fn write_error(err: StorageError) -> AuthError {
    match err {
        StorageError::VersionMismatch { .. } => AuthError::Conflict("Answer"),
        StorageError::NotFound(_) => AuthError::ResourceNotFound(Resource::Answer),
        other => AuthError::Storage(other),
    }
}

impl AnswerService {
    pub fn new(
        guard: AuthorizationGuard,
        answers: Arc<dyn AnswerRepository>,
        questions: Arc<dyn QuestionRepository>,
    ) -> Self {
        Self {
            guard,
            answers,
            questions,
        }
    }

    pub fn create_answer(
        &self,
        token: &str,
        question_id: &str,
        content: String,
        now: DateTime<Utc>,
    ) -> Result<Answer, AuthError> {
        let (user, question) = self.guard.authorize(token, now, |_| {
            self.questions.get(question_id).found_or(Resource::Question)
        })?;

        let answer = Answer {
            id: uuid::Uuid::new_v4().to_string(),
            question_id: question.id,
            owner_user_id: user.user_id().to_string(),
            content,
            created_at: now,
            version: 1,
        };
        self.answers.create(answer.clone())?;
        Ok(answer)
    }

    /// Owner only. Admins get no override here.
    pub fn edit_answer(
        &self,
        token: &str,
        answer_id: &str,
        content: String,
        now: DateTime<Utc>,
    ) -> Result<Answer, AuthError> {
        let (_, answer) = self.guard.authorize(token, now, |user| {
            let answer = self.answers.get(answer_id).found_or(Resource::Answer)?;
            answer.verify_ownership(user, EDIT_DENIED)?;
            Ok(answer)
        })?;

        self.answers
            .update_content(&answer.id, answer.version, content)
            .map_err(write_error)
    }

    /// Owner or admin.
    pub fn delete_answer(
        &self,
        token: &str,
        answer_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Answer, AuthError> {
        let (_, answer) = self.guard.authorize(token, now, |user| {
            let answer = self.answers.get(answer_id).found_or(Resource::Answer)?;
            answer.verify_ownership_or_admin(user, DELETE_DENIED)?;
            Ok(answer)
        })?;

        self.answers
            .delete(&answer.id, answer.version)
            .map_err(write_error)
    }

    pub fn list_answers(
        &self,
        token: &str,
        question_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<Answer>, AuthError> {
        let (_, question) = self.guard.authorize(token, now, |_| {
            self.questions.get(question_id).found_or(Resource::Question)
        })?;
        Ok(self.answers.list_by_question(&question.id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Role, TokenIssuer};
    use crate::storage::repository::identities::test_identity;
    use crate::storage::{
        InMemoryAnswerRepository, InMemoryQuestionRepository, InMemorySessionRepository,
        Question, Session, StorageResult,
    };
    use chrono::Duration;

    struct Forum {
        svc: AnswerService,
        issuer: TokenIssuer,
        answers: Arc<InMemoryAnswerRepository>,
        question: Question,
        now: DateTime<Utc>,
    }

    impl Forum {
        fn new() -> Self {
            let sessions = Arc::new(InMemorySessionRepository::new());
            let answers = Arc::new(InMemoryAnswerRepository::new());
            let questions = Arc::new(InMemoryQuestionRepository::new());
            let now = Utc::now();

            let question = Question {
                id: "q1".to_string(),
                owner_user_id: "someone".to_string(),
                content: "What is ownership?".to_string(),
                created_at: now,
            };
            questions.create(question.clone()).unwrap();

            Self {
                svc: AnswerService::new(
                    AuthorizationGuard::new(sessions.clone()),
                    answers.clone(),
                    questions,
                ),
                issuer: TokenIssuer::new(sessions, b"answer-test"),
                answers,
                question,
                now,
            }
        }

        fn sign_in(&self, username: &str, role: Role) -> Session {
            let identity = Arc::new(test_identity(username, role));
            self.issuer.issue(identity, self.now).unwrap()
        }
    }

    #[test]
    fn create_answer_sets_owner_parent_and_version() {
        let forum = Forum::new();
        let u1 = forum.sign_in("u1", Role::NonAdmin);

        let answer = forum
            .svc
            .create_answer(&u1.token, &forum.question.id, "Borrowing".to_string(), forum.now)
            .unwrap();

        assert_eq!(answer.owner_user_id, u1.identity.id);
        assert_eq!(answer.question_id, "q1");
        assert_eq!(answer.version, 1);
        assert_eq!(answer.created_at, forum.now);
    }

    #[test]
    fn create_answer_on_missing_question_is_ques_001() {
        let forum = Forum::new();
        let u1 = forum.sign_in("u1", Role::NonAdmin);

        let err = forum
            .svc
            .create_answer(&u1.token, "nope", "x".to_string(), forum.now)
            .unwrap_err();
        assert_eq!(err.error_code(), "QUES-001");
    }

    #[test]
    fn owner_edit_preserves_identity_fields() {
        let forum = Forum::new();
        let u1 = forum.sign_in("u1", Role::NonAdmin);
        let original = forum
            .svc
            .create_answer(&u1.token, "q1", "first".to_string(), forum.now)
            .unwrap();

        let edited = forum
            .svc
            .edit_answer(&u1.token, &original.id, "second".to_string(), forum.now)
            .unwrap();

        assert_eq!(edited.content, "second");
        assert_eq!(edited.id, original.id);
        assert_eq!(edited.owner_user_id, original.owner_user_id);
        assert_eq!(edited.question_id, original.question_id);
        assert_eq!(edited.created_at, original.created_at);
        assert_eq!(edited.version, 2);
    }

    #[test]
    fn admin_cannot_edit_but_can_delete_foreign_answer() {
        let forum = Forum::new();
        let u1 = forum.sign_in("u1", Role::NonAdmin);
        let u2 = forum.sign_in("u2", Role::NonAdmin);
        let u3 = forum.sign_in("u3", Role::Admin);

        let a1 = forum
            .svc
            .create_answer(&u1.token, "q1", "A1".to_string(), forum.now)
            .unwrap();
        let sibling = forum
            .svc
            .create_answer(&u2.token, "q1", "A2".to_string(), forum.now + Duration::seconds(1))
            .unwrap();

        let err = forum
            .svc
            .edit_answer(&u2.token, &a1.id, "hijack".to_string(), forum.now)
            .unwrap_err();
        assert_eq!(err.error_code(), "ATHR-003");

        let err = forum
            .svc
            .edit_answer(&u3.token, &a1.id, "admin edit".to_string(), forum.now)
            .unwrap_err();
        assert!(matches!(err, AuthError::Forbidden(EDIT_DENIED)));

        let err = forum.svc.delete_answer(&u2.token, &a1.id, forum.now).unwrap_err();
        assert!(matches!(err, AuthError::Forbidden(DELETE_DENIED)));

        let deleted = forum.svc.delete_answer(&u3.token, &a1.id, forum.now).unwrap();
        assert_eq!(deleted.id, a1.id);

        let err = forum.svc.delete_answer(&u1.token, &a1.id, forum.now).unwrap_err();
        assert_eq!(err.error_code(), "ANS-001");

        let remaining = forum.svc.list_answers(&u1.token, "q1", forum.now).unwrap();
        assert_eq!(remaining, vec![sibling]);
    }

    #[test]
    fn missing_answer_is_reported_before_permission() {
        let forum = Forum::new();
        let u2 = forum.sign_in("u2", Role::NonAdmin);

        let err = forum
            .svc
            .edit_answer(&u2.token, "missing", "x".to_string(), forum.now)
            .unwrap_err();
        assert_eq!(err.error_code(), "ANS-001");
    }

    #[test]
    fn signed_out_or_expired_callers_are_rejected_first() {
        let forum = Forum::new();
        let u1 = forum.sign_in("u1", Role::NonAdmin);

        let err = forum
            .svc
            .list_answers(&u1.token, "q1", forum.now + Duration::hours(8) + Duration::seconds(1))
            .unwrap_err();
        assert!(matches!(err, AuthError::SessionExpired));

        let err = forum
            .svc
            .list_answers("unknown", "missing-question", forum.now)
            .unwrap_err();
        assert!(matches!(err, AuthError::NotSignedIn));
    }

    #[test]
    fn list_answers_is_ordered_by_creation() {
        let forum = Forum::new();
        let u1 = forum.sign_in("u1", Role::NonAdmin);
        let u2 = forum.sign_in("u2", Role::NonAdmin);

        let later = forum
            .svc
            .create_answer(&u2.token, "q1", "later".to_string(), forum.now + Duration::seconds(5))
            .unwrap();
        let earlier = forum
            .svc
            .create_answer(&u1.token, "q1", "earlier".to_string(), forum.now)
            .unwrap();

        let listed = forum.svc.list_answers(&u2.token, "q1", forum.now).unwrap();
        assert_eq!(listed, vec![earlier, later]);

        let err = forum.svc.list_answers(&u2.token, "q2", forum.now).unwrap_err();
        assert_eq!(err.error_code(), "QUES-001");
    }

    /// Lets another writer land between the service's read and its write.
    struct InterleavedWriter {
        inner: InMemoryAnswerRepository,
    }

    impl AnswerRepository for InterleavedWriter {
        fn create(&self, answer: Answer) -> StorageResult<()> {
            self.inner.create(answer)
        }

        fn get(&self, answer_id: &str) -> StorageResult<Option<Answer>> {
            let seen = self.inner.get(answer_id)?;
            if let Some(answer) = &seen {
                self.inner.update_content(
                    &answer.id,
                    answer.version,
                    format!("{} (concurrent)", answer.content),
                )?;
            }
            Ok(seen)
        }

        fn update_content(
            &self,
            answer_id: &str,
            expected_version: u64,
            content: String,
        ) -> StorageResult<Answer> {
            self.inner.update_content(answer_id, expected_version, content)
        }

        fn delete(&self, answer_id: &str, expected_version: u64) -> StorageResult<Answer> {
            self.inner.delete(answer_id, expected_version)
        }

        fn list_by_question(&self, question_id: &str) -> StorageResult<Vec<Answer>> {
            self.inner.list_by_question(question_id)
        }
    }

    #[test]
    fn concurrent_write_makes_edit_and_delete_conflict() {
        let sessions = Arc::new(InMemorySessionRepository::new());
        let questions = Arc::new(InMemoryQuestionRepository::new());
        let answers = Arc::new(InterleavedWriter {
            inner: InMemoryAnswerRepository::new(),
        });
        let now = Utc::now();
        questions
            .create(Question {
                id: "q1".to_string(),
                owner_user_id: "someone".to_string(),
                content: "Q1".to_string(),
                created_at: now,
            })
            .unwrap();

        let svc = AnswerService::new(
            AuthorizationGuard::new(sessions.clone()),
            answers.clone(),
            questions,
        );
        let issuer = TokenIssuer::new(sessions, b"answer-race-test");
        let u1 = issuer
            .issue(Arc::new(test_identity("u1", Role::NonAdmin)), now)
            .unwrap();

        let a1 = svc
            .create_answer(&u1.token, "q1", "v1".to_string(), now)
            .unwrap();

        let err = svc
            .edit_answer(&u1.token, &a1.id, "mine".to_string(), now)
            .unwrap_err();
        assert!(matches!(err, AuthError::Conflict("Answer")));
        assert_eq!(err.status_code(), axum::http::StatusCode::CONFLICT);
        assert_eq!(err.error_code(), "CONFLICT");

        let err = svc.delete_answer(&u1.token, &a1.id, now).unwrap_err();
        assert!(matches!(err, AuthError::Conflict("Answer")));

        let survivor = answers.inner.get(&a1.id).unwrap().unwrap();
        assert_eq!(survivor.version, 3);
        assert!(survivor.content.ends_with("(concurrent)"));
    }

    #[test]
    fn fresh_read_after_concurrent_write_succeeds() {
        let forum = Forum::new();
        let u1 = forum.sign_in("u1", Role::NonAdmin);
        let a1 = forum
            .svc
            .create_answer(&u1.token, "q1", "v1".to_string(), forum.now)
            .unwrap();

        forum
            .answers
            .update_content(&a1.id, 1, "v2".to_string())
            .unwrap();

        let edited = forum
            .svc
            .edit_answer(&u1.token, &a1.id, "v3".to_string(), forum.now)
            .unwrap();
        assert_eq!(edited.version, 3);
        assert_eq!(edited.content, "v3");
    }

    #[test]
    fn vanished_answer_is_not_found() {
        let err = write_error(StorageError::NotFound("a-1".to_string()));
        assert_eq!(err.error_code(), "ANS-001");
    }
}
