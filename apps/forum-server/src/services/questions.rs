// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Question posting and listing.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::auth::{AuthError, AuthorizationGuard};
use crate::storage::{Question, QuestionRepository};

pub struct QuestionService {
    guard: AuthorizationGuard,
    questions: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    pub fn new(guard: AuthorizationGuard, questions: Arc<dyn QuestionRepository>) -> Self {
        Self { guard, questions }
    }

    pub fn create_question(
        &self,
        token: &str,
        content: String,
        now: DateTime<Utc>,
    ) -> Result<Question, AuthError> {
        let user = self.guard.authenticate(token, now)?;

        let question = Question {
            id: uuid::Uuid::new_v4().to_string(),
            owner_user_id: user.user_id().to_string(),
            content,
            created_at: now,
        };
        self.questions.create(question.clone())?;
        Ok(question)
    }

    pub fn list_questions(&self, token: &str, now: DateTime<Utc>) -> Result<Vec<Question>, AuthError> {
        self.guard.authenticate(token, now)?;
        Ok(self.questions.list_all()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Role, TokenIssuer};
    use crate::storage::repository::identities::test_identity;
    use crate::storage::{InMemoryQuestionRepository, InMemorySessionRepository};
    use chrono::Duration;

    #[test]
    fn create_and_list_questions() {
        let sessions = Arc::new(InMemorySessionRepository::new());
        let issuer = TokenIssuer::new(sessions.clone(), b"question-test");
        let svc = QuestionService::new(
            AuthorizationGuard::new(sessions),
            Arc::new(InMemoryQuestionRepository::new()),
        );

        let now = Utc::now();
        let identity = Arc::new(test_identity("alice", Role::NonAdmin));
        let session = issuer.issue(identity.clone(), now).unwrap();

        let first = svc
            .create_question(&session.token, "Why Rust?".to_string(), now)
            .unwrap();
        let second = svc
            .create_question(&session.token, "Why not?".to_string(), now + Duration::seconds(1))
            .unwrap();
        assert_eq!(first.owner_user_id, identity.id);

        let listed = svc.list_questions(&session.token, now).unwrap();
        assert_eq!(listed, vec![first, second]);
    }

    #[test]
    fn anonymous_caller_cannot_post() {
        let sessions = Arc::new(InMemorySessionRepository::new());
        let svc = QuestionService::new(
            AuthorizationGuard::new(sessions),
            Arc::new(InMemoryQuestionRepository::new()),
        );

        let err = svc
            .create_question("bogus", "hi".to_string(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, AuthError::NotSignedIn));
    }
}
