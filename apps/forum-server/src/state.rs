// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use ring::rand::{SecureRandom, SystemRandom};

use crate::auth::AuthorizationGuard;
use crate::services::{AnswerService, QuestionService, UserService};
use crate::storage::{
    InMemoryAnswerRepository, InMemoryIdentityRepository, InMemoryQuestionRepository,
    InMemorySessionRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub guard: AuthorizationGuard,
    pub users: Arc<UserService>,
    pub questions: Arc<QuestionService>,
    pub answers: Arc<AnswerService>,
}

impl AppState {
    /// Wire in-memory repositories into the guard and services.
    pub fn new(signing_key: &[u8]) -> Self {
        let identities = Arc::new(InMemoryIdentityRepository::new());
        let sessions = Arc::new(InMemorySessionRepository::new());
        let questions = Arc::new(InMemoryQuestionRepository::new());
        let answers = Arc::new(InMemoryAnswerRepository::new());

        let guard = AuthorizationGuard::new(sessions.clone());

        Self {
            users: Arc::new(UserService::new(
                identities,
                sessions,
                guard.clone(),
                signing_key,
            )),
            questions: Arc::new(QuestionService::new(guard.clone(), questions.clone())),
            answers: Arc::new(AnswerService::new(guard.clone(), answers, questions)),
            guard,
        }
    }
}

/// Random 32-byte HS256 key.
pub fn random_signing_key() -> Result<Vec<u8>, ring::error::Unspecified> {
    let mut key = vec![0u8; 32];
    SystemRandom::new().fill(&mut key)?;
    Ok(key)
}

#[cfg(test)]
impl Default for AppState {
    fn default() -> Self {
        let key = random_signing_key().expect("random signing key");
        Self::new(&key)
    }
}
