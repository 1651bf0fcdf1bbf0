// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session repository.
//!
//! Sessions are append-only: `put` inserts, `mark_logged_out` stamps the
//! logout time once, nothing deletes. All lifecycle checks run under the
//! write lock so concurrent sign-outs of one token serialize.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use super::Identity;
use crate::storage::{read_lock, write_lock, StorageError, StorageResult, UniqueField};

/// An issued access token and its validity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Record identifier (UUID)
    pub id: String,
    /// Bearer token presented by clients
    pub token: String,
    /// Owning identity (shared, never mutated through the session)
    pub identity: Arc<Identity>,
    pub login_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub logout_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_logged_out(&self) -> bool {
        self.logout_at.is_some()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Persistence contract for sessions.
pub trait SessionRepository: Send + Sync {
    /// Persist a newly issued session.
    ///
    /// # Errors
    /// `UniqueViolation(Token)` if the token is already present.
    fn put(&self, session: Session) -> StorageResult<()>;

    /// Look up a session by token. No side effects.
    fn get_by_token(&self, token: &str) -> StorageResult<Option<Session>>;

    /// Stamp the logout time on a currently active session.
    ///
    /// # Errors
    /// `NotFound` for an unknown token, `AlreadyLoggedOut` if the logout time
    /// is already set, `Expired` if the validity window has passed.
    fn mark_logged_out(&self, token: &str, now: DateTime<Utc>) -> StorageResult<Session>;
}

/// In-memory session repository.
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn put(&self, session: Session) -> StorageResult<()> {
        let mut sessions = write_lock(&self.sessions)?;
        if sessions.contains_key(&session.token) {
            return Err(StorageError::UniqueViolation(UniqueField::Token));
        }
        sessions.insert(session.token.clone(), session);
        Ok(())
    }

    fn get_by_token(&self, token: &str) -> StorageResult<Option<Session>> {
        let sessions = read_lock(&self.sessions)?;
        Ok(sessions.get(token).cloned())
    }

    fn mark_logged_out(&self, token: &str, now: DateTime<Utc>) -> StorageResult<Session> {
        let mut sessions = write_lock(&self.sessions)?;
        let session = sessions
            .get_mut(token)
            .ok_or_else(|| StorageError::NotFound("Session".to_string()))?;

        if session.is_logged_out() {
            return Err(StorageError::AlreadyLoggedOut);
        }
        if session.is_expired(now) {
            return Err(StorageError::Expired);
        }

        session.logout_at = Some(now);
        Ok(session.clone())
    }
}
