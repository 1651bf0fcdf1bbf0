// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authorization Guard
//!
//! Every protected operation runs the same ordered pipeline, stopping at the
//! first failure:
//!
//! 1. Token resolves to a session, else `NotSignedIn` (ATHR-001)
//! 2. Session has no logout time, else `SignedOut` (ATHR-002), and is inside
//!    its validity window, else `SessionExpired` (ATHR-002)
//! 3. Operation policy: target resource exists, else `ResourceNotFound`
//! 4. Operation policy: caller may act on it, else `Forbidden` (ATHR-003)
//!
//! Steps 1-2 are fixed. Steps 3-4 are a closure supplied by the caller, built
//! from [`ResourceLookup`](crate::storage::ResourceLookup) and
//! [`OwnershipEnforcer`](crate::storage::OwnershipEnforcer).

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{AuthError, AuthenticatedUser};
use crate::storage::SessionRepository;

/// The shared authorization pipeline.
#[derive(Clone)]
pub struct AuthorizationGuard {
    sessions: Arc<dyn SessionRepository>,
}

impl AuthorizationGuard {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    /// Run steps 1-2 and resolve the caller.
    pub fn authenticate(&self, token: &str, now: DateTime<Utc>) -> Result<AuthenticatedUser, AuthError> {
        let session = self
            .sessions
            .get_by_token(token)?
            .ok_or(AuthError::NotSignedIn)?;

        if session.is_logged_out() {
            return Err(AuthError::SignedOut);
        }
        if session.is_expired(now) {
            return Err(AuthError::SessionExpired);
        }

        Ok(AuthenticatedUser::from_session(session))
    }

    /// Run the full pipeline: steps 1-2, then `policy` for steps 3-4.
    ///
    /// The policy receives the resolved caller and returns whatever it looked
    /// up, so the operation can proceed without a second fetch.
    pub fn authorize<T, F>(
        &self,
        token: &str,
        now: DateTime<Utc>,
        policy: F,
    ) -> Result<(AuthenticatedUser, T), AuthError>
    where
        F: FnOnce(&AuthenticatedUser) -> Result<T, AuthError>,
    {
        let user = self.authenticate(token, now)?;
        let granted = policy(&user)?;
        Ok((user, granted))
    }
}
