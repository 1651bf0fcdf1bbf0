// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and authenticated user representation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::roles::Role;
use crate::storage::{Identity, Session};

/// Claims embedded in an issued session token.
///
/// The token is an HS256 JWT. The guard never trusts these claims on their
/// own; the session repository is the source of truth for validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (identity ID)
    pub sub: String,
    /// Token ID, 128 random bits, base64url
    pub jti: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// Authenticated user resolved from an active session.
///
/// This is the primary type used throughout the application to represent
/// the identity making a request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub identity: Arc<Identity>,

    /// Session record ID
    pub session_id: String,

    /// End of the session's validity window
    pub expires_at: DateTime<Utc>,
}

impl AuthenticatedUser {
    pub fn from_session(session: Session) -> Self {
        Self {
            identity: session.identity,
            session_id: session.id,
            expires_at: session.expires_at,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.identity.id
    }

    pub fn role(&self) -> Role {
        self.identity.role
    }

    /// Check if this user is an admin.
    pub fn is_admin(&self) -> bool {
        self.identity.role == Role::Admin
    }
}

#[cfg(test)]
pub(crate) fn test_user(username: &str, role: Role) -> AuthenticatedUser {
    use crate::storage::repository::identities::test_identity;

    AuthenticatedUser {
        identity: Arc::new(test_identity(username, role)),
        session_id: "sess-test".to_string(),
        expires_at: Utc::now() + chrono::Duration::hours(8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::repository::identities::test_identity;

    #[test]
    fn from_session_carries_identity() {
        let now = Utc::now();
        let identity = Arc::new(test_identity("alice", Role::Admin));
        let session = Session {
            id: "sess_abc".to_string(),
            token: "tok".to_string(),
            identity: Arc::clone(&identity),
            login_at: now,
            expires_at: now + chrono::Duration::hours(8),
            logout_at: None,
        };

        let user = AuthenticatedUser::from_session(session);
        assert_eq!(user.user_id(), identity.id);
        assert_eq!(user.session_id, "sess_abc");
        assert_eq!(user.role(), Role::Admin);
        assert!(user.is_admin());
    }

    #[test]
    fn nonadmin_is_not_admin() {
        let user = test_user("bob", Role::NonAdmin);
        assert!(!user.is_admin());
    }

    #[test]
    fn claims_round_trip_through_json() {
        let claims = SessionClaims {
            sub: "user-1".to_string(),
            jti: "abc".to_string(),
            iat: 1_700_000_000,
            exp: 1_700_028_800,
        };
        let json = serde_json::to_string(&claims).unwrap();
        let parsed: SessionClaims = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, claims);
    }
}
