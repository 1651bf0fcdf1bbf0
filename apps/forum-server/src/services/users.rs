// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account lifecycle: signup, signin, signout and profile lookup.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use ring::rand::SystemRandom;

use crate::auth::{
    password::{generate_salt, hash_password},
    AuthError, AuthorizationGuard, CredentialVerifier, Resource, Role, TokenIssuer,
};
use crate::storage::{
    Identity, IdentityRepository, ResourceLookup, Session, SessionRepository, StorageError,
    UniqueField,
};

/// Signup input. The password is hashed before anything is stored.
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub about_me: Option<String>,
    pub dob: Option<String>,
    pub contact_number: Option<String>,
    pub country: Option<String>,
}

pub struct UserService {
    identities: Arc<dyn IdentityRepository>,
    sessions: Arc<dyn SessionRepository>,
    verifier: CredentialVerifier,
    issuer: TokenIssuer,
    guard: AuthorizationGuard,
    rng: SystemRandom,
}

impl UserService {
    pub fn new(
        identities: Arc<dyn IdentityRepository>,
        sessions: Arc<dyn SessionRepository>,
        guard: AuthorizationGuard,
        signing_key: &[u8],
    ) -> Self {
        Self {
            verifier: CredentialVerifier::new(Arc::clone(&identities)),
            issuer: TokenIssuer::new(Arc::clone(&sessions), signing_key),
            identities,
            sessions,
            guard,
            rng: SystemRandom::new(),
        }
    }

    /// Register a regular member.
    ///
    /// # Errors
    /// `DuplicateEmail` (SGR-002) or `DuplicateUsername` (SGR-001); email is
    /// reported when both collide.
    pub fn signup(&self, new: NewIdentity) -> Result<Arc<Identity>, AuthError> {
        self.register(new, Role::default())
    }

    /// Register an identity with an explicit role. Used for admin seeding.
    pub fn register(&self, new: NewIdentity, role: Role) -> Result<Arc<Identity>, AuthError> {
        let salt = generate_salt(&self.rng).map_err(|e| AuthError::Internal(e.to_string()))?;
        let password_hash = hash_password(&new.password, &salt);

        let identity = Identity {
            id: uuid::Uuid::new_v4().to_string(),
            username: new.username,
            email: new.email,
            password_hash,
            salt,
            first_name: new.first_name,
            last_name: new.last_name,
            about_me: new.about_me,
            dob: new.dob,
            contact_number: new.contact_number,
            country: new.country,
            role,
            created_at: Utc::now(),
        };

        self.identities.create(identity).map_err(|e| match e {
            StorageError::UniqueViolation(UniqueField::Email) => AuthError::DuplicateEmail,
            StorageError::UniqueViolation(UniqueField::Username) => AuthError::DuplicateUsername,
            other => AuthError::Storage(other),
        })
    }

    /// Verify credentials and open a session.
    pub fn signin(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<(Arc<Identity>, Session), AuthError> {
        let identity = self.verifier.verify(username, password)?;
        let session = self.issuer.issue(Arc::clone(&identity), now)?;
        Ok((identity, session))
    }

    /// Close the session behind `token`.
    ///
    /// # Errors
    /// `SignOutRestricted` (SGR-001) when the token is unknown, expired or
    /// already logged out.
    pub fn signout(&self, token: &str, now: DateTime<Utc>) -> Result<Session, AuthError> {
        self.sessions.mark_logged_out(token, now).map_err(|e| match e {
            StorageError::NotFound(_) | StorageError::AlreadyLoggedOut | StorageError::Expired => {
                AuthError::SignOutRestricted
            }
            other => AuthError::Storage(other),
        })
    }

    /// Any signed-in member may view any profile.
    pub fn get_profile(
        &self,
        token: &str,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Arc<Identity>, AuthError> {
        let (_, identity) = self.guard.authorize(token, now, |_| {
            self.identities.get(user_id).found_or(Resource::User)
        })?;
        Ok(identity)
    }
}

#[cfg(test)]
impl NewIdentity {
    pub(crate) fn sample(username: &str) -> Self {
        Self {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "password1".to_string(),
            first_name: "Sample".to_string(),
            last_name: "Member".to_string(),
            about_me: None,
            dob: None,
            contact_number: None,
            country: Some("India".to_string()),
        }
    }
}
