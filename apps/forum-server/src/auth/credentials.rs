// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Username/password verification.

use std::sync::Arc;

use super::{password::verify_password, AuthError};
use crate::storage::{Identity, IdentityRepository};

/// Checks presented credentials against stored salted hashes.
pub struct CredentialVerifier {
    identities: Arc<dyn IdentityRepository>,
}

impl CredentialVerifier {
    pub fn new(identities: Arc<dyn IdentityRepository>) -> Self {
        Self { identities }
    }

    /// Resolve the identity for `username` if `password` matches.
    ///
    /// # Errors
    /// `UnknownUser` (ATH-001) when no identity has that username,
    /// `BadPassword` (ATH-002) when the recomputed hash differs.
    pub fn verify(&self, username: &str, password: &str) -> Result<Arc<Identity>, AuthError> {
        let identity = self
            .identities
            .get_by_username(username)?
            .ok_or(AuthError::UnknownUser)?;

        if verify_password(password, &identity.salt, &identity.password_hash) {
            Ok(identity)
        } else {
            Err(AuthError::BadPassword)
        }
    }
}
