// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token issuance.
//!
//! Tokens are HS256 JWTs whose `jti` carries 128 random bits, so two issued
//! tokens never collide in practice. Validity is exactly eight hours from
//! issuance.

use std::sync::Arc;

use base64ct::{Base64UrlUnpadded, Encoding};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use ring::rand::{SecureRandom, SystemRandom};

use super::{claims::SessionClaims, AuthError};
use crate::storage::{Identity, Session, SessionRepository, StorageError, UniqueField};

/// Fixed session validity window.
pub const SESSION_TTL_HOURS: i64 = 8;

/// Bytes of randomness in each token id.
const TOKEN_ID_LEN: usize = 16;

/// Mints tokens and records the matching session.
pub struct TokenIssuer {
    sessions: Arc<dyn SessionRepository>,
    encoding_key: EncodingKey,
    rng: SystemRandom,
}

impl TokenIssuer {
    pub fn new(sessions: Arc<dyn SessionRepository>, signing_key: &[u8]) -> Self {
        Self {
            sessions,
            encoding_key: EncodingKey::from_secret(signing_key),
            rng: SystemRandom::new(),
        }
    }

    /// Issue a session for `identity` starting at `now`.
    ///
    /// # Errors
    /// `AuthError::Internal` if the random source or signer fails,
    /// `AuthError::Storage` if the session cannot be recorded.
    pub fn issue(&self, identity: Arc<Identity>, now: DateTime<Utc>) -> Result<Session, AuthError> {
        let expires_at = now + Duration::hours(SESSION_TTL_HOURS);

        let claims = SessionClaims {
            sub: identity.id.clone(),
            jti: self.token_id()?,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("token signer: {e}")))?;

        let session = Session {
            id: uuid::Uuid::new_v4().to_string(),
            token,
            identity,
            login_at: now,
            expires_at,
            logout_at: None,
        };

        self.sessions.put(session.clone()).map_err(|e| match e {
            // Only reachable if the random source repeats itself.
            StorageError::UniqueViolation(UniqueField::Token) => {
                AuthError::Conflict("Session token")
            }
            other => AuthError::Storage(other),
        })?;

        Ok(session)
    }

    fn token_id(&self) -> Result<String, AuthError> {
        let mut bytes = [0u8; TOKEN_ID_LEN];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| AuthError::Internal("secure random source failed".to_string()))?;
        Ok(Base64UrlUnpadded::encode_string(&bytes))
    }
}
