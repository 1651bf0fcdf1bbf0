// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for credentials and bearer tokens.
//!
//! Protected handlers take a [`BearerToken`] and hand it to a service, which
//! runs the guard with its own policy:
//!
//! ```rust,ignore
//! async fn delete_answer(
//!     BearerToken(token): BearerToken,
//!     State(state): State<AppState>,
//!     Path(answer_id): Path<String>,
//! ) -> Result<Json<AnswerDeleteResponse>, ApiError> {
//!     state.answers.delete_answer(&token, &answer_id, Utc::now())?;
//!     // ...
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use base64ct::{Base64, Encoding};
use chrono::Utc;

use super::{AuthError, AuthenticatedUser};
use crate::{error::ApiError, state::AppState};

/// Raw session token from the `authorization` header.
///
/// Accepts either `Bearer <token>` or the bare token. A missing header is
/// the same as an unknown token: `NotSignedIn`.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl BearerToken {
    /// Read the token from `headers`, if one is present.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
        let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
        (!token.is_empty()).then(|| BearerToken(token.to_string()))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers).ok_or(AuthError::NotSignedIn)
    }
}

/// Username and password from an `authorization: Basic <base64>` header.
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl<S: Send + Sync> FromRequestParts<S> for BasicCredentials {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| ApiError::bad_request("Authorization header is required"))?
            .to_str()
            .map_err(|_| ApiError::bad_request("Invalid authorization header"))?;

        let encoded = header
            .strip_prefix("Basic ")
            .ok_or_else(|| ApiError::bad_request("Expected 'Basic <credentials>'"))?;

        let decoded = Base64::decode_vec(encoded.trim())
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .ok_or_else(|| ApiError::bad_request("Credentials are not valid base64"))?;

        let (username, password) = decoded
            .split_once(':')
            .ok_or_else(|| ApiError::bad_request("Expected 'username:password'"))?;

        Ok(BasicCredentials {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

/// Extractor for an authenticated caller (guard steps 1-2 only).
///
/// For handlers with no resource policy of their own.
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let BearerToken(token) = BearerToken::from_request_parts(parts, state).await?;
        let user = state.guard.authenticate(&token, Utc::now())?;
        Ok(Auth(user))
    }
}
