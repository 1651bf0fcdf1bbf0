// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication and authorization errors.
//!
//! Every failure the guard, the credential verifier or the session lifecycle
//! can produce is a variant here. Codes are part of the public contract and
//! must stay stable.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::storage::StorageError;

/// Resource kinds that the guard checks for existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Answer,
    Question,
    User,
}

/// Coarse error classes, one per caller-visible handling strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Authentication,
    Authorization,
    NotFound,
    SignUpConflict,
    SignOut,
    Conflict,
    Internal,
}

/// Authentication/authorization error type.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No identity with the presented username
    #[error("This username does not exist")]
    UnknownUser,
    /// Password hash mismatch
    #[error("Password failed")]
    BadPassword,
    /// Token is missing or does not resolve to a session
    #[error("User has not signed in")]
    NotSignedIn,
    /// Session has a logout time
    #[error("User is signed out. Sign in first")]
    SignedOut,
    /// Session validity window has passed
    #[error("Session has expired. Sign in again")]
    SessionExpired,
    /// Resolved identity may not perform the operation
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("{}", not_found_message(.0))]
    ResourceNotFound(Resource),
    #[error("Try any other Username, this Username has already been taken")]
    DuplicateUsername,
    #[error("This user has already been registered, try with any other emailId")]
    DuplicateEmail,
    /// Sign-out without an active session
    #[error("User is not Signed in")]
    SignOutRestricted,
    /// Optimistic concurrency check failed
    #[error("{0} was modified concurrently, retry the request")]
    Conflict(&'static str),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    /// Signer or random source failure
    #[error("Internal error: {0}")]
    Internal(String),
}

fn not_found_message(resource: &Resource) -> &'static str {
    match resource {
        Resource::Answer => "Entered answer uuid does not exist",
        Resource::Question => "The question entered is invalid",
        Resource::User => "User with entered uuid does not exist",
    }
}

#[derive(Serialize)]
struct AuthErrorBody {
    code: String,
    message: String,
}

impl AuthError {
    /// Get the machine-readable error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::UnknownUser => "ATH-001",
            AuthError::BadPassword => "ATH-002",
            AuthError::NotSignedIn => "ATHR-001",
            AuthError::SignedOut | AuthError::SessionExpired => "ATHR-002",
            AuthError::Forbidden(_) => "ATHR-003",
            AuthError::ResourceNotFound(Resource::Answer) => "ANS-001",
            AuthError::ResourceNotFound(Resource::Question) => "QUES-001",
            AuthError::ResourceNotFound(Resource::User) => "USR-001",
            AuthError::DuplicateUsername => "SGR-001",
            AuthError::DuplicateEmail => "SGR-002",
            AuthError::SignOutRestricted => "SGR-001",
            AuthError::Conflict(_) => "CONFLICT",
            AuthError::Storage(_) | AuthError::Internal(_) => "INTERNAL",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UnknownUser | AuthError::BadPassword => ErrorKind::Authentication,
            AuthError::NotSignedIn
            | AuthError::SignedOut
            | AuthError::SessionExpired
            | AuthError::Forbidden(_) => ErrorKind::Authorization,
            AuthError::ResourceNotFound(_) => ErrorKind::NotFound,
            AuthError::DuplicateUsername | AuthError::DuplicateEmail => ErrorKind::SignUpConflict,
            AuthError::SignOutRestricted => ErrorKind::SignOut,
            AuthError::Conflict(_) => ErrorKind::Conflict,
            AuthError::Storage(_) | AuthError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::UnknownUser
            | AuthError::BadPassword
            | AuthError::NotSignedIn
            | AuthError::SignedOut
            | AuthError::SessionExpired
            | AuthError::SignOutRestricted => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden(_) => StatusCode::FORBIDDEN,
            AuthError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            AuthError::DuplicateUsername | AuthError::DuplicateEmail | AuthError::Conflict(_) => {
                StatusCode::CONFLICT
            }
            AuthError::Storage(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            code: self.error_code().to_string(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}
