// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Credential verification, session token issuance and the authorization
//! guard shared by every protected operation.
//!
//! ## Auth Flow
//!
//! 1. Client signs in with `authorization: Basic base64(username:password)`
//! 2. Server:
//!    - Looks up the identity by username
//!    - Recomputes the salted PBKDF2 hash and compares it with the stored one
//!    - Issues an HS256 token valid for exactly 8 hours and records a session
//! 3. Client sends `authorization: Bearer <token>` on later requests
//! 4. The guard resolves the session, rejects logged-out or expired ones, then
//!    runs the operation's existence and ownership policy
//!
//! ## Security
//!
//! - Sessions are the source of truth; a well-formed token without a session
//!   is rejected
//! - Expiry is enforced on every guarded request and on sign-out
//! - Unknown username and wrong password share one error kind

pub mod claims;
pub mod credentials;
pub mod error;
pub mod extractor;
pub mod guard;
pub mod password;
pub mod roles;
pub mod token;

pub use claims::{AuthenticatedUser, SessionClaims};
pub use credentials::CredentialVerifier;
pub use error::{AuthError, ErrorKind, Resource};
pub use extractor::{Auth, BasicCredentials, BearerToken};
pub use guard::AuthorizationGuard;
pub use roles::Role;
pub use token::{TokenIssuer, SESSION_TTL_HOURS};
