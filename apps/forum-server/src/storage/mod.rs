// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! Repository traits for identities, sessions, questions and answers, with
//! in-memory implementations behind `RwLock`s.
//!
//! ## Consistency Model
//!
//! - Every repository guards its table with a single lock, so each call is
//!   linearizable with respect to the rows it touches
//! - Uniqueness (username, email, token, ids) is enforced inside the write
//!   lock and surfaced as a distinguishable error
//! - Answers carry a version; mutations must present the version they read
//! - Sessions are never removed, only marked logged out

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

pub mod ownership;
pub mod repository;

pub use ownership::{OwnedResource, OwnershipEnforcer, ResourceLookup};
pub use repository::{
    Answer, AnswerRepository, Identity, IdentityRepository, InMemoryAnswerRepository,
    InMemoryIdentityRepository, InMemoryQuestionRepository, InMemorySessionRepository, Question,
    QuestionRepository, Session, SessionRepository,
};

/// Field whose uniqueness constraint was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Username,
    Email,
    Token,
}

impl std::fmt::Display for UniqueField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UniqueField::Username => write!(f, "username"),
            UniqueField::Email => write!(f, "email"),
            UniqueField::Token => write!(f, "token"),
        }
    }
}

/// Error type for repository operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Unique constraint violated on {0}")]
    UniqueViolation(UniqueField),

    #[error("Session already logged out")]
    AlreadyLoggedOut,

    #[error("Session expired")]
    Expired,

    #[error("Version mismatch on {id}: expected {expected}, found {actual}")]
    VersionMismatch { id: String, expected: u64, actual: u64 },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

impl<T> From<PoisonError<T>> for StorageError {
    fn from(_: PoisonError<T>) -> Self {
        StorageError::LockPoisoned
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

pub(crate) fn read_lock<T>(lock: &RwLock<T>) -> StorageResult<RwLockReadGuard<'_, T>> {
    Ok(lock.read()?)
}

pub(crate) fn write_lock<T>(lock: &RwLock<T>) -> StorageResult<RwLockWriteGuard<'_, T>> {
    Ok(lock.write()?)
}
