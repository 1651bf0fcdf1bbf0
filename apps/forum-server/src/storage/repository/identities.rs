// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Identity repository.
//!
//! Identities are registered forum accounts. Username and email are unique;
//! when both collide on insert the email violation is reported.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use crate::auth::Role;
use crate::storage::{read_lock, write_lock, StorageError, StorageResult, UniqueField};

/// A registered forum account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Stable identifier (UUID)
    pub id: String,
    pub username: String,
    pub email: String,
    /// Base64 PBKDF2 output
    pub password_hash: String,
    /// Base64 per-identity salt
    pub salt: String,
    pub first_name: String,
    pub last_name: String,
    pub about_me: Option<String>,
    pub dob: Option<String>,
    pub contact_number: Option<String>,
    pub country: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Persistence contract for identities.
pub trait IdentityRepository: Send + Sync {
    /// Insert a new identity.
    ///
    /// # Errors
    /// `UniqueViolation(Email)` or `UniqueViolation(Username)` on collision,
    /// `AlreadyExists` if the id is taken.
    fn create(&self, identity: Identity) -> StorageResult<Arc<Identity>>;

    fn get(&self, user_id: &str) -> StorageResult<Option<Arc<Identity>>>;

    fn get_by_username(&self, username: &str) -> StorageResult<Option<Arc<Identity>>>;
}

#[derive(Default)]
struct IdentityTable {
    by_id: HashMap<String, Arc<Identity>>,
    id_by_username: HashMap<String, String>,
    id_by_email: HashMap<String, String>,
}

/// In-memory identity repository.
#[derive(Default)]
pub struct InMemoryIdentityRepository {
    table: RwLock<IdentityTable>,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityRepository for InMemoryIdentityRepository {
    fn create(&self, identity: Identity) -> StorageResult<Arc<Identity>> {
        let mut table = write_lock(&self.table)?;

        if table.id_by_email.contains_key(&identity.email) {
            return Err(StorageError::UniqueViolation(UniqueField::Email));
        }
        if table.id_by_username.contains_key(&identity.username) {
            return Err(StorageError::UniqueViolation(UniqueField::Username));
        }
        if table.by_id.contains_key(&identity.id) {
            return Err(StorageError::AlreadyExists(format!("Identity {}", identity.id)));
        }

        let identity = Arc::new(identity);
        table
            .id_by_username
            .insert(identity.username.clone(), identity.id.clone());
        table
            .id_by_email
            .insert(identity.email.clone(), identity.id.clone());
        table.by_id.insert(identity.id.clone(), Arc::clone(&identity));
        Ok(identity)
    }

    fn get(&self, user_id: &str) -> StorageResult<Option<Arc<Identity>>> {
        let table = read_lock(&self.table)?;
        Ok(table.by_id.get(user_id).cloned())
    }

    fn get_by_username(&self, username: &str) -> StorageResult<Option<Arc<Identity>>> {
        let table = read_lock(&self.table)?;
        Ok(table
            .id_by_username
            .get(username)
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }
}

#[cfg(test)]
pub(crate) fn test_identity(username: &str, role: Role) -> Identity {
    Identity {
        id: uuid::Uuid::new_v4().to_string(),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: String::new(),
        salt: String::new(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        about_me: None,
        dob: None,
        contact_number: None,
        country: None,
        role,
        created_at: Utc::now(),
    }
}
