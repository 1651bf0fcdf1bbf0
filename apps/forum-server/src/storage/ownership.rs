// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ownership enforcement for guarded operations.
//!
//! These are the building blocks of the guard's per-operation policies:
//! existence (`ResourceLookup`) and permission (`OwnershipEnforcer`).

use crate::auth::{AuthError, AuthenticatedUser, Resource};

use super::StorageResult;

/// Trait for resources that have an owner.
pub trait OwnedResource {
    /// Get the owner's user ID.
    fn owner_user_id(&self) -> &str;
}

/// Trait for enforcing ownership on guarded operations.
pub trait OwnershipEnforcer {
    /// Verify that the user owns this resource.
    ///
    /// # Errors
    /// Returns `AuthError::Forbidden(denial)` if the user doesn't own the resource.
    fn verify_ownership(&self, user: &AuthenticatedUser, denial: &'static str) -> Result<(), AuthError>;

    /// Verify that the user owns this resource or holds the admin role.
    fn verify_ownership_or_admin(
        &self,
        user: &AuthenticatedUser,
        denial: &'static str,
    ) -> Result<(), AuthError>;
}

impl<T: OwnedResource> OwnershipEnforcer for T {
    fn verify_ownership(&self, user: &AuthenticatedUser, denial: &'static str) -> Result<(), AuthError> {
        if self.owner_user_id() == user.user_id() {
            Ok(())
        } else {
            Err(AuthError::Forbidden(denial))
        }
    }

    fn verify_ownership_or_admin(
        &self,
        user: &AuthenticatedUser,
        denial: &'static str,
    ) -> Result<(), AuthError> {
        if self.owner_user_id() == user.user_id() || user.is_admin() {
            Ok(())
        } else {
            Err(AuthError::Forbidden(denial))
        }
    }
}

/// Turns a repository lookup into the guard's existence check.
pub trait ResourceLookup<T> {
    /// # Errors
    /// `AuthError::ResourceNotFound(resource)` when the lookup came back empty,
    /// `AuthError::Storage` when the repository failed.
    fn found_or(self, resource: Resource) -> Result<T, AuthError>;
}

impl<T> ResourceLookup<T> for StorageResult<Option<T>> {
    fn found_or(self, resource: Resource) -> Result<T, AuthError> {
        self?.ok_or(AuthError::ResourceNotFound(resource))
    }
}
