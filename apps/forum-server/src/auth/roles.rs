// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User roles for authorization.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User roles for authorization.
///
/// ## Role Hierarchy
///
/// - `Admin` - May delete any answer regardless of ownership
/// - `NonAdmin` - Regular member, may only modify content it owns
///
/// The role is assigned when the identity is created and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Privileged moderator
    Admin,
    /// Regular forum member
    NonAdmin,
}

impl Default for Role {
    /// Signup always creates a regular member.
    fn default() -> Self {
        Role::NonAdmin
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::NonAdmin => write!(f, "nonadmin"),
        }
    }
}
