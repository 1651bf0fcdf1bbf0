// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Forum Server - Question and Answer Backend
//!
//! A discussion-forum backend whose protected operations all pass through
//! one authorization guard.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Credential verification, session tokens and the guard
//! - `services` - Answer, question and user operations
//! - `storage` - Repository traits and in-memory implementations

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
