// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Resource services.
//!
//! Services take the raw session token and an explicit `now`, run the
//! authorization guard with their own policy and return typed results.
//! They never log; the HTTP layer does.

pub mod answers;
pub mod questions;
pub mod users;

pub use answers::AnswerService;
pub use questions::QuestionService;
pub use users::{NewIdentity, UserService};
