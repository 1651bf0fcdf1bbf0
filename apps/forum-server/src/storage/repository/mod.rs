// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to forum data.
//!
//! Each repository is a trait with an in-memory implementation; the rest of
//! the crate only holds `Arc<dyn ...Repository>` handles.

pub mod answers;
pub mod identities;
pub mod questions;
pub mod sessions;

pub use answers::{Answer, AnswerRepository, InMemoryAnswerRepository};
pub use identities::{Identity, IdentityRepository, InMemoryIdentityRepository};
pub use questions::{InMemoryQuestionRepository, Question, QuestionRepository};
pub use sessions::{InMemorySessionRepository, Session, SessionRepository};
