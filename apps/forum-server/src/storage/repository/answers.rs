// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Answer repository.
//!
//! Answers are versioned. `update_content` and `delete` take the version the
//! caller authorized against and fail with `VersionMismatch` if another
//! request changed the row in between.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use crate::storage::{read_lock, write_lock, OwnedResource, StorageError, StorageResult};

/// An answer posted to a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub id: String,
    pub question_id: String,
    pub owner_user_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Starts at 1, bumped on every content change
    pub version: u64,
}

impl OwnedResource for Answer {
    fn owner_user_id(&self) -> &str {
        &self.owner_user_id
    }
}

/// Persistence contract for answers.
pub trait AnswerRepository: Send + Sync {
    fn create(&self, answer: Answer) -> StorageResult<()>;

    fn get(&self, answer_id: &str) -> StorageResult<Option<Answer>>;

    /// Replace the content if the stored version still equals `expected_version`.
    fn update_content(
        &self,
        answer_id: &str,
        expected_version: u64,
        content: String,
    ) -> StorageResult<Answer>;

    /// Remove the answer if the stored version still equals `expected_version`.
    fn delete(&self, answer_id: &str, expected_version: u64) -> StorageResult<Answer>;

    /// Answers for one question ordered by creation time, then id.
    fn list_by_question(&self, question_id: &str) -> StorageResult<Vec<Answer>>;
}

/// In-memory answer repository.
#[derive(Default)]
pub struct InMemoryAnswerRepository {
    answers: RwLock<HashMap<String, Answer>>,
}

impl InMemoryAnswerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_version(answer: &Answer, expected_version: u64) -> StorageResult<()> {
    if answer.version != expected_version {
        return Err(StorageError::VersionMismatch {
            id: answer.id.clone(),
            expected: expected_version,
            actual: answer.version,
        });
    }
    Ok(())
}

impl AnswerRepository for InMemoryAnswerRepository {
    fn create(&self, answer: Answer) -> StorageResult<()> {
        let mut answers = write_lock(&self.answers)?;
        if answers.contains_key(&answer.id) {
            return Err(StorageError::AlreadyExists(format!("Answer {}", answer.id)));
        }
        answers.insert(answer.id.clone(), answer);
        Ok(())
    }

    fn get(&self, answer_id: &str) -> StorageResult<Option<Answer>> {
        let answers = read_lock(&self.answers)?;
        Ok(answers.get(answer_id).cloned())
    }

    fn update_content(
        &self,
        answer_id: &str,
        expected_version: u64,
        content: String,
    ) -> StorageResult<Answer> {
        let mut answers = write_lock(&self.answers)?;
        let answer = answers
            .get_mut(answer_id)
            .ok_or_else(|| StorageError::NotFound(format!("Answer {answer_id}")))?;
        check_version(answer, expected_version)?;

        answer.content = content;
        answer.version += 1;
        Ok(answer.clone())
    }

    fn delete(&self, answer_id: &str, expected_version: u64) -> StorageResult<Answer> {
        let mut answers = write_lock(&self.answers)?;
        let answer = answers
            .get(answer_id)
            .ok_or_else(|| StorageError::NotFound(format!("Answer {answer_id}")))?;
        check_version(answer, expected_version)?;

        answers
            .remove(answer_id)
            .ok_or_else(|| StorageError::NotFound(format!("Answer {answer_id}")))
    }

    fn list_by_question(&self, question_id: &str) -> StorageResult<Vec<Answer>> {
        let answers = read_lock(&self.answers)?;
        let mut matching: Vec<Answer> = answers
            .values()
            .filter(|answer| answer.question_id == question_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(matching)
    }
}
