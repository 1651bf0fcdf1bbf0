// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Question repository.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use crate::storage::{read_lock, write_lock, StorageError, StorageResult};

/// A forum question. Answers reference it by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    pub owner_user_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Persistence contract for questions.
pub trait QuestionRepository: Send + Sync {
    fn create(&self, question: Question) -> StorageResult<()>;

    fn get(&self, question_id: &str) -> StorageResult<Option<Question>>;

    /// All questions ordered by creation time, then id.
    fn list_all(&self) -> StorageResult<Vec<Question>>;
}

/// In-memory question repository.
#[derive(Default)]
pub struct InMemoryQuestionRepository {
    questions: RwLock<HashMap<String, Question>>,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QuestionRepository for InMemoryQuestionRepository {
    fn create(&self, question: Question) -> StorageResult<()> {
        let mut questions = write_lock(&self.questions)?;
        if questions.contains_key(&question.id) {
            return Err(StorageError::AlreadyExists(format!("Question {}", question.id)));
        }
        questions.insert(question.id.clone(), question);
        Ok(())
    }

    fn get(&self, question_id: &str) -> StorageResult<Option<Question>> {
        let questions = read_lock(&self.questions)?;
        Ok(questions.get(question_id).cloned())
    }

    fn list_all(&self) -> StorageResult<Vec<Question>> {
        let questions = read_lock(&self.questions)?;
        let mut all: Vec<Question> = questions.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn question(id: &str, created_at: DateTime<Utc>) -> Question {
        Question {
            id: id.to_string(),
            owner_user_id: "user-1".to_string(),
            content: format!("question {id}"),
            created_at,
        }
    }

    #[test]
    fn create_get_and_reject_duplicate() {
        let repo = InMemoryQuestionRepository::new();
        let q = question("q-1", Utc::now());
        repo.create(q.clone()).unwrap();

        assert_eq!(repo.get("q-1").unwrap(), Some(q.clone()));
        assert!(repo.get("q-2").unwrap().is_none());
        assert!(matches!(repo.create(q), Err(StorageError::AlreadyExists(_))));
    }

    #[test]
    fn list_all_orders_by_creation_time() {
        let repo = InMemoryQuestionRepository::new();
        let t0 = Utc::now();
        repo.create(question("q-b", t0 + Duration::seconds(2))).unwrap();
        repo.create(question("q-a", t0)).unwrap();
        repo.create(question("q-c", t0 + Duration::seconds(1))).unwrap();

        let ids: Vec<String> = repo.list_all().unwrap().into_iter().map(|q| q.id).collect();
        assert_eq!(ids, vec!["q-a", "q-c", "q-b"]);
    }
}
