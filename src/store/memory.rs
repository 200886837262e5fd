//! In-memory store for tests

use std::sync::RwLock;

use super::{StoreError, StoreResult, TriviaStore};
use crate::model::{Category, NewQuestion, Question};

#[derive(Debug)]
struct Inner {
    categories: Vec<Category>,
    questions: Vec<Question>,
    next_category_id: i64,
    next_question_id: i64,
}

/// In-memory trivia store
///
/// Rows live in id order because ids are assigned from a monotonically
/// increasing counter and never reordered.
#[derive(Debug)]
pub struct InMemoryTriviaStore {
    inner: RwLock<Inner>,
}

impl InMemoryTriviaStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                categories: Vec::new(),
                questions: Vec::new(),
                next_category_id: 1,
                next_question_id: 1,
            }),
        }
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Inner>> {
        self.inner.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, Inner>> {
        self.inner.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl Default for InMemoryTriviaStore {
    fn default() -> Self {
        Self::new()
    }
}

/// SQL LIKE matcher: `%` matches any sequence, `_` any single character.
fn like_match(pattern: &[char], text: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some((&'%', rest)) => (0..=text.len()).any(|i| like_match(rest, &text[i..])),
        Some((&'_', rest)) => !text.is_empty() && like_match(rest, &text[1..]),
        Some((&c, rest)) => text.first() == Some(&c) && like_match(rest, &text[1..]),
    }
}

impl TriviaStore for InMemoryTriviaStore {
    fn categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.read()?.categories.clone())
    }

    fn insert_category(&self, kind: &str) -> StoreResult<i64> {
        let mut inner = self.write()?;
        let id = inner.next_category_id;
        inner.next_category_id += 1;
        inner.categories.push(Category {
            id,
            kind: kind.to_string(),
        });
        Ok(id)
    }

    fn category_exists(&self, id: i64) -> StoreResult<bool> {
        Ok(self.read()?.categories.iter().any(|c| c.id == id))
    }

    fn questions(&self) -> StoreResult<Vec<Question>> {
        Ok(self.read()?.questions.clone())
    }

    fn find_question(&self, id: i64) -> StoreResult<Option<Question>> {
        Ok(self.read()?.questions.iter().find(|q| q.id == id).cloned())
    }

    fn insert_question(&self, new: &NewQuestion) -> StoreResult<i64> {
        let mut inner = self.write()?;
        let id = inner.next_question_id;
        inner.next_question_id += 1;
        inner.questions.push(Question {
            id,
            question: new.question.clone(),
            answer: new.answer.clone(),
            category: new.category,
            difficulty: new.difficulty,
        });
        Ok(id)
    }

    fn delete_question(&self, id: i64) -> StoreResult<()> {
        self.write()?.questions.retain(|q| q.id != id);
        Ok(())
    }

    fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>> {
        // Mirrors SQLite LIKE '%term%': ASCII-only case folding, with
        // `%` and `_` in the term acting as wildcards.
        let pattern: Vec<char> = format!("%{term}%").to_ascii_lowercase().chars().collect();
        Ok(self
            .read()?
            .questions
            .iter()
            .filter(|q| {
                let text: Vec<char> = q.question.to_ascii_lowercase().chars().collect();
                like_match(&pattern, &text)
            })
            .cloned()
            .collect())
    }

    fn questions_in_category(&self, category_id: i64) -> StoreResult<Vec<Question>> {
        Ok(self
            .read()?
            .questions
            .iter()
            .filter(|q| q.category == category_id)
            .cloned()
            .collect())
    }

    fn quiz_candidates(&self, quiz_category: i64, excluded: &[i64]) -> StoreResult<Vec<Question>> {
        Ok(self
            .read()?
            .questions
            .iter()
            .filter(|q| !excluded.contains(&q.id))
            .filter(|q| quiz_category == 0 || q.category == quiz_category)
            .cloned()
            .collect())
    }
}
