//! Store layer: relational access to categories and questions.
//!
//! The HTTP layer only sees the `TriviaStore` trait; the concrete store
//! (SQLite on disk or in memory, or the test-only in-memory store) is
//! injected at construction time.

mod memory;
mod sqlite;

pub use memory::InMemoryTriviaStore;
pub use sqlite::SqliteTriviaStore;

use thiserror::Error;

use crate::model::{Category, NewQuestion, Question};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by a store implementation
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(String),

    /// Store lock poisoned by a panicking writer
    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// Categories installed by `trivia-api seed` when the table is empty.
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

/// Relational store of categories and questions
///
/// Every listing method returns rows ordered by id ascending, so
/// pagination and response ordering are deterministic.
pub trait TriviaStore: Send + Sync {
    /// All categories, ordered by id
    fn categories(&self) -> StoreResult<Vec<Category>>;

    /// Insert a category and return its assigned id (seed/test surface;
    /// no HTTP route creates categories)
    fn insert_category(&self, kind: &str) -> StoreResult<i64>;

    /// Whether a category with this id exists
    fn category_exists(&self, id: i64) -> StoreResult<bool>;

    /// All questions, ordered by id
    fn questions(&self) -> StoreResult<Vec<Question>>;

    /// Look up a single question by id
    fn find_question(&self, id: i64) -> StoreResult<Option<Question>>;

    /// Insert a question and return its assigned id
    fn insert_question(&self, new: &NewQuestion) -> StoreResult<i64>;

    /// Delete a question by id; deleting an absent id is not an error
    /// (handlers check existence first)
    fn delete_question(&self, id: i64) -> StoreResult<()>;

    /// Substring match against question text with SQL LIKE semantics:
    /// ASCII case-insensitive, `%`/`_` in the term act as wildcards,
    /// and the empty term matches every question
    fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>>;

    /// All questions whose category equals `category_id`
    fn questions_in_category(&self, category_id: i64) -> StoreResult<Vec<Question>>;

    /// Quiz candidates: questions whose id is not in `excluded`,
    /// additionally filtered by category when `quiz_category != 0`
    fn quiz_candidates(&self, quiz_category: i64, excluded: &[i64]) -> StoreResult<Vec<Question>>;
}

/// Install `DEFAULT_CATEGORIES` when no categories exist yet.
///
/// Returns how many categories were added (zero when the store was
/// already seeded).
pub fn seed_default_categories(store: &dyn TriviaStore) -> StoreResult<usize> {
    if !store.categories()?.is_empty() {
        return Ok(0);
    }
    for kind in DEFAULT_CATEGORIES {
        store.insert_category(kind)?;
    }
    Ok(DEFAULT_CATEGORIES.len())
}
