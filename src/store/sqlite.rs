//! SQLite-backed store
//!
//! One connection behind a mutex; every operation is a single
//! short-lived lock. The schema is created idempotently on open.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use super::{StoreError, StoreResult, TriviaStore};
use crate::model::{Category, NewQuestion, Question};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    type TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS questions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    question TEXT NOT NULL,
    answer TEXT NOT NULL,
    category INTEGER NOT NULL,
    difficulty INTEGER NOT NULL
);
";

const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

/// SQLite store, on disk or in memory
pub struct SqliteTriviaStore {
    conn: Mutex<Connection>,
}

impl SqliteTriviaStore {
    /// Open (or create) a database file and ensure the schema exists
    pub fn open(path: &Path) -> StoreResult<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Open a fresh in-memory database
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

fn row_to_question(row: &rusqlite::Row<'_>) -> rusqlite::Result<Question> {
    Ok(Question {
        id: row.get(0)?,
        question: row.get(1)?,
        answer: row.get(2)?,
        category: row.get(3)?,
        difficulty: row.get(4)?,
    })
}

impl TriviaStore for SqliteTriviaStore {
    fn categories(&self) -> StoreResult<Vec<Category>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, type FROM categories ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Category {
                id: row.get(0)?,
                kind: row.get(1)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn insert_category(&self, kind: &str) -> StoreResult<i64> {
        let conn = self.lock()?;
        conn.execute("INSERT INTO categories (type) VALUES (?1)", params![kind])?;
        Ok(conn.last_insert_rowid())
    }

    fn category_exists(&self, id: i64) -> StoreResult<bool> {
        let conn = self.lock()?;
        let exists = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn questions(&self) -> StoreResult<Vec<Question>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions ORDER BY id"
        ))?;
        let rows = stmt.query_map([], row_to_question)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn find_question(&self, id: i64) -> StoreResult<Option<Question>> {
        let conn = self.lock()?;
        let question = conn
            .query_row(
                &format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE id = ?1"),
                params![id],
                row_to_question,
            )
            .optional()?;
        Ok(question)
    }

    fn insert_question(&self, new: &NewQuestion) -> StoreResult<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO questions (question, answer, category, difficulty) \
             VALUES (?1, ?2, ?3, ?4)",
            params![new.question, new.answer, new.category, new.difficulty],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn delete_question(&self, id: i64) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM questions WHERE id = ?1", params![id])?;
        Ok(())
    }

    fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>> {
        // SQLite LIKE is case-insensitive for ASCII, matching the
        // contract's ilike semantics.
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions \
             WHERE question LIKE '%' || ?1 || '%' ORDER BY id"
        ))?;
        let rows = stmt.query_map(params![term], row_to_question)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn questions_in_category(&self, category_id: i64) -> StoreResult<Vec<Question>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE category = ?1 ORDER BY id"
        ))?;
        let rows = stmt.query_map(params![category_id], row_to_question)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn quiz_candidates(&self, quiz_category: i64, excluded: &[i64]) -> StoreResult<Vec<Question>> {
        let conn = self.lock()?;

        // SQLite rejects an empty IN list, so clauses are only added
        // when they carry parameters.
        let mut clauses = Vec::new();
        let mut values: Vec<i64> = Vec::new();
        if !excluded.is_empty() {
            let marks = vec!["?"; excluded.len()].join(", ");
            clauses.push(format!("id NOT IN ({marks})"));
            values.extend_from_slice(excluded);
        }
        if quiz_category != 0 {
            clauses.push("category = ?".to_string());
            values.push(quiz_category);
        }

        let mut sql = format!("SELECT {QUESTION_COLUMNS} FROM questions");
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY id");

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values), row_to_question)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
