//! Data model for the trivia store.
//!
//! `Category` and `Question` serialize directly to the formatted entity
//! shapes exposed over the API, so handlers never need a separate
//! projection step.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A labeled grouping for questions (e.g. "Science").
///
/// Read-only through the API: categories are seeded, never created or
/// deleted over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    /// Display label; serialized as `type` to match the wire contract.
    #[serde(rename = "type")]
    pub kind: String,
}

/// A quiz item with text, answer, category reference, and difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

/// A question before insertion, without an assigned id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

/// Build the id → type mapping returned by the categories endpoints.
///
/// A `BTreeMap` keeps the JSON object ordered by category id.
pub fn category_map(categories: &[Category]) -> BTreeMap<i64, String> {
    categories.iter().map(|c| (c.id, c.kind.clone())).collect()
}
