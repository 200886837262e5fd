//! # Trivia API HTTP Server Module
//!
//! Axum-based HTTP layer for the trivia API.
//!
//! # Endpoints
//!
//! - `GET /categories` - All categories as an id → type mapping
//! - `GET /questions` - Paginated question listing
//! - `POST /questions` - Create a question
//! - `DELETE /questions/{id}` - Delete a question
//! - `POST /questions/search` - Keyword search over question text
//! - `GET /categories/{id}/questions` - Questions in one category
//! - `POST /quizzes` - Random unseen question for quiz mode

pub mod category_routes;
pub mod config;
pub mod errors;
pub mod question_routes;
pub mod quiz_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;

use std::sync::Arc;

use crate::store::TriviaStore;

/// State shared across all route handlers: the injected store.
///
/// The API holds no other state between requests; every request
/// re-queries the store.
pub struct ApiState {
    pub store: Arc<dyn TriviaStore>,
}

impl ApiState {
    pub fn new(store: Arc<dyn TriviaStore>) -> Self {
        Self { store }
    }
}
