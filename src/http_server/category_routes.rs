//! Category HTTP Routes
//!
//! Listing endpoints for categories and per-category questions.
//! Categories are read-only through the API.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::errors::{ApiError, ApiResult};
use super::ApiState;
use crate::model::{category_map, Question};

/// Create category routes
pub fn category_routes(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/categories", get(list_categories_handler))
        .route(
            "/categories/:category_id/questions",
            get(questions_by_category_handler),
        )
        .with_state(state)
}

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: BTreeMap<i64, String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: i64,
}

// ==================
// Handlers
// ==================

async fn list_categories_handler(
    State(state): State<Arc<ApiState>>,
) -> ApiResult<Json<CategoriesResponse>> {
    let categories = state.store.categories()?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(CategoriesResponse {
        success: true,
        categories: category_map(&categories),
    }))
}

async fn questions_by_category_handler(
    State(state): State<Arc<ApiState>>,
    category_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<CategoryQuestionsResponse>> {
    let Path(category_id) = category_id.map_err(|_| ApiError::BadRequest)?;

    let questions = state.store.questions_in_category(category_id)?;
    // An unknown category id also lands here: zero rows is NotFound.
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    let total_questions = questions.len();
    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions,
        total_questions,
        current_category: category_id,
    }))
}
