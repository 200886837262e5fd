//! Question HTTP Routes
//!
//! Paginated listing, creation, deletion, and keyword search.
//!
//! Validation order is uniform across handlers: required keys present,
//! then non-empty values, then the referential check, then construct
//! and persist.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::errors::{ApiError, ApiResult};
use super::ApiState;
use crate::model::{category_map, NewQuestion, Question};

/// Page size for the question listing
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Create question routes
pub fn question_routes(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/questions", get(list_questions_handler))
        .route("/questions", post(create_question_handler))
        .route("/questions/search", post(search_questions_handler))
        .route("/questions/:question_id", delete(delete_question_handler))
        .with_state(state)
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct QuestionsQuery {
    #[serde(default)]
    pub page: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct QuestionsPageResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: BTreeMap<i64, String>,
    pub current_category: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<i64>,
    pub difficulty: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CreateQuestionResponse {
    pub success: bool,
    pub created: i64,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

#[derive(Debug, Serialize)]
pub struct DeleteQuestionResponse {
    pub success: bool,
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

// ==================
// Handlers
// ==================

async fn list_questions_handler(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<QuestionsQuery>, QueryRejection>,
) -> ApiResult<Json<QuestionsPageResponse>> {
    let Query(query) = query.map_err(|_| ApiError::BadRequest)?;
    let page = query.page.unwrap_or(1);
    if page < 1 {
        return Err(ApiError::BadRequest);
    }

    let questions = state.store.questions()?;
    // Emptiness is checked against the full set: a page past the end of
    // a non-empty listing still succeeds with an empty slice.
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    let total_questions = questions.len();
    let start = (page as usize - 1).saturating_mul(QUESTIONS_PER_PAGE);
    let page_items: Vec<Question> = questions
        .into_iter()
        .skip(start)
        .take(QUESTIONS_PER_PAGE)
        .collect();

    let categories = category_map(&state.store.categories()?);

    Ok(Json(QuestionsPageResponse {
        success: true,
        questions: page_items,
        total_questions,
        categories,
        current_category: "None",
    }))
}

async fn create_question_handler(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateQuestionRequest>, JsonRejection>,
) -> ApiResult<Json<CreateQuestionResponse>> {
    let Json(request) = payload.map_err(|_| ApiError::BadRequest)?;

    let (Some(question), Some(answer), Some(category), Some(difficulty)) = (
        request.question,
        request.answer,
        request.category,
        request.difficulty,
    ) else {
        return Err(ApiError::BadRequest);
    };

    if question.is_empty() || answer.is_empty() {
        return Err(ApiError::BadRequest);
    }

    if !state.store.category_exists(category)? {
        return Err(ApiError::Unprocessable);
    }

    let new = NewQuestion {
        question,
        answer,
        category,
        difficulty,
    };
    let created = state.store.insert_question(&new)?;

    // Contract: the full unpaginated listing is re-sent on creation.
    let questions = state.store.questions()?;
    let total_questions = questions.len();

    Ok(Json(CreateQuestionResponse {
        success: true,
        created,
        questions,
        total_questions,
    }))
}

async fn delete_question_handler(
    State(state): State<Arc<ApiState>>,
    question_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<DeleteQuestionResponse>> {
    let Path(question_id) = question_id.map_err(|_| ApiError::BadRequest)?;

    if state.store.find_question(question_id)?.is_none() {
        return Err(ApiError::NotFound);
    }
    state.store.delete_question(question_id)?;

    Ok(Json(DeleteQuestionResponse {
        success: true,
        id: question_id,
    }))
}

async fn search_questions_handler(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> ApiResult<Json<SearchResponse>> {
    let Json(request) = payload.map_err(|_| ApiError::BadRequest)?;
    // The empty term matches every question (substring-of-everything);
    // only an absent or null term is rejected.
    let Some(term) = request.search_term else {
        return Err(ApiError::BadRequest);
    };

    let questions = state.store.search_questions(&term)?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    let total_questions = questions.len();
    Ok(Json(SearchResponse {
        success: true,
        questions,
        total_questions,
    }))
}
