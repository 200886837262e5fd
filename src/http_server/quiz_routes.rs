//! Quiz HTTP Routes
//!
//! Quiz mode serves one random unseen question at a time; the client
//! tracks exclusions and sends them back as `previous_questions`.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::errors::{ApiError, ApiResult};
use super::ApiState;
use crate::model::Question;

/// Create quiz routes
pub fn quiz_routes(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/quizzes", post(next_question_handler))
        .with_state(state)
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    /// Category filter; `0` means any category
    pub quiz_category: Option<i64>,
    /// Ids of already-seen questions, excluded as a set
    pub previous_questions: Option<Vec<i64>>,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Question,
}

// ==================
// Handlers
// ==================

async fn next_question_handler(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> ApiResult<Json<QuizResponse>> {
    let Json(request) = payload.map_err(|_| ApiError::BadRequest)?;

    let (Some(quiz_category), Some(previous_questions)) =
        (request.quiz_category, request.previous_questions)
    else {
        return Err(ApiError::BadRequest);
    };

    let candidates = state
        .store
        .quiz_candidates(quiz_category, &previous_questions)?;

    // Contract: choosing from an exhausted candidate set is a failure,
    // not a "no more questions" success.
    let question = candidates
        .choose(&mut rand::thread_rng())
        .cloned()
        .ok_or(ApiError::Internal)?;

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}
