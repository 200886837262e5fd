//! End-to-end contract tests for the trivia API
//!
//! Drives the full router (SQLite in-memory store behind it) through
//! tower's oneshot, asserting on status codes and JSON bodies.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use trivia_api::http_server::{HttpServer, HttpServerConfig};
use trivia_api::model::NewQuestion;
use trivia_api::store::{SqliteTriviaStore, TriviaStore};

fn new_question(text: &str, category: i64) -> NewQuestion {
    NewQuestion {
        question: text.to_string(),
        answer: "42".to_string(),
        category,
        difficulty: 1,
    }
}

/// Router over a fresh in-memory store, handing the store back for
/// direct seeding.
fn test_app() -> (Router, Arc<SqliteTriviaStore>) {
    let store = Arc::new(SqliteTriviaStore::open_in_memory().unwrap());
    let router = HttpServer::new(HttpServerConfig::default(), store.clone()).router();
    (router, store)
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn assert_error_envelope(status: StatusCode, body: &Value, code: u16, message: &str) {
    assert_eq!(status.as_u16(), code);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!(code));
    assert_eq!(body["message"], json!(message));
}

// ==================
// Categories
// ==================

#[tokio::test]
async fn test_categories_empty_store_is_not_found() {
    let (router, _store) = test_app();
    let (status, body) = send(&router, "GET", "/categories", None).await;
    assert_error_envelope(status, &body, 404, "Not found");
}

#[tokio::test]
async fn test_categories_returns_id_type_mapping() {
    let (router, store) = test_app();
    store.insert_category("Science").unwrap();
    store.insert_category("Art").unwrap();

    let (status, body) = send(&router, "GET", "/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["categories"], json!({"1": "Science", "2": "Art"}));
}

// ==================
// Question listing & pagination
// ==================

#[tokio::test]
async fn test_questions_empty_store_is_not_found() {
    let (router, store) = test_app();
    store.insert_category("Science").unwrap();
    let (status, body) = send(&router, "GET", "/questions", None).await;
    assert_error_envelope(status, &body, 404, "Not found");
}

#[tokio::test]
async fn test_questions_first_page_caps_at_ten() {
    let (router, store) = test_app();
    store.insert_category("Science").unwrap();
    for i in 0..12 {
        store.insert_question(&new_question(&format!("q{i}"), 1)).unwrap();
    }

    let (status, body) = send(&router, "GET", "/questions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"].as_array().unwrap().len(), 10);
    assert_eq!(body["total_questions"], json!(12));
    assert_eq!(body["categories"], json!({"1": "Science"}));
    assert_eq!(body["current_category"], json!("None"));

    let (status, body) = send(&router, "GET", "/questions?page=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"].as_array().unwrap().len(), 2);
    assert_eq!(body["total_questions"], json!(12));
}

#[tokio::test]
async fn test_questions_page_past_the_end_succeeds_empty() {
    let (router, store) = test_app();
    store.insert_category("Science").unwrap();
    store.insert_question(&new_question("only one", 1)).unwrap();

    let (status, body) = send(&router, "GET", "/questions?page=5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert!(body["questions"].as_array().unwrap().is_empty());
    assert_eq!(body["total_questions"], json!(1));
}

#[tokio::test]
async fn test_questions_page_below_one_is_bad_request() {
    let (router, store) = test_app();
    store.insert_category("Science").unwrap();
    store.insert_question(&new_question("q", 1)).unwrap();

    let (status, body) = send(&router, "GET", "/questions?page=0", None).await;
    assert_error_envelope(status, &body, 400, "Bad Request");
}

// ==================
// Create question
// ==================

#[tokio::test]
async fn test_create_question_roundtrip() {
    let (router, store) = test_app();
    store.insert_category("Science").unwrap();

    let payload = json!({
        "question": "2+2?",
        "answer": "4",
        "category": 1,
        "difficulty": 1,
    });
    let (status, body) = send(&router, "POST", "/questions", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    let created = body["created"].as_i64().unwrap();
    assert_eq!(body["total_questions"], json!(1));
    assert!(body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .any(|q| q["id"] == json!(created)));
}

#[tokio::test]
async fn test_create_question_missing_key_is_bad_request() {
    let (router, store) = test_app();
    store.insert_category("Science").unwrap();

    for missing in ["question", "answer", "category", "difficulty"] {
        let mut payload = json!({
            "question": "2+2?",
            "answer": "4",
            "category": 1,
            "difficulty": 1,
        });
        payload.as_object_mut().unwrap().remove(missing);
        let (status, body) = send(&router, "POST", "/questions", Some(payload)).await;
        assert_error_envelope(status, &body, 400, "Bad Request");
    }
}

#[tokio::test]
async fn test_create_question_empty_string_is_bad_request() {
    let (router, store) = test_app();
    store.insert_category("Science").unwrap();

    let payload = json!({
        "question": "",
        "answer": "4",
        "category": 1,
        "difficulty": 1,
    });
    let (status, body) = send(&router, "POST", "/questions", Some(payload)).await;
    assert_error_envelope(status, &body, 400, "Bad Request");
}

#[tokio::test]
async fn test_create_question_unknown_category_is_unprocessable() {
    let (router, _store) = test_app();

    let payload = json!({
        "question": "2+2?",
        "answer": "4",
        "category": 99,
        "difficulty": 1,
    });
    let (status, body) = send(&router, "POST", "/questions", Some(payload)).await;
    assert_error_envelope(status, &body, 422, "Unprocessable Content");
}

#[tokio::test]
async fn test_create_question_malformed_body_is_bad_request() {
    let (router, _store) = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/questions")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ==================
// Delete question
// ==================

#[tokio::test]
async fn test_delete_question_then_missing_is_not_found() {
    let (router, store) = test_app();
    store.insert_category("Science").unwrap();
    let id = store.insert_question(&new_question("q", 1)).unwrap();

    let (status, body) = send(&router, "DELETE", &format!("/questions/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "id": id}));
    assert!(store.find_question(id).unwrap().is_none());

    let (status, body) = send(&router, "DELETE", &format!("/questions/{id}"), None).await;
    assert_error_envelope(status, &body, 404, "Not found");
}

// ==================
// Search
// ==================

#[tokio::test]
async fn test_search_case_insensitive_subset() {
    let (router, store) = test_app();
    store.insert_category("Science").unwrap();
    store.insert_question(&new_question("What is the Heaviest organ?", 1)).unwrap();
    store.insert_question(&new_question("Who invented peanut butter?", 1)).unwrap();

    let (status, body) = send(
        &router,
        "POST",
        "/questions/search",
        Some(json!({"searchTerm": "heaviest"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_questions"], json!(1));
    assert_eq!(body["questions"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_empty_term_matches_everything() {
    let (router, store) = test_app();
    store.insert_category("Science").unwrap();
    store.insert_question(&new_question("a", 1)).unwrap();
    store.insert_question(&new_question("b", 1)).unwrap();

    let (status, body) = send(
        &router,
        "POST",
        "/questions/search",
        Some(json!({"searchTerm": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_questions"], json!(2));
}

#[tokio::test]
async fn test_search_no_match_is_not_found() {
    let (router, store) = test_app();
    store.insert_category("Science").unwrap();
    store.insert_question(&new_question("a", 1)).unwrap();

    let (status, body) = send(
        &router,
        "POST",
        "/questions/search",
        Some(json!({"searchTerm": "zzz"})),
    )
    .await;
    assert_error_envelope(status, &body, 404, "Not found");
}

#[tokio::test]
async fn test_search_missing_term_is_bad_request() {
    let (router, _store) = test_app();
    let (status, body) = send(&router, "POST", "/questions/search", Some(json!({}))).await;
    assert_error_envelope(status, &body, 400, "Bad Request");

    let (status, body) = send(
        &router,
        "POST",
        "/questions/search",
        Some(json!({"searchTerm": null})),
    )
    .await;
    assert_error_envelope(status, &body, 400, "Bad Request");
}

// ==================
// Questions by category
// ==================

#[tokio::test]
async fn test_questions_by_category() {
    let (router, store) = test_app();
    store.insert_category("Science").unwrap();
    store.insert_category("Art").unwrap();
    store.insert_question(&new_question("science q", 1)).unwrap();
    store.insert_question(&new_question("art q", 2)).unwrap();

    let (status, body) = send(&router, "GET", "/categories/1/questions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_questions"], json!(1));
    assert_eq!(body["current_category"], json!(1));
    assert_eq!(body["questions"][0]["category"], json!(1));
}

#[tokio::test]
async fn test_questions_by_category_empty_is_not_found() {
    let (router, store) = test_app();
    // Category exists but has no questions
    store.insert_category("Science").unwrap();
    let (status, body) = send(&router, "GET", "/categories/1/questions", None).await;
    assert_error_envelope(status, &body, 404, "Not found");

    // Unknown category id behaves the same
    let (status, body) = send(&router, "GET", "/categories/99/questions", None).await;
    assert_error_envelope(status, &body, 404, "Not found");
}

// ==================
// Quiz mode
// ==================

#[tokio::test]
async fn test_quiz_never_repeats_previous_questions() {
    let (router, store) = test_app();
    store.insert_category("Science").unwrap();
    let a = store.insert_question(&new_question("a", 1)).unwrap();
    let b = store.insert_question(&new_question("b", 1)).unwrap();
    let c = store.insert_question(&new_question("c", 1)).unwrap();

    // Only c remains once a and b are excluded; random choice is forced.
    for _ in 0..5 {
        let (status, body) = send(
            &router,
            "POST",
            "/quizzes",
            Some(json!({"quiz_category": 0, "previous_questions": [a, b]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["question"]["id"], json!(c));
    }
}

#[tokio::test]
async fn test_quiz_category_filter() {
    let (router, store) = test_app();
    store.insert_category("Science").unwrap();
    store.insert_category("Art").unwrap();
    store.insert_question(&new_question("science q", 1)).unwrap();
    store.insert_question(&new_question("art q", 2)).unwrap();

    for _ in 0..5 {
        let (status, body) = send(
            &router,
            "POST",
            "/quizzes",
            Some(json!({"quiz_category": 2, "previous_questions": []})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["question"]["category"], json!(2));
    }
}

#[tokio::test]
async fn test_quiz_exhausted_candidates_is_internal_error() {
    let (router, store) = test_app();
    store.insert_category("Science").unwrap();
    let a = store.insert_question(&new_question("a", 1)).unwrap();

    let (status, body) = send(
        &router,
        "POST",
        "/quizzes",
        Some(json!({"quiz_category": 0, "previous_questions": [a]})),
    )
    .await;
    assert_error_envelope(status, &body, 500, "Internal Server Error");
}

#[tokio::test]
async fn test_quiz_missing_keys_is_bad_request() {
    let (router, _store) = test_app();

    let (status, body) = send(
        &router,
        "POST",
        "/quizzes",
        Some(json!({"quiz_category": 0})),
    )
    .await;
    assert_error_envelope(status, &body, 400, "Bad Request");

    let (status, body) = send(
        &router,
        "POST",
        "/quizzes",
        Some(json!({"previous_questions": []})),
    )
    .await;
    assert_error_envelope(status, &body, 400, "Bad Request");
}

// ==================
// Unknown routes & full scenario
// ==================

#[tokio::test]
async fn test_unknown_route_gets_the_envelope() {
    let (router, _store) = test_app();
    let (status, body) = send(&router, "GET", "/nope", None).await;
    assert_error_envelope(status, &body, 404, "Not found");
}

#[tokio::test]
async fn test_seed_create_list_delete_scenario() {
    let (router, store) = test_app();
    store.insert_category("Science").unwrap();

    let (status, body) = send(
        &router,
        "POST",
        "/questions",
        Some(json!({"question": "2+2?", "answer": "4", "category": 1, "difficulty": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let created = body["created"].as_i64().unwrap();

    let (status, body) = send(&router, "GET", "/categories/1/questions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .any(|q| q["id"] == json!(created)));

    let (status, _body) = send(&router, "DELETE", &format!("/questions/{created}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&router, "GET", "/categories/1/questions", None).await;
    assert_error_envelope(status, &body, 404, "Not found");
}
