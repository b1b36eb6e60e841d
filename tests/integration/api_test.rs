//! API surface tests: health, root, and request validation

mod common;

use axum::http::{header, StatusCode};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use common::{body_json, body_string, TestApp};

#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::echo();
    let response = app
        .router
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .uri("/health")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "OK");
}

#[tokio::test]
async fn test_root_returns_banner() {
    let app = TestApp::echo();
    let response = app
        .router
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .uri("/")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Lexdraft API"));
}

#[tokio::test]
async fn test_chat_with_empty_message_is_rejected() {
    let app = TestApp::echo();
    let response = app.post_chat(json!({"message": ""})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_chat_with_whitespace_message_is_rejected() {
    let app = TestApp::echo();
    let response = app.post_chat(json!({"message": "   \t  "})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_chat_with_missing_message_is_rejected() {
    let app = TestApp::echo();
    let response = app.post_chat(json!({"conversation_id": null})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chat_rejection_is_json_not_a_stream() {
    let app = TestApp::echo();
    let response = app.post_chat(json!({"message": ""})).await;

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("application/json"));
}

#[tokio::test]
async fn test_chat_with_malformed_json_is_rejected() {
    let app = TestApp::echo();
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_unknown_conversation_returns_not_found_envelope() {
    let app = TestApp::echo();
    let response = app.get_conversation(Uuid::new_v4()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}
