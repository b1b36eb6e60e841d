//! Conversation read and delete tests

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use common::{body_json, body_string, chat_frames, done_conversation_id, TestApp};

#[derive(Debug, Deserialize)]
struct Snapshot {
    id: Uuid,
    messages: Vec<SnapshotMessage>,
    document: Option<String>,
    last_changes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct SnapshotMessage {
    role: String,
    content: String,
    created_at: DateTime<Utc>,
}

#[tokio::test]
async fn test_snapshot_deserializes_with_timestamps() {
    let app = TestApp::echo();
    let frames = chat_frames(&app, json!({"message": "Hello"})).await;
    let id = done_conversation_id(&frames);

    let body = body_string(app.get_conversation(id).await).await;
    let snapshot: Snapshot = serde_json::from_str(&body).unwrap();

    assert_eq!(snapshot.id, id);
    assert_eq!(snapshot.messages.len(), 2);
    assert_eq!(snapshot.messages[0].role, "user");
    assert_eq!(snapshot.messages[0].content, "Hello");
    assert!(snapshot.messages[0].created_at <= snapshot.messages[1].created_at);
    assert!(snapshot.created_at <= snapshot.updated_at);
    assert!(snapshot.document.is_none());
    assert!(snapshot.last_changes.is_none());
}

#[tokio::test]
async fn test_repeated_get_returns_identical_snapshot() {
    let app = TestApp::echo();
    let frames = chat_frames(&app, json!({"message": "Hello"})).await;
    let id = done_conversation_id(&frames);

    let first = body_json(app.get_conversation(id).await).await;
    let second = body_json(app.get_conversation(id).await).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_delete_returns_no_content() {
    let app = TestApp::echo();
    let frames = chat_frames(&app, json!({"message": "Hello"})).await;
    let id = done_conversation_id(&frames);

    let response = app.delete_conversation(id).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_delete_then_get_reports_absent() {
    let app = TestApp::echo();
    let frames = chat_frames(&app, json!({"message": "Hello"})).await;
    let id = done_conversation_id(&frames);

    assert_eq!(
        app.delete_conversation(id).await.status(),
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        app.get_conversation(id).await.status(),
        StatusCode::NOT_FOUND
    );
    assert!(!app.store.contains(id).await);
}

#[tokio::test]
async fn test_delete_unknown_conversation_returns_not_found() {
    let app = TestApp::echo();
    let response = app.delete_conversation(Uuid::new_v4()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}
