//! Chat streaming tests: echo turns, document generation, edits, and
//! upstream failure

mod common;

use serde_json::json;
use uuid::Uuid;

use lexdraft_llm::{FunctionCall, StreamEvent};

use common::{body_json, chat_frames, done_conversation_id, frames_of_type, TestApp};

fn generate_nda_call() -> StreamEvent {
    StreamEvent::FunctionCall(FunctionCall {
        name: "generate_document".to_string(),
        args: json!({
            "document_type": "nda",
            "document_data": {
                "party1_name": "Acme Corp",
                "party2_name": "Jane Smith",
                "effective_date": "2024-03-01",
                "term_years": "3",
            },
        }),
    })
}

#[tokio::test]
async fn test_echo_turn_streams_text_then_done() {
    let app = TestApp::echo();
    let frames = chat_frames(&app, json!({"message": "Hello"})).await;

    let texts = frames_of_type(&frames, "text");
    assert_eq!(texts.len(), 1);
    assert_eq!(texts[0]["content"], "Mock response to: Hello");

    assert_eq!(frames.last().unwrap()["type"], "done");

    let id = done_conversation_id(&frames);
    assert!(app.store.contains(id).await);
}

#[tokio::test]
async fn test_turn_records_user_and_assistant_messages() {
    let app = TestApp::echo();
    let frames = chat_frames(&app, json!({"message": "Hello"})).await;
    let id = done_conversation_id(&frames);

    let snapshot = body_json(app.get_conversation(id).await).await;
    let messages = snapshot["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[0]["content"], "Hello");
    assert_eq!(messages[1]["role"], "assistant");
    assert_eq!(messages[1]["content"], "Mock response to: Hello");
}

#[tokio::test]
async fn test_second_turn_continues_same_conversation() {
    let app = TestApp::echo();
    let first = chat_frames(&app, json!({"message": "one"})).await;
    let id = done_conversation_id(&first);

    let second = chat_frames(&app, json!({"message": "two", "conversation_id": id})).await;
    assert_eq!(done_conversation_id(&second), id);

    let snapshot = body_json(app.get_conversation(id).await).await;
    assert_eq!(snapshot["messages"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_unknown_conversation_id_starts_fresh_conversation() {
    let app = TestApp::echo();
    let supplied = Uuid::new_v4();
    let frames = chat_frames(
        &app,
        json!({"message": "Hello", "conversation_id": supplied}),
    )
    .await;

    let id = done_conversation_id(&frames);
    assert_ne!(id, supplied);
    assert!(app.store.contains(id).await);
    assert!(!app.store.contains(supplied).await);
}

#[tokio::test]
async fn test_nda_generation_streams_document_frame() {
    let app = TestApp::scripted(vec![
        vec![generate_nda_call(), StreamEvent::EndOfTurn],
        vec![
            StreamEvent::Text("I've generated your NDA document.".to_string()),
            StreamEvent::EndOfTurn,
        ],
    ]);

    let frames = chat_frames(
        &app,
        json!({"message": "Generate an NDA between Acme Corp and Jane Smith"}),
    )
    .await;

    let calls = frames_of_type(&frames, "function_call");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0]["function"], "generate_document");

    let documents = frames_of_type(&frames, "document");
    assert_eq!(documents.len(), 1);
    let text = documents[0]["content"].as_str().unwrap();
    assert!(text.contains("Acme Corp"));
    assert!(text.contains("Jane Smith"));

    assert_eq!(frames.last().unwrap()["type"], "done");
    assert!(frames_of_type(&frames, "error").is_empty());
}

#[tokio::test]
async fn test_generated_document_is_stored_on_conversation() {
    let app = TestApp::scripted(vec![
        vec![generate_nda_call(), StreamEvent::EndOfTurn],
        vec![
            StreamEvent::Text("I've generated your NDA document.".to_string()),
            StreamEvent::EndOfTurn,
        ],
    ]);

    let frames = chat_frames(&app, json!({"message": "Generate the NDA"})).await;
    let id = done_conversation_id(&frames);

    let snapshot = body_json(app.get_conversation(id).await).await;
    let document = snapshot["document"].as_str().unwrap();
    assert!(document.contains("Acme Corp"));
    assert!(document.contains("2024-03-01"));
    assert_eq!(
        snapshot["messages"].as_array().unwrap().last().unwrap()["content"],
        "I've generated your NDA document."
    );
}

#[tokio::test]
async fn test_edit_updates_field_and_keeps_others() {
    let app = TestApp::scripted(vec![
        vec![generate_nda_call(), StreamEvent::EndOfTurn],
        vec![
            StreamEvent::Text("Done.".to_string()),
            StreamEvent::EndOfTurn,
        ],
        vec![
            StreamEvent::FunctionCall(FunctionCall {
                name: "apply_edits".to_string(),
                args: json!({
                    "edit_type": "update_field",
                    "field_name": "effective_date",
                    "new_value": "2024-06-15",
                    "reason": "User requested a later start",
                }),
            }),
            StreamEvent::EndOfTurn,
        ],
        vec![
            StreamEvent::Text("I've updated the effective date.".to_string()),
            StreamEvent::EndOfTurn,
        ],
    ]);

    let first = chat_frames(&app, json!({"message": "Generate the NDA"})).await;
    let id = done_conversation_id(&first);

    let second = chat_frames(
        &app,
        json!({"message": "Change the effective date to June 15", "conversation_id": id}),
    )
    .await;

    let documents = frames_of_type(&second, "document");
    assert_eq!(documents.len(), 1);
    let text = documents[0]["content"].as_str().unwrap();
    assert!(text.contains("2024-06-15"));
    assert!(!text.contains("2024-03-01"));
    assert!(text.contains("Acme Corp"));
    assert!(text.contains("Jane Smith"));

    assert_eq!(
        documents[0]["changes"],
        "Updated effective_date from '2024-03-01' to '2024-06-15'"
    );

    let snapshot = body_json(app.get_conversation(id).await).await;
    assert_eq!(
        snapshot["last_changes"],
        "Updated effective_date from '2024-03-01' to '2024-06-15'"
    );
}

#[tokio::test]
async fn test_edit_without_document_yields_error_frame() {
    let app = TestApp::scripted(vec![
        vec![
            StreamEvent::FunctionCall(FunctionCall {
                name: "apply_edits".to_string(),
                args: json!({
                    "edit_type": "update_field",
                    "field_name": "effective_date",
                    "new_value": "2024-06-15",
                }),
            }),
            StreamEvent::EndOfTurn,
        ],
        vec![
            StreamEvent::Text("There is no document to edit yet.".to_string()),
            StreamEvent::EndOfTurn,
        ],
    ]);

    let frames = chat_frames(&app, json!({"message": "Change the date"})).await;

    let errors = frames_of_type(&frames, "error");
    assert_eq!(errors.len(), 1);
    assert!(errors[0]["content"]
        .as_str()
        .unwrap()
        .contains("No document exists to edit"));

    assert!(frames_of_type(&frames, "document").is_empty());
    assert_eq!(frames.last().unwrap()["type"], "done");

    let id = done_conversation_id(&frames);
    let snapshot = body_json(app.get_conversation(id).await).await;
    assert!(snapshot["document"].is_null());
}

#[tokio::test]
async fn test_unknown_document_type_yields_error_frame() {
    let app = TestApp::scripted(vec![
        vec![
            StreamEvent::FunctionCall(FunctionCall {
                name: "generate_document".to_string(),
                args: json!({"document_type": "lease", "document_data": {}}),
            }),
            StreamEvent::EndOfTurn,
        ],
        vec![
            StreamEvent::Text("I can't generate that document type.".to_string()),
            StreamEvent::EndOfTurn,
        ],
    ]);

    let frames = chat_frames(&app, json!({"message": "Generate a lease"})).await;

    let errors = frames_of_type(&frames, "error");
    assert_eq!(errors.len(), 1);
    assert!(errors[0]["content"].as_str().unwrap().contains("lease"));
    assert!(frames_of_type(&frames, "document").is_empty());
}

#[tokio::test]
async fn test_upstream_failure_yields_single_error_frame() {
    let app = TestApp::failing();
    let (id, _handle) = app.store.create().await;

    let frames = chat_frames(
        &app,
        json!({"message": "Hello", "conversation_id": id}),
    )
    .await;

    let errors = frames_of_type(&frames, "error");
    assert_eq!(errors.len(), 1);
    assert!(frames_of_type(&frames, "done").is_empty());
    assert!(frames_of_type(&frames, "text").is_empty());

    // The user message is recorded, nothing else changed
    let snapshot = body_json(app.get_conversation(id).await).await;
    let messages = snapshot["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["role"], "user");
    assert!(snapshot["document"].is_null());
}
