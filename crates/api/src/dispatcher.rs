//! Function call dispatcher
//!
//! Routes model-issued function calls to local handlers operating on the
//! locked conversation. Every call produces a JSON payload that travels back
//! to the model as a function response; document-producing calls additionally
//! surface the rendered text for the event stream.

use serde_json::{json, Value};

use lexdraft_conversations::Conversation;
use lexdraft_documents::{DocumentEdit, DocumentService};
use lexdraft_llm::FunctionCall;

/// Outcome of executing one function call
#[derive(Debug)]
pub struct FunctionOutcome {
    /// Payload returned to the model as the function response
    pub response: Value,

    /// Rendered document text, when the call produced or updated one
    pub document: Option<String>,

    /// Change description accompanying an edited document
    pub changes: Option<String>,

    /// User-visible error, when the call failed
    pub error: Option<String>,
}

impl FunctionOutcome {
    fn success(response: Value) -> Self {
        Self {
            response,
            document: None,
            changes: None,
            error: None,
        }
    }

    fn with_document(response: Value, document: String, changes: Option<String>) -> Self {
        Self {
            response,
            document: Some(document),
            changes,
            error: None,
        }
    }

    fn failure(message: String) -> Self {
        Self {
            response: json!({"status": "error", "message": message}),
            document: None,
            changes: None,
            error: Some(message),
        }
    }
}

/// Execute a model-issued function call against the conversation
pub fn dispatch(conversation: &mut Conversation, call: &FunctionCall) -> FunctionOutcome {
    tracing::debug!(
        conversation_id = %conversation.id,
        function = %call.name,
        "Dispatching function call"
    );

    match call.name.as_str() {
        "extract_information" => extract_information(conversation, &call.args),
        "generate_document" => generate_document(conversation, &call.args),
        "apply_edits" => apply_edits(conversation, &call.args),
        other => FunctionOutcome::failure(format!("Unknown function: {}", other)),
    }
}

/// Merge extracted data into the conversation's pending field set.
///
/// Always succeeds; the model's values are stored as-is without type
/// validation.
fn extract_information(conversation: &mut Conversation, args: &Value) -> FunctionOutcome {
    if let Some(data) = args.get("extracted_data").and_then(Value::as_object) {
        conversation.merge_fields(data.clone());
    }

    if let Some(document_type) = args.get("document_type").and_then(Value::as_str) {
        conversation.set_pending_document_type(document_type.to_string());
    }

    FunctionOutcome::success(json!({
        "status": "success",
        "message": "Information extracted successfully",
        "data": args,
    }))
}

/// Generate a document and store it as the conversation's current one.
///
/// The pending field set gathered by earlier extractions is merged with the
/// call's `document_data`, the call winning on conflicts.
fn generate_document(conversation: &mut Conversation, args: &Value) -> FunctionOutcome {
    let document_type = args
        .get("document_type")
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .or_else(|| conversation.pending_document_type.clone())
        .unwrap_or_default();

    let mut fields = conversation.fields.clone();
    if let Some(data) = args.get("document_data").and_then(Value::as_object) {
        for (key, value) in data {
            fields.insert(key.clone(), value.clone());
        }
    }

    match DocumentService::generate(&document_type, fields) {
        Ok(document) => {
            let text = document.text.clone();
            conversation.set_document(document, None);

            FunctionOutcome::with_document(
                json!({"status": "success", "document": text}),
                text,
                None,
            )
        }
        Err(error) => FunctionOutcome::failure(error.to_string()),
    }
}

/// Apply an edit to the conversation's current document.
fn apply_edits(conversation: &mut Conversation, args: &Value) -> FunctionOutcome {
    let Some(current) = conversation.document.as_ref() else {
        return FunctionOutcome::failure(
            "No document exists to edit. Please generate a document first.".to_string(),
        );
    };

    let edit_type = args.get("edit_type").and_then(Value::as_str).unwrap_or("");
    let field_name = args.get("field_name").and_then(Value::as_str).unwrap_or("");
    let new_value = args.get("new_value").and_then(Value::as_str).unwrap_or("");

    let edit = match DocumentEdit::parse(edit_type, field_name, new_value) {
        Ok(edit) => edit,
        Err(error) => return FunctionOutcome::failure(error.to_string()),
    };

    match DocumentService::apply_edit(current, edit) {
        Ok((updated, changes)) => {
            let text = updated.text.clone();
            conversation.set_document(updated, Some(changes.clone()));

            FunctionOutcome::with_document(
                json!({"status": "success", "changes": changes, "document": text}),
                text,
                Some(changes),
            )
        }
        Err(error) => FunctionOutcome::failure(error.to_string()),
    }
}
