//! Document generation and editing service

use chrono::Utc;
use serde_json::{Map, Value};

use lexdraft_common::Result;

use crate::domain::entities::{DocumentEdit, DocumentType, GeneratedDocument};
use crate::domain::templates;

/// Service for generating and editing legal documents
pub struct DocumentService;

impl DocumentService {
    /// Generate a document from a model-supplied type string and field map.
    ///
    /// The type string is matched leniently; unknown types are a validation
    /// error.
    pub fn generate(document_type: &str, fields: Map<String, Value>) -> Result<GeneratedDocument> {
        let document_type = DocumentType::parse(document_type)?;
        let text = templates::render(document_type, &fields);

        tracing::debug!(%document_type, fields = fields.len(), "Generated document");

        Ok(GeneratedDocument {
            document_type,
            fields,
            text,
            generated_at: Utc::now(),
        })
    }

    /// Apply an edit to an existing document, regenerating its text.
    ///
    /// Returns the updated document and a description of what changed,
    /// suitable for showing to the user.
    pub fn apply_edit(
        document: &GeneratedDocument,
        edit: DocumentEdit,
    ) -> Result<(GeneratedDocument, String)> {
        let mut fields = document.fields.clone();

        let change_description = match edit {
            DocumentEdit::UpdateField {
                field_name,
                new_value,
            } => match fields.insert(field_name.clone(), Value::String(new_value.clone())) {
                Some(old_value) => {
                    let old = match old_value {
                        Value::String(s) => s,
                        other => other.to_string(),
                    };
                    format!("Updated {} from '{}' to '{}'", field_name, old, new_value)
                }
                None => format!("Added {}: '{}'", field_name, new_value),
            },
        };

        let text = templates::render(document.document_type, &fields);

        tracing::debug!(document_type = %document.document_type, %change_description, "Applied document edit");

        Ok((
            GeneratedDocument {
                document_type: document.document_type,
                fields,
                text,
                generated_at: Utc::now(),
            },
            change_description,
        ))
    }
}
