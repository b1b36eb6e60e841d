//! Domain entities for the Documents domain
//!
//! Document types, the generated-document entity, and the edit operations
//! that can be applied to an existing document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use lexdraft_common::{Error, Result};

/// Supported legal document types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Nda,
    DirectorAppointment,
    EmploymentAgreement,
}

impl DocumentType {
    /// Parse a model-supplied type string.
    ///
    /// Matching is lenient: "non-disclosure agreement" and "NDA" both map to
    /// `Nda`, "director appointment" and "appointment resolution" to
    /// `DirectorAppointment`. Unknown strings are a validation error.
    pub fn parse(value: &str) -> Result<Self> {
        let lower = value.to_lowercase();

        if lower.contains("director") || lower.contains("appointment") {
            Ok(DocumentType::DirectorAppointment)
        } else if lower.contains("nda") || lower.contains("non-disclosure") {
            Ok(DocumentType::Nda)
        } else if lower.contains("employment") {
            Ok(DocumentType::EmploymentAgreement)
        } else {
            Err(Error::Validation(format!(
                "Unknown document type: '{}'",
                value
            )))
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentType::Nda => write!(f, "nda"),
            DocumentType::DirectorAppointment => write!(f, "director_appointment"),
            DocumentType::EmploymentAgreement => write!(f, "employment_agreement"),
        }
    }
}

/// A rendered document together with the field map that produced it.
///
/// The field map is what edits operate on; the text is regenerated from it
/// after every change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedDocument {
    pub document_type: DocumentType,
    pub fields: Map<String, Value>,
    pub text: String,
    pub generated_at: DateTime<Utc>,
}

/// An edit operation on an existing document
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentEdit {
    UpdateField {
        field_name: String,
        new_value: String,
    },
}

impl DocumentEdit {
    /// Parse a model-supplied edit into an operation.
    ///
    /// Only field updates are supported; other edit types the model may
    /// attempt are a validation error.
    pub fn parse(edit_type: &str, field_name: &str, new_value: &str) -> Result<Self> {
        match edit_type {
            "update_field" => {
                if field_name.trim().is_empty() {
                    return Err(Error::Validation("Field name is required".to_string()));
                }
                Ok(DocumentEdit::UpdateField {
                    field_name: field_name.to_string(),
                    new_value: new_value.to_string(),
                })
            }
            other => Err(Error::Validation(format!(
                "Unsupported edit type: '{}'",
                other
            ))),
        }
    }
}
