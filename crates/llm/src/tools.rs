//! Function declarations exposed to the model
//!
//! The model drives document work through three functions: gathering fields,
//! generating a document, and editing an existing one.

use serde_json::json;

use crate::FunctionDeclaration;

/// Build the function declarations sent with every chat request
pub fn function_declarations() -> Vec<FunctionDeclaration> {
    vec![
        FunctionDeclaration {
            name: "extract_information".to_string(),
            description: "Extract structured information from the conversation for legal \
                          document generation. Use this when you need to gather specific \
                          details like names, dates, positions, or other document parameters."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "document_type": {
                        "type": "string",
                        "description": "Type of legal document (e.g., 'director_appointment', 'nda', 'employment_agreement')"
                    },
                    "extracted_data": {
                        "type": "object",
                        "description": "Key-value pairs of extracted information",
                        "properties": {}
                    },
                    "missing_fields": {
                        "type": "array",
                        "description": "List of required fields that are still missing",
                        "items": {"type": "string"}
                    }
                },
                "required": ["document_type", "extracted_data"]
            }),
        },
        FunctionDeclaration {
            name: "generate_document".to_string(),
            description: "Generate a complete legal document based on extracted information. \
                          Use this only when you have all required information to create a \
                          comprehensive document.\n\n\
                          For director appointments, include: director_name, effective_date, \
                          committees (optional), resolution_number (optional)\n\
                          For NDAs, include: party1_name, party2_name, effective_date, \
                          term_years (optional)\n\
                          For employment agreements, include: employee_name, company_name, \
                          position, start_date, salary"
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "document_type": {
                        "type": "string",
                        "description": "Type of legal document to generate ('director_appointment', 'nda', or 'employment_agreement')"
                    },
                    "document_data": {
                        "type": "object",
                        "description": "All data needed to generate the document, as a flat object of key-value pairs. \
                                        Examples: for an NDA {\"party1_name\": \"Company A\", \"party2_name\": \"Company B\", \
                                        \"effective_date\": \"2024-03-15\", \"term_years\": \"3\"}; for an employment agreement \
                                        {\"employee_name\": \"Jane Smith\", \"company_name\": \"Acme Corp\", \"position\": \"Senior Engineer\", \
                                        \"start_date\": \"2024-04-01\", \"salary\": \"$150,000\"}"
                    }
                },
                "required": ["document_type", "document_data"]
            }),
        },
        FunctionDeclaration {
            name: "apply_edits".to_string(),
            description: "Apply specific edits to an existing document based on user requests. \
                          Use this when the user wants to modify, update, or change part of an \
                          already generated document."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "edit_type": {
                        "type": "string",
                        "description": "Type of edit; 'update_field' changes a specific value (date, name, amount)"
                    },
                    "field_name": {
                        "type": "string",
                        "description": "Name of the field to edit"
                    },
                    "new_value": {
                        "type": "string",
                        "description": "New value to apply"
                    },
                    "reason": {
                        "type": "string",
                        "description": "Brief explanation of the edit"
                    }
                },
                "required": ["edit_type", "field_name", "new_value"]
            }),
        },
    ]
}
