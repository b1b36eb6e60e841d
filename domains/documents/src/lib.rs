//! Documents domain: legal document types, templates, generation and editing

pub mod domain;
pub mod service;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{DocumentEdit, DocumentType, GeneratedDocument};
pub use service::DocumentService;
