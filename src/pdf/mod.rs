//! PDF document access module
//!
//! Bridges the lopdf engine and the classifier: opening documents, counting
//! pages, decoding operator streams, and running the document-level
//! analysis.

pub mod analyze;
pub mod content;
pub mod document;

// Re-export commonly used items
pub use analyze::{
    analyze_document, analyze_document_with, analyze_file, analyze_file_with, OptimizationIssues,
    PDF_MEDIA_TYPE,
};
pub use content::{operator_stream, page_geometry};
pub use document::{count_pages, first_page_id, open_document};
