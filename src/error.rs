//! Error types for the PDF preflight library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the PDF preflight library
#[derive(Error, Debug)]
pub enum Error {
    /// Input was rejected before the document was opened
    /// (empty bytes, or a declared media type other than PDF)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Document is structurally valid but cannot be analyzed
    /// (password-protected documents are not supported)
    #[error("Unsupported document: {0}")]
    UnsupportedDocument(String),

    /// PDF engine error while decoding the document or a page
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Document or page structure did not match what analysis requires
    #[error("Document processing failed: {0}")]
    Processing(String),

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
