//! PDF Preflight Library
//!
//! Heuristic print-readiness analysis for PDF documents. The first page's
//! content stream is scanned for features that make a document expensive or
//! undesirable to print:
//! - non-gray fill/stroke colors (color content)
//! - rectangles covering a large fraction of the page (background elements)
//! - embedded raster images above a pixel-count threshold (large images)
//!
//! The result drives an "optimize before printing" recommendation; the
//! library only detects issues, it never modifies the document.
//!
//! # Example
//!
//! ```no_run
//! use pdf_preflight::pdf::{analyze_document, PDF_MEDIA_TYPE};
//!
//! let bytes = std::fs::read("report.pdf").expect("Failed to read file");
//! let issues = analyze_document(&bytes, PDF_MEDIA_TYPE).expect("Failed to analyze PDF");
//!
//! println!("{} pages", issues.page_count);
//! if issues.any() {
//!     println!("Consider optimizing before printing");
//! }
//! ```

pub mod classify;
pub mod error;
pub mod pdf;
pub mod thresholds;

// Re-export commonly used items
pub use classify::{classify, AnalysisAccumulator, Operator, PageGeometry};
pub use error::{Error, Result};
pub use pdf::{analyze_document, analyze_document_with, analyze_file, OptimizationIssues};
pub use thresholds::ThresholdModel;
