//! Document-level print-readiness analysis
//!
//! The single entry point of the library: open a document, sample its first
//! page's operator stream, run the classifier, and report the issues found
//! together with the document's page count.

use std::path::Path;

use crate::classify::classify;
use crate::error::{Error, Result};
use crate::pdf::content::{operator_stream, page_geometry};
use crate::pdf::document::{count_pages, first_page_id, open_document};
use crate::thresholds::ThresholdModel;

/// The only declared media type this analysis accepts.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Issues that make a document expensive or undesirable to print.
///
/// `page_count` covers the whole document; the three flags reflect only the
/// sampled first page. A true flag is a recommendation to optimize the
/// document before printing, not proof that every page is affected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizationIssues {
    /// The sampled page sets a non-gray fill or stroke color
    pub has_color_content: bool,
    /// The sampled page draws a rectangle covering a large fraction of it
    pub has_background_elements: bool,
    /// The sampled page paints an image above the pixel-count threshold
    pub has_large_images: bool,
    /// Total number of pages in the document
    pub page_count: u32,
}

impl OptimizationIssues {
    /// Whether any issue was detected on the sampled page.
    pub fn any(&self) -> bool {
        self.has_color_content || self.has_background_elements || self.has_large_images
    }
}

/// Analyze a PDF document with the default threshold model.
///
/// Only the first page is sampled; this is a documented simplification of
/// the analysis, not an attempt at whole-document statistics. The result is
/// a pure function of the input bytes and thresholds, so repeated calls on
/// the same bytes yield identical results.
pub fn analyze_document(bytes: &[u8], media_type: &str) -> Result<OptimizationIssues> {
    analyze_document_with(bytes, media_type, &ThresholdModel::default())
}

/// Analyze a PDF document with an explicit threshold model.
pub fn analyze_document_with(
    bytes: &[u8],
    media_type: &str,
    thresholds: &ThresholdModel,
) -> Result<OptimizationIssues> {
    if !media_type.eq_ignore_ascii_case(PDF_MEDIA_TYPE) {
        return Err(Error::InvalidInput(format!(
            "unsupported media type '{media_type}', expected '{PDF_MEDIA_TYPE}'"
        )));
    }
    if bytes.is_empty() {
        return Err(Error::InvalidInput("empty document".to_string()));
    }

    let doc = open_document(bytes)?;
    let page_count = count_pages(&doc)?;

    // Sample the first page only
    let page_id = first_page_id(&doc)?;
    let operators = operator_stream(&doc, page_id)?;
    let geometry = page_geometry(&doc, page_id)?;

    let flags = classify(&operators, &geometry, thresholds);

    Ok(OptimizationIssues {
        has_color_content: flags.has_color_content,
        has_background_elements: flags.has_background_elements,
        has_large_images: flags.has_large_images,
        page_count,
    })
}

/// Analyze a PDF file on disk with the default threshold model.
pub fn analyze_file(path: &Path) -> Result<OptimizationIssues> {
    analyze_file_with(path, &ThresholdModel::default())
}

/// Analyze a PDF file on disk with an explicit threshold model.
///
/// The declared media type is derived from the file extension, so a
/// non-`.pdf` path is rejected before the file is read.
pub fn analyze_file_with(path: &Path, thresholds: &ThresholdModel) -> Result<OptimizationIssues> {
    let is_pdf = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if !is_pdf {
        return Err(Error::InvalidInput(format!(
            "not a PDF file: {}",
            path.display()
        )));
    }
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path)?;
    analyze_document_with(&bytes, PDF_MEDIA_TYPE, thresholds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_empty_bytes_is_invalid_input() {
        let result = analyze_document(&[], PDF_MEDIA_TYPE);
        assert!(matches!(result.unwrap_err(), Error::InvalidInput(_)));
    }

    #[test]
    fn test_wrong_media_type_is_invalid_input() {
        let result = analyze_document(b"%PDF-1.5", "image/png");
        assert!(matches!(result.unwrap_err(), Error::InvalidInput(_)));
    }

    #[test]
    fn test_media_type_is_case_insensitive() {
        // Rejected later for being garbage, but not for the media type
        let result = analyze_document(b"not a pdf", "Application/PDF");
        assert!(matches!(result.unwrap_err(), Error::Pdf(_)));
    }

    #[test]
    fn test_analyze_file_rejects_non_pdf_extension() {
        let result = analyze_file(&PathBuf::from("document.docx"));
        assert!(matches!(result.unwrap_err(), Error::InvalidInput(_)));
    }

    #[test]
    fn test_analyze_file_nonexistent() {
        let result = analyze_file(&PathBuf::from("nonexistent.pdf"));
        assert!(matches!(result.unwrap_err(), Error::FileNotFound(_)));
    }

    #[test]
    fn test_any_flag() {
        let clean = OptimizationIssues {
            has_color_content: false,
            has_background_elements: false,
            has_large_images: false,
            page_count: 1,
        };
        assert!(!clean.any());

        let flagged = OptimizationIssues {
            has_large_images: true,
            ..clean
        };
        assert!(flagged.any());
    }
}
