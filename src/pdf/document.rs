//! Opening PDF documents and reading document-level structure

use lopdf::{Document, Object, ObjectId};

use crate::error::{Error, Result};

/// Open a PDF document from raw bytes.
///
/// Password-protected documents are rejected with
/// [`Error::UnsupportedDocument`]: analysis never attempts decryption or
/// retries with credentials. Any other decode failure surfaces as
/// [`Error::Pdf`] with the engine's cause preserved.
pub fn open_document(bytes: &[u8]) -> Result<Document> {
    let doc = match Document::load_mem(bytes) {
        Ok(doc) => doc,
        Err(err) => {
            // Depending on the lopdf version, an encrypted document can
            // already fail at load time when no password is available.
            let msg = err.to_string().to_ascii_lowercase();
            if msg.contains("decrypt") || msg.contains("password") || msg.contains("encrypt") {
                return Err(Error::UnsupportedDocument(
                    "password-protected PDFs are not supported".to_string(),
                ));
            }
            return Err(Error::Pdf(err));
        }
    };

    if doc.trailer.get(b"Encrypt").is_ok() {
        return Err(Error::UnsupportedDocument(
            "password-protected PDFs are not supported".to_string(),
        ));
    }

    Ok(doc)
}

/// Count pages by reading the Count field from the catalog's Pages
/// dictionary, falling back to walking the page tree when the field is
/// missing. The Count field handles nested page trees that a plain
/// `get_pages()` walk can misreport.
pub fn count_pages(doc: &Document) -> Result<u32> {
    if let Some(count) = count_from_catalog(doc) {
        if count > 0 {
            return Ok(count);
        }
    }

    let walked = doc.get_pages().len() as u32;
    if walked == 0 {
        return Err(Error::Processing("document has no pages".to_string()));
    }
    Ok(walked)
}

fn count_from_catalog(doc: &Document) -> Option<u32> {
    let catalog = doc.catalog().ok()?;
    let pages_id = catalog.get(b"Pages").ok()?.as_reference().ok()?;
    let pages_dict = doc.get_dictionary(pages_id).ok()?;
    match pages_dict.get(b"Count").ok()? {
        Object::Integer(n) if *n >= 0 => Some(*n as u32),
        _ => None,
    }
}

/// Object id of the sampled page (the document's first page).
pub fn first_page_id(doc: &Document) -> Result<ObjectId> {
    // get_pages keys are 1-based page numbers
    doc.get_pages()
        .get(&1)
        .copied()
        .ok_or_else(|| Error::Processing("document has no pages".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_document_rejects_garbage() {
        let result = open_document(b"this is not a pdf");
        assert!(matches!(result.unwrap_err(), Error::Pdf(_)));
    }
}
