//! Loading document text from disk.
//!
//! Plain text files are read as UTF-8. PDFs are opened with lopdf (so
//! empty-password encryption and page-less files are caught early) and their
//! text pulled out with pdf-extract.

use std::path::Path;

use tracing::debug;

use crate::error::SourceError;

/// Result type for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;

/// Read the text of a document, dispatching on the file extension.
pub fn load_text(path: &Path) -> Result<String> {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

    let bytes = std::fs::read(path).map_err(|source| SourceError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let text = if is_pdf {
        pdf_text(&bytes)?
    } else {
        String::from_utf8_lossy(&bytes).into_owned()
    };

    debug!("Loaded {} characters from {}", text.len(), path.display());
    Ok(text)
}

/// Extract text from PDF bytes.
#[cfg(feature = "pdf")]
pub fn pdf_text(data: &[u8]) -> Result<String> {
    let mut doc = lopdf::Document::load_mem(data).map_err(|e| SourceError::Pdf(e.to_string()))?;

    let decrypted;
    let raw: &[u8] = if doc.is_encrypted() {
        if doc.decrypt("").is_err() {
            return Err(SourceError::Encrypted);
        }
        debug!("Decrypted PDF with empty password");

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| SourceError::Pdf(format!("failed to save decrypted PDF: {}", e)))?;
        decrypted = buffer;
        &decrypted
    } else {
        data
    };

    let page_count = doc.get_pages().len();
    if page_count == 0 {
        return Err(SourceError::NoPages);
    }
    debug!("PDF has {} pages", page_count);

    pdf_extract::extract_text_from_mem(raw).map_err(|e| SourceError::Pdf(e.to_string()))
}

/// Extract text from PDF bytes.
#[cfg(not(feature = "pdf"))]
pub fn pdf_text(_data: &[u8]) -> Result<String> {
    Err(SourceError::PdfUnsupported)
}
