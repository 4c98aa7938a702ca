use lopdf::Document;
use tracing::{debug, warn};

use crate::core::FacturaError;

/// Extract the text of every page, in page order, joined with newlines.
///
/// A PDF that cannot be loaded is an error. A single page whose text
/// cannot be decoded contributes an empty string.
pub fn extract_text(pdf_bytes: &[u8]) -> Result<String, FacturaError> {
    let doc = Document::load_mem(pdf_bytes)
        .map_err(|e| FacturaError::Pdf(format!("failed to load PDF: {e}")))?;

    let pages = doc.get_pages();
    let mut texts = Vec::with_capacity(pages.len());
    for page_number in pages.keys() {
        match doc.extract_text(&[*page_number]) {
            Ok(text) => texts.push(text),
            Err(e) => {
                warn!(page = page_number, error = %e, "could not decode page text");
                texts.push(String::new());
            }
        }
    }

    debug!(pages = texts.len(), "extracted PDF text");
    Ok(texts.join("\n"))
}
