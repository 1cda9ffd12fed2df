//! PDF text extraction via `lopdf`.
//!
//! Pages are read in page-number order and their text concatenated as-is;
//! no separator is added beyond what the extraction itself produces.

use lopdf::Document;
use tracing::{debug, info};

use lexclass_core::error::PipelineError;
use lexclass_core::models::document::DocumentUpload;
use lexclass_core::pipeline::TextExtractor;

use crate::error::ExtractError;

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract the text of every page of `document`.
    ///
    /// Fails if the bytes are not a parseable PDF or any page's text cannot
    /// be decoded.
    pub fn extract(&self, document: &DocumentUpload) -> Result<String, ExtractError> {
        let doc = Document::load_mem(&document.bytes).map_err(|e| ExtractError::DocumentRead {
            filename: document.filename.clone(),
            message: e.to_string(),
        })?;

        let pages = doc.get_pages();
        let mut text = String::new();
        for &page in pages.keys() {
            let page_text = doc
                .extract_text(&[page])
                .map_err(|e| ExtractError::PageText {
                    filename: document.filename.clone(),
                    page,
                    message: e.to_string(),
                })?;
            debug!(page, text_len = page_text.len(), "extracted page text");
            text.push_str(&page_text);
        }

        info!(
            filename = %document.filename,
            pages = pages.len(),
            text_len = text.len(),
            "document text extraction complete"
        );

        Ok(text)
    }
}

impl TextExtractor for PdfExtractor {
    fn extract_text(&self, document: &DocumentUpload) -> Result<String, PipelineError> {
        Ok(self.extract(document)?)
    }
}
