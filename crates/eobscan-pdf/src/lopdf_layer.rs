//! Native PDF text extraction backed by `lopdf`

use crate::PdfError;
use eobscan_domain::traits::{PageResults, TextLayer};
use lopdf::Document;
use std::path::Path;
use tracing::debug;

/// Reads the embedded text layer of a PDF, one page at a time
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfTextLayer;

impl LopdfTextLayer {
    /// Create a new text layer reader
    pub fn new() -> Self {
        Self
    }

    /// Load a document, mapping failures to [`PdfError::Open`]
    pub fn load(path: &Path) -> Result<Document, PdfError> {
        Document::load(path).map_err(|e| PdfError::Open(format!("{}: {}", path.display(), e)))
    }

    /// 1-based page numbers of a document, in order
    pub fn page_numbers(path: &Path) -> Result<Vec<u32>, PdfError> {
        let doc = Self::load(path)?;
        Ok(doc.get_pages().keys().copied().collect())
    }
}

impl TextLayer for LopdfTextLayer {
    type Error = PdfError;

    fn extract_pages(&self, path: &Path) -> PageResults<Self::Error> {
        let doc = Self::load(path)?;
        let pages = doc.get_pages();

        debug!("Extracting text layer from {} ({} pages)", path.display(), pages.len());

        Ok(pages
            .keys()
            .map(|&page| {
                doc.extract_text(&[page]).map_err(|e| PdfError::Page {
                    page,
                    message: e.to_string(),
                })
            })
            .collect())
    }
}
