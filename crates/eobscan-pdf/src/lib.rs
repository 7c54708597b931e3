//! Eobscan PDF Layer
//!
//! Implementations of the `TextLayer` and `OcrEngine` traits from
//! `eobscan-domain`.
//!
//! # Backends
//!
//! - `LopdfTextLayer`: native text extraction through `lopdf`
//! - `TesseractOcr`: rasterizes pages with `pdftoppm` and runs the `tesseract` CLI
//! - `MockPages`: deterministic page source for testing
//!
//! # Examples
//!
//! ```
//! use eobscan_pdf::MockPages;
//! use eobscan_domain::traits::TextLayer;
//! use std::path::Path;
//!
//! let pages = MockPages::new(["CHOICE", "Totals 10.00"]);
//! let result = pages.extract_pages(Path::new("any.pdf")).unwrap();
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[1].as_deref().unwrap(), "Totals 10.00");
//! ```

#![warn(missing_docs)]

pub mod lopdf_layer;
pub mod tesseract;

use eobscan_domain::traits::{OcrEngine, PageResults, TextLayer};
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use lopdf_layer::LopdfTextLayer;
pub use tesseract::{OcrSettings, TesseractOcr};

/// Errors that can occur while reading a PDF
#[derive(Error, Debug)]
pub enum PdfError {
    /// Document could not be opened or parsed
    #[error("Failed to open PDF: {0}")]
    Open(String),

    /// A single page could not be read
    #[error("Page {page}: {message}")]
    Page {
        /// 1-based page number
        page: u32,
        /// What went wrong
        message: String,
    },

    /// Page could not be rendered to an image
    #[error("Rasterization failed: {0}")]
    Rasterize(String),

    /// OCR engine failed
    #[error("OCR failed: {0}")]
    Ocr(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Mock page source for deterministic testing
///
/// Returns pre-configured page texts without touching the filesystem. Clones
/// share the call counter.
#[derive(Debug, Clone, Default)]
pub struct MockPages {
    pages: Vec<Option<String>>,
    fail_open: bool,
    call_count: Arc<Mutex<usize>>,
}

impl MockPages {
    /// Create a mock returning the given page texts
    pub fn new<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: pages.into_iter().map(|p| Some(p.into())).collect(),
            fail_open: false,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Create a mock whose document cannot be opened
    pub fn unreadable() -> Self {
        Self {
            fail_open: true,
            ..Self::default()
        }
    }

    /// Append a page that fails to extract
    pub fn with_failed_page(mut self) -> Self {
        self.pages.push(None);
        self
    }

    /// Get the number of times the document was read
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn pages(&self) -> PageResults<PdfError> {
        *self.call_count.lock().unwrap_or_else(|e| e.into_inner()) += 1;

        if self.fail_open {
            return Err(PdfError::Open("mock document is unreadable".to_string()));
        }

        Ok(self
            .pages
            .iter()
            .enumerate()
            .map(|(idx, page)| {
                page.clone().ok_or_else(|| PdfError::Page {
                    page: idx as u32 + 1,
                    message: "mock page failure".to_string(),
                })
            })
            .collect())
    }
}

impl TextLayer for MockPages {
    type Error = PdfError;

    fn extract_pages(&self, _path: &Path) -> PageResults<Self::Error> {
        self.pages()
    }
}

impl OcrEngine for MockPages {
    type Error = PdfError;

    fn recognize_pages(&self, _path: &Path) -> PageResults<Self::Error> {
        self.pages()
    }
}
