//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the extraction engine and the
//! tools that read PDFs. Implementations live in other crates (eobscan-pdf).

use std::path::Path;

/// Per-page results from a document reader
///
/// The outer `Result` reports whether the document could be opened at all; each
/// inner entry is one page in document order.
pub type PageResults<E> = Result<Vec<Result<String, E>>, E>;

/// Native PDF text extraction with per-page iteration
///
/// Implemented by the infrastructure layer (eobscan-pdf)
pub trait TextLayer {
    /// Error type for extraction operations
    type Error;

    /// Extract the text of every page
    fn extract_pages(&self, path: &Path) -> PageResults<Self::Error>;
}

/// Optical character recognition over rasterized pages
///
/// Implemented by the infrastructure layer (eobscan-pdf)
pub trait OcrEngine {
    /// Error type for recognition operations
    type Error;

    /// Rasterize and recognize every page
    fn recognize_pages(&self, path: &Path) -> PageResults<Self::Error>;
}
