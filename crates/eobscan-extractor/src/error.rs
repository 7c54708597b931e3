//! Error types for the Extractor

use thiserror::Error;

/// Errors that abort an extraction run
///
/// Problems confined to one fragment or one line are not errors; they are
/// recorded as rejections and skip counts on the report.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// PDF could not be opened or produced no text in any attempted mode
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Arithmetic or invariant violation; output can no longer be trusted
    #[error("Internal error: {0}")]
    Internal(String),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::Serialization(e.to_string())
    }
}
