//! Error types for the CLI application.

use eobscan_extractor::ExtractorError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// At least one claim was emitted
pub const EXIT_SUCCESS: i32 = 0;

/// Anything not covered by the other codes
pub const EXIT_UNEXPECTED: i32 = 1;

/// The document was read but produced no claims
pub const EXIT_NO_CLAIMS: i32 = 2;

/// No text could be extracted from the document
pub const EXIT_EXTRACTION_FAILED: i32 = 3;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Extraction engine error
    #[error(transparent)]
    Extractor(#[from] ExtractorError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Extractor(ExtractorError::Extraction(_)) => EXIT_EXTRACTION_FAILED,
            _ => EXIT_UNEXPECTED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_failure_exit_code() {
        let err = CliError::from(ExtractorError::Extraction("no text".to_string()));
        assert_eq!(err.exit_code(), EXIT_EXTRACTION_FAILED);
        assert_eq!(err.to_string(), "Extraction error: no text");
    }

    #[test]
    fn test_other_errors_are_unexpected() {
        assert_eq!(CliError::Config("bad".into()).exit_code(), EXIT_UNEXPECTED);
        let internal = CliError::from(ExtractorError::Internal("overflow".to_string()));
        assert_eq!(internal.exit_code(), EXIT_UNEXPECTED);
    }
}
