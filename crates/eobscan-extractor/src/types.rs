//! Request and result types for extraction

use crate::error::ExtractorError;
use eobscan_domain::{Claim, ClaimReport, TextMode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which text source to use for a PDF
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    /// Native text first, OCR when the native text is too short
    #[default]
    Auto,
    /// Native text only
    Fast,
    /// OCR only
    Ocr,
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionMode::Auto => write!(f, "auto"),
            ExtractionMode::Fast => write!(f, "fast"),
            ExtractionMode::Ocr => write!(f, "ocr"),
        }
    }
}

impl FromStr for ExtractionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ExtractionMode::Auto),
            "fast" => Ok(ExtractionMode::Fast),
            "ocr" => Ok(ExtractionMode::Ocr),
            other => Err(format!("Unknown extraction mode '{}'", other)),
        }
    }
}

/// Text pulled out of a PDF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    /// Page texts joined with newlines
    pub text: String,

    /// Mode that produced the text
    pub mode: TextMode,

    /// Pages that yielded text
    pub pages_read: usize,

    /// Pages skipped because extraction failed
    pub pages_skipped: usize,
}

/// Per-claim diagnostics that are not part of the claim record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimDiagnostics {
    /// Position of the source fragment in the document (0-based)
    pub fragment_index: usize,

    /// Lines that did not produce a line item
    pub lines_skipped: usize,

    /// Provisional translations applied, as `token -> code`
    pub provisional_translations: Vec<String>,

    /// Whether the printed total equals the sum of line items; `None` when the
    /// printed total does not parse as an amount
    pub totals_reconciled: Option<bool>,
}

/// A claim together with its diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledClaim {
    /// The emitted claim
    pub claim: Claim,

    /// Diagnostics gathered while parsing it
    pub diagnostics: ClaimDiagnostics,
}

/// Result of running the engine over one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOutput {
    /// The report handed to downstream consumers
    pub report: ClaimReport,

    /// Diagnostics for each emitted claim, in the same order as `report.claims`
    pub diagnostics: Vec<ClaimDiagnostics>,

    /// Pages skipped during text extraction
    pub pages_skipped: usize,
}

impl EngineOutput {
    /// Serialize the report to pretty-printed JSON
    pub fn report_json(&self) -> Result<String, ExtractorError> {
        Ok(serde_json::to_string_pretty(&self.report)?)
    }

    /// Total lines skipped across emitted claims
    pub fn lines_skipped(&self) -> usize {
        self.diagnostics.iter().map(|d| d.lines_skipped).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("auto".parse::<ExtractionMode>().unwrap(), ExtractionMode::Auto);
        assert_eq!("FAST".parse::<ExtractionMode>().unwrap(), ExtractionMode::Fast);
        assert_eq!("ocr".parse::<ExtractionMode>().unwrap(), ExtractionMode::Ocr);
        assert!("turbo".parse::<ExtractionMode>().is_err());
    }

    #[test]
    fn test_mode_display_round_trip() {
        for mode in [ExtractionMode::Auto, ExtractionMode::Fast, ExtractionMode::Ocr] {
            assert_eq!(mode.to_string().parse::<ExtractionMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_default_mode_is_auto() {
        assert_eq!(ExtractionMode::default(), ExtractionMode::Auto);
    }
}
