//! Report-level output: ordered claims, rejected fragments, derived totals

use crate::{Claim, Money};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the report text was obtained from the PDF
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextMode {
    /// Native PDF text extraction
    Fast,
    /// Rasterized pages run through OCR
    Ocr,
}

impl fmt::Display for TextMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextMode::Fast => write!(f, "fast"),
            TextMode::Ocr => write!(f, "ocr"),
        }
    }
}

/// Why a claim fragment produced no claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RejectionReason {
    /// Fragment matched a business-rule exclusion marker
    PolicyFilter,
    /// No patient name could be recovered
    NoName,
    /// No `Totals` line was found
    NoTotals,
    /// No date of service was found
    NoDate,
    /// Fragment held nothing beyond its plan-name landmark
    EmptyFragment,
}

impl RejectionReason {
    /// Short reason code as used in logs and serialized output
    pub fn code(&self) -> &'static str {
        match self {
            RejectionReason::PolicyFilter => "policy-filter",
            RejectionReason::NoName => "no-name",
            RejectionReason::NoTotals => "no-totals",
            RejectionReason::NoDate => "no-date",
            RejectionReason::EmptyFragment => "empty-fragment",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A fragment that was dropped, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentRejection {
    /// Position of the fragment in the document (0-based)
    pub fragment_index: usize,

    /// Reason the fragment was dropped
    pub reason: RejectionReason,

    /// First non-empty line of the fragment
    pub excerpt: String,
}

/// All claims extracted from one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimReport {
    /// Source document identifier (usually the file path)
    pub source: String,

    /// Extraction mode that produced the text, if a PDF was read
    pub extraction_mode: Option<TextMode>,

    /// Claims in document order
    pub claims: Vec<Claim>,

    /// Fragments that produced no claim, in document order
    #[serde(default)]
    pub rejected: Vec<FragmentRejection>,

    /// Sum of every claim's line item amounts
    pub total_paid_derived: Money,

    /// Whether the run stopped early on a cancellation request
    #[serde(default)]
    pub cancelled: bool,
}

impl ClaimReport {
    /// Number of claims emitted
    pub fn claim_count(&self) -> usize {
        self.claims.len()
    }

    /// Count rejected fragments with the given reason
    pub fn rejections_with(&self, reason: RejectionReason) -> usize {
        self.rejected.iter().filter(|r| r.reason == reason).count()
    }

    /// Recompute the derived total from the claims
    pub fn recomputed_total(&self) -> Money {
        self.claims.iter().map(Claim::derived_total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DateOfService, LineItem, PatientName, ProcedureCode};

    fn sample_report() -> ClaimReport {
        let claim = Claim::new(
            PatientName::parse("DOE, JANE").unwrap(),
            DateOfService::parse("02/02/24").unwrap(),
            vec![
                LineItem::new(ProcedureCode::new("V2781"), Money::parse_column("45.00").unwrap()),
                LineItem::new(ProcedureCode::new("V2750"), Money::parse_column("55.00").unwrap()),
            ],
            "100.00",
        )
        .unwrap();
        ClaimReport {
            source: "eob.pdf".to_string(),
            extraction_mode: Some(TextMode::Fast),
            total_paid_derived: claim.derived_total(),
            claims: vec![claim],
            rejected: vec![FragmentRejection {
                fragment_index: 1,
                reason: RejectionReason::NoTotals,
                excerpt: "CHOICE".to_string(),
            }],
            cancelled: false,
        }
    }

    #[test]
    fn test_reason_codes_match_serde() {
        for reason in [
            RejectionReason::PolicyFilter,
            RejectionReason::NoName,
            RejectionReason::NoTotals,
            RejectionReason::NoDate,
            RejectionReason::EmptyFragment,
        ] {
            let json = serde_json::to_string(&reason).unwrap();
            assert_eq!(json, format!("\"{}\"", reason.code()));
        }
    }

    #[test]
    fn test_report_round_trip() {
        let report = sample_report();
        let json = serde_json::to_string_pretty(&report).unwrap();
        let back: ClaimReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
        assert!(json.contains("\"total_paid_derived\": \"100.00\""));
        assert!(json.contains("\"extraction_mode\": \"fast\""));
    }

    #[test]
    fn test_report_helpers() {
        let report = sample_report();
        assert_eq!(report.claim_count(), 1);
        assert_eq!(report.rejections_with(RejectionReason::NoTotals), 1);
        assert_eq!(report.rejections_with(RejectionReason::NoName), 0);
        assert_eq!(report.recomputed_total(), report.total_paid_derived);
    }
}
