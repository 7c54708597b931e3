//! Claim assembly and report aggregation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::header::{find_date_of_service, find_patient_name};
use crate::line_items::LineItemParser;
use crate::sanitizer::Sanitizer;
use crate::types::{AssembledClaim, ClaimDiagnostics};
use eobscan_domain::{Claim, ClaimReport, FragmentRejection, Money, RejectionReason, TextMode};
use tracing::debug;

/// Outcome of assembling one fragment
pub type AssemblyOutcome = Result<AssembledClaim, RejectionReason>;

/// Turns a claim fragment into a claim, or says why it cannot
pub struct ClaimAssembler<'a> {
    config: &'a ExtractorConfig,
}

impl<'a> ClaimAssembler<'a> {
    /// Create an assembler
    pub fn new(config: &'a ExtractorConfig) -> Self {
        Self { config }
    }

    /// Assemble the fragment at `index`
    ///
    /// The outer error aborts the run; the inner rejection only drops this
    /// fragment.
    pub fn assemble(&self, index: usize, fragment: &str) -> Result<AssemblyOutcome, ExtractorError> {
        let sanitizer = Sanitizer::new(self.config);

        let total_billed = match find_totals(fragment) {
            Some(total) => total,
            None => return Ok(Err(RejectionReason::NoTotals)),
        };

        let lines = sanitizer.clean_lines(fragment);

        let name = match find_patient_name(&lines, self.config.name_scan_lines) {
            Some(name) => name,
            None => return Ok(Err(RejectionReason::NoName)),
        };
        let date = match find_date_of_service(&lines) {
            Some(date) => date,
            None => return Ok(Err(RejectionReason::NoDate)),
        };

        let body = sanitizer.drop_filler(name.remove_from(lines));
        let parsed = LineItemParser::new(self.config).parse(&body, &date)?;

        let claim = Claim::new(name.name, date, parsed.items, total_billed)
            .map_err(|e| ExtractorError::Internal(format!("fragment {}: {}", index, e)))?;

        let derived = claim.checked_derived_total().ok_or_else(|| {
            ExtractorError::Internal(format!("fragment {}: line item total overflow", index))
        })?;
        let totals_reconciled = claim.total_billed_amount().map(|billed| billed == derived);
        if totals_reconciled == Some(false) {
            debug!(
                "Fragment {}: billed {} differs from line item sum {}",
                index,
                claim.total_billed(),
                derived
            );
        }

        Ok(Ok(AssembledClaim {
            claim,
            diagnostics: ClaimDiagnostics {
                fragment_index: index,
                lines_skipped: parsed.lines_skipped,
                provisional_translations: parsed.provisional_translations,
                totals_reconciled,
            },
        }))
    }
}

/// Second token of the first line starting with `Totals`
///
/// A `Totals` line without a value counts as missing.
pub fn find_totals(fragment: &str) -> Option<String> {
    fragment
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with("Totals"))
        .and_then(|line| line.split_whitespace().nth(1))
        .map(str::to_string)
}

/// Folds claims and rejections into a report in document order
#[derive(Debug)]
pub struct ReportBuilder {
    source: String,
    extraction_mode: Option<TextMode>,
    claims: Vec<Claim>,
    diagnostics: Vec<ClaimDiagnostics>,
    rejected: Vec<FragmentRejection>,
    total_paid_derived: Money,
    cancelled: bool,
}

impl ReportBuilder {
    /// Start a report for `source`
    pub fn new(source: impl Into<String>, extraction_mode: Option<TextMode>) -> Self {
        Self {
            source: source.into(),
            extraction_mode,
            claims: Vec::new(),
            diagnostics: Vec::new(),
            rejected: Vec::new(),
            total_paid_derived: Money::ZERO,
            cancelled: false,
        }
    }

    /// Append an emitted claim
    pub fn push_claim(&mut self, assembled: AssembledClaim) -> Result<(), ExtractorError> {
        self.total_paid_derived = self
            .total_paid_derived
            .checked_add(assembled.claim.derived_total())
            .ok_or_else(|| ExtractorError::Internal("report total overflow".to_string()))?;
        self.claims.push(assembled.claim);
        self.diagnostics.push(assembled.diagnostics);
        Ok(())
    }

    /// Record a dropped fragment
    pub fn push_rejection(&mut self, rejection: FragmentRejection) {
        self.rejected.push(rejection);
    }

    /// Mark the run as stopped early
    pub fn mark_cancelled(&mut self) {
        self.cancelled = true;
    }

    /// Number of claims so far
    pub fn claim_count(&self) -> usize {
        self.claims.len()
    }

    /// Finish the report
    pub fn finish(self) -> (ClaimReport, Vec<ClaimDiagnostics>) {
        let report = ClaimReport {
            source: self.source,
            extraction_mode: self.extraction_mode,
            claims: self.claims,
            rejected: self.rejected,
            total_paid_derived: self.total_paid_derived,
            cancelled: self.cancelled,
        };
        (report, self.diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assemble(fragment: &str) -> AssemblyOutcome {
        let config = ExtractorConfig::default();
        ClaimAssembler::new(&config).assemble(0, fragment).unwrap()
    }

    #[test]
    fn test_assembles_basic_claim() {
        let assembled = assemble("CHOICE\nSMITH, JOHN\n01/15/24\nV2781 90.00\nV2781 30.00\nTotals 120.00\n").unwrap();
        let claim = &assembled.claim;
        assert_eq!(claim.patient_name().as_str(), "SMITH, JOHN");
        assert_eq!(claim.date_of_service().as_str(), "01/15/24");
        assert_eq!(claim.line_items().len(), 1);
        assert_eq!(claim.amount_for("V2781").unwrap().to_string(), "120.00");
        assert_eq!(claim.total_billed(), "120.00");
        assert_eq!(assembled.diagnostics.totals_reconciled, Some(true));
    }

    #[test]
    fn test_missing_totals() {
        assert_eq!(
            assemble("CHOICE\nSMITH, JOHN\n01/15/24\nV2781 90.00\n").unwrap_err(),
            RejectionReason::NoTotals
        );
    }

    #[test]
    fn test_totals_without_value_is_missing() {
        assert_eq!(
            assemble("CHOICE\nSMITH, JOHN\n01/15/24\nTotals\n").unwrap_err(),
            RejectionReason::NoTotals
        );
    }

    #[test]
    fn test_missing_name() {
        assert_eq!(
            assemble("CHOICE\n01/15/24\nV2781 90.00\nTotals 90.00\n").unwrap_err(),
            RejectionReason::NoName
        );
    }

    #[test]
    fn test_missing_date() {
        assert_eq!(
            assemble("CHOICE\nSMITH, JOHN\nV2781 90.00\nTotals 90.00\n").unwrap_err(),
            RejectionReason::NoDate
        );
    }

    #[test]
    fn test_totals_verbatim_and_unreconciled() {
        let assembled = assemble("CHOICE\nSMITH, JOHN\n01/15/24\nV2781 90.00\nTotals $95.00\n").unwrap();
        assert_eq!(assembled.claim.total_billed(), "$95.00");
        assert_eq!(assembled.diagnostics.totals_reconciled, Some(false));
    }

    #[test]
    fn test_totals_line_not_parsed_as_item() {
        let assembled = assemble("CHOICE\nSMITH, JOHN\n01/15/24\nTotals 120.00\n").unwrap();
        assert!(assembled.claim.line_items().is_empty());
        assert_eq!(assembled.claim.total_billed(), "120.00");
    }

    #[test]
    fn test_name_starting_with_filtered_word() {
        let assembled = assemble("CHOICE\nPLANK, SARAH\n01/15/24\nV2020 10.00\nTotals 10.00\n").unwrap();
        assert_eq!(assembled.claim.patient_name().as_str(), "PLANK, SARAH");
    }

    #[test]
    fn test_line_item_total_overflow_is_internal() {
        let config = ExtractorConfig::default();
        let fragment = "CHOICE\nSMITH, JOHN\n01/15/24\nV2781 400000000000000000000000000.01\nV2750 400000000000000000000000000.01\nTotals 1.00\n";
        let result = ClaimAssembler::new(&config).assemble(0, fragment);
        assert!(matches!(result, Err(ExtractorError::Internal(_))));
    }

    #[test]
    fn test_report_total_overflow_is_internal() {
        let config = ExtractorConfig::default();
        let assembler = ClaimAssembler::new(&config);
        let fragment = "CHOICE\nSMITH, JOHN\n01/15/24\nV2781 400000000000000000000000000.01\nTotals 1.00\n";
        let mut builder = ReportBuilder::new("eob.pdf", None);
        builder.push_claim(assembler.assemble(0, fragment).unwrap().unwrap()).unwrap();
        let second = assembler.assemble(1, fragment).unwrap().unwrap();
        assert!(matches!(builder.push_claim(second), Err(ExtractorError::Internal(_))));
    }

    #[test]
    fn test_find_totals() {
        assert_eq!(find_totals("x\n  Totals 12.00 10.00\n"), Some("12.00".to_string()));
        assert_eq!(find_totals("TOTAL THIS OFFICE: 5.00"), None);
        assert_eq!(find_totals("Total 5.00"), None);
    }

    #[test]
    fn test_report_builder_totals() {
        let config = ExtractorConfig::default();
        let assembler = ClaimAssembler::new(&config);
        let mut builder = ReportBuilder::new("eob.pdf", Some(TextMode::Fast));
        for (idx, fragment) in [
            "CHOICE\nSMITH, JOHN\n01/15/24\nV2781 90.00\nTotals 90.00\n",
            "CHOICE\nDOE, JANE\n01/16/24\nV2020 10.50\nV2750 4.25\nTotals 14.75\n",
        ]
        .iter()
        .enumerate()
        {
            builder.push_claim(assembler.assemble(idx, fragment).unwrap().unwrap()).unwrap();
        }
        builder.push_rejection(FragmentRejection {
            fragment_index: 2,
            reason: RejectionReason::NoName,
            excerpt: "CHOICE".to_string(),
        });
        let (report, diagnostics) = builder.finish();
        assert_eq!(report.claim_count(), 2);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(report.total_paid_derived.to_string(), "104.75");
        assert_eq!(report.recomputed_total(), report.total_paid_derived);
        assert_eq!(report.rejected.len(), 1);
        assert!(!report.cancelled);
    }
}
