//! Extract command implementation.

use crate::error::{Result, EXIT_NO_CLAIMS, EXIT_SUCCESS};
use eobscan_domain::traits::{OcrEngine, TextLayer};
use eobscan_domain::ClaimReport;
use eobscan_extractor::{EngineOutput, EobExtractor, ExtractionMode};
use std::fmt::Display;
use std::path::Path;
use tracing::{info, warn};

/// Execute the extract command.
pub fn execute_extract<T, O>(
    extractor: &EobExtractor<T, O>,
    pdf: &Path,
    mode: ExtractionMode,
) -> Result<EngineOutput>
where
    T: TextLayer,
    O: OcrEngine,
    T::Error: Display,
    O::Error: Display,
{
    let output = extractor.extract_file(pdf, mode)?;

    if output.pages_skipped > 0 {
        warn!("{} page(s) of {} could not be read", output.pages_skipped, pdf.display());
    }
    for diag in output.diagnostics.iter().filter(|d| !d.provisional_translations.is_empty()) {
        warn!(
            "Fragment {} used provisional translations: {}",
            diag.fragment_index,
            diag.provisional_translations.join(", ")
        );
    }
    info!(
        "{}: {} claims, {} rejected fragments",
        pdf.display(),
        output.report.claim_count(),
        output.report.rejected.len()
    );

    Ok(output)
}

/// Process exit code for a finished report.
pub fn exit_code_for(report: &ClaimReport) -> i32 {
    if report.claims.is_empty() {
        EXIT_NO_CLAIMS
    } else {
        EXIT_SUCCESS
    }
}
