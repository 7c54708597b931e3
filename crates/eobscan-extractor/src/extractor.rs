//! Core Extractor implementation

use crate::assembler::{ClaimAssembler, ReportBuilder};
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::segmenter::{rejection, ClaimSegmenter, Segment};
use crate::text::TextExtractor;
use crate::types::{EngineOutput, ExtractionMode};
use eobscan_domain::traits::{OcrEngine, TextLayer};
use eobscan_domain::TextMode;
use std::fmt::Display;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Parses report text into claims (everything after text extraction)
///
/// Holds only configuration and compiled patterns, so one parser can serve
/// many documents, including from several threads at once.
pub struct ClaimParser {
    config: ExtractorConfig,
    segmenter: ClaimSegmenter,
}

impl ClaimParser {
    /// Create a parser, validating the configuration
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        let segmenter = ClaimSegmenter::new(&config.landmarks, &config.policy_markers)?;
        Ok(Self { config, segmenter })
    }

    /// Configuration in use
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Parse a report text
    pub fn parse(&self, source: &str, text: &str) -> Result<EngineOutput, ExtractorError> {
        self.parse_with_cancel(source, text, None, &AtomicBool::new(false))
    }

    /// Parse a report text, checking `cancel` before each fragment
    ///
    /// A cancelled run returns the claims assembled so far with
    /// `report.cancelled` set.
    pub fn parse_with_cancel(
        &self,
        source: &str,
        text: &str,
        mode: Option<TextMode>,
        cancel: &AtomicBool,
    ) -> Result<EngineOutput, ExtractorError> {
        self.parse_until(source, text, mode, |_| cancel.load(Ordering::Relaxed))
    }

    /// Parse, asking `stop` before each fragment with the number of fragments
    /// already handled
    pub(crate) fn parse_until(
        &self,
        source: &str,
        text: &str,
        mode: Option<TextMode>,
        stop: impl Fn(usize) -> bool,
    ) -> Result<EngineOutput, ExtractorError> {
        let assembler = ClaimAssembler::new(&self.config);
        let mut builder = ReportBuilder::new(source, mode);

        let segments = self.segmenter.segment(text);
        info!("Parsing {} fragments from {}", segments.len(), source);

        for (handled, segment) in segments.into_iter().enumerate() {
            if stop(handled) {
                warn!("Cancelled after {} claims from {}", builder.claim_count(), source);
                builder.mark_cancelled();
                break;
            }

            match segment {
                Segment::Rejected(rejected) => {
                    warn!("Fragment {} rejected: {}", rejected.fragment_index, rejected.reason);
                    builder.push_rejection(rejected);
                }
                Segment::Fragment { index, text } => match assembler.assemble(index, text)? {
                    Ok(assembled) => {
                        debug!(
                            "Fragment {}: claim for {} with {} line items",
                            index,
                            assembled.claim.patient_name(),
                            assembled.claim.line_items().len()
                        );
                        builder.push_claim(assembled)?;
                    }
                    Err(reason) => {
                        warn!("Fragment {} rejected: {}", index, reason);
                        builder.push_rejection(rejection(index, reason, text));
                    }
                },
            }
        }

        let (report, diagnostics) = builder.finish();
        info!(
            "Extraction complete: {} claims, {} rejected, derived total {}",
            report.claims.len(),
            report.rejected.len(),
            report.total_paid_derived
        );

        Ok(EngineOutput {
            report,
            diagnostics,
            pages_skipped: 0,
        })
    }
}

/// The EOB extraction engine: PDF in, claim report out
pub struct EobExtractor<T, O> {
    text: TextExtractor<T, O>,
    parser: ClaimParser,
}

impl<T, O> EobExtractor<T, O>
where
    T: TextLayer,
    O: OcrEngine,
    T::Error: Display,
    O::Error: Display,
{
    /// Create a new Extractor
    pub fn new(text_layer: T, ocr: O, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        let threshold = config.ocr_fallback_threshold;
        Ok(Self {
            text: TextExtractor::new(text_layer, ocr, threshold),
            parser: ClaimParser::new(config)?,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &ExtractorConfig {
        self.parser.config()
    }

    /// Extract claims from the PDF at `path`
    pub fn extract_file(&self, path: &Path, mode: ExtractionMode) -> Result<EngineOutput, ExtractorError> {
        self.extract_file_with_cancel(path, mode, &AtomicBool::new(false))
    }

    /// Extract claims from a PDF, checking `cancel` between fragments
    pub fn extract_file_with_cancel(
        &self,
        path: &Path,
        mode: ExtractionMode,
        cancel: &AtomicBool,
    ) -> Result<EngineOutput, ExtractorError> {
        info!("Starting extraction of {} in {} mode", path.display(), mode);

        let extracted = self.text.extract(path, mode)?;
        debug!(
            "Extracted {} chars from {} pages ({} mode)",
            extracted.text.len(),
            extracted.pages_read,
            extracted.mode
        );

        let source = path.display().to_string();
        let mut output =
            self.parser
                .parse_with_cancel(&source, &extracted.text, Some(extracted.mode), cancel)?;
        output.pages_skipped = extracted.pages_skipped;
        Ok(output)
    }

    /// Parse already-extracted report text
    pub fn parse_text(&self, source: &str, text: &str) -> Result<EngineOutput, ExtractorError> {
        self.parser.parse(source, text)
    }

    /// Parse already-extracted report text with cancellation
    pub fn parse_text_with_cancel(
        &self,
        source: &str,
        text: &str,
        cancel: &AtomicBool,
    ) -> Result<EngineOutput, ExtractorError> {
        self.parser.parse_with_cancel(source, text, None, cancel)
    }
}
