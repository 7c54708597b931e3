//! Eobscan Extractor
//!
//! Turns Explanation-of-Benefits PDFs into structured per-claim records.
//!
//! # Overview
//!
//! An EOB report is flat, visually laid-out text. Claim boundaries are only
//! marked by plan-name landmarks, patient names wrap across lines, and
//! procedure codes appear in carrier short form. The extractor segments the
//! text, strips noise, recovers the claim header, translates and sums line
//! items, and emits one immutable [`eobscan_domain::Claim`] per fragment.
//!
//! # Architecture
//!
//! ```text
//! PDF → TextExtractor → ClaimSegmenter → per fragment:
//!         Sanitizer → header → LineItemParser → ClaimAssembler
//!       → ReportBuilder → ClaimReport
//! ```
//!
//! The pipeline is deterministic: the same text always yields byte-identical
//! output. No state survives between documents.
//!
//! # Example Usage
//!
//! ```
//! use eobscan_extractor::{EobExtractor, ExtractorConfig};
//! use eobscan_pdf::MockPages;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = EobExtractor::new(
//!     MockPages::default(),
//!     MockPages::default(),
//!     ExtractorConfig::default(),
//! )?;
//!
//! let text = "CHOICE\nSMITH, JOHN\n01/15/24\nV2781 90.00\nV2781 30.00\nTotals 120.00\n";
//! let output = extractor.parse_text("inline", text)?;
//!
//! let claim = &output.report.claims[0];
//! assert_eq!(claim.patient_name().as_str(), "SMITH, JOHN");
//! assert_eq!(claim.amount_for("V2781").unwrap().to_string(), "120.00");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]

mod assembler;
mod batch;
mod config;
mod error;
mod extractor;
mod header;
mod line_items;
mod sanitizer;
mod segmenter;
mod text;
mod types;


pub use assembler::{find_totals, AssemblyOutcome, ClaimAssembler, ReportBuilder};
pub use batch::{extract_batch, BatchItem};
pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::{ClaimParser, EobExtractor};
pub use line_items::{LineItemParser, ParsedItems};
pub use sanitizer::Sanitizer;
pub use segmenter::{ClaimSegmenter, Segment};
pub use text::TextExtractor;
pub use types::{
    AssembledClaim, ClaimDiagnostics, EngineOutput, ExtractedText, ExtractionMode,
};
