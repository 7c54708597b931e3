//! CLI argument definitions.

use clap::Parser;
use eobscan_extractor::ExtractionMode;
use std::path::PathBuf;

/// Eobscan - Extract per-claim billing records from EOB PDFs.
#[derive(Debug, Parser)]
#[command(name = "eobscan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the EOB PDF
    pub pdf: PathBuf,

    /// Text extraction mode
    #[arg(short, long, value_enum, default_value = "auto")]
    pub mode: ModeArg,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, env = "EOBSCAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// List fragments that produced no claim
    #[arg(long)]
    pub show_rejected: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON report
    Json,
    /// One tab-separated line per claim
    Quiet,
}

/// Extraction mode argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    /// Native text, OCR when too little text is found
    Auto,
    /// Native text only
    Fast,
    /// OCR only
    Ocr,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<ModeArg> for ExtractionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Auto => ExtractionMode::Auto,
            ModeArg::Fast => ExtractionMode::Fast,
            ModeArg::Ocr => ExtractionMode::Ocr,
        }
    }
}
