//! Eobscan CLI - Extract per-claim billing records from EOB PDFs.

use clap::Parser;
use eobscan_cli::{execute_extract, exit_code_for, Cli, Config, Formatter, ModeArg};
use eobscan_extractor::EobExtractor;
use eobscan_pdf::{LopdfTextLayer, TesseractOcr};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing (log to stderr, stdout is reserved for the report)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let color_fallback = !cli.no_color;
    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            let formatter = Formatter::new(eobscan_cli::config::OutputFormat::Table, color_fallback);
            eprintln!("{}", formatter.error(&e.to_string()));
            e.exit_code()
        }
    };
    std::process::exit(code);
}

fn run(cli: &Cli) -> eobscan_cli::Result<i32> {
    let config = Config::load(cli.config.as_deref())?;

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let ocr = TesseractOcr::new(config.extractor.ocr.clone());
    if cli.mode != ModeArg::Fast && !ocr.is_available() {
        warn!("{} is not runnable; OCR will fail", ocr.settings().tesseract_path);
    }
    let extractor = EobExtractor::new(LopdfTextLayer::new(), ocr, config.extractor)?;

    let output = execute_extract(&extractor, &cli.pdf, cli.mode.into())?;
    println!("{}", formatter.format_report(&output.report, cli.show_rejected)?);

    Ok(exit_code_for(&output.report))
}
