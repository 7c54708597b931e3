//! Integration tests for the CLI library

use eobscan_cli::config::OutputFormat;
use eobscan_cli::error::{EXIT_EXTRACTION_FAILED, EXIT_NO_CLAIMS, EXIT_SUCCESS};
use eobscan_cli::{execute_extract, exit_code_for, CliError, Config, Formatter};
use eobscan_extractor::{EobExtractor, ExtractionMode};
use eobscan_pdf::{LopdfTextLayer, MockPages, OcrSettings, TesseractOcr};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const REPORT: &str = "\
VSP Vision Care
CHOICE 1001
SMITH, JOHN
01/15/24 V2781 90.00
01/15/24 V2781 30.00
Totals 120.00
SIG PLAN 1002
DOE, JANE
02/02/24
In-Office Finishing Service
V2020 10.00
Totals 10.00
";

#[test]
fn test_load_explicit_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
        [settings]
        color = false
        format = "quiet"

        [extractor]
        landmarks = ["CHOICE", "SIG PLAN"]
        accepted_code_alternates = ["S0620"]
        "#,
    )
    .unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert!(!config.settings.color);
    assert_eq!(config.settings.format, OutputFormat::Quiet);
    assert_eq!(config.extractor.landmarks.len(), 2);
    assert_eq!(config.extractor.accepted_code_alternates, vec!["S0620"]);
}

#[test]
fn test_missing_explicit_config_is_error() {
    let dir = TempDir::new().unwrap();
    let result = Config::load(Some(&dir.path().join("absent.toml")));
    assert!(matches!(result, Err(CliError::Config(_))));
}

#[test]
fn test_malformed_config_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[extractor\nlandmarks = ").unwrap();
    assert!(matches!(Config::load(Some(&path)), Err(CliError::Toml(_))));
}

#[test]
fn test_invalid_extractor_config_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[extractor]\nlandmarks = []\n").unwrap();
    assert!(matches!(Config::load(Some(&path)), Err(CliError::Config(_))));
}

#[test]
fn test_extract_and_format() {
    let extractor = EobExtractor::new(
        MockPages::new([REPORT]),
        MockPages::unreadable(),
        Config::default().extractor,
    )
    .unwrap();

    let output = execute_extract(&extractor, Path::new("eob.pdf"), ExtractionMode::Fast).unwrap();
    assert_eq!(exit_code_for(&output.report), EXIT_SUCCESS);
    assert_eq!(output.report.claims.len(), 1);
    assert_eq!(output.report.rejected.len(), 1);

    let quiet = Formatter::new(OutputFormat::Quiet, false)
        .format_report(&output.report, false)
        .unwrap();
    assert_eq!(quiet, "SMITH, JOHN\t01/15/24\t120.00");

    let table = Formatter::new(OutputFormat::Table, false)
        .format_report(&output.report, true)
        .unwrap();
    assert!(table.contains("policy-filter"));
    assert!(table.contains("SIG PLAN 1002"));

    let json = Formatter::new(OutputFormat::Json, false)
        .format_report(&output.report, false)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["claims"][0]["line_items"][0]["amount"], "120.00");
    assert_eq!(value["total_paid_derived"], "120.00");
}

#[test]
fn test_no_claims_exit_code() {
    let extractor = EobExtractor::new(
        MockPages::new(["SIG PLAN 1\nIn-Office Finishing Service\nTotals 1.00\n"]),
        MockPages::unreadable(),
        Config::default().extractor,
    )
    .unwrap();

    let output = execute_extract(&extractor, Path::new("eob.pdf"), ExtractionMode::Auto).unwrap();
    assert_eq!(exit_code_for(&output.report), EXIT_NO_CLAIMS);
}

#[test]
fn test_missing_pdf_exit_code() {
    let dir = TempDir::new().unwrap();
    let settings = OcrSettings {
        pdftoppm_path: "/nonexistent/pdftoppm".to_string(),
        tesseract_path: "/nonexistent/tesseract".to_string(),
        ..OcrSettings::default()
    };
    let extractor = EobExtractor::new(
        LopdfTextLayer::new(),
        TesseractOcr::new(settings),
        Config::default().extractor,
    )
    .unwrap();

    let err = execute_extract(&extractor, &dir.path().join("missing.pdf"), ExtractionMode::Auto)
        .map(|_| ())
        .unwrap_err();
    assert_eq!(err.exit_code(), EXIT_EXTRACTION_FAILED);
}
