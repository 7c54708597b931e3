//! Configuration for the Extractor
//!
//! Everything here is business policy for one carrier's EOB layout: the
//! plan-name landmarks, the filler lines to drop, and the short-code
//! translation table. The defaults describe the layout the engine was built
//! against; a different carrier layout is a different configuration.

use eobscan_domain::code::is_canonical_shape;
use eobscan_pdf::OcrSettings;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Plan names that open a claim fragment (matched literally, case-sensitive)
    pub landmarks: Vec<String>,

    /// Fragments containing any of these are dropped entirely
    pub policy_markers: Vec<String>,

    /// Text at which a fragment is cut off (the office summary that follows it
    /// belongs to no claim)
    pub truncation_marker: String,

    /// Whole lines that are extraction artifacts
    pub artifact_lines: Vec<String>,

    /// Substrings removed from inside lines (layout artifacts)
    pub inline_noise: Vec<String>,

    /// Lines starting with any of these are headers, footers or column titles
    pub dropped_line_prefixes: Vec<String>,

    /// How many leading lines are searched for the patient name
    pub name_scan_lines: usize,

    /// Short plan-specific code to canonical procedure code
    pub code_translations: BTreeMap<String, String>,

    /// Translations whose mapping is not trusted yet; logged when applied
    pub provisional_translations: Vec<String>,

    /// Codes accepted in addition to the `Vdddd` shape
    pub accepted_code_alternates: Vec<String>,

    /// Native text shorter than this (after trimming) triggers the OCR
    /// fallback in auto mode. Very small but valid PDFs can be misclassified.
    pub ocr_fallback_threshold: usize,

    /// OCR tool settings
    pub ocr: OcrSettings,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.landmarks.is_empty() {
            return Err("landmarks must not be empty".to_string());
        }
        if self.landmarks.iter().any(|l| l.trim().is_empty()) {
            return Err("landmarks must not contain blank entries".to_string());
        }
        if self.policy_markers.iter().any(|m| m.is_empty()) {
            return Err("policy_markers must not contain empty entries".to_string());
        }
        if self.inline_noise.iter().any(|n| n.trim().is_empty()) {
            return Err("inline_noise entries must contain a visible character".to_string());
        }
        if self.dropped_line_prefixes.iter().any(|p| p.is_empty()) {
            return Err("dropped_line_prefixes must not contain empty entries".to_string());
        }
        if self.name_scan_lines == 0 {
            return Err("name_scan_lines must be greater than 0".to_string());
        }
        if self.ocr.dpi == 0 {
            return Err("ocr.dpi must be greater than 0".to_string());
        }

        for (short, canonical) in &self.code_translations {
            if short.is_empty() || short.contains(char::is_whitespace) {
                return Err(format!("translation key '{}' must be a single token", short));
            }
            if !self.is_accepted_code(canonical) {
                return Err(format!(
                    "translation {} -> {} targets a code outside the canonical vocabulary",
                    short, canonical
                ));
            }
            // A target that is itself a key would make translation non-idempotent
            if self.code_translations.contains_key(canonical) {
                return Err(format!(
                    "translation target {} is also a translation key",
                    canonical
                ));
            }
        }
        for token in &self.provisional_translations {
            if !self.code_translations.contains_key(token) {
                return Err(format!(
                    "provisional translation '{}' is not in code_translations",
                    token
                ));
            }
        }
        Ok(())
    }

    /// Translate a single token, leaving unknown tokens intact
    pub fn translate<'a>(&'a self, token: &'a str) -> &'a str {
        self.code_translations
            .get(token)
            .map(String::as_str)
            .unwrap_or(token)
    }

    /// Whether a translation of `token` is provisional
    pub fn is_provisional(&self, token: &str) -> bool {
        self.provisional_translations.iter().any(|t| t == token)
    }

    /// Whether `code` belongs to the canonical vocabulary
    pub fn is_accepted_code(&self, code: &str) -> bool {
        is_canonical_shape(code) || self.accepted_code_alternates.iter().any(|c| c == code)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            landmarks: strings(&["CHOICE", "SIG PLAN", "ADVTG", "ENHCDAD", "EXAMONL"]),
            policy_markers: strings(&["In-Office Finishing Service"]),
            truncation_marker: "TOTAL THIS OFFICE:".to_string(),
            artifact_lines: strings(&["Y", "V"]),
            inline_noise: strings(&[" V ", " Y "]),
            dropped_line_prefixes: strings(&[
                "VSP Vision Care",
                "1320",
                "Plan",
                "Number",
                "Total",
                "Proc",
                "Service",
            ]),
            name_scan_lines: 7,
            code_translations: default_translations(),
            provisional_translations: strings(&["Variable"]),
            accepted_code_alternates: Vec::new(),
            ocr_fallback_threshold: 50,
            ocr: OcrSettings::default(),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn default_translations() -> BTreeMap<String, String> {
    [
        ("JA", "V2781"),
        ("JH", "V2783"),
        ("QT", "V2750"),
        ("AD", "V2784"),
        ("JD", "V2784"),
        ("PR", "V2744"),
        ("DD", "V2784"),
        ("DA", "V2762"),
        ("QV", "V2750"),
        ("QR", "V2761"),
        ("MN", "V2745"),
        ("QM", "V2750"),
        ("BV", "V2755"),
        ("AH", "V2783"),
        ("SW", "V2020"),
        ("BA", "V2799"),
        ("RM", "V2799"),
        ("TA", "V2744"),
        ("BD", "V2799"),
        ("FA", "V2781"),
        ("FH", "V2783"),
        ("OA", "V2781"),
        ("OD", "V2784"),
        ("LF", "V2783"),
        ("OH", "V2783"),
        ("Variable", "V2781"),
    ]
    .into_iter()
    .map(|(short, canonical)| (short.to_string(), canonical.to_string()))
    .collect()
}
