//! Patient name and date of service recovery

use eobscan_domain::{DateOfService, PatientName};
use regex::Regex;
use std::sync::LazyLock;

/// `LAST, FIRST` where the first name may have wrapped onto the next line
static RE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z\s\-]+,(?: [A-Z\s\-]*|$)").expect("valid name regex"));

static RE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}/\d{1,2}/\d{2}").expect("valid date regex"));

static RE_DATE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{2}$").expect("valid date token regex"));

/// Where the patient name was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMatch {
    /// Normalized name
    pub name: PatientName,

    /// Index of the line holding the name
    pub line: usize,

    /// Whether the first name was taken from the following line
    pub wrapped: bool,
}

impl NameMatch {
    /// Remove the name from the fragment lines
    ///
    /// Drops the matched line and any other line containing the name. For a
    /// wrapped name only the recovered first-name token is taken off the
    /// continuation line; whatever follows it stays.
    pub fn remove_from(&self, lines: Vec<String>) -> Vec<String> {
        let name = self.name.as_str();
        lines
            .into_iter()
            .enumerate()
            .filter_map(|(idx, line)| {
                if idx == self.line || line.contains(name) {
                    return None;
                }
                if self.wrapped && idx == self.line + 1 {
                    let rest = line
                        .split_once(char::is_whitespace)
                        .map(|(_, rest)| rest.trim().to_string())
                        .unwrap_or_default();
                    return (!rest.is_empty()).then_some(rest);
                }
                Some(line)
            })
            .collect()
    }
}

/// Find the patient name within the first `scan_lines` lines
pub fn find_patient_name(lines: &[String], scan_lines: usize) -> Option<NameMatch> {
    let (line_idx, captured) = lines
        .iter()
        .take(scan_lines)
        .enumerate()
        .find_map(|(idx, line)| RE_NAME.find(line).map(|m| (idx, m.as_str().trim().to_string())))?;

    let mut raw = captured;
    let mut wrapped = false;
    if raw.ends_with(',') {
        if let Some(first) = lines
            .get(line_idx + 1)
            .and_then(|next| next.split_whitespace().next())
        {
            raw.push(' ');
            raw.push_str(first);
            wrapped = true;
        }
    }

    let raw = strip_stray_prefix(&raw);

    PatientName::parse(raw).ok().map(|name| NameMatch {
        name,
        line: line_idx,
        wrapped,
    })
}

/// Drop a single stray letter the PDF extractor sometimes puts before the
/// name, e.g. `F SMITH, JOHN`
fn strip_stray_prefix(raw: &str) -> &str {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(' ')) if first.is_ascii_alphabetic() => &raw[2..],
        _ => raw,
    }
}

/// First date of service found in the lines
pub fn find_date_of_service(lines: &[String]) -> Option<DateOfService> {
    lines
        .iter()
        .find_map(|line| RE_DATE.find(line))
        .and_then(|m| DateOfService::parse(m.as_str()).ok())
}

/// Whether a whole token is a date
pub fn is_date_token(token: &str) -> bool {
    RE_DATE_TOKEN.is_match(token)
}
