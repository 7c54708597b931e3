//! Claim header values: patient name and date of service

use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized patient name in `LAST, FIRST` form
///
/// Uppercase, internal whitespace collapsed, never empty. Both halves may only
/// contain `A-Z`, `-` and spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PatientName(String);

impl PatientName {
    /// Normalize and validate a raw name
    ///
    /// # Examples
    ///
    /// ```
    /// use eobscan_domain::PatientName;
    ///
    /// let name = PatientName::parse("  smith,   john ").unwrap();
    /// assert_eq!(name.as_str(), "SMITH, JOHN");
    /// assert!(PatientName::parse("SMITH,").is_err());
    /// assert!(PatientName::parse("SMITH JOHN").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, String> {
        let normalized = raw
            .to_uppercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        let (last, first) = normalized
            .split_once(", ")
            .ok_or_else(|| format!("Name '{}' is not in 'LAST, FIRST' form", normalized))?;

        if last.is_empty() || first.is_empty() {
            return Err(format!("Name '{}' is missing a part", normalized));
        }
        if !last.chars().chain(first.chars()).all(is_name_char) {
            return Err(format!("Name '{}' contains invalid characters", normalized));
        }
        Ok(Self(normalized))
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The family name (before the comma)
    pub fn last(&self) -> &str {
        self.0.split_once(", ").map(|(last, _)| last).unwrap_or(&self.0)
    }

    /// The given name(s) (after the comma)
    pub fn first(&self) -> &str {
        self.0.split_once(", ").map(|(_, first)| first).unwrap_or("")
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_uppercase() || c == '-' || c == ' '
}

impl TryFrom<String> for PatientName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PatientName> for String {
    fn from(value: PatientName) -> Self {
        value.0
    }
}

impl fmt::Display for PatientName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Date of service, `M/D/YY` with one or two digits for month and day
///
/// Stored exactly as encountered in the report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateOfService(String);

impl DateOfService {
    /// Validate a date string
    ///
    /// # Examples
    ///
    /// ```
    /// use eobscan_domain::DateOfService;
    ///
    /// let date = DateOfService::parse("1/5/24").unwrap();
    /// assert_eq!(date.month(), 1);
    /// assert_eq!(date.year(), 24);
    /// assert!(DateOfService::parse("01/15/2024").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, String> {
        let parts: Vec<&str> = raw.split('/').collect();
        let valid = parts.len() == 3
            && (1..=2).contains(&parts[0].len())
            && (1..=2).contains(&parts[1].len())
            && parts[2].len() == 2
            && parts.iter().all(|p| p.bytes().all(|b| b.is_ascii_digit()));
        if !valid {
            return Err(format!("Invalid date of service '{}'", raw));
        }
        Ok(Self(raw.to_string()))
    }

    /// Get the date as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Month component
    pub fn month(&self) -> u8 {
        self.component(0)
    }

    /// Day component
    pub fn day(&self) -> u8 {
        self.component(1)
    }

    /// Two-digit year component
    pub fn year(&self) -> u8 {
        self.component(2)
    }

    fn component(&self, idx: usize) -> u8 {
        self.0
            .split('/')
            .nth(idx)
            .and_then(|p| p.parse().ok())
            .unwrap_or(0)
    }
}

impl TryFrom<String> for DateOfService {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DateOfService> for String {
    fn from(value: DateOfService) -> Self {
        value.0
    }
}

impl fmt::Display for DateOfService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
