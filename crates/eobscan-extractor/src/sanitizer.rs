//! Line cleanup for claim fragments

use crate::config::ExtractorConfig;

/// Strips extraction artifacts and filler lines from a fragment
pub struct Sanitizer<'a> {
    config: &'a ExtractorConfig,
}

impl<'a> Sanitizer<'a> {
    /// Create a sanitizer using the configured noise rules
    pub fn new(config: &'a ExtractorConfig) -> Self {
        Self { config }
    }

    /// Split a fragment into clean lines
    ///
    /// Cuts the fragment at the truncation marker, trims lines, drops blank
    /// and single-letter artifact lines, and removes inline noise tokens.
    pub fn clean_lines(&self, fragment: &str) -> Vec<String> {
        let fragment = match self.truncation_point(fragment) {
            Some(pos) => &fragment[..pos],
            None => fragment,
        };

        fragment
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| !self.config.artifact_lines.iter().any(|a| a == line))
            .map(|line| self.strip_inline_noise(line))
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Drop header, footer and column-title lines
    ///
    /// Runs after the patient name lines are gone, so a surname that happens
    /// to start with a filtered word is never mistaken for filler.
    pub fn drop_filler(&self, lines: Vec<String>) -> Vec<String> {
        lines
            .into_iter()
            .filter(|line| {
                !self
                    .config
                    .dropped_line_prefixes
                    .iter()
                    .any(|p| line.starts_with(p.as_str()))
            })
            .filter(|line| !is_four_digit_number(line))
            .collect()
    }

    fn truncation_point(&self, fragment: &str) -> Option<usize> {
        if self.config.truncation_marker.is_empty() {
            return None;
        }
        fragment.find(self.config.truncation_marker.as_str())
    }

    fn strip_inline_noise(&self, line: &str) -> String {
        let mut cleaned = line.to_string();
        for noise in &self.config.inline_noise {
            // Overlapping occurrences ("A V V B") need more than one pass
            while cleaned.contains(noise.as_str()) {
                cleaned = cleaned.replace(noise.as_str(), " ");
            }
        }
        cleaned.trim().to_string()
    }
}

fn is_four_digit_number(line: &str) -> bool {
    line.len() == 4 && line.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(fragment: &str) -> Vec<String> {
        let config = ExtractorConfig::default();
        Sanitizer::new(&config).clean_lines(fragment)
    }

    fn filler(lines: &[&str]) -> Vec<String> {
        let config = ExtractorConfig::default();
        Sanitizer::new(&config).drop_filler(lines.iter().map(|l| l.to_string()).collect())
    }

    #[test]
    fn test_trims_and_drops_blank_lines() {
        assert_eq!(clean("  CHOICE  \n\n   \nSMITH, JOHN\n"), vec!["CHOICE", "SMITH, JOHN"]);
    }

    #[test]
    fn test_drops_artifact_lines() {
        assert_eq!(clean("CHOICE\nY\nV\nVV\n"), vec!["CHOICE", "VV"]);
    }

    #[test]
    fn test_truncates_at_office_total() {
        let lines = clean("CHOICE\nV2781 10.00\nTOTAL THIS OFFICE: 999.00\nV2020 5.00\n");
        assert_eq!(lines, vec!["CHOICE", "V2781 10.00"]);
    }

    #[test]
    fn test_truncation_keeps_text_before_marker_on_same_line() {
        let lines = clean("CHOICE\nV2781 10.00 TOTAL THIS OFFICE: 999.00\n");
        assert_eq!(lines, vec!["CHOICE", "V2781 10.00"]);
    }

    #[test]
    fn test_removes_inline_noise() {
        assert_eq!(clean("1 V V2781 Y 45.00"), vec!["1 V2781 45.00"]);
        assert_eq!(clean("A V V B"), vec!["A B"]);
    }

    #[test]
    fn test_inline_noise_keeps_codes() {
        assert_eq!(clean("V2781 VSP 10.00"), vec!["V2781 VSP 10.00"]);
    }

    #[test]
    fn test_drop_filler_prefixes() {
        let kept = filler(&[
            "VSP Vision Care PO Box",
            "1320 Main St",
            "Plan Name",
            "Number of claims",
            "Totals 120.00",
            "Proc Code",
            "Service Date",
            "V2781 120.00",
        ]);
        assert_eq!(kept, vec!["V2781 120.00"]);
    }

    #[test]
    fn test_drop_four_digit_lines() {
        assert_eq!(filler(&["2024", "12345", "V2781 1.00"]), vec!["12345", "V2781 1.00"]);
    }
}
