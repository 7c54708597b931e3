//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use eobscan_domain::{Claim, ClaimReport, FragmentRejection};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a claim report.
    ///
    /// Rejected fragments are listed only with `show_rejected`; the JSON
    /// format always carries them.
    pub fn format_report(&self, report: &ClaimReport, show_rejected: bool) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Table => Ok(self.format_report_table(report, show_rejected)),
            OutputFormat::Quiet => Ok(self.format_report_quiet(report)),
        }
    }

    fn format_report_table(&self, report: &ClaimReport, show_rejected: bool) -> String {
        let mut sections = Vec::new();

        if report.claims.is_empty() {
            sections.push(self.colorize("No claims found.", "yellow"));
        } else {
            sections.push(self.format_claims_table(&report.claims));
            sections.push(self.success(&format!(
                "{} claim(s), total paid (derived) {}",
                report.claim_count(),
                report.total_paid_derived
            )));
        }

        if report.cancelled {
            sections.push(self.warning("Extraction was cancelled; the report is partial"));
        }

        if !report.rejected.is_empty() {
            if show_rejected {
                sections.push(self.format_rejections_table(&report.rejected));
            } else {
                sections.push(self.info(&format!(
                    "{} fragment(s) rejected (use --show-rejected to list them)",
                    report.rejected.len()
                )));
            }
        }

        sections.join("\n")
    }

    /// Format claims as a table, one row per line item.
    fn format_claims_table(&self, claims: &[Claim]) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Patient", "Service Date", "Code", "Amount", "Billed"]);

        for claim in claims {
            let name = claim.patient_name().to_string();
            let date = claim.date_of_service().to_string();

            if claim.line_items().is_empty() {
                builder.push_record([name.as_str(), date.as_str(), "-", "-", claim.total_billed()]);
                continue;
            }

            for (idx, item) in claim.line_items().iter().enumerate() {
                let code = item.code.to_string();
                let amount = item.amount.to_string();
                if idx == 0 {
                    builder.push_record([name.as_str(), date.as_str(), code.as_str(), amount.as_str(), claim.total_billed()]);
                } else {
                    builder.push_record(["", "", code.as_str(), amount.as_str(), ""]);
                }
            }
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    fn format_rejections_table(&self, rejected: &[FragmentRejection]) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Fragment", "Reason", "Excerpt"]);

        for rejection in rejected {
            builder.push_record([
                rejection.fragment_index.to_string(),
                rejection.reason.to_string(),
                rejection.excerpt.clone(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// One `name<TAB>date<TAB>billed` line per claim.
    fn format_report_quiet(&self, report: &ClaimReport) -> String {
        report
            .claims
            .iter()
            .map(|c| format!("{}\t{}\t{}", c.patient_name(), c.date_of_service(), c.total_billed()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
