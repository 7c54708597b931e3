//! Line-item parsing: code translation, amount extraction, aggregation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::header::is_date_token;
use eobscan_domain::money::is_column_amount;
use eobscan_domain::{DateOfService, LineItem, Money, ProcedureCode};
use tracing::{trace, warn};

/// Line items of one claim plus parsing counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedItems {
    /// Aggregated items in first-occurrence order
    pub items: Vec<LineItem>,

    /// Lines that produced no item
    pub lines_skipped: usize,

    /// Provisional translations applied, as `token -> code`
    pub provisional_translations: Vec<String>,
}

/// Parses the column lines of a claim into aggregated line items
pub struct LineItemParser<'a> {
    config: &'a ExtractorConfig,
}

impl<'a> LineItemParser<'a> {
    /// Create a parser using the configured translation table
    pub fn new(config: &'a ExtractorConfig) -> Self {
        Self { config }
    }

    /// Parse every line, summing amounts per code
    ///
    /// `date` is the claim's date of service; it is removed from each line
    /// before the columns are read.
    pub fn parse(&self, lines: &[String], date: &DateOfService) -> Result<ParsedItems, ExtractorError> {
        let mut parsed = ParsedItems::default();
        let mut totals = CodeTotals::default();

        for line in lines {
            match self.parse_line(line, date, &mut parsed.provisional_translations) {
                Some((code, amount)) => totals.add(code, amount)?,
                None => {
                    trace!("Skipped line: {}", line);
                    parsed.lines_skipped += 1;
                }
            }
        }

        parsed.items = totals.into_items();
        Ok(parsed)
    }

    /// Read one `(code, amount)` pair from a line
    fn parse_line(
        &self,
        line: &str,
        date: &DateOfService,
        provisional: &mut Vec<String>,
    ) -> Option<(ProcedureCode, Money)> {
        let without_date = line.replace(&format!("{} ", date.as_str()), "");

        let mut tokens: Vec<String> = without_date
            .split_whitespace()
            .map(|token| self.translate(token, provisional))
            .collect();

        // Quantity column first: bring the code to the front
        if matches!(tokens.first().map(String::as_str), Some("1") | Some("2")) {
            if let Some(pos) = tokens
                .iter()
                .skip(1)
                .position(|t| t.starts_with('V') || t.starts_with('Y'))
                .map(|p| p + 1)
            {
                let mut code = tokens.remove(pos);
                if code.starts_with("V ") || code.starts_with("Y ") {
                    code.drain(..2);
                }
                tokens.insert(0, code);
            }
        }

        while tokens.last().is_some_and(|t| !is_column_amount(t)) {
            tokens.pop();
        }
        tokens.retain(|t| !is_date_token(t));

        let code = tokens.first()?;
        let amount = tokens.last()?;
        if !self.config.is_accepted_code(code) {
            return None;
        }
        let amount = Money::parse_column(amount).ok()?;
        Some((ProcedureCode::new(code.as_str()), amount))
    }

    fn translate(&self, token: &str, provisional: &mut Vec<String>) -> String {
        let translated = self.config.translate(token);
        if translated != token && self.config.is_provisional(token) {
            warn!("Provisional translation applied: {} -> {}", token, translated);
            provisional.push(format!("{} -> {}", token, translated));
        }
        translated.to_string()
    }
}

/// Insertion-ordered running sum per code
#[derive(Default)]
struct CodeTotals {
    entries: Vec<(ProcedureCode, Money)>,
}

impl CodeTotals {
    fn add(&mut self, code: ProcedureCode, amount: Money) -> Result<(), ExtractorError> {
        match self.entries.iter_mut().find(|(existing, _)| *existing == code) {
            Some((_, sum)) => {
                *sum = sum.checked_add(amount).ok_or_else(|| {
                    ExtractorError::Internal(format!("amount overflow while summing {}", code))
                })?;
            }
            None => self.entries.push((code, amount)),
        }
        Ok(())
    }

    fn into_items(self) -> Vec<LineItem> {
        self.entries
            .into_iter()
            .map(|(code, amount)| LineItem::new(code, amount))
            .collect()
    }
}
