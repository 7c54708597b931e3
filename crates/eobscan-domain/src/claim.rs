//! Claim module - one patient's billed services from a single EOB fragment

use crate::{DateOfService, Money, PatientName, ProcedureCode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A billed procedure and its aggregated amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Canonical procedure code
    pub code: ProcedureCode,

    /// Sum of every amount printed for this code in the fragment
    pub amount: Money,
}

impl LineItem {
    /// Create a new line item
    pub fn new(code: ProcedureCode, amount: Money) -> Self {
        Self { code, amount }
    }
}

/// A claim extracted from an Explanation-of-Benefits report
///
/// Claims are immutable once assembled. Line item codes are pairwise distinct
/// and keep the order in which each code first appeared in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ClaimRecord")]
pub struct Claim {
    patient_name: PatientName,
    date_of_service: DateOfService,
    line_items: Vec<LineItem>,
    total_billed: String,
}

/// Unchecked wire shape of a claim
#[derive(Deserialize)]
struct ClaimRecord {
    patient_name: PatientName,
    date_of_service: DateOfService,
    line_items: Vec<LineItem>,
    total_billed: String,
}

impl Claim {
    /// Create a new claim
    ///
    /// `total_billed` is the token printed on the fragment's `Totals` line,
    /// kept verbatim (it may carry a currency sign). Fails when two line items
    /// share a code or the total is blank.
    pub fn new(
        patient_name: PatientName,
        date_of_service: DateOfService,
        line_items: Vec<LineItem>,
        total_billed: impl Into<String>,
    ) -> Result<Self, String> {
        let total_billed = total_billed.into();
        if total_billed.trim().is_empty() {
            return Err("total_billed is empty".to_string());
        }

        let mut seen = HashSet::new();
        for item in &line_items {
            if !seen.insert(item.code.as_str()) {
                return Err(format!("Duplicate line item code {}", item.code));
            }
        }

        Ok(Self {
            patient_name,
            date_of_service,
            line_items,
            total_billed,
        })
    }

    /// Patient name
    pub fn patient_name(&self) -> &PatientName {
        &self.patient_name
    }

    /// Date of service
    pub fn date_of_service(&self) -> &DateOfService {
        &self.date_of_service
    }

    /// Line items in first-occurrence order
    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    /// Total billed, verbatim from the `Totals` line
    pub fn total_billed(&self) -> &str {
        &self.total_billed
    }

    /// Total billed as an amount, if the printed token parses
    pub fn total_billed_amount(&self) -> Option<Money> {
        Money::parse_lenient(&self.total_billed).ok()
    }

    /// Sum of the line item amounts
    ///
    /// Used for reporting only; it is not the billed total.
    pub fn derived_total(&self) -> Money {
        self.line_items.iter().map(|item| item.amount).sum()
    }

    /// Sum of the line item amounts, or `None` if it cannot be held exactly
    pub fn checked_derived_total(&self) -> Option<Money> {
        self.line_items
            .iter()
            .try_fold(Money::ZERO, |sum, item| sum.checked_add(item.amount))
    }

    /// Look up the amount for a code
    pub fn amount_for(&self, code: &str) -> Option<Money> {
        self.line_items
            .iter()
            .find(|item| item.code.as_str() == code)
            .map(|item| item.amount)
    }
}

impl TryFrom<ClaimRecord> for Claim {
    type Error = String;

    fn try_from(record: ClaimRecord) -> Result<Self, Self::Error> {
        Claim::new(
            record.patient_name,
            record.date_of_service,
            record.line_items,
            record.total_billed,
        )
    }
}
