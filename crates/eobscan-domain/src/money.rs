//! Money - signed fixed-point amounts with two fractional digits

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::str::FromStr;

/// A monetary amount
///
/// Amounts are held as exact decimals, so summing `0.10` ten times gives
/// exactly `1.00`. Display and serialization always use two fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Money(Decimal);

impl Money {
    /// Zero dollars
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Parse a value from a report column.
    ///
    /// Only the strict column shape `^-?\d+\.\d{2}$` is accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use eobscan_domain::Money;
    ///
    /// assert_eq!(Money::parse_column("-20.00").unwrap().to_string(), "-20.00");
    /// assert!(Money::parse_column("20.0").is_err());
    /// assert!(Money::parse_column("$20.00").is_err());
    /// ```
    pub fn parse_column(s: &str) -> Result<Self, String> {
        if !is_column_amount(s) {
            return Err(format!("Not a currency amount: '{}'", s));
        }
        Decimal::from_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid amount '{}': {}", s, e))
    }

    /// Parse a value that may carry a currency sign or thousands separators,
    /// such as `$1,204.50`
    pub fn parse_lenient(s: &str) -> Result<Self, String> {
        let trimmed = s.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let digits: String = rest
            .trim_start_matches('$')
            .chars()
            .filter(|c| *c != ',')
            .collect();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(format!("Invalid amount '{}'", s));
        }
        let value = Decimal::from_str(&digits).map_err(|e| format!("Invalid amount '{}': {}", s, e))?;
        Ok(Self(if negative { -value } else { value }))
    }

    /// Create from a decimal value
    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    /// Get the underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Add two amounts exactly
    ///
    /// Returns `None` on overflow, including when the sum would have to drop
    /// fractional digits to fit.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        let sum = self.0.checked_add(other.0)?;
        if sum.scale() < self.0.scale().max(other.0.scale()) {
            return None;
        }
        Some(Money(sum))
    }

    /// Whether the amount is below zero
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

/// Whether `s` has the strict column shape `-?\d+\.\d{2}`
pub fn is_column_amount(s: &str) -> bool {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    match unsigned.split_once('.') {
        Some((whole, cents)) => {
            !whole.is_empty()
                && whole.bytes().all(|b| b.is_ascii_digit())
                && cents.len() == 2
                && cents.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut value = self.0.round_dp(2);
        value.rescale(2);
        if value.is_zero() {
            value.set_sign_positive(true);
        }
        write!(f, "{}", value)
    }
}

impl TryFrom<String> for Money {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_column(&value)
    }
}

impl From<Money> for String {
    fn from(value: Money) -> Self {
        value.to_string()
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        Money(iter.map(|m| m.0).sum())
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
