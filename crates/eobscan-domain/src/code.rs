//! Procedure codes

use serde::{Deserialize, Serialize};
use std::fmt;

/// A procedure code as emitted on a claim line item
///
/// The billing system's vocabulary is `V` followed by four digits plus a
/// small set of alternates; which alternates are accepted is configuration,
/// so this type only carries the string and answers shape questions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcedureCode(String);

impl ProcedureCode {
    /// Create a code from a token
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Get the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the code has the canonical `Vdddd` shape
    ///
    /// # Examples
    ///
    /// ```
    /// use eobscan_domain::ProcedureCode;
    ///
    /// assert!(ProcedureCode::new("V2781").is_canonical_shape());
    /// assert!(!ProcedureCode::new("JA").is_canonical_shape());
    /// assert!(!ProcedureCode::new("V278").is_canonical_shape());
    /// ```
    pub fn is_canonical_shape(&self) -> bool {
        is_canonical_shape(&self.0)
    }
}

/// Whether `token` is `V` followed by exactly four ASCII digits
pub fn is_canonical_shape(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() == 5 && bytes[0] == b'V' && bytes[1..].iter().all(|b| b.is_ascii_digit())
}

impl fmt::Display for ProcedureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_shape() {
        assert!(is_canonical_shape("V2020"));
        assert!(is_canonical_shape("V2799"));
        assert!(!is_canonical_shape("v2020"));
        assert!(!is_canonical_shape("V20201"));
        assert!(!is_canonical_shape("Y2020"));
        assert!(!is_canonical_shape("VSP"));
        assert!(!is_canonical_shape(""));
    }
}
