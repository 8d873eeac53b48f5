//! Attribute descriptors: which value to read, how to compare it, how to
//! print it.

use crate::error::{ReportError, Result};
use crate::experiment::Number;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Which direction of an attribute counts as better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    /// Smaller values win (runtime, cost, expansions)
    SmallerIsBetter,
    /// Larger values win (coverage, score)
    LargerIsBetter,
}

impl Polarity {
    /// Polarity for a `min_wins` flag
    #[must_use]
    pub const fn from_min_wins(min_wins: bool) -> Self {
        if min_wins {
            Self::SmallerIsBetter
        } else {
            Self::LargerIsBetter
        }
    }

    /// `Greater` if `a` beats `b`, `Less` if `b` beats `a`, `Equal` on a tie.
    #[must_use]
    pub fn compare(self, a: Number, b: Number) -> Ordering {
        let ord = a.total_cmp(&b);
        match self {
            Self::SmallerIsBetter => ord.reverse(),
            Self::LargerIsBetter => ord,
        }
    }
}

/// A named attribute with comparison polarity and display precision.
///
/// # Example
/// ```
/// use planreport::attribute::{Attribute, Polarity};
///
/// let cost = Attribute::new("cost").with_min_wins(true).with_digits(1);
/// assert_eq!(cost.polarity(), Some(Polarity::SmallerIsBetter));
/// assert_eq!(cost.to_string(), "cost");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    /// Key in each run's attribute map
    pub name: String,
    /// `Some(true)`: smaller wins, `Some(false)`: larger wins, `None`: unset
    #[serde(default)]
    pub min_wins: Option<bool>,
    /// Decimal places for float output
    #[serde(default = "default_digits")]
    pub digits: usize,
}

const fn default_digits() -> usize {
    2
}

impl Attribute {
    /// Attribute without polarity and with two decimal places
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_wins: None,
            digits: default_digits(),
        }
    }

    /// Solved-task indicator; larger sums win
    #[must_use]
    pub fn coverage() -> Self {
        Self::new("coverage").with_min_wins(false).with_digits(0)
    }

    /// Set polarity
    #[must_use]
    pub fn with_min_wins(mut self, min_wins: bool) -> Self {
        self.min_wins = Some(min_wins);
        self
    }

    /// Set display precision
    #[must_use]
    pub fn with_digits(mut self, digits: usize) -> Self {
        self.digits = digits;
        self
    }

    /// Configured polarity, if any
    #[must_use]
    pub fn polarity(&self) -> Option<Polarity> {
        self.min_wins.map(Polarity::from_min_wins)
    }

    /// Configured polarity, or a configuration error.
    ///
    /// # Errors
    /// Returns [`ReportError::MissingPolarity`] when `min_wins` is unset.
    pub fn require_polarity(&self) -> Result<Polarity> {
        self.polarity().ok_or_else(|| ReportError::MissingPolarity {
            attribute: self.name.clone(),
        })
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Attribute {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarity_compare() {
        let smaller = Polarity::SmallerIsBetter;
        assert_eq!(smaller.compare(Number::Int(1), Number::Int(2)), Ordering::Greater);
        assert_eq!(smaller.compare(Number::Int(3), Number::Int(2)), Ordering::Less);

        let larger = Polarity::LargerIsBetter;
        assert_eq!(larger.compare(Number::Int(3), Number::Int(2)), Ordering::Greater);
        assert_eq!(larger.compare(Number::Float(2.0), Number::Int(2)), Ordering::Equal);
    }

    #[test]
    fn test_coverage_defaults() {
        let coverage = Attribute::coverage();
        assert_eq!(coverage.name, "coverage");
        assert_eq!(coverage.polarity(), Some(Polarity::LargerIsBetter));
        assert_eq!(coverage.digits, 0);
    }

    #[test]
    fn test_require_polarity() {
        let attr = Attribute::new("expansions");
        assert!(attr.polarity().is_none());
        let err = attr.require_polarity().unwrap_err();
        assert!(err.is_configuration());

        let attr = attr.with_min_wins(true);
        assert_eq!(attr.require_polarity().unwrap(), Polarity::SmallerIsBetter);
    }

    #[test]
    fn test_deserialize_defaults() {
        let attr: Attribute = serde_json::from_str(r#"{"name": "cost"}"#).unwrap();
        assert_eq!(attr.digits, 2);
        assert_eq!(attr.min_wins, None);
    }
}
