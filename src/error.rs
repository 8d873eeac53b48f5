//! Error types for report generation.
//!
//! Configuration problems are detected when a report is constructed and
//! abort that single report. Missing attribute values are not errors; see
//! the individual aggregation functions for how they are treated.

use thiserror::Error;

/// Main error type for planreport operations.
///
/// # Examples
///
/// ```
/// use planreport::error::ReportError;
///
/// let err = ReportError::AttributeCount {
///     report: "CactusPlot",
///     expected: 2,
///     found: 1,
/// };
/// assert!(err.is_configuration());
/// assert!(err.to_string().contains("exactly 2"));
/// ```
#[derive(Error, Debug)]
pub enum ReportError {
    /// A report received the wrong number of attributes.
    #[error("{report} needs exactly {expected} attribute(s), got {found}")]
    AttributeCount {
        /// Report type name
        report: &'static str,
        /// Number of attributes the report requires
        expected: usize,
        /// Number of attributes supplied
        found: usize,
    },

    /// A comparison attribute has no `min_wins` polarity.
    #[error("attribute '{attribute}' needs min_wins set to true or false")]
    MissingPolarity {
        /// Attribute name
        attribute: String,
    },

    /// Single-algorithm aggregation saw more than one run for a task.
    #[error(
        "ambiguous algorithm selection: task {task} has {runs} runs, \
         filter the data to one algorithm first"
    )]
    AmbiguousAlgorithm {
        /// Offending task (`domain:problem`)
        task: String,
        /// Number of runs found for it
        runs: usize,
    },

    /// A report references an algorithm the data does not contain.
    #[error("unknown algorithm '{algorithm}'")]
    UnknownAlgorithm {
        /// Algorithm identifier
        algorithm: String,
    },

    /// Malformed properties input.
    #[error("invalid properties: {message}")]
    Properties {
        /// Error description
        message: String,
    },

    /// I/O error while reading input or writing a report.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ReportError {
    /// Whether this error stems from an invalid report configuration.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::AttributeCount { .. }
                | Self::MissingPolarity { .. }
                | Self::AmbiguousAlgorithm { .. }
                | Self::UnknownAlgorithm { .. }
        )
    }

    /// Create a properties error from any message
    #[must_use]
    pub fn properties(message: impl Into<String>) -> Self {
        Self::Properties {
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_count_display() {
        let err = ReportError::AttributeCount {
            report: "CounterReport",
            expected: 1,
            found: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("CounterReport"));
        assert!(msg.contains("exactly 1"));
        assert!(msg.contains("got 3"));
    }

    #[test]
    fn test_missing_polarity_display() {
        let err = ReportError::MissingPolarity {
            attribute: "expansions".to_string(),
        };
        assert!(err.to_string().contains("expansions"));
        assert!(err.to_string().contains("min_wins"));
    }

    #[test]
    fn test_ambiguous_algorithm_display() {
        let err = ReportError::AmbiguousAlgorithm {
            task: "gripper:prob01.pddl".to_string(),
            runs: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("gripper:prob01.pddl"));
        assert!(msg.contains("2 runs"));
    }

    #[test]
    fn test_configuration_classification() {
        assert!(ReportError::UnknownAlgorithm {
            algorithm: "lama".to_string()
        }
        .is_configuration());
        assert!(!ReportError::properties("bad").is_configuration());

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert!(!ReportError::from(io_err).is_configuration());
    }

    #[test]
    fn test_serialization_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ReportError = json_err.into();
        assert!(matches!(err, ReportError::Serialization(_)));
        assert!(err.to_string().contains("serialization"));
    }
}
