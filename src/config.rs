//! Report configuration loaded from JSON.
//!
//! Every field is optional in the file; absent fields take the defaults
//! below. Command-line flags are applied on top by the caller.
//!
//! ```
//! use planreport::config::ReportConfig;
//!
//! let config = ReportConfig::from_json(r#"{"horizon": 900, "sort": true}"#).unwrap();
//! assert_eq!(config.horizon, 900);
//! assert_eq!(config.sort, Some(true));
//! assert_eq!(config.digits, None);
//! assert_eq!(config.log_level, "info");
//! ```

use crate::cactus::DEFAULT_HORIZON;
use crate::error::Result;
use crate::experiment::Number;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Settings shared by all reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Time budget closing every cactus curve
    pub horizon: u64,
    /// Sort comparison tables from weakest to strongest; `None` keeps each
    /// report's own default
    pub sort: Option<bool>,
    /// Decimal places overriding the attribute's own precision
    pub digits: Option<usize>,
    /// Count runs without the attribute in a `missing` bucket
    pub count_missing: bool,
    /// Standard deviation per algorithm for the LaTeX per-domain table
    pub stddev: BTreeMap<String, Number>,
    /// Algorithms to include, in display order; empty keeps all by name
    pub algorithms: Vec<String>,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
            sort: None,
            digits: None,
            count_missing: false,
            stddev: BTreeMap::new(),
            algorithms: Vec::new(),
            log_level: "info".to_string(),
        }
    }
}

impl ReportConfig {
    /// Parse a configuration from JSON.
    ///
    /// # Errors
    /// Returns [`crate::ReportError::Serialization`] for malformed JSON or
    /// mistyped fields.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a configuration file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }
}
