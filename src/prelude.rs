//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use planreport::prelude::*;
//! ```

pub use crate::attribute::{Attribute, Polarity};
pub use crate::compare::{ComparisonTable, DomainComparison, MatrixCell, TaskComparison, WinMatrix};
pub use crate::config::ReportConfig;
pub use crate::error::{ReportError, Result};
pub use crate::experiment::{AttrValue, Experiment, Number, Run, RunSource, TaskId};
pub use crate::report::{
    CactusPlot, CounterReport, OneVsOthersPerDomainComparison, PerDomainComparison,
    PerTaskComparison, Report,
};
