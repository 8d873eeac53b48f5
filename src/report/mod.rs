//! Report types.
//!
//! Each report validates its attributes when constructed and renders from
//! any [`RunSource`]. Rendering computes the complete result before any
//! text is produced; a failing report does not affect other reports.
//!
//! # Example
//! ```
//! use planreport::experiment::{Experiment, Run};
//! use planreport::report::{PerDomainComparison, Report};
//!
//! let data = Experiment::new(vec![
//!     Run::new("gripper", "p1", "lama").with_attribute("coverage", 1),
//!     Run::new("gripper", "p1", "blind").with_attribute("coverage", 0),
//! ]);
//! let report = PerDomainComparison::new(Vec::new()).unwrap();
//! let text = report.render(&data).unwrap();
//! assert!(text.contains("1 domains"));
//! ```

mod cactus_plot;
mod counter;
pub mod latex;
mod one_vs_others;
mod per_domain;
mod per_task;

pub use cactus_plot::CactusPlot;
pub use counter::CounterReport;
pub use one_vs_others::{OneVsOthersPerDomainComparison, Standing};
pub use per_domain::PerDomainComparison;
pub use per_task::PerTaskComparison;

use crate::attribute::Attribute;
use crate::error::{ReportError, Result};
use crate::experiment::RunSource;

/// A renderable report.
pub trait Report {
    /// Report type name, used in messages
    fn name(&self) -> &'static str;

    /// Compute the report over `data` and render it as text.
    ///
    /// # Errors
    /// Returns an error if the data violates a precondition of the report.
    fn render(&self, data: &dyn RunSource) -> Result<String>;
}

/// Check that exactly `N` attributes were supplied.
fn exact_attributes<const N: usize>(
    report: &'static str,
    attributes: Vec<Attribute>,
) -> Result<[Attribute; N]> {
    let found = attributes.len();
    attributes
        .try_into()
        .map_err(|_| ReportError::AttributeCount {
            report,
            expected: N,
            found,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_attributes() {
        let [a, b] = exact_attributes::<2>("Test", vec!["x".into(), "y".into()]).unwrap();
        assert_eq!((a.name.as_str(), b.name.as_str()), ("x", "y"));

        let err = exact_attributes::<1>("Test", vec!["x".into(), "y".into()]).unwrap_err();
        assert!(matches!(
            err,
            ReportError::AttributeCount {
                expected: 1,
                found: 2,
                ..
            }
        ));
    }
}
