use super::{exact_attributes, Report};
use crate::attribute::Attribute;
use crate::compare::{self, ComparisonTable, TaskComparison};
use crate::error::Result;
use crate::experiment::RunSource;

/// Pairwise per-task comparison of one attribute.
///
/// Entry (r, c) is the number of tasks on which algorithm r reports a
/// better value than algorithm c. Only tasks for which all algorithms
/// report the attribute are considered. The larger of (r, c) and (c, r) is
/// highlighted.
#[derive(Debug, Clone)]
pub struct PerTaskComparison {
    attribute: Attribute,
    sort: bool,
}

impl PerTaskComparison {
    /// Create the report; sorting is on by default.
    ///
    /// # Errors
    /// Returns [`crate::ReportError::AttributeCount`] unless exactly one
    /// attribute is given, and [`crate::ReportError::MissingPolarity`] if
    /// it has no `min_wins` setting.
    pub fn new(attributes: Vec<Attribute>) -> Result<Self> {
        let [attribute] = exact_attributes::<1>("PerTaskComparison", attributes)?;
        attribute.require_polarity()?;
        Ok(Self {
            attribute,
            sort: true,
        })
    }

    /// Order algorithms from weakest to strongest
    #[must_use]
    pub fn with_sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    /// Compute win counts and order.
    ///
    /// # Errors
    /// Returns [`crate::ReportError::MissingPolarity`] if the attribute has
    /// no polarity.
    pub fn compute(&self, data: &dyn RunSource) -> Result<ComparisonTable> {
        let comparison = TaskComparison::count(data, &self.attribute)?;
        let algorithms = compare::order(&comparison.matrix, data.algorithms(), None, self.sort);
        Ok(ComparisonTable::build(&comparison.matrix, algorithms).with_units(
            comparison.tasks_compared,
            format!("tasks for which all algorithms report {}", self.attribute),
        ))
    }
}

impl Report for PerTaskComparison {
    fn name(&self) -> &'static str {
        "PerTaskComparison"
    }

    fn render(&self, data: &dyn RunSource) -> Result<String> {
        Ok(self.compute(data)?.to_table().to_string())
    }
}
