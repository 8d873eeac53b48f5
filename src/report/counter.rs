use super::{exact_attributes, Report};
use crate::aggregate::{self, GroupBy};
use crate::attribute::Attribute;
use crate::error::Result;
use crate::experiment::RunSource;
use crate::table::{self, Table};

/// Per-domain frequency table of one attribute's values.
///
/// Useful for counting how often algorithms solve a task, run out of time
/// or hit other exit codes. A `sum` row totals every value column.
#[derive(Debug, Clone)]
pub struct CounterReport {
    attribute: Attribute,
    count_missing: bool,
}

impl CounterReport {
    /// Create the report.
    ///
    /// # Errors
    /// Returns [`crate::ReportError::AttributeCount`] unless exactly one
    /// attribute is given.
    pub fn new(attributes: Vec<Attribute>) -> Result<Self> {
        let [attribute] = exact_attributes::<1>("CounterReport", attributes)?;
        Ok(Self {
            attribute,
            count_missing: false,
        })
    }

    /// Count runs without the attribute in a `missing` column
    #[must_use]
    pub fn with_count_missing(mut self, count_missing: bool) -> Self {
        self.count_missing = count_missing;
        self
    }

    /// Frequency table, one row per domain
    #[must_use]
    pub fn table(&self, data: &dyn RunSource) -> Table {
        let counts = aggregate::count_values(
            data.runs(),
            GroupBy::Domain,
            &self.attribute.name,
            self.count_missing,
        );
        let mut table = Table::new().with_digits(self.attribute.digits);
        for (key, count) in counts {
            table.add_cell(&key.group.to_string(), &key.value, count);
        }
        table.add_summary_function("sum", table::sum);
        table
    }
}

impl Report for CounterReport {
    fn name(&self) -> &'static str {
        "CounterReport"
    }

    fn render(&self, data: &dyn RunSource) -> Result<String> {
        Ok(self.table(data).to_string())
    }
}
