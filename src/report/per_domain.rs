use super::{exact_attributes, latex, Report};
use crate::attribute::Attribute;
use crate::compare::{self, ComparisonTable, DomainComparison};
use crate::error::Result;
use crate::experiment::{Number, RunSource};
use std::collections::BTreeMap;

/// Pairwise per-domain comparison of one summed attribute.
///
/// Entry (r, c) is the number of domains in which algorithm r has a better
/// sum than algorithm c. With sorting enabled algorithms go from weakest to
/// strongest, where strength counts the opponents an algorithm does not
/// lose the majority of domains against. The precision of the trailing
/// total column comes from the attribute's `digits`.
#[derive(Debug, Clone)]
pub struct PerDomainComparison {
    attribute: Attribute,
    sort: bool,
    stddev: BTreeMap<String, Number>,
}

impl PerDomainComparison {
    /// Create the report; an empty list compares `coverage`.
    ///
    /// # Errors
    /// Returns [`crate::ReportError::AttributeCount`] if more than one
    /// attribute is given.
    pub fn new(attributes: Vec<Attribute>) -> Result<Self> {
        let attributes = if attributes.is_empty() {
            vec![Attribute::coverage()]
        } else {
            attributes
        };
        let [attribute] = exact_attributes::<1>("PerDomainComparison", attributes)?;
        Ok(Self {
            attribute,
            sort: false,
            stddev: BTreeMap::new(),
        })
    }

    /// Order algorithms from weakest to strongest
    #[must_use]
    pub fn with_sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    /// Standard deviation per algorithm for the LaTeX `Stddev.` column
    #[must_use]
    pub fn with_stddev(mut self, stddev: BTreeMap<String, Number>) -> Self {
        self.stddev = stddev;
        self
    }

    /// Compute win counts, order and totals.
    #[must_use]
    pub fn compute(&self, data: &dyn RunSource) -> ComparisonTable {
        let comparison = DomainComparison::count(data, &self.attribute);
        let algorithms = compare::order(
            &comparison.matrix,
            data.algorithms(),
            Some(&comparison.totals),
            self.sort,
        );
        ComparisonTable::build(&comparison.matrix, algorithms)
            .with_aggregate(
                self.attribute.name.clone(),
                &comparison.totals,
                self.attribute.digits,
            )
            .with_units(comparison.domains.len(), "domains")
    }

    /// Render as a LaTeX tabular
    #[must_use]
    pub fn render_latex(&self, data: &dyn RunSource) -> String {
        latex::comparison_tabular(&self.compute(data), &self.stddev)
    }
}

impl Report for PerDomainComparison {
    fn name(&self) -> &'static str {
        "PerDomainComparison"
    }

    fn render(&self, data: &dyn RunSource) -> Result<String> {
        Ok(self.compute(data).to_table().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::MatrixCell;
    use crate::experiment::{Experiment, Run};

    fn data() -> Experiment {
        let mut runs = Vec::new();
        for (domain, a, b) in [("d1", 2, 0), ("d2", 1, 1), ("d3", 1, 0)] {
            for i in 0..2 {
                let problem = format!("p{i}");
                runs.push(Run::new(domain, &problem, "a").with_attribute("coverage", i64::from(i < a)));
                runs.push(Run::new(domain, &problem, "b").with_attribute("coverage", i64::from(i < b)));
            }
        }
        Experiment::with_algorithms(runs, &["a".to_string(), "b".to_string()]).unwrap()
    }

    #[test]
    fn test_default_attribute_is_coverage() {
        let report = PerDomainComparison::new(Vec::new()).unwrap();
        assert_eq!(report.attribute, Attribute::coverage());
        assert!(PerDomainComparison::new(vec!["x".into(), "y".into()]).is_err());
    }

    #[test]
    fn test_compute_and_sort() {
        let table = PerDomainComparison::new(Vec::new())
            .unwrap()
            .with_sort(true)
            .compute(&data());
        assert_eq!(table.algorithms(), ["b", "a"]);
        assert_eq!(
            table.cell("a", "b"),
            Some(MatrixCell::Wins {
                count: 2,
                highlight: true
            })
        );
        assert_eq!(table.units(), 3);
        let totals = table.aggregate().unwrap();
        assert_eq!(totals.values, vec![Number::Int(1), Number::Int(4)]);
        assert!(totals.is_max(1));
    }

    #[test]
    fn test_render_plain_and_latex() {
        let report = PerDomainComparison::new(Vec::new()).unwrap();
        let text = report.render(&data()).unwrap();
        assert!(text.contains("**2**"));
        assert!(text.ends_with("3 domains\n"));

        let tex = report.render_latex(&data());
        assert!(tex.contains(r"a & -- & \bc{2} & \bc{4} \\"));
        assert!(tex.contains(r"b & 0 & -- & 1 \\"));
        assert!(!tex.contains("Stddev."));
    }
}
