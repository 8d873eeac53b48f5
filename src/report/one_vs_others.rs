use super::Report;
use crate::attribute::{Attribute, Polarity};
use crate::compare::DomainSums;
use crate::error::{ReportError, Result};
use crate::experiment::{short_name, Number, RunSource};
use crate::table::Table;
use std::cmp::Ordering;

/// How one algorithm fares against the reference, domain by domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    /// Algorithm identifier
    pub algorithm: String,
    /// Sum of the attribute over all domains
    pub total: Number,
    /// Domains where the reference is better
    pub better: usize,
    /// Domains with equal sums
    pub equal: usize,
    /// Domains where the reference is worse
    pub worse: usize,
}

/// Per-domain comparison of one reference algorithm against all others.
///
/// Renders a summary table with one column per algorithm and the rows
/// total, `Better` and `Worse` (counted from the reference's side).
#[derive(Debug, Clone)]
pub struct OneVsOthersPerDomainComparison {
    reference: String,
    attribute: Attribute,
}

impl OneVsOthersPerDomainComparison {
    /// Compare `reference` on coverage.
    ///
    /// The reference may be given as a full identifier or, if unique, by
    /// its name without the `driver:` prefix.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            attribute: Attribute::coverage(),
        }
    }

    /// Compare on another summed attribute
    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attribute = attribute;
        self
    }

    fn resolve<'a>(&self, algorithms: &'a [String]) -> Result<&'a str> {
        if let Some(exact) = algorithms.iter().find(|algo| **algo == self.reference) {
            return Ok(exact.as_str());
        }
        let mut matches = algorithms
            .iter()
            .filter(|algo| short_name(algo) == self.reference);
        match (matches.next(), matches.next()) {
            (Some(found), None) => Ok(found.as_str()),
            _ => Err(ReportError::UnknownAlgorithm {
                algorithm: self.reference.clone(),
            }),
        }
    }

    /// Standing of every algorithm, the reference included.
    ///
    /// # Errors
    /// Returns [`ReportError::UnknownAlgorithm`] if the reference does not
    /// name exactly one algorithm of `data`.
    pub fn compute(&self, data: &dyn RunSource) -> Result<Vec<Standing>> {
        let reference = self.resolve(data.algorithms())?;
        let polarity = self.attribute.polarity().unwrap_or(Polarity::LargerIsBetter);
        let sums = DomainSums::collect(data, &self.attribute.name);

        let standings = data
            .algorithms()
            .iter()
            .map(|algo| {
                let mut standing = Standing {
                    algorithm: algo.clone(),
                    total: sums.total(algo),
                    better: 0,
                    equal: 0,
                    worse: 0,
                };
                for domain in sums.domains() {
                    let ours = sums.value(domain, reference);
                    let theirs = sums.value(domain, algo);
                    match polarity.compare(ours, theirs) {
                        Ordering::Greater => standing.better += 1,
                        Ordering::Equal => standing.equal += 1,
                        Ordering::Less => standing.worse += 1,
                    }
                }
                standing
            })
            .collect();
        tracing::info!(reference, domains = sums.domains().len(), "one-vs-others");
        Ok(standings)
    }

    fn total_label(&self) -> String {
        let mut chars = self.attribute.name.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }

    /// Summary table, one column per algorithm.
    ///
    /// # Errors
    /// See [`Self::compute`].
    pub fn table(&self, data: &dyn RunSource) -> Result<Table> {
        let total_label = self.total_label();
        let mut table = Table::new()
            .with_title("Summary")
            .with_digits(self.attribute.digits);
        for standing in self.compute(data)? {
            table.add_cell(&total_label, &standing.algorithm, standing.total);
            table.add_cell("Better", &standing.algorithm, standing.better);
            table.add_cell("Worse", &standing.algorithm, standing.worse);
        }
        table.set_column_order(data.algorithms().to_vec());
        table.set_row_order(vec![total_label, "Better".to_string(), "Worse".to_string()]);
        Ok(table)
    }
}

impl Report for OneVsOthersPerDomainComparison {
    fn name(&self) -> &'static str {
        "OneVsOthersPerDomainComparison"
    }

    fn render(&self, data: &dyn RunSource) -> Result<String> {
        Ok(self.table(data)?.to_string())
    }
}
