//! Pairwise "who beats whom" comparison of algorithms.
//!
//! A comparison unit is either a domain ([`DomainComparison`], values are
//! per-domain sums) or a single task ([`TaskComparison`], values are the
//! runs' own values). Each unit contributes at most one win to each
//! unordered pair of algorithms; ties contribute nothing.
//!
//! [`ranking`] orders algorithms by these wins and [`matrix`] turns the
//! counts into a renderable square table.

pub mod matrix;
pub mod ranking;

pub use matrix::{AggregateColumn, ComparisonTable, MatrixCell, NOT_APPLICABLE};
pub use ranking::{order, rank, strength, Strength};

use crate::aggregate::{self, GroupBy, GroupKey};
use crate::attribute::{Attribute, Polarity};
use crate::error::Result;
use crate::experiment::{Number, RunSource};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Number of units in which one algorithm beat another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WinMatrix {
    counts: BTreeMap<(String, String), usize>,
}

impl WinMatrix {
    /// Empty matrix
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Units in which `winner` beat `loser`
    #[must_use]
    pub fn get(&self, winner: &str, loser: &str) -> usize {
        self.counts
            .get(&(winner.to_string(), loser.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// `a` does not lose the majority against `b` (ties hold for both).
    #[must_use]
    pub fn beats_or_ties(&self, a: &str, b: &str) -> bool {
        self.get(a, b) >= self.get(b, a)
    }

    /// `a` wins strictly more units against `b` than the reverse.
    #[must_use]
    pub fn strictly_beats(&self, a: &str, b: &str) -> bool {
        self.get(a, b) > self.get(b, a)
    }

    /// Non-zero entries as `(winner, loser, count)`
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, usize)> {
        self.counts
            .iter()
            .map(|((w, l), &count)| (w.as_str(), l.as_str(), count))
    }

    /// Credit the better of two values in one unit.
    fn record(&mut self, polarity: Polarity, a: (&str, Number), b: (&str, Number)) {
        if a.0 == b.0 {
            return;
        }
        let (winner, loser) = match polarity.compare(a.1, b.1) {
            Ordering::Greater => (a.0, b.0),
            Ordering::Less => (b.0, a.0),
            Ordering::Equal => return,
        };
        *self
            .counts
            .entry((winner.to_string(), loser.to_string()))
            .or_insert(0) += 1;
    }
}

/// All unordered pairs of `items`, in order.
fn pairs<T>(items: &[T]) -> impl Iterator<Item = (&T, &T)> {
    items
        .iter()
        .enumerate()
        .flat_map(move |(i, a)| items[i + 1..].iter().map(move |b| (a, b)))
}

/// Per-domain sums of one attribute for every algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainSums {
    domains: Vec<String>,
    sums: BTreeMap<GroupKey, Number>,
}

impl DomainSums {
    /// Sum `attribute` per (domain, algorithm); missing values add nothing.
    #[must_use]
    pub fn collect(data: &dyn RunSource, attribute: &str) -> Self {
        let sums = aggregate::sum_values(data.runs(), GroupBy::DomainAlgorithm, attribute);
        let domains = sums
            .keys()
            .filter_map(|key| key.domain.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        Self { domains, sums }
    }

    /// Domains with at least one run, sorted
    #[must_use]
    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    /// Sum for one algorithm in one domain, zero when it has no runs there
    #[must_use]
    pub fn value(&self, domain: &str, algorithm: &str) -> Number {
        self.sums
            .get(&GroupKey::pair(domain, algorithm))
            .copied()
            .unwrap_or(Number::ZERO)
    }

    /// Sum over all domains
    #[must_use]
    pub fn total(&self, algorithm: &str) -> Number {
        self.domains
            .iter()
            .map(|domain| self.value(domain, algorithm))
            .sum()
    }
}

/// Win counts with domains as comparison units.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainComparison {
    /// Domains won per ordered pair
    pub matrix: WinMatrix,
    /// Domains compared, sorted
    pub domains: Vec<String>,
    /// Per-algorithm sum over all domains
    pub totals: BTreeMap<String, Number>,
}

impl DomainComparison {
    /// Compare per-domain sums of `attribute`.
    ///
    /// Missing values count as zero. Without a configured polarity larger
    /// sums win, as for coverage.
    #[must_use]
    pub fn count(data: &dyn RunSource, attribute: &Attribute) -> Self {
        let polarity = attribute.polarity().unwrap_or(Polarity::LargerIsBetter);
        let sums = DomainSums::collect(data, &attribute.name);
        tracing::info!(
            count = sums.domains().len(),
            domains = ?sums.domains(),
            "domains compared"
        );

        let algorithms = data.algorithms();
        let mut matrix = WinMatrix::new();
        for (a, b) in pairs(algorithms) {
            for domain in sums.domains() {
                matrix.record(
                    polarity,
                    (a.as_str(), sums.value(domain, a)),
                    (b.as_str(), sums.value(domain, b)),
                );
            }
        }

        let totals = algorithms
            .iter()
            .map(|algo| (algo.clone(), sums.total(algo)))
            .collect();

        Self {
            matrix,
            domains: sums.domains,
            totals,
        }
    }

    /// Sum over all domains for one algorithm, zero when absent
    #[must_use]
    pub fn total(&self, algorithm: &str) -> Number {
        self.totals.get(algorithm).copied().unwrap_or(Number::ZERO)
    }
}

/// Win counts with individual tasks as comparison units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskComparison {
    /// Tasks won per ordered pair
    pub matrix: WinMatrix,
    /// Tasks on which every run reports the attribute
    pub tasks_compared: usize,
}

impl TaskComparison {
    /// Compare run values of `attribute` task by task.
    ///
    /// A task counts only if every run on it reports a numeric value;
    /// otherwise it is skipped for all pairs. Absent values are never
    /// treated as zero here.
    ///
    /// # Errors
    /// Returns [`crate::ReportError::MissingPolarity`] if `attribute` has no
    /// `min_wins` setting.
    pub fn count(data: &dyn RunSource, attribute: &Attribute) -> Result<Self> {
        let polarity = attribute.require_polarity()?;
        let mut matrix = WinMatrix::new();
        let mut tasks_compared = 0usize;

        for runs in data.problem_runs().values() {
            let values: Option<Vec<(&str, Number)>> = runs
                .iter()
                .map(|run| Some((run.algorithm.as_str(), run.number(&attribute.name)?)))
                .collect();
            let Some(values) = values else {
                continue;
            };
            tasks_compared += 1;

            for (&a, &b) in pairs(&values) {
                matrix.record(polarity, a, b);
            }
        }

        tracing::info!(
            tasks = tasks_compared,
            "tasks for which all algorithms report {attribute}"
        );
        Ok(Self {
            matrix,
            tasks_compared,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::{Experiment, Run};

    #[test]
    fn test_pairs() {
        let items = ["a", "b", "c"];
        let got: Vec<(&str, &str)> = pairs(&items).map(|(a, b)| (*a, *b)).collect();
        assert_eq!(got, vec![("a", "b"), ("a", "c"), ("b", "c")]);
        assert_eq!(pairs::<u8>(&[]).count(), 0);
    }

    #[test]
    fn test_record_ignores_ties_and_self_pairs() {
        let mut matrix = WinMatrix::new();
        let larger = Polarity::LargerIsBetter;
        matrix.record(larger, ("a", Number::Int(2)), ("b", Number::Int(2)));
        matrix.record(larger, ("a", Number::Int(3)), ("a", Number::Int(1)));
        assert_eq!(matrix.iter().count(), 0);

        matrix.record(larger, ("a", Number::Int(1)), ("b", Number::Int(2)));
        assert_eq!(matrix.get("b", "a"), 1);
        assert_eq!(matrix.get("a", "b"), 0);
        assert!(matrix.strictly_beats("b", "a"));
        assert!(!matrix.beats_or_ties("a", "b"));
    }

    #[test]
    fn test_domain_missing_values_count_as_zero() {
        let data = Experiment::new(vec![
            Run::new("d1", "p1", "a").with_attribute("coverage", 1),
            Run::new("d1", "p1", "b"),
        ]);
        let cmp = DomainComparison::count(&data, &Attribute::coverage());
        assert_eq!(cmp.matrix.get("a", "b"), 1);
        assert_eq!(cmp.total("b"), Number::ZERO);
        assert_eq!(cmp.domains, vec!["d1"]);
    }

    #[test]
    fn test_domain_sums() {
        let data = Experiment::new(vec![
            Run::new("d1", "p1", "a").with_attribute("coverage", 1),
            Run::new("d1", "p2", "a").with_attribute("coverage", 1),
            Run::new("d2", "p1", "a").with_attribute("coverage", 0),
            Run::new("d2", "p1", "b").with_attribute("coverage", 1),
        ]);
        let sums = DomainSums::collect(&data, "coverage");
        assert_eq!(sums.domains(), ["d1", "d2"]);
        assert_eq!(sums.value("d1", "a"), Number::Int(2));
        assert_eq!(sums.value("d1", "b"), Number::ZERO);
        assert_eq!(sums.total("a"), Number::Int(2));
        assert_eq!(sums.total("b"), Number::Int(1));
    }

    #[test]
    fn test_domain_min_wins_polarity() {
        let data = Experiment::new(vec![
            Run::new("d1", "p1", "a").with_attribute("cost", 5),
            Run::new("d1", "p1", "b").with_attribute("cost", 7),
        ]);
        let cost = Attribute::new("cost").with_min_wins(true);
        let cmp = DomainComparison::count(&data, &cost);
        assert_eq!(cmp.matrix.get("a", "b"), 1);
        assert_eq!(cmp.matrix.get("b", "a"), 0);
    }

    #[test]
    fn test_task_requires_polarity() {
        let data = Experiment::new(Vec::new());
        let err = TaskComparison::count(&data, &Attribute::new("cost")).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_task_smaller_wins() {
        let data = Experiment::new(vec![
            Run::new("d", "p1", "a").with_attribute("cost", 3),
            Run::new("d", "p1", "b").with_attribute("cost", 5),
            Run::new("d", "p1", "c").with_attribute("cost", 3),
            Run::new("d", "p2", "a").with_attribute("cost", 9),
            Run::new("d", "p2", "b").with_attribute("cost", 4),
            Run::new("d", "p2", "c").with_attribute("cost", 4),
        ]);
        let cost = Attribute::new("cost").with_min_wins(true);
        let cmp = TaskComparison::count(&data, &cost).unwrap();
        assert_eq!(cmp.tasks_compared, 2);
        assert_eq!(cmp.matrix.get("a", "b"), 1);
        assert_eq!(cmp.matrix.get("b", "a"), 1);
        assert_eq!(cmp.matrix.get("c", "b"), 1);
        assert_eq!(cmp.matrix.get("c", "a"), 1);
        assert_eq!(cmp.matrix.get("a", "c"), 0);
        assert_eq!(cmp.matrix.get("b", "c"), 0);
    }
}
