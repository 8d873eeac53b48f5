//! Folding run records into per-group statistics.
//!
//! Every function builds and returns a fresh map. Groups are keyed by an
//! explicit [`GroupKey`] so there is no nested default-on-first-access map.

use crate::error::{ReportError, Result};
use crate::experiment::{Number, Run, RunSource};
use std::collections::BTreeMap;
use std::fmt;

/// Bucket label for runs that do not report the counted attribute.
pub const MISSING_BUCKET: &str = "missing";

/// How runs are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupBy {
    /// One group per domain
    Domain,
    /// One group per (domain, algorithm)
    DomainAlgorithm,
    /// One group per algorithm
    Algorithm,
}

impl GroupBy {
    /// Group key of a run
    #[must_use]
    pub fn key(self, run: &Run) -> GroupKey {
        match self {
            Self::Domain => GroupKey::domain(&run.domain),
            Self::DomainAlgorithm => GroupKey::pair(&run.domain, &run.algorithm),
            Self::Algorithm => GroupKey::algorithm(&run.algorithm),
        }
    }
}

/// Composite group key; unused components are `None`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    /// Domain component
    pub domain: Option<String>,
    /// Algorithm component
    pub algorithm: Option<String>,
}

impl GroupKey {
    /// Key for a domain
    #[must_use]
    pub fn domain(domain: &str) -> Self {
        Self {
            domain: Some(domain.to_string()),
            algorithm: None,
        }
    }

    /// Key for an algorithm within a domain
    #[must_use]
    pub fn pair(domain: &str, algorithm: &str) -> Self {
        Self {
            domain: Some(domain.to_string()),
            algorithm: Some(algorithm.to_string()),
        }
    }

    /// Key for an algorithm
    #[must_use]
    pub fn algorithm(algorithm: &str) -> Self {
        Self {
            domain: None,
            algorithm: Some(algorithm.to_string()),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.domain, &self.algorithm) {
            (Some(d), Some(a)) => write!(f, "{d}/{a}"),
            (Some(d), None) => f.write_str(d),
            (None, Some(a)) => f.write_str(a),
            (None, None) => Ok(()),
        }
    }
}

/// Key of a frequency table: group plus rendered attribute value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CountKey {
    /// Group the run belongs to
    pub group: GroupKey,
    /// Rendered value, or [`MISSING_BUCKET`]
    pub value: String,
}

/// Count how often each value of `attribute` occurs per group.
///
/// Runs without the attribute are skipped unless `count_missing` is set, in
/// which case they land in the [`MISSING_BUCKET`].
pub fn count_values<'a>(
    runs: impl IntoIterator<Item = &'a Run>,
    group_by: GroupBy,
    attribute: &str,
    count_missing: bool,
) -> BTreeMap<CountKey, usize> {
    let mut counts = BTreeMap::new();
    for run in runs {
        let value = match run.get(attribute) {
            Some(value) => value.to_string(),
            None if count_missing => MISSING_BUCKET.to_string(),
            None => continue,
        };
        let key = CountKey {
            group: group_by.key(run),
            value,
        };
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Sum a numeric attribute per group.
///
/// Every group that has at least one run gets an entry; runs without a
/// numeric value contribute nothing, so an all-missing group sums to zero.
pub fn sum_values<'a>(
    runs: impl IntoIterator<Item = &'a Run>,
    group_by: GroupBy,
    attribute: &str,
) -> BTreeMap<GroupKey, Number> {
    let mut sums: BTreeMap<GroupKey, Number> = BTreeMap::new();
    for run in runs {
        let total = sums.entry(group_by.key(run)).or_default();
        if let Some(value) = run.number(attribute) {
            *total = *total + value;
        }
    }
    sums
}

/// Per-domain sum for data holding exactly one algorithm.
///
/// # Errors
/// Returns [`ReportError::AmbiguousAlgorithm`] if any task has more than
/// one run; the caller must filter to a single algorithm first.
pub fn sum_by_domain_single_algorithm(
    data: &dyn RunSource,
    attribute: &str,
) -> Result<BTreeMap<String, Number>> {
    let mut sums: BTreeMap<String, Number> = BTreeMap::new();
    for (task, runs) in data.problem_runs() {
        if runs.len() != 1 {
            return Err(ReportError::AmbiguousAlgorithm {
                task: task.to_string(),
                runs: runs.len(),
            });
        }
        let total = sums.entry(task.domain.clone()).or_default();
        if let Some(value) = runs[0].number(attribute) {
            *total = *total + value;
        }
    }
    Ok(sums)
}

/// Integer times of successful runs, per algorithm in the source's order.
///
/// A run succeeds when `success_attribute` is truthy. Successful runs that
/// lack a numeric, non-negative time are skipped with a warning. Times are
/// truncated to whole units.
#[must_use]
pub fn success_times(
    data: &dyn RunSource,
    success_attribute: &str,
    time_attribute: &str,
) -> Vec<(String, Vec<u64>)> {
    let mut times: BTreeMap<&str, Vec<u64>> = data
        .algorithms()
        .iter()
        .map(|algo| (algo.as_str(), Vec::new()))
        .collect();

    for run in data.runs() {
        if !run.is_truthy(success_attribute) {
            continue;
        }
        let Some(bucket) = times.get_mut(run.algorithm.as_str()) else {
            continue;
        };
        match run.number(time_attribute).map(Number::as_f64) {
            Some(t) if t >= 0.0 => bucket.push(t as u64),
            _ => tracing::warn!(
                task = %run.task(),
                algorithm = %run.algorithm,
                "successful run without usable {time_attribute}; skipped"
            ),
        }
    }

    data.algorithms()
        .iter()
        .map(|algo| (algo.clone(), times.remove(algo.as_str()).unwrap_or_default()))
        .collect()
}
