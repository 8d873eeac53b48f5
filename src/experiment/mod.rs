//! Run records and the read-only data seam consumed by the reports.
//!
//! Reports never load data themselves. They read through [`RunSource`],
//! which exposes the runs grouped by task together with the caller's
//! algorithm order. [`Experiment`] is the in-memory implementation used by
//! the command-line front end and the tests.
//!
//! # Example
//! ```
//! use planreport::experiment::{Experiment, Run, RunSource};
//!
//! let data = Experiment::new(vec![
//!     Run::new("gripper", "prob01.pddl", "lama").with_attribute("coverage", 1),
//!     Run::new("gripper", "prob01.pddl", "blind").with_attribute("coverage", 0),
//! ]);
//! assert_eq!(data.algorithms(), ["blind", "lama"]);
//! assert_eq!(data.problem_runs().len(), 1);
//! ```

mod properties;
mod value;

pub use value::{AttrValue, Number};

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

/// One planning task: a problem file within a domain.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId {
    /// Domain name
    pub domain: String,
    /// Problem identifier within the domain
    pub problem: String,
}

impl TaskId {
    /// Create a task identifier
    #[must_use]
    pub fn new(domain: impl Into<String>, problem: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            problem: problem.into(),
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.domain, self.problem)
    }
}

/// Strip a `driver:` namespace from an algorithm identifier.
#[must_use]
pub fn short_name(algorithm: &str) -> &str {
    algorithm
        .rsplit_once(':')
        .map_or(algorithm, |(_, name)| name)
}

/// One algorithm's recorded outcome on one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// Domain name
    pub domain: String,
    /// Problem identifier
    pub problem: String,
    /// Algorithm identifier, possibly namespaced as `driver:name`
    pub algorithm: String,
    /// Reported attributes; absent keys are unreported
    #[serde(default)]
    pub attributes: BTreeMap<String, AttrValue>,
}

impl Run {
    /// Create a run without attributes
    #[must_use]
    pub fn new(
        domain: impl Into<String>,
        problem: impl Into<String>,
        algorithm: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            problem: problem.into(),
            algorithm: algorithm.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add an attribute value
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Task this run belongs to
    #[must_use]
    pub fn task(&self) -> TaskId {
        TaskId::new(self.domain.clone(), self.problem.clone())
    }

    /// Algorithm identifier without its driver namespace
    #[must_use]
    pub fn algorithm_name(&self) -> &str {
        short_name(&self.algorithm)
    }

    /// Whether the attribute was reported
    #[must_use]
    pub fn contains(&self, attribute: &str) -> bool {
        self.attributes.contains_key(attribute)
    }

    /// Look up an attribute value
    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&AttrValue> {
        self.attributes.get(attribute)
    }

    /// Numeric attribute value, `None` when absent or categorical
    #[must_use]
    pub fn number(&self, attribute: &str) -> Option<Number> {
        self.get(attribute).and_then(AttrValue::as_number)
    }

    /// Whether the attribute is present and truthy
    #[must_use]
    pub fn is_truthy(&self, attribute: &str) -> bool {
        self.get(attribute).is_some_and(AttrValue::is_truthy)
    }
}

/// Read-only view of an experiment's runs.
pub trait RunSource {
    /// Algorithms in caller-controlled order
    fn algorithms(&self) -> &[String];

    /// Domain name to its problems
    fn domains(&self) -> &BTreeMap<String, Vec<String>>;

    /// Runs grouped by task, one per algorithm that attempted it
    fn problem_runs(&self) -> &BTreeMap<TaskId, Vec<Run>>;

    /// The run of `algorithm` on `task`, if any
    fn run(&self, task: &TaskId, algorithm: &str) -> Option<&Run> {
        self.problem_runs()
            .get(task)?
            .iter()
            .find(|run| run.algorithm == algorithm)
    }

    /// All runs, task by task
    fn runs(&self) -> Box<dyn Iterator<Item = &Run> + '_> {
        Box::new(self.problem_runs().values().flatten())
    }
}

/// In-memory experiment data.
#[derive(Debug, Clone, Default)]
pub struct Experiment {
    algorithms: Vec<String>,
    domains: BTreeMap<String, Vec<String>>,
    problem_runs: BTreeMap<TaskId, Vec<Run>>,
}

impl Experiment {
    /// Build from runs; algorithms are ordered by name.
    #[must_use]
    pub fn new(runs: impl IntoIterator<Item = Run>) -> Self {
        let runs: Vec<Run> = runs.into_iter().collect();
        let algorithms: Vec<String> = runs
            .iter()
            .map(|run| run.algorithm.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        Self::assemble(algorithms, runs)
    }

    /// Build from runs, keeping only `order` and reporting algorithms in
    /// that order.
    ///
    /// # Errors
    /// Returns [`ReportError::UnknownAlgorithm`] if an algorithm in `order`
    /// has no runs.
    pub fn with_algorithms(runs: impl IntoIterator<Item = Run>, order: &[String]) -> Result<Self> {
        let wanted: BTreeSet<&str> = order.iter().map(String::as_str).collect();
        let mut seen = BTreeSet::new();
        let mut dropped = 0usize;
        let kept: Vec<Run> = runs
            .into_iter()
            .filter(|run| {
                if wanted.contains(run.algorithm.as_str()) {
                    seen.insert(run.algorithm.clone());
                    true
                } else {
                    dropped += 1;
                    false
                }
            })
            .collect();

        if let Some(missing) = order.iter().find(|algo| !seen.contains(*algo)) {
            return Err(ReportError::UnknownAlgorithm {
                algorithm: missing.clone(),
            });
        }
        if dropped > 0 {
            tracing::debug!(dropped, "skipped runs of unselected algorithms");
        }

        let mut algorithms = Vec::with_capacity(order.len());
        for algo in order {
            if !algorithms.contains(algo) {
                algorithms.push(algo.clone());
            }
        }
        Ok(Self::assemble(algorithms, kept))
    }

    /// Keep only the algorithms in `order`, reported in that order.
    ///
    /// # Errors
    /// Returns [`ReportError::UnknownAlgorithm`] if an algorithm in `order`
    /// has no runs.
    pub fn select(self, order: &[String]) -> Result<Self> {
        Self::with_algorithms(self.problem_runs.into_values().flatten(), order)
    }

    /// Parse a lab properties document (`run id -> fields`).
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or a run lacks its
    /// `domain`, `problem` or `algorithm` field.
    pub fn from_properties_json(text: &str) -> Result<Self> {
        Ok(Self::new(properties::parse_runs(text)?))
    }

    /// Read a lab properties file from disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_properties_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_properties_json(&text)
    }

    /// Total number of runs
    #[must_use]
    pub fn len(&self) -> usize {
        self.problem_runs.values().map(Vec::len).sum()
    }

    /// Whether there are no runs
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.problem_runs.is_empty()
    }

    fn assemble(algorithms: Vec<String>, runs: Vec<Run>) -> Self {
        let mut problem_runs: BTreeMap<TaskId, Vec<Run>> = BTreeMap::new();
        for run in runs {
            problem_runs.entry(run.task()).or_default().push(run);
        }

        let position = |algo: &str| {
            algorithms
                .iter()
                .position(|a| a == algo)
                .unwrap_or(usize::MAX)
        };
        for task_runs in problem_runs.values_mut() {
            task_runs.sort_by_key(|run| position(&run.algorithm));
        }

        let mut domains: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for task in problem_runs.keys() {
            domains
                .entry(task.domain.clone())
                .or_default()
                .push(task.problem.clone());
        }

        Self {
            algorithms,
            domains,
            problem_runs,
        }
    }
}

impl RunSource for Experiment {
    fn algorithms(&self) -> &[String] {
        &self.algorithms
    }

    fn domains(&self) -> &BTreeMap<String, Vec<String>> {
        &self.domains
    }

    fn problem_runs(&self) -> &BTreeMap<TaskId, Vec<Run>> {
        &self.problem_runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_runs() -> Vec<Run> {
        vec![
            Run::new("gripper", "prob02.pddl", "lama").with_attribute("coverage", 1),
            Run::new("gripper", "prob01.pddl", "lama").with_attribute("coverage", 1),
            Run::new("gripper", "prob01.pddl", "blind").with_attribute("coverage", 0),
            Run::new("depot", "p01.pddl", "blind"),
        ]
    }

    #[test]
    fn test_task_display() {
        assert_eq!(TaskId::new("gripper", "prob01.pddl").to_string(), "gripper:prob01.pddl");
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("fd:lama-first"), "lama-first");
        assert_eq!(short_name("blind"), "blind");
    }

    #[test]
    fn test_run_lookup() {
        let run = Run::new("d", "p", "ff:astar")
            .with_attribute("coverage", 1)
            .with_attribute("error", "success");
        assert!(run.contains("coverage"));
        assert!(!run.contains("expansions"));
        assert_eq!(run.number("coverage"), Some(Number::Int(1)));
        assert_eq!(run.number("error"), None);
        assert!(run.is_truthy("coverage"));
        assert_eq!(run.algorithm_name(), "astar");
    }

    #[test]
    fn test_experiment_grouping() {
        let data = Experiment::new(sample_runs());
        assert_eq!(data.len(), 4);
        assert_eq!(data.algorithms(), ["blind", "lama"]);
        assert_eq!(
            data.domains().get("gripper").unwrap(),
            &vec!["prob01.pddl".to_string(), "prob02.pddl".to_string()]
        );

        let task = TaskId::new("gripper", "prob01.pddl");
        let runs = data.problem_runs().get(&task).unwrap();
        assert_eq!(runs[0].algorithm, "blind");
        assert_eq!(runs[1].algorithm, "lama");
        assert!(data.run(&task, "lama").is_some());
        assert!(data.run(&task, "ff").is_none());
        assert_eq!(data.runs().count(), 4);
    }

    #[test]
    fn test_experiment_with_algorithm_order() {
        let order = vec!["lama".to_string()];
        let data = Experiment::with_algorithms(sample_runs(), &order).unwrap();
        assert_eq!(data.algorithms(), ["lama"]);
        assert_eq!(data.len(), 2);
        assert!(!data.domains().contains_key("depot"));
    }

    #[test]
    fn test_select_reorders() {
        let data = Experiment::new(sample_runs())
            .select(&["lama".to_string(), "blind".to_string()])
            .unwrap();
        assert_eq!(data.algorithms(), ["lama", "blind"]);
        let runs = data
            .problem_runs()
            .get(&TaskId::new("gripper", "prob01.pddl"))
            .unwrap();
        assert_eq!(runs[0].algorithm, "lama");
    }

    #[test]
    fn test_experiment_unknown_algorithm() {
        let order = vec!["lama".to_string(), "ff".to_string()];
        let err = Experiment::with_algorithms(sample_runs(), &order).unwrap_err();
        assert!(matches!(err, ReportError::UnknownAlgorithm { ref algorithm } if algorithm == "ff"));
    }

    #[test]
    fn test_empty_experiment() {
        let data = Experiment::new(Vec::new());
        assert!(data.is_empty());
        assert!(data.algorithms().is_empty());
    }
}
