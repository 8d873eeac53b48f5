//! Planreport: comparative reports for batches of planner experiments.
//!
//! One run is one algorithm applied to one planning task, annotated with
//! attributes such as `coverage`, `planner_time` or `cost`. Planreport
//! turns a set of runs into cactus plots of solved tasks over time,
//! per-domain frequency tables, and pairwise "who beats whom" matrices
//! aggregated per task or per domain.
//!
//! # Quick Start
//!
//! ```
//! use planreport::prelude::*;
//!
//! let data = Experiment::new(vec![
//!     Run::new("gripper", "p1", "lama").with_attribute("coverage", 1),
//!     Run::new("gripper", "p1", "blind").with_attribute("coverage", 0),
//!     Run::new("depot", "p1", "lama").with_attribute("coverage", 1),
//!     Run::new("depot", "p1", "blind").with_attribute("coverage", 1),
//! ]);
//!
//! let table = PerDomainComparison::new(Vec::new())
//!     .unwrap()
//!     .with_sort(true)
//!     .compute(&data);
//! assert_eq!(table.algorithms(), ["blind", "lama"]);
//! assert_eq!(table.caption(), "2 domains");
//! ```
//!
//! # Modules
//!
//! - [`experiment`]: Run records and the read-only [`experiment::RunSource`] seam
//! - [`attribute`]: Attribute descriptors with polarity and precision
//! - [`aggregate`]: Per-group counts and sums
//! - [`cactus`]: Step-function compression for cactus plots
//! - [`compare`]: Win matrices, strength ranking and comparison tables
//! - [`table`]: Logical tables with ordering and cell formatting
//! - [`report`]: The report types
//! - [`config`]: JSON report configuration

pub mod aggregate;
pub mod attribute;
pub mod cactus;
pub mod compare;
pub mod config;
pub mod error;
pub mod experiment;
pub mod prelude;
pub mod report;
pub mod table;

pub use error::{ReportError, Result};
