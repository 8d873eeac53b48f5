//! Cactus-plot coordinates: cumulative successes over a time budget.
//!
//! [`compress`] turns a multiset of success times into the minimal step
//! function that pgfplots needs, and [`write_addplot`] emits it.
//!
//! # Example
//! ```
//! use planreport::cactus::{compress, CoordinatePoint};
//!
//! let points = compress(&[10, 10, 20, 30], 1800);
//! let pairs: Vec<(u64, usize)> = points.iter().map(|p| (p.x, p.y)).collect();
//! assert_eq!(pairs, vec![(0, 0), (10, 2), (20, 3), (30, 4), (1800, 4)]);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Default experiment time budget in seconds.
pub const DEFAULT_HORIZON: u64 = 1800;

/// One step of a cactus plot: `y` tasks succeeded within `x` time units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinatePoint {
    /// Time
    pub x: u64,
    /// Cumulative success count
    pub y: usize,
}

impl CoordinatePoint {
    /// Create a point
    #[must_use]
    pub const fn new(x: u64, y: usize) -> Self {
        Self { x, y }
    }
}

/// Build the step function for `times`, padded to `[0, horizon]`.
///
/// Equal times collapse into one step whose height counts every success at
/// or before that time. A leading `(0, 0)` is added unless a success
/// happened at time zero, and `(horizon, n)` closes the curve. Times beyond
/// the horizon are not successes within the budget and are dropped. An
/// empty input yields the flat line `[(0, 0), (horizon, 0)]`.
#[must_use]
pub fn compress(times: &[u64], horizon: u64) -> Vec<CoordinatePoint> {
    let mut sorted: Vec<u64> = times.iter().copied().filter(|&t| t <= horizon).collect();
    let dropped = times.len() - sorted.len();
    if dropped > 0 {
        tracing::warn!(dropped, horizon, "ignoring success times beyond the horizon");
    }
    sorted.sort_unstable();

    let total = sorted.len();
    let mut points = Vec::with_capacity(total + 2);
    let mut cumulative = total;
    let mut last_time: Option<u64> = None;
    for &time in sorted.iter().rev() {
        if last_time.map_or(true, |last| time < last) {
            points.push(CoordinatePoint::new(time, cumulative));
        }
        cumulative -= 1;
        last_time = Some(time);
    }
    points.reverse();

    if points.first().map_or(true, |first| first.x != 0) {
        points.insert(0, CoordinatePoint::new(0, 0));
    }
    let end = CoordinatePoint::new(horizon, total);
    if points.last() != Some(&end) {
        points.push(end);
    }
    points
}

/// Append one pgfplots series and its legend entry to `out`.
pub fn write_addplot(out: &mut String, label: &str, points: &[CoordinatePoint]) {
    let _ = writeln!(out, "\\addplot coordinates {{");
    for point in points {
        let _ = write!(out, "({}, {}) ", point.x, point.y);
    }
    let _ = writeln!(out, "}};");
    let _ = writeln!(out, "\\addlegendentry{{{label}}}");
    let _ = writeln!(out);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(points: &[CoordinatePoint]) -> Vec<(u64, usize)> {
        points.iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn test_compress_collapses_ties() {
        let points = compress(&[30, 10, 20, 10], DEFAULT_HORIZON);
        assert_eq!(
            pairs(&points),
            vec![(0, 0), (10, 2), (20, 3), (30, 4), (1800, 4)]
        );
    }

    #[test]
    fn test_compress_empty() {
        assert_eq!(pairs(&compress(&[], DEFAULT_HORIZON)), vec![(0, 0), (1800, 0)]);
    }

    #[test]
    fn test_compress_success_at_zero() {
        let points = compress(&[0, 0, 5], 100);
        assert_eq!(pairs(&points), vec![(0, 2), (5, 3), (100, 3)]);
    }

    #[test]
    fn test_compress_success_at_horizon() {
        let points = compress(&[7, 100], 100);
        assert_eq!(pairs(&points), vec![(0, 0), (7, 1), (100, 2)]);
    }

    #[test]
    fn test_compress_drops_times_beyond_horizon() {
        let points = compress(&[5, 2000], 1800);
        assert_eq!(pairs(&points), vec![(0, 0), (5, 1), (1800, 1)]);
    }

    #[test]
    fn test_write_addplot_format() {
        let mut out = String::new();
        write_addplot(&mut out, "lama", &compress(&[10, 20], 1800));
        assert_eq!(
            out,
            "\\addplot coordinates {\n(0, 0) (10, 1) (20, 2) (1800, 2) };\n\\addlegendentry{lama}\n\n"
        );
    }
}
