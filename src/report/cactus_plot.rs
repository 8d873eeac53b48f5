use super::{exact_attributes, Report};
use crate::aggregate;
use crate::attribute::Attribute;
use crate::cactus::{self, CoordinatePoint, DEFAULT_HORIZON};
use crate::error::Result;
use crate::experiment::RunSource;

/// Cumulative successes over time, one pgfplots series per algorithm.
///
/// Takes two attributes: a success indicator (e.g. `coverage`) and a time
/// (e.g. `planner_time`).
#[derive(Debug, Clone)]
pub struct CactusPlot {
    success: Attribute,
    time: Attribute,
    horizon: u64,
}

impl CactusPlot {
    /// Create the report.
    ///
    /// # Errors
    /// Returns [`crate::ReportError::AttributeCount`] unless exactly two
    /// attributes are given.
    pub fn new(attributes: Vec<Attribute>) -> Result<Self> {
        let [success, time] = exact_attributes::<2>("CactusPlot", attributes)?;
        Ok(Self {
            success,
            time,
            horizon: DEFAULT_HORIZON,
        })
    }

    /// Set the time budget that closes every curve
    #[must_use]
    pub fn with_horizon(mut self, horizon: u64) -> Self {
        self.horizon = horizon;
        self
    }

    /// Step coordinates per algorithm, in the source's algorithm order
    #[must_use]
    pub fn coordinates(&self, data: &dyn RunSource) -> Vec<(String, Vec<CoordinatePoint>)> {
        aggregate::success_times(data, &self.success.name, &self.time.name)
            .into_iter()
            .map(|(algo, times)| {
                let points = cactus::compress(&times, self.horizon);
                tracing::debug!(algorithm = %algo, successes = times.len(), ?points, "cactus");
                (algo, points)
            })
            .collect()
    }
}

impl Report for CactusPlot {
    fn name(&self) -> &'static str {
        "CactusPlot"
    }

    fn render(&self, data: &dyn RunSource) -> Result<String> {
        let mut out = String::new();
        for (algo, points) in self.coordinates(data) {
            cactus::write_addplot(&mut out, &algo, &points);
        }
        Ok(out)
    }
}
