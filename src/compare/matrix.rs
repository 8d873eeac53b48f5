//! Square algorithm-by-algorithm comparison tables.

use super::WinMatrix;
use crate::experiment::Number;
use crate::table::{CellFormatter, Table};
use std::collections::BTreeMap;

/// Marker for the diagonal, where an algorithm would face itself.
pub const NOT_APPLICABLE: &str = "--";

/// One cell of a comparison table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixCell {
    /// Diagonal
    NotApplicable,
    /// Units the row algorithm won against the column algorithm
    Wins {
        /// Number of units won
        count: usize,
        /// Row algorithm does not lose the majority against the column
        highlight: bool,
    },
}

/// Trailing per-algorithm column, e.g. total coverage.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateColumn {
    /// Column header
    pub label: String,
    /// One value per algorithm, in table row order
    pub values: Vec<Number>,
    /// Decimal places for float values
    pub digits: usize,
}

impl AggregateColumn {
    /// Value of row `index` at the column's precision
    #[must_use]
    pub fn formatted(&self, index: usize) -> String {
        self.values
            .get(index)
            .map(|value| value.format(self.digits))
            .unwrap_or_default()
    }

    /// Whether row `index` shows the column maximum.
    ///
    /// Values are compared as printed, so rows that round to the maximum
    /// are highlighted too.
    #[must_use]
    pub fn is_max(&self, index: usize) -> bool {
        let Some(max) = self.values.iter().max_by(|a, b| a.total_cmp(b)) else {
            return false;
        };
        index < self.values.len() && self.formatted(index) == max.format(self.digits)
    }
}

/// Win counts laid out for rendering, rows and columns in the same order.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonTable {
    algorithms: Vec<String>,
    cells: Vec<Vec<MatrixCell>>,
    aggregate: Option<AggregateColumn>,
    units: usize,
    unit_label: String,
}

impl ComparisonTable {
    /// Lay out `matrix` with rows and columns in `algorithms` order.
    ///
    /// Cell `(a, b)` is highlighted when `wins(a, b) >= wins(b, a)`; this is
    /// decided per cell and does not depend on the global ranking.
    #[must_use]
    pub fn build(matrix: &WinMatrix, algorithms: Vec<String>) -> Self {
        let cells = algorithms
            .iter()
            .map(|row| {
                algorithms
                    .iter()
                    .map(|column| {
                        if row == column {
                            MatrixCell::NotApplicable
                        } else {
                            MatrixCell::Wins {
                                count: matrix.get(row, column),
                                highlight: matrix.beats_or_ties(row, column),
                            }
                        }
                    })
                    .collect()
            })
            .collect();
        Self {
            algorithms,
            cells,
            aggregate: None,
            units: 0,
            unit_label: String::new(),
        }
    }

    /// Append an aggregate column, missing algorithms read as zero
    #[must_use]
    pub fn with_aggregate(
        mut self,
        label: impl Into<String>,
        totals: &BTreeMap<String, Number>,
        digits: usize,
    ) -> Self {
        let values = self
            .algorithms
            .iter()
            .map(|algo| totals.get(algo).copied().unwrap_or(Number::ZERO))
            .collect();
        self.aggregate = Some(AggregateColumn {
            label: label.into(),
            values,
            digits,
        });
        self
    }

    /// Record how many comparison units took part, e.g. `(12, "domains")`
    #[must_use]
    pub fn with_units(mut self, count: usize, label: impl Into<String>) -> Self {
        self.units = count;
        self.unit_label = label.into();
        self
    }

    /// Row and column order
    #[must_use]
    pub fn algorithms(&self) -> &[String] {
        &self.algorithms
    }

    /// Cell at (`row`, `column`)
    #[must_use]
    pub fn cell(&self, row: &str, column: &str) -> Option<MatrixCell> {
        let r = self.algorithms.iter().position(|a| a == row)?;
        let c = self.algorithms.iter().position(|a| a == column)?;
        Some(self.cells[r][c])
    }

    /// Rows paired with their algorithm
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[MatrixCell])> {
        self.algorithms
            .iter()
            .map(String::as_str)
            .zip(self.cells.iter().map(Vec::as_slice))
    }

    /// Trailing aggregate column, if any
    #[must_use]
    pub fn aggregate(&self) -> Option<&AggregateColumn> {
        self.aggregate.as_ref()
    }

    /// Number of comparison units
    #[must_use]
    pub fn units(&self) -> usize {
        self.units
    }

    /// Caption such as `"12 domains"`
    #[must_use]
    pub fn caption(&self) -> String {
        format!("{} {}", self.units, self.unit_label)
    }

    /// Populate a logical [`Table`].
    #[must_use]
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        let mut columns = self.algorithms.clone();

        for (row, cells) in self.rows() {
            for (column, cell) in self.algorithms.iter().zip(cells) {
                match *cell {
                    MatrixCell::NotApplicable => {
                        table.add_cell(row, column, NOT_APPLICABLE);
                        table.set_cell_formatter(row, column, CellFormatter::right());
                    }
                    MatrixCell::Wins { count, highlight } => {
                        table.add_cell(row, column, count);
                        if highlight {
                            table.set_cell_formatter(row, column, CellFormatter::highlight());
                        }
                    }
                }
            }
        }

        if let Some(aggregate) = &self.aggregate {
            columns.push(aggregate.label.clone());
            for (index, row) in self.algorithms.iter().enumerate() {
                table.add_cell(row, &aggregate.label, aggregate.formatted(index));
                let formatter = if aggregate.is_max(index) {
                    CellFormatter::highlight()
                } else {
                    CellFormatter::right()
                };
                table.set_cell_formatter(row, &aggregate.label, formatter);
            }
        }

        table.set_row_order(self.algorithms.clone());
        table.set_column_order(columns);
        table.set_caption(self.caption());
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Polarity;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn sample_matrix() -> WinMatrix {
        let mut m = WinMatrix::new();
        let larger = Polarity::LargerIsBetter;
        m.record(larger, ("a", Number::Int(5)), ("b", Number::Int(1)));
        m.record(larger, ("a", Number::Int(1)), ("b", Number::Int(5)));
        m.record(larger, ("a", Number::Int(2)), ("c", Number::Int(1)));
        m
    }

    #[test]
    fn test_build_cells() {
        let table = ComparisonTable::build(&sample_matrix(), names(&["a", "b", "c"]));
        assert_eq!(table.cell("a", "a"), Some(MatrixCell::NotApplicable));
        assert_eq!(
            table.cell("a", "b"),
            Some(MatrixCell::Wins {
                count: 1,
                highlight: true
            })
        );
        assert_eq!(
            table.cell("b", "a"),
            Some(MatrixCell::Wins {
                count: 1,
                highlight: true
            })
        );
        assert_eq!(
            table.cell("c", "a"),
            Some(MatrixCell::Wins {
                count: 0,
                highlight: false
            })
        );
        // zero against zero is a tie
        assert_eq!(
            table.cell("c", "b"),
            Some(MatrixCell::Wins {
                count: 0,
                highlight: true
            })
        );
        assert_eq!(table.cell("a", "x"), None);
    }

    #[test]
    fn test_aggregate_max_compares_printed_values() {
        let column = AggregateColumn {
            label: "score".to_string(),
            values: vec![Number::Float(2.004), Number::Float(2.001), Number::Float(1.5)],
            digits: 2,
        };
        assert!(column.is_max(0));
        assert!(column.is_max(1));
        assert!(!column.is_max(2));
        assert!(!column.is_max(3));
    }

    #[test]
    fn test_to_table_layout() {
        let totals: BTreeMap<String, Number> = [
            ("a".to_string(), Number::Int(8)),
            ("b".to_string(), Number::Int(6)),
        ]
        .into_iter()
        .collect();
        let table = ComparisonTable::build(&sample_matrix(), names(&["b", "a"]))
            .with_aggregate("coverage", &totals, 0)
            .with_units(3, "domains");
        let rendered = table.to_table();

        assert_eq!(rendered.row_names(), names(&["b", "a"]));
        assert_eq!(rendered.column_names(), names(&["b", "a", "coverage"]));
        assert!(rendered.cell_formatter("a", "coverage").bold);
        assert!(!rendered.cell_formatter("b", "coverage").bold);
        assert!(rendered.cell_formatter("a", "a").align_right);
        assert_eq!(rendered.caption(), Some("3 domains"));
    }
}
