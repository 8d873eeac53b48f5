//! Logical report tables.
//!
//! Reports populate a [`Table`] cell by cell and choose row and column
//! order; formatting hints travel with the table as [`CellFormatter`]s.
//! The built-in [`fmt::Display`] rendering is a plain pipe markup:
//!
//! ```text
//! || title | col_a | col_b |
//! | row_1  |     3 | **5** |
//! ```
//!
//! Bold cells are wrapped in `**`, right-aligned cells are padded on the
//! left, and an optional caption follows the last row.

use crate::experiment::Number;
use std::collections::BTreeMap;
use std::fmt;

/// Per-cell formatting override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellFormatter {
    /// Render in bold
    pub bold: bool,
    /// Align to the right edge of the column
    pub align_right: bool,
}

impl CellFormatter {
    /// Bold, right-aligned
    #[must_use]
    pub const fn highlight() -> Self {
        Self {
            bold: true,
            align_right: true,
        }
    }

    /// Right-aligned only
    #[must_use]
    pub const fn right() -> Self {
        Self {
            bold: false,
            align_right: true,
        }
    }
}

/// Content of one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Numeric content, eligible for summary functions
    Number(Number),
    /// Literal text
    Text(String),
}

impl CellValue {
    fn render(&self, digits: usize) -> String {
        match self {
            Self::Number(n) => n.format(digits),
            Self::Text(s) => s.clone(),
        }
    }

    fn as_number(&self) -> Option<Number> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl From<Number> for CellValue {
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

impl From<usize> for CellValue {
    fn from(n: usize) -> Self {
        Self::Number(Number::from(n))
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Column summary applied to the numeric cells of each column.
pub type SummaryFn = fn(&[Number]) -> Number;

/// Sum summary.
#[must_use]
pub fn sum(values: &[Number]) -> Number {
    values.iter().copied().sum()
}

/// Row-by-column table with ordering and formatting hints.
#[derive(Debug, Clone, Default)]
pub struct Table {
    title: String,
    caption: Option<String>,
    digits: usize,
    cells: BTreeMap<String, BTreeMap<String, CellValue>>,
    row_order: Vec<String>,
    column_order: Vec<String>,
    formatters: BTreeMap<(String, String), CellFormatter>,
    summaries: Vec<(String, SummaryFn)>,
}

impl Table {
    /// Empty table with two-digit float precision
    #[must_use]
    pub fn new() -> Self {
        Self {
            digits: 2,
            ..Default::default()
        }
    }

    /// Set the title shown in the header's first cell
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set float precision for numeric cells
    #[must_use]
    pub fn with_digits(mut self, digits: usize) -> Self {
        self.digits = digits;
        self
    }

    /// Set the caption printed below the table
    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = Some(caption.into());
    }

    /// Caption, if set
    #[must_use]
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    /// Insert or replace a cell
    pub fn add_cell(&mut self, row: &str, column: &str, value: impl Into<CellValue>) {
        self.cells
            .entry(row.to_string())
            .or_default()
            .insert(column.to_string(), value.into());
    }

    /// Cell content
    #[must_use]
    pub fn get(&self, row: &str, column: &str) -> Option<&CellValue> {
        self.cells.get(row)?.get(column)
    }

    /// Rows listed here come first, in this order
    pub fn set_row_order(&mut self, order: Vec<String>) {
        self.row_order = order;
    }

    /// Columns listed here come first, in this order
    pub fn set_column_order(&mut self, order: Vec<String>) {
        self.column_order = order;
    }

    /// Override formatting of one cell
    pub fn set_cell_formatter(&mut self, row: &str, column: &str, formatter: CellFormatter) {
        self.formatters
            .insert((row.to_string(), column.to_string()), formatter);
    }

    /// Formatting of one cell
    #[must_use]
    pub fn cell_formatter(&self, row: &str, column: &str) -> CellFormatter {
        self.formatters
            .get(&(row.to_string(), column.to_string()))
            .copied()
            .unwrap_or_default()
    }

    /// Append a summary row computed per column
    pub fn add_summary_function(&mut self, name: impl Into<String>, function: SummaryFn) {
        self.summaries.push((name.into(), function));
    }

    /// Row names: the explicit order, then remaining rows sorted
    #[must_use]
    pub fn row_names(&self) -> Vec<String> {
        merge_order(&self.row_order, self.cells.keys())
    }

    /// Column names: the explicit order, then remaining columns sorted
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        let mut seen: Vec<&String> = self.cells.values().flat_map(BTreeMap::keys).collect();
        seen.sort();
        seen.dedup();
        merge_order(&self.column_order, seen.into_iter())
    }

    /// Summary rows: name and one value per column (None when a column has
    /// no numeric cells)
    #[must_use]
    pub fn summary_rows(&self) -> Vec<(String, Vec<Option<Number>>)> {
        let columns = self.column_names();
        self.summaries
            .iter()
            .map(|(name, function)| {
                let values = columns
                    .iter()
                    .map(|column| {
                        let numbers: Vec<Number> = self
                            .cells
                            .values()
                            .filter_map(|row| row.get(column).and_then(CellValue::as_number))
                            .collect();
                        (!numbers.is_empty()).then(|| function(&numbers))
                    })
                    .collect();
                (name.clone(), values)
            })
            .collect()
    }

    fn rendered_rows(&self, columns: &[String]) -> Vec<Vec<(String, bool)>> {
        let mut rows = Vec::new();
        let mut header = vec![(self.title.clone(), false)];
        header.extend(columns.iter().map(|c| (c.clone(), false)));
        rows.push(header);

        for row in self.row_names() {
            let mut line = vec![(row.clone(), false)];
            for column in columns {
                let formatter = self.cell_formatter(&row, column);
                let text = self
                    .get(&row, column)
                    .map(|value| value.render(self.digits))
                    .unwrap_or_default();
                let text = if formatter.bold && !text.is_empty() {
                    format!("**{text}**")
                } else {
                    text
                };
                line.push((text, formatter.align_right));
            }
            rows.push(line);
        }

        for (name, values) in self.summary_rows() {
            let mut line = vec![(name, false)];
            line.extend(values.into_iter().map(|value| {
                (value.map(|n| n.format(self.digits)).unwrap_or_default(), true)
            }));
            rows.push(line);
        }
        rows
    }
}

fn merge_order<'a>(explicit: &[String], present: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut names: Vec<String> = explicit.to_vec();
    for name in present {
        if !names.contains(name) {
            names.push(name.clone());
        }
    }
    names
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self.column_names();
        let rows = self.rendered_rows(&columns);

        let mut widths = vec![0usize; columns.len() + 1];
        for row in &rows {
            for (width, (text, _)) in widths.iter_mut().zip(row) {
                *width = (*width).max(text.chars().count());
            }
        }

        for (index, row) in rows.iter().enumerate() {
            f.write_str(if index == 0 { "||" } else { "|" })?;
            for ((text, right), &width) in row.iter().zip(&widths) {
                if *right {
                    write!(f, " {text:>width$} |")?;
                } else {
                    write!(f, " {text:<width$} |")?;
                }
            }
            writeln!(f)?;
        }
        if let Some(caption) = &self.caption {
            writeln!(f)?;
            writeln!(f, "{caption}")?;
        }
        Ok(())
    }
}
