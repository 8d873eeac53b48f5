//! LaTeX `tabular` output for comparison tables.
//!
//! The preamble defines `\bc` for bold cells; headers use `\rot`, which the
//! surrounding document must provide (e.g. via `rotating`). Rules come from
//! `booktabs`.

use crate::compare::{ComparisonTable, MatrixCell, NOT_APPLICABLE};
use crate::experiment::Number;
use std::collections::BTreeMap;
use std::fmt::Write;

const PREAMBLE: &[&str] = &[
    r"\newcommand{\bc}[1]{\textbf{#1}}",
    r"\renewcommand{\arraystretch}{1.2}",
    r"\setlength{\tabcolsep}{3pt}",
    r"\setlength{\cmidrulekern}{8pt}",
];

fn write_line(out: &mut String, cells: &[String]) {
    let _ = writeln!(out, "{} \\\\", cells.join(" & "));
}

fn bold(text: impl std::fmt::Display) -> String {
    format!(r"\bc{{{text}}}")
}

/// Render `table` as a LaTeX tabular.
///
/// Trailing columns follow the win counts after a wider gap: the aggregate
/// column if the table has one, then `Stddev.` when `stddev` is non-empty.
/// Algorithms without a standard deviation show `--`.
#[must_use]
pub fn comparison_tabular(table: &ComparisonTable, stddev: &BTreeMap<String, Number>) -> String {
    let algorithms = table.algorithms();
    let aggregate = table.aggregate();
    let digits = aggregate.map_or(2, |column| column.digits);
    let trailing = usize::from(aggregate.is_some()) + usize::from(!stddev.is_empty());
    let n = algorithms.len();

    let mut out = String::new();
    for line in PREAMBLE {
        let _ = writeln!(out, "{line}");
    }

    let mut spec = format!("@{{}}l{}", "r".repeat(n));
    if trailing > 0 {
        let _ = write!(spec, r"@{{\hskip 8pt}}{}", "r".repeat(trailing));
    }
    let _ = writeln!(out, r"\begin{{tabular}}{{{spec}@{{}}}}");

    let mut header = vec![String::new()];
    header.extend(algorithms.iter().map(|algo| format!(r"\rot{{{algo}}}")));
    if let Some(column) = aggregate {
        header.push(format!(r"\rot{{{}}}", column.label));
    }
    if !stddev.is_empty() {
        header.push(r"\rot{Stddev.}".to_string());
    }
    write_line(&mut out, &header);

    let mut rule = format!(r"\cmidrule[\lightrulewidth](r){{1-{}}}", n + 1);
    if trailing > 0 {
        let _ = write!(
            rule,
            r" \cmidrule[\lightrulewidth]{{{}-{}}}",
            n + 2,
            n + 1 + trailing
        );
    }
    let _ = writeln!(out, "{rule}");

    for (index, (algo, cells)) in table.rows().enumerate() {
        let mut line = vec![algo.to_string()];
        line.extend(cells.iter().map(|cell| match *cell {
            MatrixCell::NotApplicable => NOT_APPLICABLE.to_string(),
            MatrixCell::Wins {
                count,
                highlight: true,
            } => bold(count),
            MatrixCell::Wins { count, .. } => count.to_string(),
        }));
        if let Some(column) = aggregate {
            let value = column.formatted(index);
            line.push(if column.is_max(index) { bold(value) } else { value });
        }
        if !stddev.is_empty() {
            line.push(
                stddev
                    .get(algo)
                    .map_or_else(|| NOT_APPLICABLE.to_string(), |value| value.format(digits)),
            );
        }
        write_line(&mut out, &line);
    }
    let _ = writeln!(out, r"\end{{tabular}}");
    out
}
