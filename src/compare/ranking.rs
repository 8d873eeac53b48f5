//! Ordering algorithms from weakest to strongest.
//!
//! An algorithm's strength is the number of other algorithms it does not
//! lose the majority against. Ties count as non-losses for *both* sides,
//! so the order is not transitive when ties form cycles; it is reported as
//! computed.

use super::WinMatrix;
use crate::experiment::Number;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Sort key of one algorithm, compared field by field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strength {
    /// Opponents with `wins(a, b) >= wins(b, a)`
    pub wins: usize,
    /// Opponents with `wins(a, b) > wins(b, a)`
    pub strict_wins: usize,
    /// Aggregate attribute value, zero when not tracked
    pub total: Number,
}

impl Strength {
    fn cmp_key(&self, other: &Self) -> Ordering {
        self.wins
            .cmp(&other.wins)
            .then(self.strict_wins.cmp(&other.strict_wins))
            .then_with(|| self.total.total_cmp(&other.total))
    }
}

/// Strength of `algorithm` against the other `algorithms`.
#[must_use]
pub fn strength(
    matrix: &WinMatrix,
    algorithms: &[String],
    algorithm: &str,
    totals: Option<&BTreeMap<String, Number>>,
) -> Strength {
    let opponents = algorithms.iter().filter(|other| *other != algorithm);
    let (mut wins, mut strict_wins) = (0, 0);
    for other in opponents {
        if matrix.beats_or_ties(algorithm, other) {
            wins += 1;
        }
        if matrix.strictly_beats(algorithm, other) {
            strict_wins += 1;
        }
    }
    let total = totals
        .and_then(|totals| totals.get(algorithm))
        .copied()
        .unwrap_or(Number::ZERO);
    Strength {
        wins,
        strict_wins,
        total,
    }
}

/// Algorithms sorted by ascending [`Strength`].
///
/// The sort is stable: fully tied algorithms keep their input order.
#[must_use]
pub fn rank(
    matrix: &WinMatrix,
    algorithms: &[String],
    totals: Option<&BTreeMap<String, Number>>,
) -> Vec<String> {
    let mut keyed: Vec<(String, Strength)> = algorithms
        .iter()
        .map(|algo| (algo.clone(), strength(matrix, algorithms, algo, totals)))
        .collect();
    keyed.sort_by(|(_, a), (_, b)| a.cmp_key(b));

    for (algo, key) in &keyed {
        tracing::debug!(
            algorithm = %algo,
            wins = key.wins,
            strict_wins = key.strict_wins,
            total = %key.total,
            "strength"
        );
    }
    keyed.into_iter().map(|(algo, _)| algo).collect()
}

/// [`rank`] when `sort` is set, otherwise the caller's order unchanged.
#[must_use]
pub fn order(
    matrix: &WinMatrix,
    algorithms: &[String],
    totals: Option<&BTreeMap<String, Number>>,
    sort: bool,
) -> Vec<String> {
    if sort {
        rank(matrix, algorithms, totals)
    } else {
        algorithms.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Polarity;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn matrix(entries: &[(&str, &str, usize)]) -> WinMatrix {
        let mut m = WinMatrix::new();
        for &(winner, loser, count) in entries {
            for _ in 0..count {
                m.record(
                    Polarity::LargerIsBetter,
                    (winner, Number::Int(1)),
                    (loser, Number::Int(0)),
                );
            }
        }
        m
    }

    #[test]
    fn test_ties_credit_both_sides() {
        let m = matrix(&[("a", "b", 1), ("b", "a", 1)]);
        let algos = names(&["a", "b"]);
        let sa = strength(&m, &algos, "a", None);
        let sb = strength(&m, &algos, "b", None);
        assert_eq!((sa.wins, sa.strict_wins), (1, 0));
        assert_eq!((sb.wins, sb.strict_wins), (1, 0));
    }

    #[test]
    fn test_rank_weakest_first() {
        let m = matrix(&[("c", "a", 2), ("c", "b", 1), ("b", "a", 3)]);
        let ranked = rank(&m, &names(&["c", "a", "b"]), None);
        assert_eq!(ranked, names(&["a", "b", "c"]));
    }

    #[test]
    fn test_strict_wins_break_ties() {
        // a and b tie each other; a strictly beats c, b only ties c
        let m = matrix(&[("a", "c", 1)]);
        let ranked = rank(&m, &names(&["a", "b", "c"]), None);
        assert_eq!(ranked, names(&["c", "b", "a"]));
    }

    #[test]
    fn test_total_breaks_remaining_ties() {
        let m = WinMatrix::new();
        let totals: BTreeMap<String, Number> = [
            ("a".to_string(), Number::Int(9)),
            ("b".to_string(), Number::Int(4)),
        ]
        .into_iter()
        .collect();
        let ranked = rank(&m, &names(&["a", "b"]), Some(&totals));
        assert_eq!(ranked, names(&["b", "a"]));
    }

    #[test]
    fn test_rank_is_stable_for_full_ties() {
        let m = WinMatrix::new();
        let algos = names(&["z", "m", "a"]);
        assert_eq!(rank(&m, &algos, None), algos);
    }

    #[test]
    fn test_order_without_sort_keeps_input() {
        let m = matrix(&[("b", "a", 1)]);
        let algos = names(&["b", "a"]);
        assert_eq!(order(&m, &algos, None, false), algos);
        assert_eq!(order(&m, &algos, None, true), names(&["a", "b"]));
    }
}
