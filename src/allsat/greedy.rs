#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Greedy set cover over the reduced covering matrix.

use crate::allsat::literal::Lit;
use crate::allsat::matrix::CoveringMatrix;

/// Covers every remaining row with the classical greedy heuristic: pick the
/// column satisfying the most surviving rows, drop the rows it covers,
/// repeat. Greedy trades optimality for speed (exact set cover is NP-hard
/// and this runs once per enumerated cube).
///
/// Ties on the column sum break towards the lowest column index, i.e. the
/// lowest variable id, so the output is deterministic.
///
/// Terminates in at most `row_count` iterations: every row has at least one
/// satisfier, so each pick removes at least one row.
///
/// # Panics
///
/// Panics if a row with no satisfier is encountered. That cannot happen for
/// a matrix built from a true model and only reduced by the lossless rules;
/// its occurrence means an upstream contract was broken.
#[must_use]
pub fn greedy_cover(matrix: &mut CoveringMatrix) -> Vec<Lit> {
    let mut cover = Vec::new();

    while !matrix.is_empty() {
        let counts = matrix.column_counts();
        let (best, &best_count) = counts
            .iter()
            .enumerate()
            .max_by_key(|&(c, &count)| (count, std::cmp::Reverse(c)))
            .expect("matrix with rows but no columns");

        assert!(
            best_count > 0,
            "a row with no satisfier reached the greedy cover"
        );

        cover.push(matrix.columns()[best]);
        matrix.remove_rows_covered_by(best);
    }

    cover
}
