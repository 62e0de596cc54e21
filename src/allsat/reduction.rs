#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Exact reductions of the covering matrix.
//!
//! Both rules are lossless: they never change which column selections cover
//! the surviving rows, they only shrink the instance the greedy pass has to
//! deal with.

use crate::allsat::literal::Lit;
use crate::allsat::matrix::CoveringMatrix;
use std::collections::BTreeSet;

/// A reduction pass over the covering matrix.
///
/// A pass may force literals into the cover (the essential rule does); those
/// are returned so the orchestrator can union them into the cube.
pub trait MatrixReduction {
    /// Applies the rule in place and returns any literals it forces into
    /// the cover.
    fn apply(&self, matrix: &mut CoveringMatrix) -> Vec<Lit>;
}

/// The necessary-inclusion rule for covering problems.
///
/// A column is essential when some row has exactly one set cell and it sits
/// in that column: the column's literal is the sole satisfier of that clause,
/// so omitting it would leave the clause uncoverable. Every row covered by an
/// essential column is deleted afterwards.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct EssentialColumns;

impl MatrixReduction for EssentialColumns {
    fn apply(&self, matrix: &mut CoveringMatrix) -> Vec<Lit> {
        // BTreeSet dedups columns marked by several rows and fixes the
        // emission order.
        let essential: BTreeSet<usize> = matrix
            .rows()
            .iter()
            .filter(|row| row.count_ones() == 1)
            .filter_map(|row| row.ones().next())
            .collect();

        matrix.retain_rows(|row| !essential.iter().any(|&c| row.get(c)));

        essential.iter().map(|&c| matrix.columns()[c]).collect()
    }
}

/// The row dominance rule.
///
/// Row `A` implies row `B` when every satisfier of `A` also satisfies `B`;
/// `B` is then redundant and is dropped. Mutually-implying rows are equal as
/// satisfier sets; exactly one of them (the lowest-indexed) is retained, so
/// a constraint is never lost to pairwise removal.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct RowDominance;

impl MatrixReduction for RowDominance {
    fn apply(&self, matrix: &mut CoveringMatrix) -> Vec<Lit> {
        let rows = matrix.rows();
        let n = rows.len();
        let mut dominated = vec![false; n];

        for a in 0..n {
            for b in 0..n {
                if a == b || dominated[b] || !rows[a].implies(&rows[b]) {
                    continue;
                }
                if rows[b].implies(&rows[a]) && b < a {
                    // Equal rows: the earlier one survives.
                    continue;
                }
                dominated[b] = true;
            }
        }

        let mut index = 0;
        matrix.retain_rows(|_| {
            let keep = !dominated[index];
            index += 1;
            keep
        });

        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allsat::cnf::Cnf;
    use crate::allsat::matrix::CoveringMatrix;

    fn lits(values: &[i32]) -> Vec<Lit> {
        values.iter().map(|&v| Lit::from_dimacs(v)).collect()
    }

    #[test]
    fn test_essential_columns() {
        // Rows 1 and 2 are singletons, forcing columns 1 and 0; every row is
        // covered by one of them.
        let mut matrix = CoveringMatrix::from_cells(
            lits(&[1, 2]),
            vec![
                vec![true, true],
                vec![false, true],
                vec![true, false],
            ],
        );

        let essential = EssentialColumns.apply(&mut matrix);
        assert_eq!(essential, lits(&[1, 2]));
        assert!(matrix.is_empty());
    }

    #[test]
    fn test_essential_leaves_uncovered_rows() {
        let mut matrix = CoveringMatrix::from_cells(
            lits(&[1, 2, 3]),
            vec![
                vec![true, false, false],
                vec![false, true, true],
            ],
        );

        let essential = EssentialColumns.apply(&mut matrix);
        assert_eq!(essential, lits(&[1]));
        assert_eq!(matrix.row_count(), 1);
        assert_eq!(matrix.rows()[0].clause, 1);
    }

    #[test]
    fn test_essential_none() {
        let mut matrix = CoveringMatrix::from_cells(
            lits(&[1, 2]),
            vec![vec![true, true], vec![true, true]],
        );
        assert!(EssentialColumns.apply(&mut matrix).is_empty());
        assert_eq!(matrix.row_count(), 2);
    }

    #[test]
    fn test_essential_necessity() {
        // Omitting the essential literal leaves its singleton row uncovered
        // by any other column.
        let matrix = CoveringMatrix::from_cells(
            lits(&[1, 2, 3]),
            vec![
                vec![false, true, false],
                vec![true, false, true],
            ],
        );
        let singleton = &matrix.rows()[0];
        let forced = singleton.ones().next().unwrap();
        let others: Vec<usize> = (0..3).filter(|&c| c != forced).collect();
        assert!(others.iter().all(|&c| !singleton.get(c)));
    }

    #[test]
    fn test_row_dominance_removes_implied() {
        // Row 0 implies rows 1 and 2; only row 0 survives alongside row 3.
        let mut matrix = CoveringMatrix::from_cells(
            lits(&[1, 2, 3]),
            vec![
                vec![true, false, false],
                vec![true, true, false],
                vec![true, false, true],
                vec![false, true, false],
            ],
        );

        RowDominance.apply(&mut matrix);
        let kept: Vec<usize> = matrix.rows().iter().map(|r| r.clause).collect();
        assert_eq!(kept, vec![0, 3]);
    }

    #[test]
    fn test_row_dominance_keeps_one_duplicate() {
        let mut matrix = CoveringMatrix::from_cells(
            lits(&[1, 2]),
            vec![
                vec![true, false],
                vec![true, false],
                vec![true, false],
            ],
        );

        RowDominance.apply(&mut matrix);
        let kept: Vec<usize> = matrix.rows().iter().map(|r| r.clause).collect();
        assert_eq!(kept, vec![0]);
    }

    fn covers_all(matrix: &CoveringMatrix, selection: &[usize]) -> bool {
        matrix
            .rows()
            .iter()
            .all(|row| selection.iter().any(|&c| row.get(c)))
    }

    #[test]
    fn test_dominance_soundness_randomized() {
        // Any column subset covers the pruned matrix iff it covers the full
        // matrix: the reduction is lossless.
        let mut rng = fastrand::Rng::with_seed(0x5eed);

        for _ in 0..200 {
            let cols = rng.usize(1..=5);
            let rows = rng.usize(1..=6);
            let cells: Vec<Vec<bool>> = (0..rows)
                .map(|_| {
                    let mut row: Vec<bool> = (0..cols).map(|_| rng.bool()).collect();
                    if row.iter().all(|&b| !b) {
                        row[rng.usize(0..cols)] = true;
                    }
                    row
                })
                .collect();
            let columns: Vec<Lit> = (1..=cols)
                .map(|v| Lit::new(u32::try_from(v).unwrap(), true))
                .collect();

            let full = CoveringMatrix::from_cells(columns.clone(), cells.clone());
            let mut pruned = CoveringMatrix::from_cells(columns, cells);
            RowDominance.apply(&mut pruned);

            for mask in 0..(1usize << cols) {
                let selection: Vec<usize> = (0..cols).filter(|c| mask & (1 << c) != 0).collect();
                assert_eq!(
                    covers_all(&full, &selection),
                    covers_all(&pruned, &selection)
                );
            }
        }
    }

    #[test]
    fn test_reductions_on_built_matrix() {
        let cnf = Cnf::new(vec![vec![1, 2], vec![-1, 2], vec![1, -2]]);
        let mut matrix = CoveringMatrix::build(&[true, true], &cnf);

        let essential = EssentialColumns.apply(&mut matrix);
        assert_eq!(essential, lits(&[1, 2]));
        RowDominance.apply(&mut matrix);
        assert!(matrix.is_empty());
    }
}
