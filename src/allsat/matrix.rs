#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The unate covering matrix for a single satisfying assignment.
//!
//! Rows are clauses of the original database, columns are the positions of
//! the signed minterm (column `c` is variable `c + 1` with the polarity the
//! model gives it). A cell is set when the column's literal is a member of
//! the row's clause, i.e. when keeping that literal in the cube is enough to
//! satisfy that clause on its own.
//!
//! Rows carry their original clause index as a label, so the reductions can
//! delete rows freely without positional indices drifting. The matrix is
//! scoped to one cube-growth call and discarded afterwards.

use crate::allsat::cnf::Cnf;
use crate::allsat::literal::Lit;
use bit_vec::BitVec;

/// One row of the covering matrix: the satisfier set of a single clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Index of the clause in the original database.
    pub clause: usize,
    cells: BitVec,
}

impl Row {
    /// Whether the column's literal satisfies this row's clause.
    #[must_use]
    pub fn get(&self, column: usize) -> bool {
        self.cells.get(column) == Some(true)
    }

    /// Columns whose literal satisfies this row's clause.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, b)| b.then_some(i))
    }

    /// The row sum: how many columns satisfy this clause.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.cells.iter().filter(|&b| b).count()
    }

    /// `true` when every satisfier of `self` also satisfies `other`: any
    /// column choice covering `self` then covers `other` for free.
    #[must_use]
    pub fn implies(&self, other: &Self) -> bool {
        self.ones().all(|c| other.get(c))
    }
}

/// The covering matrix, with its column labels (the signed minterm).
#[derive(Debug, Clone, PartialEq)]
pub struct CoveringMatrix {
    columns: Vec<Lit>,
    rows: Vec<Row>,
}

impl CoveringMatrix {
    /// Builds the matrix for `model` against the original clause database.
    ///
    /// Cells are filled through the database's occurrence index, so the cost
    /// is proportional to the number of literal occurrences rather than
    /// clauses × variables.
    ///
    /// # Panics
    ///
    /// - If `model` does not cover every declared variable (oracle contract
    ///   violation).
    /// - If some clause ends up with an empty row. A true model satisfies
    ///   every clause, so an all-zero row means the model is not a model of
    ///   this database.
    #[must_use]
    pub fn build(model: &[bool], cnf: &Cnf) -> Self {
        assert_eq!(
            model.len(),
            cnf.num_vars(),
            "model length does not match the declared variable count"
        );

        let columns: Vec<Lit> = model
            .iter()
            .enumerate()
            .map(|(i, &value)| Lit::new(u32::try_from(i + 1).expect("variable id overflow"), value))
            .collect();

        let mut cells = vec![BitVec::from_elem(columns.len(), false); cnf.len()];
        for (column, &lit) in columns.iter().enumerate() {
            for &row in cnf.occurrences_of(lit) {
                cells[row].set(column, true);
            }
        }

        let rows: Vec<Row> = cells
            .into_iter()
            .enumerate()
            .map(|(clause, cells)| Row { clause, cells })
            .collect();

        for row in &rows {
            assert!(
                row.count_ones() > 0,
                "clause {} is unsatisfied by the model: not a model of this database",
                row.clause
            );
        }

        Self { columns, rows }
    }

    /// The signed minterm: column labels, one literal per variable.
    #[must_use]
    pub fn columns(&self) -> &[Lit] {
        &self.columns
    }

    /// The surviving rows.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of surviving rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// `true` once every row has been covered or pruned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of set cells per column over the surviving rows.
    #[must_use]
    pub fn column_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.columns.len()];
        for row in &self.rows {
            for c in row.ones() {
                counts[c] += 1;
            }
        }
        counts
    }

    /// Drops every row with a set cell in `column` (those clauses are
    /// covered by the column's literal).
    pub fn remove_rows_covered_by(&mut self, column: usize) {
        self.rows.retain(|row| !row.get(column));
    }

    /// Keeps only the rows the predicate accepts.
    pub fn retain_rows<F: FnMut(&Row) -> bool>(&mut self, keep: F) {
        self.rows.retain(keep);
    }

    /// Test constructor: a matrix from explicit column labels and cell rows.
    #[cfg(test)]
    pub(crate) fn from_cells(columns: Vec<Lit>, rows: Vec<Vec<bool>>) -> Self {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(clause, bits)| {
                let mut cells = BitVec::from_elem(columns.len(), false);
                for (i, bit) in bits.into_iter().enumerate() {
                    cells.set(i, bit);
                }
                Row { clause, cells }
            })
            .collect();
        Self { columns, rows }
    }
}
