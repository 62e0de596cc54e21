#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The incremental SAT oracle consumed by the enumeration driver.
//!
//! The driver never inspects the oracle's internals; it only needs the four
//! operations of [`Oracle`]. Any incremental solver can sit behind the trait.
//! [`DpllOracle`] is the bundled implementation: a small recursive DPLL with
//! unit propagation, enough to run the enumerator end to end on benchmark
//! instances without an external solver binding.

use crate::allsat::clause::Clause;
use crate::allsat::cnf::Cnf;
use crate::allsat::literal::{Lit, Variable};

/// An incremental SAT oracle.
pub trait Oracle {
    /// Declares a fresh variable and returns its id.
    fn new_variable(&mut self) -> Variable;

    /// Adds a clause to the oracle's database. An empty clause makes the
    /// database unsatisfiable.
    fn add_clause(&mut self, clause: &Clause);

    /// Decides satisfiability of the current database.
    fn solve(&mut self) -> bool;

    /// The model found by the last [`Oracle::solve`] call, one `bool` per
    /// declared variable.
    ///
    /// Valid only immediately after a satisfiable `solve()`; calling it in
    /// any other state is a contract violation and panics.
    fn model(&self) -> &[bool];
}

/// A recursive DPLL solver with unit propagation.
///
/// Each `solve()` call searches from scratch over the accumulated clause
/// database; there is no clause learning or state reuse between calls. That
/// is plenty for the instance sizes the cube cover is tested on, and keeps
/// the oracle a drop-in stand-in for a real incremental solver.
#[derive(Debug, Clone, Default)]
pub struct DpllOracle {
    num_vars: usize,
    clauses: Vec<Clause>,
    model: Option<Vec<bool>>,
}

impl DpllOracle {
    /// An empty oracle: no variables, no clauses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an oracle pre-loaded with a formula: one declared variable per
    /// `cnf` variable and a copy of every clause.
    #[must_use]
    pub fn from_cnf(cnf: &Cnf) -> Self {
        let mut oracle = Self::new();
        for _ in 0..cnf.num_vars() {
            oracle.new_variable();
        }
        for clause in cnf.iter() {
            oracle.add_clause(clause);
        }
        oracle
    }

    fn literal_value(assignment: &[Option<bool>], lit: Lit) -> Option<bool> {
        assignment[lit.variable() as usize - 1].map(|b| if lit.polarity() { b } else { !b })
    }

    fn clause_satisfied(assignment: &[Option<bool>], clause: &Clause) -> bool {
        clause
            .iter()
            .any(|&lit| Self::literal_value(assignment, lit) == Some(true))
    }

    /// Assigns every literal forced by a unit clause. Returns `false` on a
    /// conflict (some clause has all literals false).
    fn propagate(&self, assignment: &mut [Option<bool>]) -> bool {
        loop {
            let mut changed = false;

            for clause in &self.clauses {
                if Self::clause_satisfied(assignment, clause) {
                    continue;
                }

                let mut unassigned = None;
                let mut open = 0usize;
                for &lit in clause.iter() {
                    if Self::literal_value(assignment, lit).is_none() {
                        open += 1;
                        unassigned = Some(lit);
                    }
                }

                match (open, unassigned) {
                    (0, _) => return false,
                    (1, Some(lit)) => {
                        assignment[lit.variable() as usize - 1] = Some(lit.polarity());
                        changed = true;
                    }
                    _ => {}
                }
            }

            if !changed {
                return true;
            }
        }
    }

    fn search(&self, assignment: &mut Vec<Option<bool>>) -> bool {
        if !self.propagate(assignment) {
            return false;
        }

        if self
            .clauses
            .iter()
            .all(|c| Self::clause_satisfied(assignment, c))
        {
            return true;
        }

        let var = assignment
            .iter()
            .position(Option::is_none)
            .expect("no unassigned variable despite unsatisfied clauses");

        for value in [true, false] {
            let mut branch = assignment.clone();
            branch[var] = Some(value);
            if self.search(&mut branch) {
                *assignment = branch;
                return true;
            }
        }

        false
    }
}

impl Oracle for DpllOracle {
    fn new_variable(&mut self) -> Variable {
        self.num_vars += 1;
        Variable::try_from(self.num_vars).expect("variable count overflowed u32")
    }

    fn add_clause(&mut self, clause: &Clause) {
        self.model = None;
        self.clauses.push(clause.clone());
    }

    fn solve(&mut self) -> bool {
        let mut assignment = vec![None; self.num_vars];

        if self.search(&mut assignment) {
            // "Don't care" variables default to false so the model is total.
            self.model = Some(assignment.iter().map(|v| v.unwrap_or(false)).collect());
            true
        } else {
            self.model = None;
            false
        }
    }

    fn model(&self) -> &[bool] {
        self.model
            .as_deref()
            .expect("model() called without a preceding satisfiable solve()")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_sat() {
        let cnf = Cnf::new(vec![vec![1, 2], vec![-1, 2]]);
        let mut oracle = DpllOracle::from_cnf(&cnf);
        assert!(oracle.solve());
        assert!(cnf.verify(oracle.model()));
        assert_eq!(oracle.model().len(), 2);
    }

    #[test]
    fn test_solve_unsat() {
        let cnf = Cnf::new(vec![vec![1], vec![-1]]);
        let mut oracle = DpllOracle::from_cnf(&cnf);
        assert!(!oracle.solve());
    }

    #[test]
    fn test_incremental_blocking() {
        let cnf = Cnf::new(vec![vec![1]]);
        let mut oracle = DpllOracle::from_cnf(&cnf);
        assert!(oracle.solve());
        assert!(oracle.model()[0]);

        oracle.add_clause(&Clause::new(vec![-1]));
        assert!(!oracle.solve());
    }

    #[test]
    fn test_empty_clause_is_unsat() {
        let mut oracle = DpllOracle::new();
        oracle.new_variable();
        oracle.add_clause(&Clause::default());
        assert!(!oracle.solve());
    }

    #[test]
    #[should_panic(expected = "model() called without a preceding satisfiable solve()")]
    fn test_model_without_solve() {
        let oracle = DpllOracle::new();
        let _model = oracle.model();
    }

    #[test]
    fn test_model_covers_declared_but_unmentioned_vars() {
        let mut cnf = Cnf::new(vec![vec![1]]);
        cnf.declare_vars(3);
        let mut oracle = DpllOracle::from_cnf(&cnf);
        assert!(oracle.solve());
        assert_eq!(oracle.model().len(), 3);
    }
}
