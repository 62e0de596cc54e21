#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The clause database.
//!
//! A [`Cnf`] owns the original clauses of the formula for the lifetime of the
//! enumeration. Identical clauses are deduplicated at construction: the row
//! dominance reduction treats duplicate rows as mutually implying, so a
//! duplicated constraint must never reach it as two rows.
//!
//! The database also maintains an occurrence index from each literal to the
//! clauses containing it, which lets the covering-matrix builder touch only
//! the literals that actually occur instead of scanning every clause for
//! every variable.

use crate::allsat::clause::Clause;
use crate::allsat::literal::Lit;
use rustc_hash::{FxHashMap, FxHashSet};

/// The original clause database, immutable for the enumeration's lifetime.
#[derive(Debug, Clone, Default)]
pub struct Cnf {
    clauses: Vec<Clause>,
    num_vars: usize,
    occurrences: FxHashMap<Lit, Vec<usize>>,
}

impl Cnf {
    /// Builds a clause database from DIMACS-encoded clauses.
    ///
    /// Duplicate clauses are collapsed (first occurrence wins) and the
    /// variable count is derived from the largest variable mentioned.
    ///
    /// # Panics
    ///
    /// Panics if any clause contains a `0` literal.
    #[must_use]
    pub fn new<I, C>(clauses: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = i32>,
    {
        let mut seen = FxHashSet::default();
        let mut cnf = Self::default();

        for clause in clauses {
            let clause = Clause::new(clause);
            if seen.insert(clause.clone()) {
                cnf.push(clause);
            }
        }

        cnf
    }

    fn push(&mut self, clause: Clause) {
        let index = self.clauses.len();
        for &lit in clause.iter() {
            self.num_vars = self.num_vars.max(lit.variable() as usize);
            self.occurrences.entry(lit).or_default().push(index);
        }
        self.clauses.push(clause);
    }

    /// Raises the declared variable count, e.g. from a DIMACS `p` line that
    /// declares variables no clause mentions.
    pub fn declare_vars(&mut self, num_vars: usize) {
        self.num_vars = self.num_vars.max(num_vars);
    }

    /// The declared variable count.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Number of (deduplicated) clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// `true` when the database holds no clauses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// The clauses, in input order.
    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Iterates the clauses in input order.
    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Indices of the clauses containing `lit`.
    #[must_use]
    pub fn occurrences_of(&self, lit: Lit) -> &[usize] {
        self.occurrences.get(&lit).map_or(&[], Vec::as_slice)
    }

    /// Total number of literal occurrences across all clauses.
    #[must_use]
    pub fn num_literals(&self) -> usize {
        self.clauses.iter().map(Clause::len).sum()
    }

    /// Checks a total assignment against every clause.
    #[must_use]
    pub fn verify(&self, model: &[bool]) -> bool {
        model.len() >= self.num_vars
            && self.clauses.iter().all(|c| c.is_satisfied_by(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derives_num_vars() {
        let cnf = Cnf::new(vec![vec![1, -4], vec![2, 3]]);
        assert_eq!(cnf.num_vars(), 4);
        assert_eq!(cnf.len(), 2);
    }

    #[test]
    fn test_dedups_clauses() {
        let cnf = Cnf::new(vec![vec![1, 2], vec![2, 1], vec![-1]]);
        assert_eq!(cnf.len(), 2);
    }

    #[test]
    fn test_occurrence_index() {
        let cnf = Cnf::new(vec![vec![1, 2], vec![-1, 2], vec![1, -2]]);
        assert_eq!(cnf.occurrences_of(Lit::from_dimacs(1)), &[0, 2]);
        assert_eq!(cnf.occurrences_of(Lit::from_dimacs(2)), &[0, 1]);
        assert_eq!(cnf.occurrences_of(Lit::from_dimacs(-3)), &[] as &[usize]);
    }

    #[test]
    fn test_declare_vars_only_grows() {
        let mut cnf = Cnf::new(vec![vec![1, 2]]);
        cnf.declare_vars(5);
        assert_eq!(cnf.num_vars(), 5);
        cnf.declare_vars(1);
        assert_eq!(cnf.num_vars(), 5);
    }

    #[test]
    fn test_verify() {
        let cnf = Cnf::new(vec![vec![1, 2], vec![-1, 2]]);
        assert!(cnf.verify(&[true, true]));
        assert!(cnf.verify(&[false, true]));
        assert!(!cnf.verify(&[true, false]));
        assert!(!cnf.verify(&[true]));
    }
}
