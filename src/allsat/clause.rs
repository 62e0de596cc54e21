#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Clauses as deduplicated literal sets.

use crate::allsat::literal::Lit;
use core::ops::Index;
use smallvec::SmallVec;

/// Inline storage for clause literals; most benchmark clauses are short.
pub type LiteralStorage = SmallVec<[Lit; 8]>;

/// A disjunction of literals.
///
/// Literals are kept sorted and deduplicated, so two clauses over the same
/// literal set compare equal regardless of input order. A clause may contain
/// complementary literals; such a clause is a tautology and is reported by
/// [`Clause::is_tautology`] rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Clause {
    literals: LiteralStorage,
}

impl Clause {
    /// Builds a clause from DIMACS-encoded literals.
    ///
    /// # Panics
    ///
    /// Panics if any literal is `0`.
    #[must_use]
    pub fn new(literals: impl IntoIterator<Item = i32>) -> Self {
        literals.into_iter().map(Lit::from_dimacs).collect()
    }

    /// Number of distinct literals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// `true` for the empty clause, which is trivially unsatisfiable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Iterates the literals in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Lit> {
        self.literals.iter()
    }

    /// Membership test for a literal (polarity-sensitive).
    #[must_use]
    pub fn contains(&self, lit: Lit) -> bool {
        self.literals.binary_search(&lit).is_ok()
    }

    /// `true` if the clause contains a variable in both polarities.
    #[must_use]
    pub fn is_tautology(&self) -> bool {
        self.literals.iter().any(|&lit| self.contains(lit.negated()))
    }

    /// `true` if at least one literal is true under the total assignment.
    #[must_use]
    pub fn is_satisfied_by(&self, model: &[bool]) -> bool {
        self.literals.iter().any(|lit| lit.value_in(model))
    }

    /// The literals as a sorted slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Lit] {
        &self.literals
    }
}

impl FromIterator<Lit> for Clause {
    fn from_iter<T: IntoIterator<Item = Lit>>(iter: T) -> Self {
        let mut literals: LiteralStorage = iter.into_iter().collect();
        literals.sort_unstable();
        literals.dedup();
        Self { literals }
    }
}

impl Index<usize> for Clause {
    type Output = Lit;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl From<Vec<i32>> for Clause {
    fn from(literals: Vec<i32>) -> Self {
        Self::new(literals)
    }
}

impl From<&[i32]> for Clause {
    fn from(literals: &[i32]) -> Self {
        Self::new(literals.iter().copied())
    }
}
