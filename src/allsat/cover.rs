#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Cube growth: from one satisfying assignment to an implicant cube.
//!
//! The covering reduction runs in a fixed order: build the matrix, take the
//! essential columns, prune dominated rows, then cover the remainder
//! greedily. The union of essential and greedy literals is the cube; its
//! literal-wise negation is the blocking clause handed back to the oracle.

use crate::allsat::clause::Clause;
use crate::allsat::cnf::Cnf;
use crate::allsat::greedy::greedy_cover;
use crate::allsat::literal::Lit;
use crate::allsat::matrix::CoveringMatrix;
use crate::allsat::reduction::{EssentialColumns, MatrixReduction, RowDominance};
use core::fmt;
use itertools::Itertools;

/// A conjunction of literals: a partial assignment, grown here to be an
/// implicant of the formula.
///
/// Literals are sorted by their encoding and hold at most one polarity per
/// variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cube {
    literals: Vec<Lit>,
}

impl Cube {
    /// # Panics
    ///
    /// Panics if a variable occurs in both polarities.
    #[must_use]
    pub fn new(literals: impl IntoIterator<Item = Lit>) -> Self {
        let mut literals: Vec<Lit> = literals.into_iter().collect();
        literals.sort_unstable();
        literals.dedup();

        let distinct_vars = literals.iter().map(|l| l.variable()).unique().count();
        assert_eq!(
            distinct_vars,
            literals.len(),
            "a cube holds at most one literal per variable"
        );

        Self { literals }
    }

    /// Number of literals the cube fixes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// `true` for the universal cube, which constrains nothing.
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

    /// The negation of the cube: a clause falsified exactly by the
    /// assignments consistent with every cube literal. Adding it to the
    /// oracle bars every minterm this cube subsumes.
    #[must_use]
    pub fn blocking_clause(&self) -> Clause {
        self.literals.iter().map(|&l| l.negated()).collect()
    }

    /// `true` if every cube literal is true under the total assignment.
    #[must_use]
    pub fn agrees_with(&self, model: &[bool]) -> bool {
        self.literals.iter().all(|lit| lit.value_in(model))
    }

    /// `true` if every total extension of this cube satisfies `cnf`.
    ///
    /// A clause is satisfied by all extensions exactly when it shares a
    /// literal with the cube (or is a tautology); otherwise some extension
    /// falsifies every clause literal the cube leaves free.
    #[must_use]
    pub fn is_implicant_of(&self, cnf: &Cnf) -> bool {
        cnf.iter()
            .all(|c| c.is_tautology() || c.iter().any(|&lit| self.contains(lit)))
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.literals.iter().join(" "))
    }
}

/// Grows `model` into an implicant cube of `cnf` and derives its blocking
/// clause.
///
/// `cnf` must be the original clause database: blocking clauses from earlier
/// iterations belong in the oracle only. Folding them in here would make the
/// cubes disjoint but slows convergence badly, so it is deliberately not
/// done.
///
/// # Panics
///
/// Panics if `model` is not a model of `cnf` or has the wrong length.
#[must_use]
pub fn grow_cube(model: &[bool], cnf: &Cnf) -> (Cube, Clause) {
    let mut matrix = CoveringMatrix::build(model, cnf);

    let mut literals = EssentialColumns.apply(&mut matrix);
    RowDominance.apply(&mut matrix);
    literals.extend(greedy_cover(&mut matrix));

    let cube = Cube::new(literals);
    let blocking = cube.blocking_clause();
    (cube, blocking)
}
