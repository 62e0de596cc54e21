#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Signed literal representation.
//!
//! A literal is a variable or its negation. It is stored as a signed non-zero
//! `i32` whose sign carries the polarity and whose magnitude is the variable
//! id, matching the DIMACS convention. Zero is never a valid literal and is
//! rejected at construction time.

use core::fmt;
use core::ops::{Neg, Not};

/// A propositional variable, identified by a positive integer `1..=num_vars`.
pub type Variable = u32;

/// A literal: a variable with a polarity.
///
/// Equality, hashing and ordering are defined on the underlying integer, so
/// `x` and `-x` are distinct values of the same variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lit(i32);

impl Lit {
    /// Creates a literal for `var` with the given polarity (`true` = positive).
    ///
    /// # Panics
    ///
    /// Panics if `var` is `0` or does not fit in an `i32`.
    #[must_use]
    pub fn new(var: Variable, polarity: bool) -> Self {
        assert_ne!(var, 0, "variable ids start at 1");
        let var = i32::try_from(var).expect("variable id overflowed i32");
        if polarity { Self(var) } else { Self(-var) }
    }

    /// Creates a literal from its DIMACS integer encoding.
    ///
    /// # Panics
    ///
    /// Panics if `value` is `0`, which is the DIMACS clause terminator and
    /// never a literal.
    #[must_use]
    pub fn from_dimacs(value: i32) -> Self {
        assert_ne!(value, 0, "0 is not a valid literal");
        Self(value)
    }

    /// The variable this literal mentions.
    #[must_use]
    pub const fn variable(self) -> Variable {
        self.0.unsigned_abs()
    }

    /// `true` for a positive literal, `false` for a negated one.
    #[must_use]
    pub const fn polarity(self) -> bool {
        self.0 > 0
    }

    /// The complementary literal over the same variable.
    #[must_use]
    pub const fn negated(self) -> Self {
        Self(-self.0)
    }

    /// The DIMACS integer encoding of this literal.
    #[must_use]
    pub const fn to_dimacs(self) -> i32 {
        self.0
    }

    /// Evaluates the literal under a total assignment (`model[i]` is the
    /// value of variable `i + 1`).
    #[must_use]
    pub fn value_in(self, model: &[bool]) -> bool {
        let value = model[self.variable() as usize - 1];
        if self.polarity() { value } else { !value }
    }
}

impl Neg for Lit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for Lit {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Lit> for i32 {
    fn from(lit: Lit) -> Self {
        lit.to_dimacs()
    }
}
