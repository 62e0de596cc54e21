#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The enumeration driver.
//!
//! The outer loop asks the oracle for a model, grows the model into an
//! implicant cube, records the cube, and feeds the cube's blocking clause
//! back to the oracle, until the oracle reports unsatisfiable. The cover is
//! complete (every satisfying assignment lies in some cube) but cubes may
//! overlap.
//!
//! The driver owns the original clause database and the accumulated cover;
//! only the oracle's internal database grows with blocking clauses.

use crate::allsat::cnf::Cnf;
use crate::allsat::cover::{Cube, grow_cube};
use crate::allsat::oracle::{DpllOracle, Oracle};

/// The result of enumerating a formula's solution space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The formula admits no satisfying assignment; the cover is empty.
    Unsatisfiable,
    /// The formula is satisfiable; the cover is a disjunction of implicant
    /// cubes whose union is exactly the solution space.
    Satisfiable(Vec<Cube>),
}

impl Outcome {
    /// `true` when at least one cube was enumerated.
    #[must_use]
    pub const fn is_satisfiable(&self) -> bool {
        matches!(self, Self::Satisfiable(_))
    }

    /// The enumerated cover; empty for an unsatisfiable formula.
    #[must_use]
    pub fn cover(&self) -> &[Cube] {
        match self {
            Self::Unsatisfiable => &[],
            Self::Satisfiable(cover) => cover,
        }
    }
}

/// The enumeration state machine.
///
/// Yields one cube per iteration as an `Iterator`; [`Enumerator::run`]
/// drives it to completion and folds the cubes into an [`Outcome`].
#[derive(Debug)]
pub struct Enumerator<'a, O: Oracle = DpllOracle> {
    cnf: &'a Cnf,
    oracle: O,
    iterations: usize,
}

impl<'a> Enumerator<'a, DpllOracle> {
    /// An enumerator over `cnf` backed by the bundled DPLL oracle.
    #[must_use]
    pub fn new(cnf: &'a Cnf) -> Self {
        Self::with_oracle(cnf, DpllOracle::from_cnf(cnf))
    }
}

impl<'a, O: Oracle> Enumerator<'a, O> {
    /// An enumerator over `cnf` backed by a caller-supplied oracle, already
    /// loaded with `cnf`'s clauses.
    #[must_use]
    pub fn with_oracle(cnf: &'a Cnf, oracle: O) -> Self {
        Self {
            cnf,
            oracle,
            iterations: 0,
        }
    }

    /// Number of satisfiable `solve()` calls so far, i.e. cubes produced.
    #[must_use]
    pub const fn iterations(&self) -> usize {
        self.iterations
    }

    /// Runs the loop to exhaustion. Zero cubes means the original formula
    /// was unsatisfiable.
    #[must_use]
    pub fn run(mut self) -> Outcome {
        let mut cover = Vec::new();
        for cube in &mut self {
            cover.push(cube);
        }

        if cover.is_empty() {
            Outcome::Unsatisfiable
        } else {
            Outcome::Satisfiable(cover)
        }
    }
}

impl<O: Oracle> Iterator for Enumerator<'_, O> {
    type Item = Cube;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.oracle.solve() {
            return None;
        }

        let model = self.oracle.model().to_vec();
        // The cube is grown against the original clause database; the
        // blocking clause goes to the oracle alone.
        let (cube, blocking) = grow_cube(&model, self.cnf);
        self.oracle.add_clause(&blocking);
        self.iterations += 1;

        Some(cube)
    }
}

/// Convenience entry point: enumerate `cnf` with the bundled oracle.
#[must_use]
pub fn enumerate(cnf: &Cnf) -> Outcome {
    Enumerator::new(cnf).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allsat::literal::Lit;

    fn cube_of(values: &[i32]) -> Cube {
        Cube::new(values.iter().map(|&v| Lit::from_dimacs(v)))
    }

    /// All satisfying total assignments of `cnf`, by brute force.
    fn all_models(cnf: &Cnf) -> Vec<Vec<bool>> {
        let n = cnf.num_vars();
        (0..(1u32 << n))
            .map(|bits| (0..n).map(|i| bits & (1 << i) != 0).collect::<Vec<bool>>())
            .filter(|m| cnf.verify(m))
            .collect()
    }

    #[test]
    fn test_single_forced_variable() {
        // Single clause {1}: the cube must be exactly {1} and the loop stops
        // after one iteration.
        let cnf = Cnf::new(vec![vec![1]]);
        let mut enumerator = Enumerator::new(&cnf);

        let first = enumerator.next();
        assert_eq!(first, Some(cube_of(&[1])));
        assert_eq!(enumerator.next(), None);
        assert_eq!(enumerator.iterations(), 1);
    }

    #[test]
    fn test_unsatisfiable_formula() {
        let cnf = Cnf::new(vec![vec![1], vec![-1]]);
        let enumerator = Enumerator::new(&cnf);
        assert_eq!(enumerator.run(), Outcome::Unsatisfiable);
    }

    #[test]
    fn test_single_model_formula() {
        // (1 v 2) & (-1 v 2) & (1 v -2) has exactly one model, (t, t); the
        // first cube covers all three clauses and blocks it, so the loop
        // finishes in one iteration.
        let cnf = Cnf::new(vec![vec![1, 2], vec![-1, 2], vec![1, -2]]);
        let outcome = enumerate(&cnf);

        assert_eq!(outcome, Outcome::Satisfiable(vec![cube_of(&[1, 2])]));
    }

    #[test]
    fn test_two_cube_cover() {
        // (1 v 2) over two variables: three models, covered by {1} and {2}
        // in two iterations.
        let mut cnf = Cnf::new(vec![vec![1, 2]]);
        cnf.declare_vars(2);
        let mut enumerator = Enumerator::new(&cnf);

        let cover: Vec<Cube> = enumerator.by_ref().collect();
        assert_eq!(cover, vec![cube_of(&[1]), cube_of(&[2])]);
        assert_eq!(enumerator.iterations(), 2);
    }

    #[test]
    fn test_cover_is_complete_and_sound() {
        let cnf = Cnf::new(vec![vec![1, 2, 3], vec![-1, -2], vec![2, -3]]);
        let outcome = enumerate(&cnf);
        let cover = outcome.cover();
        assert!(outcome.is_satisfiable());

        for model in all_models(&cnf) {
            assert!(
                cover.iter().any(|cube| cube.agrees_with(&model)),
                "model {model:?} not covered"
            );
        }
        for cube in cover {
            assert!(cube.is_implicant_of(&cnf));
        }
    }

    #[test]
    fn test_randomized_cover_completeness() {
        // Every satisfying assignment of a random formula must land in some
        // cube, and every cube must be an implicant.
        let mut rng = fastrand::Rng::with_seed(42);

        for _ in 0..50 {
            let num_vars = rng.usize(2..=4);
            let num_clauses = rng.usize(1..=6);
            let clauses: Vec<Vec<i32>> = (0..num_clauses)
                .map(|_| {
                    (0..rng.usize(1..=3))
                        .map(|_| {
                            let var = i32::try_from(rng.usize(1..=num_vars)).unwrap();
                            if rng.bool() { var } else { -var }
                        })
                        .collect()
                })
                .collect();

            let mut cnf = Cnf::new(clauses);
            cnf.declare_vars(num_vars);

            let outcome = enumerate(&cnf);
            let models = all_models(&cnf);

            assert_eq!(outcome.is_satisfiable(), !models.is_empty());
            for model in &models {
                assert!(outcome.cover().iter().any(|cube| cube.agrees_with(model)));
            }
            for cube in outcome.cover() {
                assert!(cube.is_implicant_of(&cnf));
            }
        }
    }
}
