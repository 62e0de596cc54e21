#![deny(missing_docs)]
//! This crate enumerates the satisfying assignments of a CNF formula and
//! compresses them into a disjunctive cover of implicant cubes, blocking one
//! whole cube per oracle call instead of one minterm per model.

/// The `allsat` module implements the cube cover engine: the covering-matrix
/// reductions, the greedy set-cover step, the enumeration driver, and the
/// DIMACS/oracle plumbing around them.
pub mod allsat;
