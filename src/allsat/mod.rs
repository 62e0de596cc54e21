#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The cube cover engine and its collaborators.

/// Clauses as deduplicated literal sets.
pub mod clause;
/// The immutable clause database with its occurrence index.
pub mod cnf;
/// Cube growth: the orchestrator turning one model into an implicant cube.
pub mod cover;
/// DIMACS CNF parsing.
pub mod dimacs;
/// The outer enumeration loop over the oracle.
pub mod enumerate;
/// Greedy set cover over the reduced matrix.
pub mod greedy;
/// Signed literal representation.
pub mod literal;
/// The unate covering matrix built per satisfying assignment.
pub mod matrix;
/// The incremental SAT oracle trait and the bundled DPLL implementation.
pub mod oracle;
/// Exact (lossless) covering-matrix reductions.
pub mod reduction;
