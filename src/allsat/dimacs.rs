#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for the DIMACS CNF file format.
//!
//! The format:
//! - Comment lines starting with `c`.
//! - A problem line `p cnf <num_variables> <num_clauses>`. The declared
//!   variable count is honored, since a formula may declare variables that no
//!   clause mentions and the oracle must still assign them.
//! - Clause lines of whitespace-separated integer literals, each terminated
//!   by `0`.
//! - An optional `%` line marking end-of-data (common in benchmark suites).
//!
//! Malformed literals are a precondition violation and abort parsing with a
//! descriptive panic rather than producing a silently wrong clause database.

use crate::allsat::cnf::Cnf;
use itertools::Itertools;
use std::io::{self, BufRead};
use std::path::Path;
use walkdir::WalkDir;

/// Parses DIMACS formatted data from a `BufRead` source into a [`Cnf`].
///
/// # Panics
///
/// - If reading a line from the `reader` fails.
/// - If a token in a clause line does not parse as an `i32`, or a `p` line
///   does not carry a numeric variable count.
pub fn parse_dimacs<R: BufRead>(reader: R) -> Cnf {
    let mut lines = reader
        .lines()
        .map(|line| line.unwrap_or_else(|e| panic!("Failed to read line: {e}")));

    let mut declared_vars = 0usize;
    let mut clauses: Vec<Vec<i32>> = Vec::new();

    for line in &mut lines {
        let mut parts = line.split_whitespace().peekable();

        match parts.peek() {
            Some(&"%") => break,
            None | Some(&"c") => {}
            Some(&"p") => {
                // "p cnf <vars> <clauses>"; the clause count is derived from
                // the clauses actually present.
                declared_vars = parts
                    .nth(2)
                    .and_then(|s| s.parse::<usize>().ok())
                    .unwrap_or_else(|| panic!("Malformed problem line: '{line}'"));
            }
            Some(_) => {
                let literals: Vec<i32> = parts
                    .map(|s| {
                        s.parse::<i32>()
                            .unwrap_or_else(|e| panic!("Failed to parse literal '{s}' as i32: {e}"))
                    })
                    .take_while(|&lit| lit != 0)
                    .collect_vec();

                if !literals.is_empty() {
                    clauses.push(literals);
                }
            }
        }
    }

    let mut cnf = Cnf::new(clauses);
    cnf.declare_vars(declared_vars);
    cnf
}

/// Parses a DIMACS CNF file specified by its path.
///
/// # Errors
///
/// Returns `Err` if the file cannot be opened. Panics from [`parse_dimacs`]
/// on malformed content propagate.
pub fn parse_file<P: AsRef<Path>>(path: P) -> io::Result<Cnf> {
    let file = std::fs::File::open(path)?;
    Ok(parse_dimacs(io::BufReader::new(file)))
}

/// Recursively collects the paths of all `.cnf` files under a directory,
/// sorted for reproducible sweep order.
///
/// # Errors
///
/// Returns `Err` if a directory entry cannot be read.
pub fn find_cnf_files<P: AsRef<Path>>(dir: P) -> io::Result<Vec<std::path::PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(io::Error::other)?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "cnf") {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}
