//! # cube-cover
//!
//! `cube-cover` is a command-line AllSAT enumerator. It parses a CNF problem
//! in DIMACS format and enumerates its whole solution space as a cover of
//! implicant cubes: each satisfying assignment found by the SAT oracle is
//! grown into the largest defensible cube (via a unate-covering reduction)
//! and blocked as a whole, which cuts the number of oracle calls drastically
//! on structured solution spaces.
//!
//! ## Usage
//!
//! ```sh
//! # Enumerate a DIMACS file
//! cube-cover problem.cnf
//!
//! # Sweep a benchmark directory of .cnf files
//! cube-cover dir --path input/uf20-91
//!
//! # Enumerate a formula given as text and print the cover
//! cube-cover text --input "1 2 0" --print-cover
//! ```
//!
//! Common options: `--verify` re-checks every emitted cube is an implicant
//! (default on), `--stats` prints timing/memory statistics (default on),
//! `--print-cover` prints the cubes themselves (default off).

use clap::{Args, CommandFactory, Parser, Subcommand};
use cube_cover::allsat::cnf::Cnf;
use cube_cover::allsat::dimacs::{find_cnf_files, parse_file};
use cube_cover::allsat::enumerate::{Outcome, enumerate};
use itertools::Itertools;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tikv_jemalloc_ctl::{epoch, stats};

/// Global allocator using `tikv-jemallocator`, which also backs the memory
/// usage statistics printed after enumeration.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Defines the command-line interface for the enumerator.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "cube-cover", version, about = "An AllSAT cube-cover enumerator")]
struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a DIMACS .cnf file to enumerate.
    #[arg(global = true)]
    path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `dir`, `text`).
    #[clap(subcommand)]
    command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Enumerate the solution space of a CNF file in DIMACS format.
    File {
        /// Path to the DIMACS .cnf file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Enumerate every .cnf file under a directory (recursively).
    Dir {
        /// Path to the benchmark directory.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Enumerate a CNF formula provided as plain text.
    Text {
        /// Literal CNF input as a string (e.g. "1 -2 0\n2 3 0").
        /// Each line is a clause of space-separated literals terminated by 0.
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across subcommands.
#[derive(Args, Debug, Default, Clone)]
struct CommonOptions {
    /// Enable verification: re-check that every emitted cube is an implicant
    /// of the original formula.
    #[arg(short, long, default_value_t = true)]
    verify: bool,

    /// Enable printing of performance and problem statistics.
    #[arg(short, long, default_value_t = true)]
    stats: bool,

    /// Enable printing of the cover (one cube per line) when satisfiable.
    #[arg(short, long, default_value_t = false)]
    print_cover: bool,
}

fn main() {
    let cli = Cli::parse();

    // A bare path without a subcommand defaults to enumerating a DIMACS file.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            run_file(&path, &cli.common);
            return;
        }
    }

    match cli.command {
        Some(Commands::File { path, common }) => run_file(&path, &common),
        Some(Commands::Dir { path, common }) => {
            let files = find_cnf_files(&path)
                .unwrap_or_else(|e| panic!("Failed to scan directory {}: {e}", path.display()));
            for file in files {
                run_file(&file, &common);
            }
        }
        Some(Commands::Text { input, common }) => {
            let time = std::time::Instant::now();
            let cnf = Cnf::new(parse_textual_cnf(&input));
            let parse_time = time.elapsed();

            enumerate_and_report(&cnf, &common, None, parse_time);
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }
        None => {
            if cli.path.is_none() {
                eprintln!("No command provided. Use --help for more information.");
                std::process::exit(1);
            }
        }
    }
}

/// Parses a DIMACS file and enumerates its cube cover.
fn run_file(path: &Path, common: &CommonOptions) {
    let time = std::time::Instant::now();
    let cnf =
        parse_file(path).unwrap_or_else(|e| panic!("Failed to parse file {}: {e}", path.display()));
    let parse_time = time.elapsed();

    enumerate_and_report(&cnf, common, Some(path), parse_time);
}

/// Enumerates a formula and reports the outcome, statistics and cover.
fn enumerate_and_report(cnf: &Cnf, common: &CommonOptions, label: Option<&Path>, parse_time: Duration) {
    if let Some(name) = label {
        println!("Enumerating: {}", name.display());
    }

    epoch::advance().unwrap();

    let time = std::time::Instant::now();
    let outcome = enumerate(cnf);
    let elapsed = time.elapsed();

    epoch::advance().unwrap();
    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if common.verify {
        verify_cover(cnf, &outcome);
    }

    if common.stats {
        print_stats(parse_time, elapsed, cnf, &outcome, allocated_mib, resident_mib);
    }

    if common.print_cover {
        for cube in outcome.cover() {
            println!("{cube}");
        }
    }

    if outcome.is_satisfiable() {
        println!("\nSATISFIABLE");
    } else {
        println!("\nUNSATISFIABLE");
    }
}

/// Re-checks every cube of the cover against the original formula.
///
/// Panics if a cube is not an implicant: that would mean the cover admits an
/// assignment that falsifies the formula.
fn verify_cover(cnf: &Cnf, outcome: &Outcome) {
    let ok = outcome.cover().iter().all(|cube| cube.is_implicant_of(cnf));
    println!("Verified: {ok:?}");
    assert!(ok, "cover failed verification: a cube is not an implicant");
}

/// Parses a textual representation of a CNF formula into a list of clauses.
///
/// Each line is a clause; literals are space-separated integers and `0`
/// terminates the clause. Lines starting with 'c' or 'p' are ignored.
fn parse_textual_cnf(input: &str) -> Vec<Vec<i32>> {
    input
        .lines()
        .filter(|line| !line.trim().starts_with('c') && !line.trim().starts_with('p'))
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            line.split_whitespace()
                .map(str::parse::<i32>)
                .take_while(|res| *res != Ok(0))
                .map(Result::unwrap)
                .collect()
        })
        .collect_vec()
}

/// Helper to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Prints a summary of problem and enumeration statistics.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    cnf: &Cnf,
    outcome: &Outcome,
    allocated: f64,
    resident: f64,
) {
    let cover = outcome.cover();
    let total_literals: usize = cover.iter().map(cube_cover::allsat::cover::Cube::len).sum();

    println!("\n=======================[ Problem Statistics ]========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Variables", cnf.num_vars());
    stat_line("Clauses", cnf.len());
    stat_line("Literals", cnf.num_literals());

    println!("=====================[ Enumeration Statistics ]======================");
    stat_line("Cubes in cover", cover.len());
    stat_line("Cube literals (total)", total_literals);
    stat_line("Oracle iterations", cover.len());
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{:.3}", elapsed.as_secs_f64()));
    println!("=====================================================================");
}
