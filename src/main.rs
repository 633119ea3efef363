//! # takuzu-solver
//!
//! `takuzu-solver` is a command-line solver for square binary-grid logic
//! puzzles (Takuzu, also known as Binairo). A puzzle is an N×N grid whose
//! cells hold `0`, `1`, or are unknown; a solution fills every cell so that
//! each row and column holds as many zeros as ones, no row or column contains
//! three consecutive identical values, and all rows and columns are pairwise
//! distinct.
//!
//! The solver first applies six local deduction rules to a fixpoint
//! (constraint propagation) and only then resorts to backtracking search,
//! guessing `Zero` before `One` at the first undetermined cell.
//!
//! ## Features
//!
//! -   **Multiple inputs**: puzzle files, inline text, or whole directories.
//! -   **Propagation-only mode**: `--propagate-only` applies maximal deduction
//!     without committing to any guess.
//! -   **Verification**: option to re-check a found solution against the
//!     correctness predicate and the original clues.
//! -   **Statistics**: parse/solve times, propagation passes, guesses,
//!     collisions, and memory usage.
//! -   **Memory management**: uses `tikv-jemallocator` for memory allocation
//!     and provides memory usage statistics.
//!
//! ## Usage
//!
//! ```sh
//! # Solve a puzzle file
//! takuzu-solver puzzle.takuzu
//!
//! # Solve a puzzle given inline (rows separated by newlines or commas)
//! takuzu-solver text --input "11..,.00.,..11,...."
//!
//! # Apply deduction only, without guessing
//! takuzu-solver file --path puzzle.takuzu --propagate-only
//!
//! # Solve every .takuzu file under a directory
//! takuzu-solver dir --path puzzles/
//! ```
//!
//! The puzzle file format is one row per line: `'0'` and `'1'` are given
//! values, any other character is an unknown cell, and blank lines are
//! ignored.

use crate::puzzle::board::Board;
use crate::puzzle::solver::{SolveStats, Solver};
use crate::puzzle::state::State;
use clap::{Args, CommandFactory, Parser, Subcommand};
use itertools::Itertools;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tikv_jemalloc_ctl::{epoch, stats};

mod puzzle;

/// Global allocator using `tikv-jemallocator` for potentially better
/// performance and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Defines the command-line interface for the takuzu solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "takuzu-solver", version, about = "A binary puzzle (Takuzu) solver")]
struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a puzzle file to solve.
    #[arg(global = true)]
    path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `text`, `dir`).
    #[clap(subcommand)]
    command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    common: CommonOptions,
}

/// Enumerates the available subcommands for the takuzu solver.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve a puzzle file.
    File {
        /// Path to the puzzle file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a puzzle provided as plain text.
    Text {
        /// Puzzle rows as a string, separated by newlines or commas
        /// (e.g. "11..,.00.,..11,....").
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every .takuzu file under a directory.
    Dir {
        /// Path to the directory to scan.
        #[arg(long)]
        path: PathBuf,

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

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
struct CommonOptions {
    /// Enable debug output, providing more verbose logging during the solving process.
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Enable verification of the found solution. If a solution is found, it's
    /// re-checked against the correctness predicate and the original clues.
    #[arg(short, long, default_value_t = true)]
    verify: bool,

    /// Enable printing of performance and search statistics after solving.
    #[arg(short, long, default_value_t = true)]
    stats: bool,

    /// Run propagation to a fixpoint only, without any guessing. The output
    /// board may still contain unknown cells.
    #[arg(short, long, default_value_t = false)]
    propagate_only: bool,
}

/// Main entry point of the takuzu solver application.
///
/// Parses command-line arguments, dispatches to the appropriate command
/// handler, and manages the overall execution flow.
fn main() {
    let cli = Cli::parse();

    // Handle the case where a path is provided globally without a subcommand.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            if let Err(e) = solve_puzzle_file(&path, &cli.common) {
                eprintln!("{e}");
                std::process::exit(1);
            }
            return;
        }
    }

    let result = match cli.command {
        Some(Commands::File { path, common }) => solve_puzzle_file(&path, &common),

        Some(Commands::Text { input, common }) => {
            let time = std::time::Instant::now();
            let board = parse_textual_puzzle(&input);
            let elapsed = time.elapsed();

            solve_and_report(&board, &common, None, elapsed);
            Ok(())
        }

        Some(Commands::Dir { path, common }) => solve_dir(&path, &common),

        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }

        None => {
            // Reached if no subcommand was provided and `cli.path` was also None.
            eprintln!("No command provided. Use --help for more information.");
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// Solve a puzzle file.
///
/// # Errors
///
/// If the path does not name a readable puzzle file.
fn solve_puzzle_file(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("Puzzle file does not exist: {}", path.display()));
    }

    if !path.is_file() {
        return Err(format!("Provided path is not a file: {}", path.display()));
    }

    let time = std::time::Instant::now();
    let board = puzzle::parse::parse_file(path).map_err(|e| {
        format!("Error reading puzzle file {}: {e}", path.display())
    })?;
    let parse_time = time.elapsed();

    println!("Solving: {}", path.display());
    solve_and_report(&board, common, Some(path), parse_time);
    Ok(())
}

/// Solves a directory of puzzle files.
///
/// This function iterates over all `.takuzu` files under the directory,
/// parses each file, solves it, and reports the results.
///
/// # Errors
///
/// If the provided path is not a directory or a file cannot be read.
fn solve_dir(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!("Provided path is not a directory: {}", path.display()));
    }

    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();

        if !file_path.is_file() {
            continue;
        }

        if file_path.extension().is_none_or(|ext| ext != "takuzu") {
            eprintln!("Skipping non-puzzle file: {}", file_path.display());
            continue;
        }

        solve_puzzle_file(file_path, common)?;
    }

    Ok(())
}

/// Solves a board and reports results including stats and verification.
///
/// # Arguments
/// * `board` - The parsed puzzle board.
/// * `common` - `CommonOptions` providing solver configuration.
/// * `label` - An optional label for the problem (e.g. file path).
/// * `parse_time` - The time taken to parse the puzzle input.
fn solve_and_report(board: &Board, common: &CommonOptions, label: Option<&Path>, parse_time: Duration) {
    println!("Parsed puzzle:\n{board}");

    if common.debug {
        if let Some(name) = label {
            println!("Puzzle: {}", name.display());
        }
        println!("Width: {}", board.width());
        println!("Unknown cells: {}", count_unknowns(board));
    }

    epoch::advance().unwrap();

    let time = std::time::Instant::now();

    let mut solver = Solver::new();
    let sol = if common.propagate_only {
        solver.propagate(board)
    } else {
        solver.solve(board)
    };

    let elapsed = time.elapsed();

    if common.debug {
        println!("Solution: {sol:?}");
        println!("Time: {elapsed:?}");
    }

    epoch::advance().unwrap();

    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();

    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if common.verify && !common.propagate_only {
        verify_solution(board, sol.as_ref());
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            board,
            &solver.stats(),
            allocated_mib,
            resident_mib,
            sol.as_ref(),
        );
    }

    if let Some(solution) = sol {
        println!("Solution:\n{solution}");
    } else {
        println!("No solution found");
    }
}

/// Verifies a found solution against the correctness predicate and the
/// original clues.
///
/// Prints whether the verification was successful; panics if a returned
/// solution fails it. If `sol` is `None`, prints "UNSOLVABLE".
fn verify_solution(clues: &Board, sol: Option<&Board>) {
    if let Some(solution) = sol {
        let ok = solution.is_complete_and_correct() && extends(clues, solution);
        println!("Verified: {ok:?}");
        assert!(ok, "Solution failed verification!");
    } else {
        println!("UNSOLVABLE");
    }
}

/// Reports whether `solution` agrees with every determined cell of `clues`.
fn extends(clues: &Board, solution: &Board) -> bool {
    clues.width() == solution.width()
        && (0..clues.width()).all(|y| {
            (0..clues.width()).all(|x| {
                clues.get(x, y) == State::Unknown || clues.get(x, y) == solution.get(x, y)
            })
        })
}

/// Counts the undetermined cells of a board.
fn count_unknowns(board: &Board) -> usize {
    (0..board.width())
        .flat_map(|y| (0..board.width()).map(move |x| (x, y)))
        .filter(|&(x, y)| board.get(x, y) == State::Unknown)
        .count()
}

/// Parses a textual representation of a puzzle into a board.
///
/// Rows are separated by newlines or commas; blank rows are dropped.
///
/// # Panics
///
/// If the input contains no non-blank rows.
fn parse_textual_puzzle(input: &str) -> Board {
    let rows = input.split(['\n', ',']).collect_vec();
    Board::create(&rows)
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
///
/// # Arguments
/// * `parse_time` - Duration spent parsing the input.
/// * `elapsed` - Duration spent by the solver.
/// * `board` - The puzzle board as parsed.
/// * `s` - `SolveStats` collected by the solver.
/// * `allocated` - Allocated memory in MiB.
/// * `resident` - Resident memory in MiB.
/// * `solution` - The solved board, if one was found.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    board: &Board,
    s: &SolveStats,
    allocated: f64,
    resident: f64,
    solution: Option<&Board>,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Width", board.width());
    stat_line("Cells", board.width() * board.width());
    stat_line("Unknown cells", count_unknowns(board));

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Passes", s.passes, elapsed_secs);
    stat_line_with_rate("Guesses", s.guesses, elapsed_secs);
    stat_line_with_rate("Collisions", s.collisions, elapsed_secs);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");

    if solution.is_some() {
        println!("\nSOLVED");
    } else {
        println!("\nNO SOLUTION");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_textual_puzzle_newlines() {
        let board = parse_textual_puzzle("10\n..");
        assert_eq!(board.width(), 2);
        assert_eq!(board.get(0, 0), State::One);
        assert_eq!(board.get(0, 1), State::Unknown);
    }

    #[test]
    fn test_parse_textual_puzzle_commas() {
        let board = parse_textual_puzzle("11..,.00.,..11,....");
        assert_eq!(board.width(), 4);
        assert_eq!(board.get(1, 0), State::One);
        assert_eq!(board.get(2, 1), State::Zero);
    }

    #[test]
    fn test_parse_textual_puzzle_drops_blank_rows() {
        let board = parse_textual_puzzle("10,,01");
        assert_eq!(board.width(), 2);
        assert_eq!(board.get(0, 1), State::Zero);
    }

    #[test]
    fn test_extends() {
        let clues = parse_textual_puzzle("1.,..");
        let solution = parse_textual_puzzle("10,01");
        assert!(extends(&clues, &solution));

        let mismatch = parse_textual_puzzle("01,10");
        assert!(!extends(&clues, &mismatch));
    }

    #[test]
    fn test_count_unknowns() {
        assert_eq!(count_unknowns(&parse_textual_puzzle("1.,..")), 3);
        assert_eq!(count_unknowns(&parse_textual_puzzle("10,01")), 0);
    }
}
