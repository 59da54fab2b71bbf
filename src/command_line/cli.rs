#![allow(clippy::cast_precision_loss)]

//! CLI definition and dispatch.
//!
//! The interface mirrors the input/output contract of the solver core: a
//! puzzle file holds `n` followed by `n²` row-major tiles, and solving one
//! prints either the optimal move count followed by every board of the
//! solution, or `No solution possible`.

use clap::{Args, CommandFactory, Parser, Subcommand};
use npuzzle_solver::puzzle::board::Board;
use npuzzle_solver::puzzle::loader;
use npuzzle_solver::puzzle::scramble;
use npuzzle_solver::puzzle::solver::{SearchStats, Solver};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the puzzle solver application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "npuzzle-solver", version, about = "An A* sliding-puzzle solver")]
pub(crate) struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a puzzle file to solve.
    #[arg(global = true)]
    path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `solve`, `dir`, `scramble`).
    #[clap(subcommand)]
    command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    common: CommonOptions,
}

/// Enumerates the available subcommands for the puzzle solver.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve a puzzle file.
    Solve {
        /// Path to the puzzle file (`n` followed by `n²` row-major tiles,
        /// 0 for the blank).
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `.txt` puzzle file under a directory.
    Dir {
        /// Path to the directory to walk.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate a random solvable instance and print it as a puzzle file.
    Scramble {
        /// Side length of the board.
        #[arg(short = 'n', long, default_value_t = 3)]
        dimension: usize,

        /// Number of random slides walked back from the goal; the optimal
        /// solution of the result is at most this long.
        #[arg(long, default_value_t = 40)]
        steps: usize,

        /// Seed for a reproducible instance.
        #[arg(long)]
        seed: Option<u64>,
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
    /// Enable debug output, printing the parsed board and its heuristic
    /// values before solving.
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Enable printing of search statistics after solving.
    #[arg(short, long, default_value_t = true)]
    stats: bool,

    /// Enable printing of every board along the solution path.
    #[arg(short, long, default_value_t = true)]
    print_solution: bool,
}

/// Parses the command line and dispatches to the selected command.
pub(crate) fn run() -> Result<(), String> {
    let cli = Cli::parse();

    // A bare path with no subcommand defaults to solving that file.
    if let Some(path) = &cli.path {
        if cli.command.is_none() {
            return solve_path(path, &cli.common);
        }
    }

    match cli.command {
        Some(Commands::Solve { path, common }) => solve_path(&path, &common),
        Some(Commands::Dir { path, common }) => solve_dir(&path, &common),
        Some(Commands::Scramble {
            dimension,
            steps,
            seed,
        }) => print_scramble(dimension, steps, seed),
        Some(Commands::Completions { shell }) => {
            print_completions(shell);
            Ok(())
        }
        None => Err(String::from(
            "no command provided, use --help for more information",
        )),
    }
}

/// Writes completion definitions for the requested shell to stdout.
fn print_completions(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

/// Loads one puzzle file and solves it.
fn solve_path(path: &Path, common: &CommonOptions) -> Result<(), String> {
    let time = Instant::now();
    let board = loader::load_file(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let parse_time = time.elapsed();

    println!("Solving: {}", path.display());
    solve_and_report(board, common, parse_time);
    Ok(())
}

/// Solves a directory of puzzle files.
///
/// Walks the directory recursively, solving every `.txt` file and skipping
/// everything else.
fn solve_dir(path: &PathBuf, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!(
            "provided path is not a directory: {}",
            path.display()
        ));
    }

    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() {
            continue;
        }
        if file_path.extension().is_none_or(|ext| ext != "txt") {
            eprintln!("Skipping non-puzzle file: {}", file_path.display());
            continue;
        }

        solve_path(file_path, common)?;
    }

    Ok(())
}

/// Generates a random solvable instance and prints it in the loader's
/// format, so the output can be piped straight back into `solve`.
fn print_scramble(dimension: usize, steps: usize, seed: Option<u64>) -> Result<(), String> {
    let board = scramble::scrambled(dimension, steps, seed).map_err(|e| e.to_string())?;
    print!("{board}");
    Ok(())
}

/// Runs the solver on a parsed board and reports the outcome, statistics,
/// and memory usage.
fn solve_and_report(board: Board, common: &CommonOptions, parse_time: Duration) {
    if common.debug {
        println!("Board:\n{board}");
        println!("Dimension: {}", board.dimension());
        println!("Hamming: {}", board.hamming());
        println!("Manhattan: {}", board.manhattan());
    }

    // Advance the jemalloc epoch so the post-solve readings reflect this
    // solving phase.
    epoch::advance().unwrap();

    let time = Instant::now();
    let solver = Solver::new(board);
    let elapsed = time.elapsed();

    epoch::advance().unwrap();
    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            solver.stats(),
            allocated_mib,
            resident_mib,
        );
    }

    if let Some(solution) = solver.solution() {
        println!("Minimum number of moves = {}", solution.len() - 1);
        if common.print_solution {
            for step in solution {
                println!("{step}");
            }
        }
    } else {
        println!("No solution possible");
    }
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate
/// (value/second).
fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of search statistics for a finished run.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    s: SearchStats,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n========================[ Search Statistics ]========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line_with_rate("Expanded nodes", s.expanded, elapsed_secs);
    stat_line_with_rate("Generated nodes", s.generated, elapsed_secs);
    stat_line("Retained nodes", s.nodes);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("Solve time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}
