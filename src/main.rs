//! Command-line entry point for the sliding-puzzle solver.
//!
//! Parsing, dispatch, and reporting live in [`command_line::cli`]; this
//! file only installs the allocator and translates a CLI failure into a
//! non-zero exit code.

mod command_line;

/// Global allocator using `tikv-jemallocator`, which also backs the
/// memory-usage numbers in the statistics output.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    if let Err(message) = command_line::cli::run() {
        eprintln!("{message}");
        std::process::exit(1);
    }
}
