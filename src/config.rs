//! Runtime-overridable solver constants.
//!
//! Mirrors the compile-time constants of `original_source/MPI/include/common.h`
//! (`SOLUTION_SPACES`, `MAX_BUFFER_SIZE`) plus the pruning fan-out width,
//! all made CLI-overridable with `clap`.

use clap::Parser;

/// Distributed-memory parallel solver for Hitori puzzles.
#[derive(Debug, Parser)]
#[command(name = "hitori-solver", version, about)]
pub struct Cli {
    /// Path to the input grid file.
    pub input: String,

    /// Directory the input file is resolved against.
    #[arg(long, default_value = ".")]
    pub input_dir: String,

    /// Where to write the solved grid. Defaults to stdout.
    #[arg(long)]
    pub output: Option<String>,

    /// Number of simulated peer ranks (rank 0 is the manager). `1` runs a
    /// single-threaded solve with no protocol overhead at all.
    #[arg(long, default_value_t = Config::default().workers)]
    pub workers: usize,

    /// Number of solution subspaces the search is split into up front.
    #[arg(long, default_value_t = Config::default().solution_spaces)]
    pub solution_spaces: usize,

    /// Number of threads used for the one-shot pruning fan-out.
    #[arg(long, default_value_t = Config::default().pruning_workers)]
    pub pruning_workers: usize,
}

/// The resolved set of constants a solve runs with.
#[derive(Debug, Clone)]
pub struct Config {
    pub workers: usize,
    pub solution_spaces: usize,
    pub pruning_workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            workers: 4,
            solution_spaces: 8,
            pruning_workers: num_cpus::get(),
        }
    }
}

impl From<&Cli> for Config {
    fn from(cli: &Cli) -> Self {
        Config {
            workers: cli.workers.max(1),
            solution_spaces: cli.solution_spaces.max(1),
            pruning_workers: cli.pruning_workers.max(1),
        }
    }
}
