use std::path::Path;

use clap::Parser;
use log::{error, info};

use hitori_solver::cluster::{self, SolveResult};
use hitori_solver::config::{Cli, Config};
use hitori_solver::io;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config::from(&cli);
    let input_path = Path::new(&cli.input_dir).join(&cli.input);

    let grid = match io::read_grid(&input_path) {
        Ok(grid) => grid,
        Err(err) => {
            error!("{err}");
            std::process::exit(exitcode::NOINPUT);
        }
    };

    info!(
        "solving {}x{} board with {} workers across {} solution spaces",
        grid.side(),
        grid.side(),
        config.workers,
        config.solution_spaces
    );

    match cluster::solve(&grid, &config) {
        SolveResult::Solved(solution) => {
            info!("solved");
            match &cli.output {
                Some(path) => {
                    if let Err(err) = io::write_solution(path, &solution) {
                        error!("{err}");
                        std::process::exit(exitcode::IOERR);
                    }
                }
                None => print!("{solution}"),
            }
        }
        SolveResult::Unsolvable => {
            error!("no solution exists for this board");
            std::process::exit(exitcode::DATAERR);
        }
    }
}
