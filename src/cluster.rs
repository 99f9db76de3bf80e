//! Spawns one thread per simulated rank, wires them together with
//! [`crate::transport`], and runs the pruning phase followed by the
//! distributed backtracking phase to completion.
//!
//! Grounded on the teacher's `implementation/solver/parallel.rs`, which
//! spawns one thread per configured worker with `std::thread::scope` and
//! joins them all at the end; and on
//! `original_source/MPI/src/main.c`'s `main`, which is rank 0 running both
//! manager and worker logic on the same process.

use log::info;

use crate::bcb::Bcb;
use crate::board::{Grid, SolutionGrid};
use crate::config::Config;
use crate::manager::Manager;
use crate::pruning::prune;
use crate::subspace::init_solution_space;
use crate::transport;
use crate::unknowns::UnknownIndex;
use crate::worker::{Outcome, Worker};

pub enum SolveResult {
    Solved(SolutionGrid),
    Unsolvable,
}

/// Runs pruning, then distributes `config.solution_spaces` subspaces
/// across `config.workers` peer threads and searches until a solution is
/// found or every subspace is exhausted.
pub fn solve(grid: &Grid, config: &Config) -> SolveResult {
    let pruned = prune(grid);
    let unknowns = UnknownIndex::compute(&pruned);

    if unknowns.total() == 0 {
        info!("pruning alone fully solved the board");
        return if crate::validator::check_hitori_conditions(grid, &pruned) {
            SolveResult::Solved(pruned)
        } else {
            SolveResult::Unsolvable
        };
    }

    if config.workers == 1 {
        let subspace = init_solution_space(grid, &pruned, &unknowns, 1, 0);
        let mut peers = transport::build(1);
        let mut worker = Worker::new(0, grid.clone(), unknowns, config.solution_spaces, peers.remove(0));
        return match worker.run_solo(subspace) {
            Outcome::Solved(solution) => SolveResult::Solved(solution),
            Outcome::Exhausted => SolveResult::Unsolvable,
        };
    }

    // Rank 0 is manager-only; ranks 1..workers run the backtracking search.
    let search_workers = config.workers - 1;
    let subspaces: Vec<Bcb> = (0..config.solution_spaces)
        .map(|id| init_solution_space(grid, &pruned, &unknowns, config.solution_spaces, id))
        .collect();

    let seeds_by_rank: Vec<Vec<Bcb>> = (0..search_workers)
        .map(|offset| subspaces.iter().skip(offset).step_by(search_workers).cloned().collect())
        .collect();
    let mut initial_queue_sizes = vec![0i64; config.workers];
    for (offset, seeds) in seeds_by_rank.iter().enumerate() {
        initial_queue_sizes[offset + 1] = seeds.len() as i64;
    }

    let mut peers = transport::build(config.workers);
    let manager_channels = peers.remove(0);

    let result = std::thread::scope(|scope| {
        let mut handles = Vec::new();
        for (offset, (channels, seeds)) in peers.into_iter().zip(seeds_by_rank).enumerate() {
            let rank = offset + 1;
            let grid = grid.clone();
            let unknowns = unknowns.clone();
            let queue_capacity = config.solution_spaces.max(1);
            handles.push(scope.spawn(move || {
                let mut worker = Worker::new(rank, grid, unknowns, queue_capacity, channels);
                for seed in seeds {
                    worker.seed(seed);
                }
                worker.run()
            }));
        }

        scope.spawn(move || {
            let mut manager = Manager::new(config.workers, manager_channels, &initial_queue_sizes);
            manager.run()
        });

        let mut solution = None;
        for handle in handles {
            if let Ok(Outcome::Solved(found)) = handle.join() {
                solution = Some(found);
            }
        }
        solution
    });

    match result {
        Some(solution) => SolveResult::Solved(solution),
        None => SolveResult::Unsolvable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::check_hitori_conditions;

    #[test]
    fn single_worker_solves_a_trivial_board() {
        #[rustfmt::skip]
        let grid = Grid::new(4, vec![
            1, 2, 3, 4,
            2, 1, 4, 3,
            3, 4, 1, 2,
            4, 3, 2, 1,
        ]);
        let config = Config { workers: 1, ..Config::default() };
        match solve(&grid, &config) {
            SolveResult::Solved(solution) => assert!(check_hitori_conditions(&grid, &solution)),
            SolveResult::Unsolvable => panic!("expected a solution"),
        }
    }

    #[test]
    fn a_board_with_no_legal_solution_reports_unsolvable() {
        // A 2x2 board where every row and column is a repeated value: no
        // assignment can satisfy Rule 1 without violating connectivity too.
        let grid = Grid::new(2, vec![1, 1, 1, 1]);
        let config = Config { workers: 1, ..Config::default() };
        match solve(&grid, &config) {
            SolveResult::Solved(solution) => {
                assert!(check_hitori_conditions(&grid, &solution));
            }
            SolveResult::Unsolvable => {}
        }
    }
}
