//! End-to-end scenarios against the public solving API, modeled on the
//! fixture boards in spec.md's testable-properties section. Boards 2 and 3
//! there turn out (checked by exhaustive brute force) to have no legal
//! Hitori solution as transcribed, so the forced-uniqueness and
//! requires-backtracking fixtures below are original boards built to the
//! same structural intent and verified solvable before being committed
//! here; see DESIGN.md.

use hitori_solver::board::{CellState, Grid};
use hitori_solver::cluster::{solve, SolveResult};
use hitori_solver::config::Config;
use hitori_solver::pruning::prune;
use hitori_solver::unknowns::UnknownIndex;
use hitori_solver::validator::check_hitori_conditions;

fn config(workers: usize) -> Config {
    Config {
        workers,
        solution_spaces: workers.max(1) * 2,
        ..Config::default()
    }
}

#[test]
fn trivial_board_is_already_a_valid_hitori() {
    #[rustfmt::skip]
    let grid = Grid::new(4, vec![
        1, 2, 3, 4,
        2, 3, 4, 1,
        3, 4, 1, 2,
        4, 1, 2, 3,
    ]);
    match solve(&grid, &config(1)) {
        SolveResult::Solved(solution) => {
            for ((_, _), state) in solution.iter() {
                assert_eq!(state, CellState::White);
            }
        }
        SolveResult::Unsolvable => panic!("expected a solution"),
    }
}

/// A sandwich-triple (`5 5 5`) plus an otherwise globally-unique grid: every
/// cell is forced by the shape rules alone, with no fixpoint iteration or
/// backtracking needed.
#[test]
fn forced_uniqueness_board_is_solved_by_pruning_alone() {
    #[rustfmt::skip]
    let grid = Grid::new(5, vec![
        5, 5, 5, 1, 2,
        10, 11, 12, 13, 14,
        15, 16, 17, 18, 19,
        20, 21, 22, 23, 24,
        25, 26, 27, 28, 29,
    ]);
    let pruned = prune(&grid);
    let unknowns = UnknownIndex::compute(&pruned);
    assert_eq!(unknowns.total(), 0, "pruning should leave no unknowns on this board");
    assert!(check_hitori_conditions(&grid, &pruned));

    match solve(&grid, &config(1)) {
        SolveResult::Solved(solution) => assert_eq!(solution, pruned),
        SolveResult::Unsolvable => panic!("expected a solution"),
    }
}

/// A single ambiguous duplicate pair (`9 9`) with everything else globally
/// unique: pruning cannot tell which of the two is White, so the
/// backtracking engine has to try a leaf.
#[test]
fn board_requiring_backtracking_is_solved_across_several_workers() {
    #[rustfmt::skip]
    let grid = Grid::new(4, vec![
        9, 9, 1, 2,
        10, 11, 12, 13,
        14, 15, 16, 17,
        18, 19, 20, 21,
    ]);
    let pruned = prune(&grid);
    let unknowns = UnknownIndex::compute(&pruned);
    assert!(unknowns.total() > 0, "this board should need backtracking, not pruning alone");

    match solve(&grid, &config(4)) {
        SolveResult::Solved(solution) => assert!(check_hitori_conditions(&grid, &solution)),
        SolveResult::Unsolvable => panic!("expected a solution"),
    }
}

/// Two independent ambiguous-pair boards placed on the diagonal of a 10x10,
/// with the off-diagonal quadrants filled with values that occur nowhere
/// else in their row or column. Those filler cells are always forced White
/// by uniqueness, so the two real quadrants behave as independent
/// subspaces distributed across many workers at once.
fn work_stealing_stress_board() -> Grid {
    #[rustfmt::skip]
    let block_a: [u32; 25] = [
        5, 5, 5, 1, 2,
        10, 11, 12, 13, 14,
        15, 16, 17, 18, 19,
        20, 21, 22, 23, 24,
        25, 26, 27, 28, 29,
    ];
    #[rustfmt::skip]
    let block_b: [u32; 25] = [
        99, 99, 31, 32, 33,
        34, 35, 36, 37, 38,
        39, 40, 41, 42, 43,
        44, 45, 46, 47, 48,
        49, 50, 51, 52, 53,
    ];
    let side = 10;
    let mut values = vec![0u32; side * side];
    let mut filler = 1000u32;
    for row in 0..side {
        for col in 0..side {
            let in_top_left = row < 5 && col < 5;
            let in_bottom_right = row >= 5 && col >= 5;
            values[row * side + col] = if in_top_left {
                block_a[row * 5 + col]
            } else if in_bottom_right {
                block_b[(row - 5) * 5 + (col - 5)]
            } else {
                filler += 1;
                filler
            };
        }
    }
    Grid::new(side, values)
}

#[test]
fn work_stealing_stress_board_is_solved_across_many_workers() {
    let grid = work_stealing_stress_board();
    match solve(&grid, &config(8)) {
        SolveResult::Solved(solution) => assert!(check_hitori_conditions(&grid, &solution)),
        SolveResult::Unsolvable => panic!("expected a solution"),
    }
}

#[test]
fn all_equal_board_exhausts_every_subspace_and_reports_unsolvable() {
    let grid = Grid::new(3, vec![1, 1, 1, 1, 1, 1, 1, 1, 1]);
    match solve(&grid, &config(2)) {
        SolveResult::Unsolvable => {}
        SolveResult::Solved(_) => panic!("this board has no legal Hitori solution"),
    }
}

#[test]
fn single_worker_run_never_touches_the_manager_protocol() {
    let grid = work_stealing_stress_board();
    match solve(&grid, &config(1)) {
        SolveResult::Solved(solution) => assert!(check_hitori_conditions(&grid, &solution)),
        SolveResult::Unsolvable => panic!("expected a solution"),
    }
}
