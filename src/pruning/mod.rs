//! Deterministic constraint propagation run once, up front, on the whole
//! board before any backtracking starts.
//!
//! Grounded on `original_source/MPI/src/main.c` (the pruning driver around
//! the `MPI_Bcast` calls, lines ~630-690): Uniqueness, Sandwich,
//! Pair-isolation, Flanked-isolation and Corner-cases each run exactly once,
//! folded into the running board with a non-forced combine (Uniqueness
//! itself resolves its own row/column evidence with a forced combine
//! internally). Only after that does the true fixpoint begin, alternating
//! Set-white and Set-black until a round changes nothing.

pub mod combine;
pub mod kernels;

use crate::board::{Grid, SolutionGrid};
use combine::{combine, Mode};

/// Runs the full pruning pipeline and returns the resulting partial board.
pub fn prune(grid: &Grid) -> SolutionGrid {
    let mut board = SolutionGrid::unknown(grid.side());

    board = combine(&board, &kernels::uniqueness(grid), Mode::NonForced);
    board = combine(&board, &kernels::sandwich(grid), Mode::NonForced);
    board = combine(&board, &kernels::pair_isolation(grid), Mode::NonForced);
    board = combine(&board, &kernels::flanked_isolation(grid), Mode::NonForced);
    board = combine(&board, &kernels::corner_cases(grid, &board), Mode::NonForced);

    loop {
        let white = kernels::set_white(grid, &board);
        let next = combine(&board, &white, Mode::NonForced);
        let black = kernels::set_black(grid, &next);
        let next = combine(&next, &black, Mode::NonForced);

        if next == board {
            break;
        }
        board = next;
    }

    board
}
