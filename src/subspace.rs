//! Splits the board's remaining unknowns into a fixed number of disjoint
//! solution subspaces by pinning a handful of them up front.
//!
//! Grounded on `original_source/MPI/src/backtracking.h:init_solution_space`.
//! Each subspace id's bits pick a preferred color (`White` if the bit is 0,
//! `Black` if 1) for each of the first `ceil(log2(solution_spaces))`
//! unknowns in row-major order; if the preferred color is locally invalid
//! the other color is tried, and if neither is valid the unknown is left
//! unpinned for backtracking to decide and the id's bits are *not*
//! consumed for that slot.

use crate::bcb::Bcb;
use crate::board::{CellState, Grid, SolutionGrid};
use crate::unknowns::UnknownIndex;
use crate::validator::is_cell_state_valid;

/// Builds the BCB identifying solution subspace `solution_space_id` out of
/// `solution_spaces` total, starting from the already-pruned `board`.
pub fn init_solution_space(
    grid: &Grid,
    board: &SolutionGrid,
    unknowns: &UnknownIndex,
    solution_spaces: usize,
    solution_space_id: usize,
) -> Bcb {
    let mut bcb = Bcb::new(board.clone(), unknowns);

    let mut id = solution_space_id;
    let mut remaining = solution_spaces.saturating_sub(1);

    'outer: for row in 0..unknowns.side() {
        for idx in 0..unknowns.row_len(row) {
            if remaining == 0 {
                break 'outer;
            }

            let col = unknowns.col_at(row, idx);
            let mut choice = if id.is_multiple_of(2) {
                CellState::White
            } else {
                CellState::Black
            };

            if !is_cell_state_valid(grid, &bcb.solution, row, col, choice) {
                choice = if choice == CellState::White {
                    CellState::Black
                } else {
                    CellState::White
                };
                if !is_cell_state_valid(grid, &bcb.solution, row, col, choice) {
                    continue;
                }
            }

            bcb.solution.set(row, col, choice);
            bcb.set_pinned(row, idx, true);

            if id > 0 {
                id /= 2;
            }
            remaining /= 2;
        }
    }

    bcb
}
