//! Local and whole-board legality checks against the three Hitori rules.
//!
//! Grounded on `original_source/MPI/src/backtracking.h`'s
//! `is_cell_state_valid`, `dfs_white_cells`, `all_white_cells_connected` and
//! `check_hitori_conditions`. The connectivity check is implemented with an
//! explicit stack instead of the original's recursive DFS, since board side
//! lengths are not bounded by this crate and an explicit stack avoids
//! blowing the native call stack on large boards.

use crate::board::{CellState, Grid, SolutionGrid};

/// Whether assigning `state` to `(row, col)` is still consistent with R1
/// (no repeated value among White cells on a line) and R2 (no two adjacent
/// Black cells), given everything already decided elsewhere in `solution`.
/// Does not itself check R3 (global connectivity); see
/// [`all_white_cells_connected`] for that.
pub fn is_cell_state_valid(
    grid: &Grid,
    solution: &SolutionGrid,
    row: usize,
    col: usize,
    state: CellState,
) -> bool {
    let side = grid.side();
    match state {
        CellState::Black => {
            if row > 0 && solution.get(row - 1, col) == CellState::Black {
                return false;
            }
            if row + 1 < side && solution.get(row + 1, col) == CellState::Black {
                return false;
            }
            if col > 0 && solution.get(row, col - 1) == CellState::Black {
                return false;
            }
            if col + 1 < side && solution.get(row, col + 1) == CellState::Black {
                return false;
            }
            true
        }
        CellState::White => {
            let value = grid.get(row, col);
            for i in 0..side {
                if i != row && grid.get(i, col) == value && solution.get(i, col) == CellState::White {
                    return false;
                }
            }
            for j in 0..side {
                if j != col && grid.get(row, j) == value && solution.get(row, j) == CellState::White {
                    return false;
                }
            }
            true
        }
        CellState::Unknown => true,
    }
}

/// R3: every White cell is 4-connected to every other White cell, checked
/// by flood-filling from the first White cell found and comparing the
/// reached count to the total White count.
pub fn all_white_cells_connected(solution: &SolutionGrid) -> bool {
    let side = solution.side();
    let mut white_count = 0;
    let mut start = None;
    for ((row, col), state) in solution.iter() {
        if state == CellState::White {
            white_count += 1;
            if start.is_none() {
                start = Some((row, col));
            }
        }
    }
    let Some(start) = start else {
        return white_count == 0;
    };

    let mut visited = vec![false; side * side];
    let mut stack = vec![start];
    let mut reached = 0;
    while let Some((row, col)) = stack.pop() {
        let idx = row * side + col;
        if visited[idx] || solution.get(row, col) == CellState::Black {
            continue;
        }
        visited[idx] = true;
        reached += 1;
        if row > 0 {
            stack.push((row - 1, col));
        }
        if row + 1 < side {
            stack.push((row + 1, col));
        }
        if col > 0 {
            stack.push((row, col - 1));
        }
        if col + 1 < side {
            stack.push((row, col + 1));
        }
    }

    reached == white_count
}

/// Whether `solution` is a complete, legal Hitori solution for `grid`: no
/// `Unknown` cells remain and all three rules hold.
pub fn check_hitori_conditions(grid: &Grid, solution: &SolutionGrid) -> bool {
    let side = grid.side();
    for row in 0..side {
        for col in 0..side {
            match solution.get(row, col) {
                CellState::Unknown => return false,
                CellState::White => {
                    if !is_cell_state_valid(grid, solution, row, col, CellState::White) {
                        return false;
                    }
                }
                CellState::Black => {
                    if !is_cell_state_valid(grid, solution, row, col, CellState::Black) {
                        return false;
                    }
                }
            }
        }
    }
    all_white_cells_connected(solution)
}
