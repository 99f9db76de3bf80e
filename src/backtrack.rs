//! Depth-first leaf enumeration over a BCB's unpinned unknowns, with the
//! cooperative stride/skip bookkeeping that lets several workers share one
//! solution subspace without duplicating each other's leaves.
//!
//! Grounded on `original_source/MPI/src/backtracking.h`'s `build_leaf` and
//! `next_leaf`. Pinned unknowns (see [`crate::bcb::Bcb`]) are never
//! flipped; only free unknowns are tried White-then-Black.

use crate::bcb::Bcb;
use crate::board::{CellState, Grid};
use crate::unknowns::UnknownIndex;
use crate::validator::is_cell_state_valid;

/// How many peers are currently cooperating on one solution subspace, and
/// where in the round-robin this worker's next leaf falls. A lone worker
/// (`total_peers == 1`) never skips anything.
#[derive(Debug, Clone, Copy)]
pub struct Stride {
    skip: i64,
    total_peers: i64,
}

impl Stride {
    pub fn solo() -> Self {
        Stride { skip: 0, total_peers: 1 }
    }

    pub fn shared(total_peers: usize, initial_skip: usize) -> Self {
        Stride { skip: initial_skip as i64, total_peers: total_peers as i64 }
    }

    pub fn total_peers(&self) -> usize {
        self.total_peers as usize
    }
}

/// Descends into the first leaf reachable from unknown-index position
/// `(uk_row, uk_idx)` onward, mutating `bcb.solution` in place. Returns
/// `true` and leaves a complete leaf in `bcb.solution` on success; returns
/// `false` and restores every unpinned cell it touched to `Unknown` on
/// exhaustion.
pub fn build_leaf(
    grid: &Grid,
    bcb: &mut Bcb,
    unknowns: &UnknownIndex,
    mut uk_row: usize,
    mut uk_idx: usize,
    stride: &mut Stride,
) -> bool {
    let side = unknowns.side();
    while uk_row < side && uk_idx >= unknowns.row_len(uk_row) {
        uk_row += 1;
        uk_idx = 0;
    }

    if uk_row == side {
        if stride.total_peers > 1 {
            stride.skip -= 1;
            if stride.skip == -1 {
                stride.skip = stride.total_peers - 1;
            } else {
                return false;
            }
        }
        return true;
    }

    let col = unknowns.col_at(uk_row, uk_idx);
    let pinned = bcb.is_pinned(uk_row, uk_idx);
    let mut state = bcb.solution.get(uk_row, col);
    if !pinned && state == CellState::Unknown {
        state = CellState::White;
    }

    for _ in 0..2 {
        if is_cell_state_valid(grid, &bcb.solution, uk_row, col, state) {
            bcb.solution.set(uk_row, col, state);
            if build_leaf(grid, bcb, unknowns, uk_row, uk_idx + 1, stride) {
                return true;
            }
        }
        if pinned {
            break;
        }
        state = CellState::Black;
    }

    if !pinned {
        bcb.solution.set(uk_row, col, CellState::Unknown);
    }
    false
}

/// Backs up from the current leaf in `bcb.solution` to the next one in
/// enumeration order, scanning free unknowns from the bottom-right. Returns
/// `false` once it backs past the first free unknown (the subspace, or the
/// whole search if unpinned, is exhausted).
pub fn next_leaf(grid: &Grid, bcb: &mut Bcb, unknowns: &UnknownIndex, stride: &mut Stride) -> bool {
    let side = unknowns.side();
    for row in (0..side).rev() {
        for idx in (0..unknowns.row_len(row)).rev() {
            if bcb.is_pinned(row, idx) {
                return false;
            }

            let col = unknowns.col_at(row, idx);
            let state = bcb.solution.get(row, col);
            if state == CellState::Unknown {
                return false;
            }

            if state == CellState::White
                && is_cell_state_valid(grid, &bcb.solution, row, col, CellState::Black)
            {
                bcb.solution.set(row, col, CellState::Black);
                if build_leaf(grid, bcb, unknowns, row, idx + 1, stride) {
                    return true;
                }
            }

            bcb.solution.set(row, col, CellState::Unknown);
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pruning::prune;
    use crate::validator::check_hitori_conditions;

    #[test]
    fn build_then_next_leaf_enumerates_every_leaf_exactly_once() {
        let grid = Grid::new(3, vec![1, 2, 3, 3, 2, 1, 2, 1, 3]);
        let board = prune(&grid);
        let unknowns = UnknownIndex::compute(&board);

        let mut bcb = Bcb::new(board, &unknowns);
        let mut stride = Stride::solo();
        let mut leaves = Vec::new();

        let mut ok = build_leaf(&grid, &mut bcb, &unknowns, 0, 0, &mut stride);
        while ok {
            leaves.push(bcb.solution.clone());
            ok = next_leaf(&grid, &mut bcb, &unknowns, &mut stride);
        }

        assert!(!leaves.is_empty());
        let unique: std::collections::HashSet<_> = leaves.iter().cloned().collect();
        assert_eq!(unique.len(), leaves.len(), "no leaf should repeat");
    }

    #[test]
    fn at_least_one_enumerated_leaf_is_a_valid_hitori_solution() {
        // Row 0 has a repeated 7 with nothing else duplicated anywhere, so
        // exactly one of (0,0)/(0,2) must end up Black and backtracking has
        // to pick which; blackening (0,0) always yields a legal solution.
        #[rustfmt::skip]
        let grid = Grid::new(3, vec![
            7, 2, 7,
            4, 5, 6,
            8, 9, 1,
        ]);
        let board = prune(&grid);
        let unknowns = UnknownIndex::compute(&board);
        let mut bcb = Bcb::new(board, &unknowns);
        let mut stride = Stride::solo();

        let mut ok = build_leaf(&grid, &mut bcb, &unknowns, 0, 0, &mut stride);
        let mut found = false;
        while ok {
            if check_hitori_conditions(&grid, &bcb.solution) {
                found = true;
                break;
            }
            ok = next_leaf(&grid, &mut bcb, &unknowns, &mut stride);
        }
        assert!(found, "expected at least one valid solution among the leaves");
    }
}
