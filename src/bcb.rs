//! Block Control Block: a partial solution plus the mask of unknowns that
//! identify which solution subspace it belongs to.
//!
//! Grounded on `original_source/MPI/src/backtracking.h`'s `BCB` struct and
//! its `block_to_buffer`/`buffer_to_block` wire format, and on
//! `board.c`/`main.c` for how a BCB flows through the W2W-bulk channel.

use crate::board::{CellState, SolutionGrid};
use crate::unknowns::UnknownIndex;

/// A partial assignment (`solution`) together with the subset of unknown
/// cells (`pinned`) whose current value is fixed as the identity of this
/// solution subspace, rather than free for backtracking to flip.
///
/// `pinned[row][idx]` parallels `UnknownIndex::col_at(row, idx)`: it is
/// `true` exactly when that unknown cell's value in `solution` is pinned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bcb {
    pub solution: SolutionGrid,
    pinned: Vec<Vec<bool>>,
}

impl Bcb {
    /// A BCB over the whole board with nothing pinned yet.
    pub fn new(solution: SolutionGrid, unknowns: &UnknownIndex) -> Self {
        let pinned = (0..unknowns.side())
            .map(|row| vec![false; unknowns.row_len(row)])
            .collect();
        Bcb { solution, pinned }
    }

    pub fn is_pinned(&self, row: usize, idx: usize) -> bool {
        self.pinned[row][idx]
    }

    pub fn set_pinned(&mut self, row: usize, idx: usize, value: bool) {
        self.pinned[row][idx] = value;
    }

    /// Number of unknowns pinned down, i.e. how specific a subspace this
    /// BCB identifies.
    pub fn pinned_count(&self) -> usize {
        self.pinned.iter().map(|row| row.iter().filter(|&&p| p).count()).sum()
    }

    /// Serializes this BCB to the `2*R*R`-integer wire layout: cell states
    /// in wire encoding, followed by the pinned mask flattened in the same
    /// per-row, per-unknown-slot shape as [`UnknownIndex`], padded with `0`
    /// past each row's unknown count.
    pub fn to_wire(&self, unknowns: &UnknownIndex) -> Vec<i32> {
        let side = self.solution.side();
        let mut buf = Vec::with_capacity(side * side * 2);
        for row in 0..side {
            for col in 0..side {
                buf.push(self.solution.get(row, col).to_wire());
            }
        }
        for row in 0..side {
            for idx in 0..side {
                let bit = idx < unknowns.row_len(row) && self.pinned[row][idx];
                buf.push(if bit { 1 } else { 0 });
            }
        }
        buf
    }

    pub fn from_wire(buf: &[i32], side: usize, unknowns: &UnknownIndex) -> Self {
        assert_eq!(buf.len(), side * side * 2, "malformed BCB wire buffer");
        let mut solution = SolutionGrid::unknown(side);
        for row in 0..side {
            for col in 0..side {
                solution.set(row, col, CellState::from_wire(buf[row * side + col]));
            }
        }
        let mask_base = side * side;
        let mut pinned = Vec::with_capacity(side);
        for row in 0..side {
            let row_len = unknowns.row_len(row);
            let mut row_mask = Vec::with_capacity(row_len);
            for idx in 0..row_len {
                row_mask.push(buf[mask_base + row * side + idx] == 1);
            }
            pinned.push(row_mask);
        }
        Bcb { solution, pinned }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CellState;

    #[test]
    fn wire_roundtrip_preserves_solution_and_pins() {
        let unknowns_board = SolutionGrid::unknown(3);
        let unknowns = UnknownIndex::compute(&unknowns_board);

        let mut solution = SolutionGrid::unknown(3);
        solution.set(0, 0, CellState::White);
        solution.set(1, 1, CellState::Black);
        let mut bcb = Bcb::new(solution, &unknowns);
        bcb.set_pinned(0, 0, true);

        let wire = bcb.to_wire(&unknowns);
        let back = Bcb::from_wire(&wire, 3, &unknowns);

        assert_eq!(back.solution, bcb.solution);
        assert!(back.is_pinned(0, 0));
        assert!(!back.is_pinned(0, 1));
        assert_eq!(back.pinned_count(), 1);
    }
}
