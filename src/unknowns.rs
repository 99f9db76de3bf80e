//! The reduced coordinate system that all subspace identifiers, leaf
//! enumeration, and stride arithmetic operate in: the cells still `Unknown`
//! after pruning, listed in row-major order.

use crate::board::{CellState, SolutionGrid};

/// Per-row list of column indices that are still [`CellState::Unknown`],
/// computed once after the pruning fixpoint and treated as read-only for
/// the rest of the run.
#[derive(Debug, Clone)]
pub struct UnknownIndex {
    /// `columns[row]` is the sorted list of unknown columns in `row`.
    columns: Vec<Vec<usize>>,
}

impl UnknownIndex {
    pub fn compute(board: &SolutionGrid) -> Self {
        let side = board.side();
        let mut columns = vec![Vec::new(); side];
        for (row, row_columns) in columns.iter_mut().enumerate() {
            for col in 0..side {
                if board.get(row, col) == CellState::Unknown {
                    row_columns.push(col);
                }
            }
        }
        UnknownIndex { columns }
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.columns.len()
    }

    /// Number of unknown cells in `row`.
    #[inline]
    pub fn row_len(&self, row: usize) -> usize {
        self.columns[row].len()
    }

    /// The grid column of the `idx`-th unknown cell of `row`.
    #[inline]
    pub fn col_at(&self, row: usize, idx: usize) -> usize {
        self.columns[row][idx]
    }

    /// Total number of unknown cells across the whole grid.
    pub fn total(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    /// Row-major iteration over unknown-index coordinates `(row, idx)` paired
    /// with the grid column they denote.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.columns.iter().enumerate().flat_map(|(row, cols)| {
            cols.iter()
                .enumerate()
                .map(move |(idx, &col)| (row, idx, col))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::SolutionGrid;

    #[test]
    fn computes_row_major_unknowns() {
        let mut g = SolutionGrid::unknown(2);
        g.set(0, 0, CellState::White);
        let idx = UnknownIndex::compute(&g);
        assert_eq!(idx.total(), 3);
        assert_eq!(idx.row_len(0), 1);
        assert_eq!(idx.col_at(0, 0), 1);
        assert_eq!(idx.row_len(1), 2);
        let all: Vec<_> = idx.iter().collect();
        assert_eq!(all, vec![(0, 0, 1), (1, 0, 0), (1, 1, 1)]);
    }
}
