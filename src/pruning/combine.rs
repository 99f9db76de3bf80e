//! Merges two partial [`SolutionGrid`]s produced by independent pruning
//! kernels.
//!
//! Grounded on `original_source/MPI/src/board.c:combine_boards`: both the
//! forced and non-forced modes share one pairwise rule, and the only
//! difference is whether a disagreement may be resolved by taking the
//! known side when the other is still `Unknown`. A genuine disagreement
//! between two definite values always collapses to `Unknown` in both
//! modes, so there is no White-vs-Black priority to encode.

use crate::board::{CellState, SolutionGrid};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Used only to consolidate row/column evidence for the Uniqueness
    /// rule: a disagreement, even Unknown-vs-definite, stays Unknown.
    Forced,
    /// The monotone join used for every other rule pair.
    NonForced,
}

pub fn combine(a: &SolutionGrid, b: &SolutionGrid, mode: Mode) -> SolutionGrid {
    assert_eq!(a.side(), b.side());
    let side = a.side();
    let mut out = SolutionGrid::unknown(side);
    for row in 0..side {
        for col in 0..side {
            let x = a.get(row, col);
            let y = b.get(row, col);
            let merged = if x == y {
                x
            } else if mode == Mode::NonForced && x == CellState::Unknown {
                y
            } else if mode == Mode::NonForced && y == CellState::Unknown {
                x
            } else {
                CellState::Unknown
            };
            out.set(row, col, merged);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_with_self_is_identity() {
        let mut g = SolutionGrid::unknown(2);
        g.set(0, 0, CellState::White);
        g.set(1, 1, CellState::Black);
        for mode in [Mode::Forced, Mode::NonForced] {
            assert_eq!(combine(&g, &g, mode), g);
        }
    }

    #[test]
    fn non_forced_fills_from_known_side() {
        let mut a = SolutionGrid::unknown(1);
        a.set(0, 0, CellState::White);
        let b = SolutionGrid::unknown(1);
        let merged = combine(&a, &b, Mode::NonForced);
        assert_eq!(merged.get(0, 0), CellState::White);
    }

    #[test]
    fn forced_does_not_fill_from_unknown_side() {
        let mut a = SolutionGrid::unknown(1);
        a.set(0, 0, CellState::White);
        let b = SolutionGrid::unknown(1);
        let merged = combine(&a, &b, Mode::Forced);
        assert_eq!(merged.get(0, 0), CellState::Unknown);
    }

    #[test]
    fn disagreement_collapses_to_unknown_in_both_modes() {
        let mut a = SolutionGrid::unknown(1);
        a.set(0, 0, CellState::White);
        let mut b = SolutionGrid::unknown(1);
        b.set(0, 0, CellState::Black);
        for mode in [Mode::Forced, Mode::NonForced] {
            assert_eq!(combine(&a, &b, mode).get(0, 0), CellState::Unknown);
        }
    }
}
