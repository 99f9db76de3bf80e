//! The five pure pattern-matching rules used by the pruning fixpoint.
//!
//! Every kernel reads the [`Grid`] (and, where noted, the current
//! [`SolutionGrid`]) and returns a partial assignment: cells it can decide
//! are set to `White`/`Black`, everything else is left `Unknown`. Each
//! kernel is applied once to the rows and once to the transposed grid (for
//! columns), then the two partial results are folded together with
//! [`combine`]. Grounded on `original_source/MPI/src/pruning.c`.

use crate::board::{CellState, Grid, SolutionGrid};
use crate::pruning::combine::{combine, Mode};

/// Runs `rule` against every row of `grid`, then against every row of
/// `grid`'s transpose (i.e. every column of `grid`), and folds the two
/// partial grids together under `mode`.
fn for_rows_and_cols(
    grid: &Grid,
    mode: Mode,
    rule: impl Fn(&Grid, usize, &mut SolutionGrid),
) -> SolutionGrid {
    let side = grid.side();
    let mut row_result = SolutionGrid::unknown(side);
    for row in 0..side {
        rule(grid, row, &mut row_result);
    }

    let transposed = grid.transpose();
    let mut col_result_t = SolutionGrid::unknown(side);
    for row in 0..side {
        rule(&transposed, row, &mut col_result_t);
    }
    let col_result = col_result_t.transpose();

    combine(&row_result, &col_result, mode)
}

fn row_values(grid: &Grid, row: usize) -> Vec<u32> {
    (0..grid.side()).map(|c| grid.get(row, c)).collect()
}

/// In every row (and column), a value appearing exactly once is White.
pub fn uniqueness(grid: &Grid) -> SolutionGrid {
    for_rows_and_cols(grid, Mode::Forced, |grid, row, out| {
        let values = row_values(grid, row);
        for (col, &v) in values.iter().enumerate() {
            let unique = values.iter().enumerate().all(|(k, &w)| k == col || w != v);
            if unique {
                out.set(row, col, CellState::White);
            }
        }
    })
}

/// Sandwich-triple (`a a a` ⇒ `X O X`, brackets White) and sandwich-pair
/// (`a b a`, a≠b ⇒ middle White).
pub fn sandwich(grid: &Grid) -> SolutionGrid {
    for_rows_and_cols(grid, Mode::NonForced, |grid, row, out| {
        let side = grid.side();
        let values = row_values(grid, row);
        for j in 0..side {
            if j + 2 >= side {
                continue;
            }
            let (v1, v2, v3) = (values[j], values[j + 1], values[j + 2]);
            if v1 == v2 && v2 == v3 {
                out.set(row, j, CellState::Black);
                out.set(row, j + 1, CellState::White);
                out.set(row, j + 2, CellState::Black);
                if j >= 1 {
                    out.set(row, j - 1, CellState::White);
                }
                if j + 3 < side {
                    out.set(row, j + 3, CellState::White);
                }
            } else if v1 != v2 && v1 == v3 {
                out.set(row, j + 1, CellState::White);
            }
        }
    })
}

/// A value forming an adjacent pair makes every other isolated occurrence
/// of the same value Black, with its line-neighbors White.
pub fn pair_isolation(grid: &Grid) -> SolutionGrid {
    for_rows_and_cols(grid, Mode::NonForced, |grid, row, out| {
        let side = grid.side();
        let values = row_values(grid, row);
        for j in 0..side.saturating_sub(1) {
            if values[j] != values[j + 1] {
                continue;
            }
            let pair_value = values[j];
            for k in 0..side {
                if k == j || k == j + 1 || values[k] != pair_value {
                    continue;
                }
                let isolated = (k == 0 || values[k - 1] != pair_value)
                    && (k + 1 >= side || values[k + 1] != pair_value);
                if isolated {
                    out.set(row, k, CellState::Black);
                    if k >= 1 {
                        out.set(row, k - 1, CellState::White);
                    }
                    if k + 1 < side {
                        out.set(row, k + 1, CellState::White);
                    }
                }
            }
        }
    })
}

/// Pattern `a b b a` (a≠b) makes any isolated occurrence of `a` or `b`
/// elsewhere in the line Black, with neighbors White.
pub fn flanked_isolation(grid: &Grid) -> SolutionGrid {
    for_rows_and_cols(grid, Mode::NonForced, |grid, row, out| {
        let side = grid.side();
        let values = row_values(grid, row);
        for j in 0..side {
            if j + 3 >= side {
                continue;
            }
            let (v1, v2, v3, v4) = (values[j], values[j + 1], values[j + 2], values[j + 3]);
            if v1 == v4 && v2 == v3 && v1 != v2 {
                for (k, &single) in values.iter().enumerate() {
                    if k == j || k == j + 1 || k == j + 2 || k == j + 3 {
                        continue;
                    }
                    if single == v1 || single == v2 {
                        out.set(row, k, CellState::Black);
                        if k >= 1 {
                            out.set(row, k - 1, CellState::White);
                        }
                        if k + 1 < side {
                            out.set(row, k + 1, CellState::White);
                        }
                    }
                }
            }
        }
    })
}

#[derive(Debug, Clone, Copy)]
enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

const CORNERS: [Corner; 4] = [
    Corner::TopLeft,
    Corner::TopRight,
    Corner::BottomLeft,
    Corner::BottomRight,
];

/// Four 2×2 corner sub-patterns: triple corner, pair corner, quad corner,
/// and corner-close (an already-Black edge cell forces the other White).
pub fn corner_cases(grid: &Grid, current: &SolutionGrid) -> SolutionGrid {
    let side = grid.side();
    if side < 2 {
        return SolutionGrid::unknown(side);
    }

    let mut partials = Vec::with_capacity(4);
    for corner in CORNERS {
        let (row0, col0) = match corner {
            Corner::TopLeft => (0, 0),
            Corner::TopRight => (0, side - 2),
            Corner::BottomLeft => (side - 2, 0),
            Corner::BottomRight => (side - 2, side - 2),
        };
        partials.push(compute_corner(grid, current, row0, col0, corner));
    }

    let top = combine(&partials[0], &partials[1], Mode::NonForced);
    let bottom = combine(&partials[2], &partials[3], Mode::NonForced);
    combine(&top, &bottom, Mode::NonForced)
}

#[allow(clippy::if_same_then_else)]
fn compute_corner(
    grid: &Grid,
    current: &SolutionGrid,
    row0: usize,
    col0: usize,
    corner: Corner,
) -> SolutionGrid {
    let side = grid.side();
    let mut out = SolutionGrid::unknown(side);

    let (r0, c0, r1, c1) = (row0, col0, row0 + 1, col0 + 1);
    let top_left = grid.get(r0, c0);
    let top_right = grid.get(r0, c1);
    let bottom_left = grid.get(r1, c0);
    let bottom_right = grid.get(r1, c1);

    use Corner::*;

    // Triple corner.
    match corner {
        TopLeft | BottomRight => {
            if top_left == top_right && top_left == bottom_left {
                out.set(r0, c0, CellState::Black);
                out.set(r0, c1, CellState::White);
                out.set(r1, c0, CellState::White);
            } else if bottom_right == top_right && bottom_right == bottom_left {
                out.set(r1, c1, CellState::Black);
                out.set(r1, c0, CellState::White);
                out.set(r0, c1, CellState::White);
            }
        }
        TopRight | BottomLeft => {
            if top_left == top_right && top_right == bottom_right {
                out.set(r0, c1, CellState::Black);
                out.set(r0, c0, CellState::White);
                out.set(r1, c1, CellState::White);
            } else if bottom_left == top_left && bottom_left == bottom_right {
                out.set(r1, c0, CellState::Black);
                out.set(r0, c0, CellState::White);
                out.set(r1, c1, CellState::White);
            }
        }
    }

    // Pair corner.
    match corner {
        TopLeft | BottomRight => {
            if top_left == top_right {
                out.set(r1, c0, CellState::White);
            } else if top_left == bottom_left {
                out.set(r0, c1, CellState::White);
            } else if bottom_left == bottom_right {
                out.set(r0, c1, CellState::White);
            } else if top_right == bottom_right {
                out.set(r1, c0, CellState::White);
            }
        }
        TopRight | BottomLeft => {
            if top_left == top_right {
                out.set(r1, c1, CellState::White);
            } else if top_right == bottom_right {
                out.set(r0, c0, CellState::White);
            } else if bottom_left == bottom_right {
                out.set(r0, c0, CellState::White);
            } else if top_left == bottom_left {
                out.set(r1, c1, CellState::White);
            }
        }
    }

    // Quad corner: diagonal pairs equal (row-wise or column-wise repeats).
    if (top_left == top_right && top_left == bottom_left && top_left == bottom_right)
        || (top_right == bottom_right && top_left == bottom_left)
        || (top_left == top_right && bottom_left == bottom_right)
    {
        match corner {
            TopLeft | BottomLeft => {
                out.set(r0, c0, CellState::Black);
                out.set(r0, c1, CellState::White);
                out.set(r1, c0, CellState::White);
                out.set(r1, c1, CellState::Black);
            }
            TopRight | BottomRight => {
                out.set(r0, c0, CellState::White);
                out.set(r0, c1, CellState::Black);
                out.set(r1, c0, CellState::Black);
                out.set(r1, c1, CellState::White);
            }
        }
    }

    // Corner-close: an already-Black edge cell forces the other edge White.
    match corner {
        TopLeft | BottomRight => {
            if current.get(r0, c1) == CellState::Black {
                out.set(r1, c0, CellState::White);
            } else if current.get(r1, c0) == CellState::Black {
                out.set(r0, c1, CellState::White);
            }
        }
        TopRight | BottomLeft => {
            if current.get(r0, c0) == CellState::Black {
                out.set(r1, c1, CellState::White);
            } else if current.get(r1, c1) == CellState::Black {
                out.set(r0, c0, CellState::White);
            }
        }
    }

    out
}

/// For each current White cell `(i,j)` with value `v`, every other cell in
/// the same row/column with value `v` is Black, with its line-neighbors
/// White.
pub fn set_white(grid: &Grid, current: &SolutionGrid) -> SolutionGrid {
    for_rows_and_cols_stateful(grid, current, Mode::NonForced, |grid, current, row, out| {
        let side = grid.side();
        for col in 0..side {
            if current.get(row, col) != CellState::White {
                continue;
            }
            let value = grid.get(row, col);
            for k in 0..side {
                if k != col && grid.get(row, k) == value {
                    out.set(row, k, CellState::Black);
                    if k >= 1 {
                        out.set(row, k - 1, CellState::White);
                    }
                    if k + 1 < side {
                        out.set(row, k + 1, CellState::White);
                    }
                }
            }
        }
    })
}

/// For each current Black cell, all 4-orthogonal neighbors are White.
pub fn set_black(grid: &Grid, current: &SolutionGrid) -> SolutionGrid {
    for_rows_and_cols_stateful(grid, current, Mode::NonForced, |grid, current, row, out| {
        let side = grid.side();
        for col in 0..side {
            if current.get(row, col) != CellState::Black {
                continue;
            }
            if col >= 1 {
                out.set(row, col - 1, CellState::White);
            }
            if col + 1 < side {
                out.set(row, col + 1, CellState::White);
            }
        }
    })
}

fn for_rows_and_cols_stateful(
    grid: &Grid,
    current: &SolutionGrid,
    mode: Mode,
    rule: impl Fn(&Grid, &SolutionGrid, usize, &mut SolutionGrid),
) -> SolutionGrid {
    let side = grid.side();
    let mut row_result = SolutionGrid::unknown(side);
    for row in 0..side {
        rule(grid, current, row, &mut row_result);
    }

    let t_grid = grid.transpose();
    let t_current = current.transpose();
    let mut col_result_t = SolutionGrid::unknown(side);
    for row in 0..side {
        rule(&t_grid, &t_current, row, &mut col_result_t);
    }
    let col_result = col_result_t.transpose();

    combine(&row_result, &col_result, mode)
}
