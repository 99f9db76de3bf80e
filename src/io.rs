//! Reads the whitespace-separated input grid format and writes the solved
//! board back out in the `O`/`X`/`?` output format.

use std::fs;
use std::path::Path;

use crate::board::{CellState, Grid, SolutionGrid};
use crate::error::SolverError;

/// Parses a square grid of whitespace-separated positive integers, one row
/// per line.
pub fn read_grid(path: impl AsRef<Path>) -> Result<Grid, SolverError> {
    let path_ref = path.as_ref();
    let text = fs::read_to_string(path_ref).map_err(|source| SolverError::Io {
        path: path_ref.display().to_string(),
        source,
    })?;

    let mut rows = Vec::new();
    for (row_idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let mut row = Vec::new();
        for token in trimmed.split_whitespace() {
            let value = token
                .parse::<u32>()
                .map_err(|_| SolverError::InvalidCell { row: row_idx, token: token.to_string() })?;
            row.push(value);
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(SolverError::EmptyGrid);
    }

    let side = rows.len();
    for row in &rows {
        if row.len() != side {
            return Err(SolverError::NotSquare { rows: side, cols: row.len() });
        }
    }

    Ok(Grid::new(side, rows.into_iter().flatten().collect()))
}

/// Writes `solution` to `path` as one `O `/`X `/`? ` cell per line entry.
pub fn write_solution(path: impl AsRef<Path>, solution: &SolutionGrid) -> Result<(), SolverError> {
    let path_ref = path.as_ref();
    fs::write(path_ref, render(solution)).map_err(|source| SolverError::Output {
        path: path_ref.display().to_string(),
        source,
    })
}

fn render(solution: &SolutionGrid) -> String {
    let side = solution.side();
    let mut out = String::with_capacity(side * side * 2);
    for row in 0..side {
        for col in 0..side {
            let c = match solution.get(row, col) {
                CellState::White => 'O',
                CellState::Black => 'X',
                CellState::Unknown => '?',
            };
            out.push(c);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_a_square_grid() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "1 2 3\n4 5 6\n7 8 9\n").unwrap();
        let grid = read_grid(file.path()).unwrap();
        assert_eq!(grid.side(), 3);
        assert_eq!(grid.get(1, 2), 6);
    }

    #[test]
    fn rejects_a_non_square_grid() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "1 2 3\n4 5\n").unwrap();
        assert!(matches!(read_grid(file.path()), Err(SolverError::NotSquare { .. })));
    }

    #[test]
    fn writes_the_expected_symbols() {
        let mut solution = SolutionGrid::unknown(2);
        solution.set(0, 0, CellState::White);
        solution.set(0, 1, CellState::Black);
        assert_eq!(render(&solution), "O X \n? ? \n");
    }
}
