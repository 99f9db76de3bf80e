//! The input grid and the mutable cell-state array laid over it.

use std::fmt;

/// One of the three states a cell can be in during solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    Unknown,
    White,
    Black,
}

impl CellState {
    /// Sentinel encoding used on the wire: `Unknown = -1, White = 0, Black = 1`.
    pub fn to_wire(self) -> i32 {
        match self {
            CellState::Unknown => -1,
            CellState::White => 0,
            CellState::Black => 1,
        }
    }

    pub fn from_wire(v: i32) -> Self {
        match v {
            -1 => CellState::Unknown,
            0 => CellState::White,
            1 => CellState::Black,
            other => panic!("invalid cell state on wire: {other}"),
        }
    }
}

/// The R×R matrix of positive integers read from the input file. Immutable
/// after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    side: usize,
    values: Vec<u32>,
}

impl Grid {
    pub fn new(side: usize, values: Vec<u32>) -> Self {
        assert_eq!(values.len(), side * side, "grid values must be side*side");
        Grid { side, values }
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.values[row * self.side + col]
    }

    /// The transpose of this grid: `transpose(g).get(i, j) == g.get(j, i)`.
    pub fn transpose(&self) -> Grid {
        let side = self.side;
        let mut values = vec![0u32; side * side];
        for i in 0..side {
            for j in 0..side {
                values[j * side + i] = self.get(i, j);
            }
        }
        Grid { side, values }
    }
}

/// An R×R mapping of [`CellState`], indexed row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SolutionGrid {
    side: usize,
    cells: Vec<CellState>,
}

impl SolutionGrid {
    pub fn unknown(side: usize) -> Self {
        SolutionGrid {
            side,
            cells: vec![CellState::Unknown; side * side],
        }
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> CellState {
        self.cells[row * self.side + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, state: CellState) {
        self.cells[row * self.side + col] = state;
    }

    pub fn transpose(&self) -> SolutionGrid {
        let side = self.side;
        let mut cells = vec![CellState::Unknown; side * side];
        for i in 0..side {
            for j in 0..side {
                cells[j * side + i] = self.get(i, j);
            }
        }
        SolutionGrid { side, cells }
    }

    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), CellState)> + '_ {
        let side = self.side;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &s)| ((idx / side, idx % side), s))
    }
}

impl fmt::Display for SolutionGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.side {
            for j in 0..self.side {
                let c = match self.get(i, j) {
                    CellState::White => 'O',
                    CellState::Black => 'X',
                    CellState::Unknown => '?',
                };
                write!(f, "{c} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
