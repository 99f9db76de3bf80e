//! Errors that can actually cross the program boundary.
//!
//! Protocol invariant violations are logged in place, never raised here —
//! see the module docs on [`crate::manager`] and [`crate::worker`]. Only
//! input handling produces a `Result` a caller has to react to.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("failed to read input file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("grid is not square: {rows} rows but {cols} columns")]
    NotSquare { rows: usize, cols: usize },

    #[error("grid is empty")]
    EmptyGrid,

    #[error("row {row} has a non-numeric or missing cell: {token:?}")]
    InvalidCell { row: usize, token: String },

    #[error("failed to write output file {path}: {source}")]
    Output {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
