//! Error types for matrix-sheets-core

use thiserror::Error;

use crate::label::Axis;

/// Result type alias using [`GridError`]
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors raised while assembling or disassembling a grid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// No cells were supplied
    #[error("Matrix has no cells")]
    EmptyMatrix,

    /// Cell indices do not cover a complete rectangle
    #[error("Malformed grid: {0}")]
    MalformedGrid(#[from] Malformation),

    /// Two labels share the same axis and index
    #[error("Duplicate {axis} label at index {index}")]
    DuplicateLabel { axis: Axis, index: u32 },
}

/// What exactly is wrong with a malformed grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Malformation {
    /// Two cells claim the same position
    #[error("duplicate cell at row {row}, column {col}")]
    DuplicateCell { row: u32, col: u32 },

    /// No cell was supplied for a position inside the rectangle
    #[error("missing cell at row {row}, column {col}")]
    MissingCell { row: u32, col: u32 },

    /// The cell count cannot fill a `rows x cols` rectangle
    #[error("{cells} cells cannot fill a {rows}x{cols} rectangle")]
    ShapeMismatch { rows: u64, cols: u64, cells: u64 },
}
