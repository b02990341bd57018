//! CSV error types

use matrix_sheets_core::{Axis, GridError};
use thiserror::Error;

/// Result type for CSV import and export
pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Errors raised while moving a grid in or out of CSV
#[derive(Debug, Error)]
pub enum CsvError {
    /// Opening, reading or writing the file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed quoting or encoding, as reported by the csv crate
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A record or the header does not fit the grid (1-based position)
    #[error("Bad record at line {row}, field {column}: {message}")]
    Parse {
        row: usize,
        column: usize,
        message: String,
    },

    /// More names on an axis than the grid has rows or columns
    #[error("{names} {axis} names for a grid with {len} on that axis")]
    TooManyNames { axis: Axis, names: usize, len: usize },

    /// Values read do not form a storable grid
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),
}
