//! Error types for the matrix-sheets facade

use matrix_sheets_core::{GridError, MatrixId};
use matrix_sheets_csv::CsvError;
use matrix_sheets_store::StoreError;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from loading, assembling or exchanging matrices
#[derive(Debug, Error)]
pub enum Error {
    /// Storage failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A caller-supplied grid is not usable
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Records already in the store do not form a valid grid
    #[error("Matrix {id} is corrupt: {source}")]
    CorruptMatrix {
        id: MatrixId,
        #[source]
        source: GridError,
    },

    /// CSV import/export failure
    #[error(transparent)]
    Csv(#[from] CsvError),
}
