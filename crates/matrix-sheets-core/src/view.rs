//! JSON view of an assembled matrix

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::Result;
use crate::grid::{AssembledGrid, GridAssembler};
use crate::label::Label;
use crate::matrix::Matrix;

/// The client-facing shape of a matrix
///
/// Serialises as `{"name", "grid", "row_names", "col_names"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixView {
    pub name: String,
    pub grid: Vec<Vec<String>>,
    pub row_names: Vec<String>,
    pub col_names: Vec<String>,
}

impl MatrixView {
    /// Combine a matrix record with its already assembled grid
    pub fn from_parts(matrix: &Matrix, assembled: AssembledGrid) -> Self {
        Self {
            name: matrix.name.clone(),
            grid: assembled.grid,
            row_names: assembled.row_labels,
            col_names: assembled.col_labels,
        }
    }

    /// Assemble `cells` and `labels` and attach the matrix name
    pub fn build(
        matrix: &Matrix,
        cells: &[Cell],
        labels: &[Label],
        assembler: &GridAssembler,
    ) -> Result<Self> {
        let assembled = assembler.assemble(cells, labels)?;
        Ok(Self::from_parts(matrix, assembled))
    }

    /// Back to the assembler's output type
    pub fn into_assembled(self) -> AssembledGrid {
        AssembledGrid {
            grid: self.grid,
            row_labels: self.row_names,
            col_labels: self.col_names,
        }
    }
}
