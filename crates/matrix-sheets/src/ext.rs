//! Store extension: assembled views and CSV exchange

use std::path::Path;

use matrix_sheets_core::{
    disassemble, AssembledGrid, GridAssembler, Matrix, MatrixId, MatrixView, UserId,
};
use matrix_sheets_csv::{CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};
use matrix_sheets_store::{MatrixContents, MatrixStore, NewMatrix};

use crate::error::{Error, Result};

/// Extension trait for any [`MatrixStore`]
///
/// Fetches a matrix's records and runs the grid assembler over them, so
/// callers never see raw cells.
pub trait StoreExt: MatrixStore {
    /// Assemble one stored matrix
    fn assemble_matrix(&self, matrix: &Matrix, assembler: &GridAssembler) -> Result<MatrixView> {
        let contents = self.contents(matrix.id)?;
        MatrixView::build(matrix, &contents.cells, &contents.labels, assembler).map_err(
            |source| Error::CorruptMatrix {
                id: matrix.id,
                source,
            },
        )
    }

    /// View of the matrix with `id`, `None` if it does not exist
    fn view(&self, id: MatrixId, assembler: &GridAssembler) -> Result<Option<MatrixView>> {
        match self.matrix(id)? {
            Some(matrix) => self.assemble_matrix(&matrix, assembler).map(Some),
            None => Ok(None),
        }
    }

    /// Views of all matrices, ordered by name
    fn views(&self, assembler: &GridAssembler) -> Result<Vec<MatrixView>> {
        self.matrices()?
            .iter()
            .map(|m| self.assemble_matrix(m, assembler))
            .collect()
    }

    /// Views of the matrices owned by `owner`, ordered by name
    fn user_views(&self, owner: UserId, assembler: &GridAssembler) -> Result<Vec<MatrixView>> {
        self.matrices_for_user(owner)?
            .iter()
            .map(|m| self.assemble_matrix(m, assembler))
            .collect()
    }

    /// Create a matrix from a grid and its axis names
    fn create_from_grid(
        &self,
        owner: UserId,
        name: &str,
        slug: &str,
        grid: &AssembledGrid,
    ) -> Result<Matrix> {
        let contents = contents_of(grid)?;
        let matrix = self.create_matrix(NewMatrix {
            name: name.to_string(),
            slug: slug.to_string(),
            owner,
            contents,
        })?;
        tracing::debug!(matrix_id = %matrix.id, rows = grid.rows(), cols = grid.cols(), "Created matrix");
        Ok(matrix)
    }

    /// Replace a matrix's grid and axis names, optionally renaming it
    fn replace_grid(&self, id: MatrixId, name: Option<&str>, grid: &AssembledGrid) -> Result<Matrix> {
        let contents = contents_of(grid)?;
        Ok(self.replace_matrix(id, name, contents)?)
    }

    /// Import a labelled CSV file as a new matrix
    fn import_csv(
        &self,
        owner: UserId,
        name: &str,
        slug: &str,
        path: &Path,
        options: &CsvReadOptions,
    ) -> Result<Matrix> {
        let grid = CsvReader::read_file(path, options)?;
        let matrix = self.create_from_grid(owner, name, slug, &grid)?;
        tracing::info!(matrix_id = %matrix.id, path = %path.display(), "Imported CSV");
        Ok(matrix)
    }

    /// Export a stored matrix to a CSV file
    fn export_csv(
        &self,
        id: MatrixId,
        assembler: &GridAssembler,
        path: &Path,
        options: &CsvWriteOptions,
    ) -> Result<Option<MatrixView>> {
        let Some(view) = self.view(id, assembler)? else {
            return Ok(None);
        };
        let grid = view.clone().into_assembled();
        CsvWriter::write_file(&grid, path, options)?;
        Ok(Some(view))
    }
}

impl<S: MatrixStore + ?Sized> StoreExt for S {}

fn contents_of(grid: &AssembledGrid) -> Result<MatrixContents> {
    let (cells, labels) = disassemble(&grid.grid, &grid.row_labels, &grid.col_labels)?;
    Ok(MatrixContents::new(cells, labels))
}
