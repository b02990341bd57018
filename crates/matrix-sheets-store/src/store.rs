//! The storage contract shared by every backend

use matrix_sheets_core::{Cell, Label, Matrix, MatrixId, User, UserId};

use crate::error::StoreResult;
use crate::password::PasswordDigest;

/// Cell and label records of one matrix
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatrixContents {
    pub cells: Vec<Cell>,
    pub labels: Vec<Label>,
}

impl MatrixContents {
    pub fn new(cells: Vec<Cell>, labels: Vec<Label>) -> Self {
        Self { cells, labels }
    }
}

/// Everything needed to create a matrix
#[derive(Debug, Clone)]
pub struct NewMatrix {
    pub name: String,
    pub slug: String,
    pub owner: UserId,
    pub contents: MatrixContents,
}

/// Persistence for users, matrices and their cell/label records
///
/// Listings are ordered by matrix name, ties broken by id. Cell and label
/// order within a matrix is unspecified; callers run the grid assembler.
pub trait MatrixStore: Send + Sync {
    /// Create a user; fails with `Conflict` if the username is taken
    fn create_user(&self, username: &str, password: PasswordDigest) -> StoreResult<User>;

    fn user(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Look up a user together with their stored password digest
    fn user_credentials(&self, username: &str) -> StoreResult<Option<(User, PasswordDigest)>>;

    /// Create a matrix with its contents; fails with `NotFound` for an
    /// unknown owner and `Conflict` for a taken slug
    fn create_matrix(&self, new: NewMatrix) -> StoreResult<Matrix>;

    fn matrix(&self, id: MatrixId) -> StoreResult<Option<Matrix>>;

    fn matrix_by_slug(&self, slug: &str) -> StoreResult<Option<Matrix>>;

    /// All matrices ordered by name
    fn matrices(&self) -> StoreResult<Vec<Matrix>>;

    /// Matrices owned by `owner`, ordered by name
    fn matrices_for_user(&self, owner: UserId) -> StoreResult<Vec<Matrix>>;

    fn cells(&self, id: MatrixId) -> StoreResult<Vec<Cell>>;

    fn labels(&self, id: MatrixId) -> StoreResult<Vec<Label>>;

    /// Replace the contents (and optionally the name) of a matrix
    fn replace_matrix(
        &self,
        id: MatrixId,
        name: Option<&str>,
        contents: MatrixContents,
    ) -> StoreResult<Matrix>;

    /// Delete a matrix and its records; fails with `NotFound` if absent
    fn delete_matrix(&self, id: MatrixId) -> StoreResult<()>;

    /// Cells and labels of a matrix in one call
    fn contents(&self, id: MatrixId) -> StoreResult<MatrixContents> {
        Ok(MatrixContents {
            cells: self.cells(id)?,
            labels: self.labels(id)?,
        })
    }
}
