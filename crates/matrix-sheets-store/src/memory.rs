//! In-memory store

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use matrix_sheets_core::{Cell, Label, Matrix, MatrixId, User, UserId};

use crate::error::{StoreError, StoreResult};
use crate::password::PasswordDigest;
use crate::store::{MatrixContents, MatrixStore, NewMatrix};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, (User, PasswordDigest)>,
    matrices: BTreeMap<MatrixId, Matrix>,
    contents: HashMap<MatrixId, MatrixContents>,
    next_user: i64,
    next_matrix: i64,
}

impl Tables {
    fn sorted(mut matrices: Vec<Matrix>) -> Vec<Matrix> {
        matrices.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        matrices
    }
}

/// A store that keeps everything in process memory
///
/// Used by tests and by the server when no database path is configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|_| StoreError::Poisoned)
    }
}

impl MatrixStore for MemoryStore {
    fn create_user(&self, username: &str, password: PasswordDigest) -> StoreResult<User> {
        let mut tables = self.write()?;
        if tables.users.values().any(|(u, _)| u.username == username) {
            return Err(StoreError::Conflict(format!("username '{username}' is taken")));
        }

        tables.next_user += 1;
        let user = User {
            id: UserId(tables.next_user),
            username: username.to_string(),
        };
        tables.users.insert(user.id, (user.clone(), password));
        Ok(user)
    }

    fn user(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.read()?.users.get(&id).map(|(u, _)| u.clone()))
    }

    fn user_credentials(&self, username: &str) -> StoreResult<Option<(User, PasswordDigest)>> {
        Ok(self
            .read()?
            .users
            .values()
            .find(|(u, _)| u.username == username)
            .cloned())
    }

    fn create_matrix(&self, new: NewMatrix) -> StoreResult<Matrix> {
        let mut tables = self.write()?;
        if !tables.users.contains_key(&new.owner) {
            return Err(StoreError::not_found("user", new.owner.0));
        }
        if tables.matrices.values().any(|m| m.slug == new.slug) {
            return Err(StoreError::Conflict(format!("slug '{}' is taken", new.slug)));
        }

        tables.next_matrix += 1;
        let matrix = Matrix {
            id: MatrixId(tables.next_matrix),
            name: new.name,
            slug: new.slug,
            owner: new.owner,
        };
        tables.matrices.insert(matrix.id, matrix.clone());
        tables.contents.insert(matrix.id, new.contents);
        Ok(matrix)
    }

    fn matrix(&self, id: MatrixId) -> StoreResult<Option<Matrix>> {
        Ok(self.read()?.matrices.get(&id).cloned())
    }

    fn matrix_by_slug(&self, slug: &str) -> StoreResult<Option<Matrix>> {
        Ok(self
            .read()?
            .matrices
            .values()
            .find(|m| m.slug == slug)
            .cloned())
    }

    fn matrices(&self) -> StoreResult<Vec<Matrix>> {
        let all = self.read()?.matrices.values().cloned().collect();
        Ok(Tables::sorted(all))
    }

    fn matrices_for_user(&self, owner: UserId) -> StoreResult<Vec<Matrix>> {
        let owned = self
            .read()?
            .matrices
            .values()
            .filter(|m| m.owner == owner)
            .cloned()
            .collect();
        Ok(Tables::sorted(owned))
    }

    fn cells(&self, id: MatrixId) -> StoreResult<Vec<Cell>> {
        Ok(self
            .read()?
            .contents
            .get(&id)
            .map(|c| c.cells.clone())
            .unwrap_or_default())
    }

    fn labels(&self, id: MatrixId) -> StoreResult<Vec<Label>> {
        Ok(self
            .read()?
            .contents
            .get(&id)
            .map(|c| c.labels.clone())
            .unwrap_or_default())
    }

    fn replace_matrix(
        &self,
        id: MatrixId,
        name: Option<&str>,
        contents: MatrixContents,
    ) -> StoreResult<Matrix> {
        let mut tables = self.write()?;
        let matrix = tables
            .matrices
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("matrix", id.0))?;
        if let Some(name) = name {
            matrix.name = name.to_string();
        }
        let matrix = matrix.clone();
        tables.contents.insert(id, contents);
        Ok(matrix)
    }

    fn delete_matrix(&self, id: MatrixId) -> StoreResult<()> {
        let mut tables = self.write()?;
        tables
            .matrices
            .remove(&id)
            .ok_or_else(|| StoreError::not_found("matrix", id.0))?;
        tables.contents.remove(&id);
        Ok(())
    }
}
