//! SQLite-backed store

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use matrix_sheets_core::{Axis, Cell, Label, Matrix, MatrixId, User, UserId};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};

use crate::error::{StoreError, StoreResult};
use crate::password::PasswordDigest;
use crate::store::{MatrixContents, MatrixStore, NewMatrix};

const MATRIX_COLUMNS: &str = "id, name, slug, user_id";

/// A store backed by a single SQLite database
///
/// The connection is shared behind a mutex; every call holds it for the
/// duration of one statement or transaction.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `path`
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path.as_ref())?;
        tracing::debug!("Opened SQLite store at {}", path.as_ref().display());
        Self::from_connection(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

fn migrate(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS user (
          id INTEGER PRIMARY KEY,
          username TEXT NOT NULL UNIQUE,
          password_hash TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS matrix (
          id INTEGER PRIMARY KEY,
          name TEXT NOT NULL,
          slug TEXT NOT NULL UNIQUE,
          user_id INTEGER NOT NULL REFERENCES user(id)
        );

        CREATE TABLE IF NOT EXISTS cell (
          id INTEGER PRIMARY KEY,
          matrix_id INTEGER NOT NULL REFERENCES matrix(id) ON DELETE CASCADE,
          row_index INTEGER NOT NULL,
          col_index INTEGER NOT NULL,
          value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS label (
          id INTEGER PRIMARY KEY,
          matrix_id INTEGER NOT NULL REFERENCES matrix(id) ON DELETE CASCADE,
          idx INTEGER NOT NULL,
          name TEXT NOT NULL,
          is_row INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_matrix_name ON matrix(name, id);
        CREATE INDEX IF NOT EXISTS idx_cell_matrix ON cell(matrix_id);
        CREATE INDEX IF NOT EXISTS idx_label_matrix ON label(matrix_id);
        "#,
    )?;
    Ok(())
}

fn matrix_from_row(row: &Row<'_>) -> rusqlite::Result<Matrix> {
    Ok(Matrix {
        id: MatrixId(row.get(0)?),
        name: row.get(1)?,
        slug: row.get(2)?,
        owner: UserId(row.get(3)?),
    })
}

fn insert_contents_tx(tx: &Transaction<'_>, id: MatrixId, contents: &MatrixContents) -> StoreResult<()> {
    let mut insert_cell = tx.prepare(
        "INSERT INTO cell(matrix_id, row_index, col_index, value) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for cell in &contents.cells {
        insert_cell.execute(params![id.0, cell.row_index, cell.col_index, cell.value])?;
    }

    let mut insert_label =
        tx.prepare("INSERT INTO label(matrix_id, idx, name, is_row) VALUES (?1, ?2, ?3, ?4)")?;
    for label in &contents.labels {
        insert_label.execute(params![id.0, label.index, label.name, label.is_row()])?;
    }
    Ok(())
}

fn matrix_tx(tx: &Transaction<'_>, id: MatrixId) -> StoreResult<Option<Matrix>> {
    Ok(tx
        .query_row(
            &format!("SELECT {MATRIX_COLUMNS} FROM matrix WHERE id = ?1"),
            params![id.0],
            matrix_from_row,
        )
        .optional()?)
}

impl MatrixStore for SqliteStore {
    fn create_user(&self, username: &str, password: PasswordDigest) -> StoreResult<User> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO user(username, password_hash) VALUES (?1, ?2)",
            params![username, password.to_string()],
        )?;
        Ok(User {
            id: UserId(conn.last_insert_rowid()),
            username: username.to_string(),
        })
    }

    fn user(&self, id: UserId) -> StoreResult<Option<User>> {
        let conn = self.conn()?;
        Ok(conn
            .query_row(
                "SELECT id, username FROM user WHERE id = ?1",
                params![id.0],
                |row| {
                    Ok(User {
                        id: UserId(row.get(0)?),
                        username: row.get(1)?,
                    })
                },
            )
            .optional()?)
    }

    fn user_credentials(&self, username: &str) -> StoreResult<Option<(User, PasswordDigest)>> {
        let conn = self.conn()?;
        let found = conn
            .query_row(
                "SELECT id, username, password_hash FROM user WHERE username = ?1",
                params![username],
                |row| {
                    let user = User {
                        id: UserId(row.get(0)?),
                        username: row.get(1)?,
                    };
                    let hash: String = row.get(2)?;
                    Ok((user, hash))
                },
            )
            .optional()?;

        match found {
            Some((user, hash)) => Ok(Some((user, hash.parse()?))),
            None => Ok(None),
        }
    }

    fn create_matrix(&self, new: NewMatrix) -> StoreResult<Matrix> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let owner_exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM user WHERE id = ?1)",
            params![new.owner.0],
            |row| row.get(0),
        )?;
        if !owner_exists {
            return Err(StoreError::not_found("user", new.owner.0));
        }

        tx.execute(
            "INSERT INTO matrix(name, slug, user_id) VALUES (?1, ?2, ?3)",
            params![new.name, new.slug, new.owner.0],
        )?;
        let id = MatrixId(tx.last_insert_rowid());
        insert_contents_tx(&tx, id, &new.contents)?;
        tx.commit()?;

        Ok(Matrix {
            id,
            name: new.name,
            slug: new.slug,
            owner: new.owner,
        })
    }

    fn matrix(&self, id: MatrixId) -> StoreResult<Option<Matrix>> {
        let conn = self.conn()?;
        Ok(conn
            .query_row(
                &format!("SELECT {MATRIX_COLUMNS} FROM matrix WHERE id = ?1"),
                params![id.0],
                matrix_from_row,
            )
            .optional()?)
    }

    fn matrix_by_slug(&self, slug: &str) -> StoreResult<Option<Matrix>> {
        let conn = self.conn()?;
        Ok(conn
            .query_row(
                &format!("SELECT {MATRIX_COLUMNS} FROM matrix WHERE slug = ?1"),
                params![slug],
                matrix_from_row,
            )
            .optional()?)
    }

    fn matrices(&self) -> StoreResult<Vec<Matrix>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {MATRIX_COLUMNS} FROM matrix ORDER BY name, id"
        ))?;
        let rows = stmt.query_map([], matrix_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn matrices_for_user(&self, owner: UserId) -> StoreResult<Vec<Matrix>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {MATRIX_COLUMNS} FROM matrix WHERE user_id = ?1 ORDER BY name, id"
        ))?;
        let rows = stmt.query_map(params![owner.0], matrix_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn cells(&self, id: MatrixId) -> StoreResult<Vec<Cell>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT row_index, col_index, value FROM cell WHERE matrix_id = ?1")?;
        let rows = stmt.query_map(params![id.0], |row| {
            Ok(Cell {
                row_index: row.get(0)?,
                col_index: row.get(1)?,
                value: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn labels(&self, id: MatrixId) -> StoreResult<Vec<Label>> {
        let conn = self.conn()?;
        // Insertion order, so last-wins label handling sees the latest write last
        let mut stmt =
            conn.prepare("SELECT idx, name, is_row FROM label WHERE matrix_id = ?1 ORDER BY id")?;
        let rows = stmt.query_map(params![id.0], |row| {
            Ok(Label {
                index: row.get(0)?,
                name: row.get(1)?,
                axis: Axis::from_is_row(row.get(2)?),
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn replace_matrix(
        &self,
        id: MatrixId,
        name: Option<&str>,
        contents: MatrixContents,
    ) -> StoreResult<Matrix> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        if let Some(name) = name {
            tx.execute(
                "UPDATE matrix SET name = ?1 WHERE id = ?2",
                params![name, id.0],
            )?;
        }
        let matrix = matrix_tx(&tx, id)?.ok_or_else(|| StoreError::not_found("matrix", id.0))?;

        tx.execute("DELETE FROM cell WHERE matrix_id = ?1", params![id.0])?;
        tx.execute("DELETE FROM label WHERE matrix_id = ?1", params![id.0])?;
        insert_contents_tx(&tx, id, &contents)?;
        tx.commit()?;

        Ok(matrix)
    }

    fn delete_matrix(&self, id: MatrixId) -> StoreResult<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM matrix WHERE id = ?1", params![id.0])?;
        if deleted == 0 {
            return Err(StoreError::not_found("matrix", id.0));
        }
        Ok(())
    }
}
