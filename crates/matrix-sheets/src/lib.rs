//! # matrix-sheets
//!
//! Labelled string matrices owned by users.
//!
//! A matrix is stored as flat cell and label records. This crate ties the
//! pieces together:
//!
//! - Grid assembly and the JSON view ([`GridAssembler`], [`MatrixView`])
//! - Storage backends ([`MemoryStore`], [`SqliteStore`])
//! - CSV import and export ([`CsvReader`], [`CsvWriter`])
//! - [`StoreExt`], which assembles views straight out of a store
//!
//! ## Example
//!
//! ```rust
//! use matrix_sheets::prelude::*;
//!
//! let store = MemoryStore::new();
//! let owner = register_user(&store, "ann", "secret").unwrap();
//!
//! let grid = AssembledGrid {
//!     grid: vec![vec!["1".into(), "2".into()]],
//!     row_labels: vec!["only".into()],
//!     col_labels: vec!["a".into(), "b".into()],
//! };
//! let matrix = store.create_from_grid(owner.id, "Tiny", "tiny", &grid).unwrap();
//!
//! let view = store.view(matrix.id, &GridAssembler::new()).unwrap().unwrap();
//! assert_eq!(view.grid, vec![vec!["1", "2"]]);
//! assert_eq!(view.col_names, vec!["a", "b"]);
//! ```

pub mod error;
pub mod ext;
pub mod prelude;

pub use error::{Error, Result};
pub use ext::StoreExt;

// Re-export core types
pub use matrix_sheets_core::{
    assemble, disassemble, AssembledGrid, Axis, Cell, GridAssembler, GridError, Label,
    LabelPolicy, Malformation, Matrix, MatrixId, MatrixView, User, UserId,
};

// Re-export storage types
pub use matrix_sheets_store::{
    authenticate, register_user, seed, seed_mock_data, MatrixContents, MatrixStore, MemoryStore,
    NewMatrix, PasswordDigest, SeedSummary, SqliteStore, StoreError, StoreResult,
};

// Re-export I/O types
pub use matrix_sheets_csv::{
    CsvError, CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter, LineTerminator,
};
