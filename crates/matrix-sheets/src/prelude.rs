//! Prelude module - common imports for matrix-sheets users
//!
//! ```rust
//! use matrix_sheets::prelude::*;
//! ```

pub use crate::{
    // Assembly
    AssembledGrid,
    Axis,
    Cell,
    GridAssembler,
    Label,
    LabelPolicy,
    MatrixView,

    // Records
    Matrix,
    MatrixId,
    User,
    UserId,

    // Storage
    authenticate,
    register_user,
    MatrixStore,
    MemoryStore,
    SqliteStore,
    StoreExt,

    // I/O types
    CsvReadOptions,
    CsvReader,
    CsvWriteOptions,
    CsvWriter,

    // Error types
    Error,
    Result,
};
