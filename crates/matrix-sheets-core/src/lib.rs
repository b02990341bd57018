//! # matrix-sheets-core
//!
//! Core data structures for the matrix-sheets backend.
//!
//! This crate provides the fundamental types used throughout matrix-sheets:
//! - [`Cell`] and [`Label`] - The flat records a matrix is stored as
//! - [`Matrix`] and [`User`] - Ownership and naming
//! - [`GridAssembler`] - Rebuilds the rectangular grid from cell records
//! - [`MatrixView`] - The JSON shape served to clients
//!
//! ## Example
//!
//! ```rust
//! use matrix_sheets_core::{assemble, Cell, Label};
//!
//! let cells = vec![Cell::new(0, 1, "b"), Cell::new(0, 0, "a")];
//! let labels = vec![Label::column(0, "x"), Label::column(1, "y")];
//!
//! let out = assemble(&cells, &labels).unwrap();
//! assert_eq!(out.grid, vec![vec!["a", "b"]]);
//! assert_eq!(out.col_labels, vec!["x", "y"]);
//! ```

pub mod cell;
pub mod error;
pub mod grid;
pub mod label;
pub mod matrix;
pub mod view;

// Re-exports for convenience
pub use cell::Cell;
pub use error::{GridError, Malformation, Result};
pub use grid::{assemble, disassemble, AssembledGrid, GridAssembler, LabelPolicy};
pub use label::{Axis, Label};
pub use matrix::{Matrix, MatrixId, User, UserId};
pub use view::MatrixView;
