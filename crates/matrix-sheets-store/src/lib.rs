//! # matrix-sheets-store
//!
//! Persistence for matrix-sheets.
//!
//! [`MatrixStore`] is the contract the server talks to. Two backends
//! implement it: [`MemoryStore`] for tests and throwaway servers, and
//! [`SqliteStore`] for a database file.

pub mod auth;
mod error;
mod memory;
mod password;
pub mod seed;
mod sqlite;
mod store;

pub use auth::{authenticate, register_user};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use password::PasswordDigest;
pub use seed::{seed_mock_data, SeedSummary};
pub use sqlite::SqliteStore;
pub use store::{MatrixContents, MatrixStore, NewMatrix};
