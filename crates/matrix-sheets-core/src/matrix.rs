//! Matrix and user records

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a stored matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatrixId(pub i64);

/// Identifier of a stored user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for MatrixId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A named, owned grid of cells
///
/// Cells and labels are stored separately and fetched by [`MatrixId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matrix {
    pub id: MatrixId,
    /// Display name (not unique)
    pub name: String,
    /// URL-friendly unique key
    pub slug: String,
    /// Owning user
    pub owner: UserId,
}

/// An account that owns matrices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
}
