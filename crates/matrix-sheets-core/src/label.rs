//! Axis labels (row and column names)

use std::fmt;

use serde::{Deserialize, Serialize};

/// Orientation of a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    /// Build from the stored `is_row` flag
    pub fn from_is_row(is_row: bool) -> Self {
        if is_row {
            Axis::Row
        } else {
            Axis::Column
        }
    }

    /// The stored `is_row` flag
    pub fn is_row(self) -> bool {
        matches!(self, Axis::Row)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

/// A named marker for one row or column of a matrix
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    /// Position along the axis (0-based)
    pub index: u32,
    /// Display name
    pub name: String,
    /// Which axis this label names
    pub axis: Axis,
}

impl Label {
    pub fn new<S: Into<String>>(index: u32, name: S, axis: Axis) -> Self {
        Self {
            index,
            name: name.into(),
            axis,
        }
    }

    /// Create a row label
    pub fn row<S: Into<String>>(index: u32, name: S) -> Self {
        Self::new(index, name, Axis::Row)
    }

    /// Create a column label
    pub fn column<S: Into<String>>(index: u32, name: S) -> Self {
        Self::new(index, name, Axis::Column)
    }

    pub fn is_row(&self) -> bool {
        self.axis.is_row()
    }
}
