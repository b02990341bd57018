//! Cell records

use serde::{Deserialize, Serialize};

/// A single `(row, column, value)` entry of a matrix
///
/// Indices are 0-based. Cells carry no reference to their matrix; callers
/// pass all cells of one matrix together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Row index (0-based)
    pub row_index: u32,
    /// Column index (0-based)
    pub col_index: u32,
    /// Cell text
    pub value: String,
}

impl Cell {
    /// Create a new cell
    pub fn new<S: Into<String>>(row_index: u32, col_index: u32, value: S) -> Self {
        Self {
            row_index,
            col_index,
            value: value.into(),
        }
    }

    /// `(row, col)` position of the cell
    pub fn position(&self) -> (u32, u32) {
        (self.row_index, self.col_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_new() {
        let cell = Cell::new(2, 1, "x");
        assert_eq!(cell.position(), (2, 1));
        assert_eq!(cell.value, "x");
    }
}
