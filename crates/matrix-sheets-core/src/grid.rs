//! Grid assembly
//!
//! Rebuilds the rectangular value grid of a matrix from its flat cell
//! records, and splits its labels into ordered row and column name lists.
//!
//! Cells may arrive in any order. The output is only produced when the cells
//! cover `0..rows x 0..cols` exactly once each; anything else is reported as
//! [`GridError::MalformedGrid`] rather than returned as a jagged grid.

use std::collections::BTreeMap;

use crate::cell::Cell;
use crate::error::{GridError, Malformation, Result};
use crate::label::{Axis, Label};

/// How duplicate labels on the same axis and index are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelPolicy {
    /// Reject with [`GridError::DuplicateLabel`]
    #[default]
    Strict,
    /// Keep the label that appears last in the input
    LastWins,
}

/// Output of [`GridAssembler::assemble`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssembledGrid {
    /// `grid[r][c]` is the value at row `r`, column `c`
    pub grid: Vec<Vec<String>>,
    /// Row label names ordered by index
    pub row_labels: Vec<String>,
    /// Column label names ordered by index
    pub col_labels: Vec<String>,
}

impl AssembledGrid {
    /// Number of rows
    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    /// Number of columns (every row has the same length)
    pub fn cols(&self) -> usize {
        self.grid.first().map_or(0, Vec::len)
    }

    /// Value at `(row, col)`, if inside the grid
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.grid.get(row)?.get(col).map(String::as_str)
    }
}

/// Assembles grids from cell and label records
#[derive(Debug, Clone, Copy, Default)]
pub struct GridAssembler {
    label_policy: LabelPolicy,
}

impl GridAssembler {
    /// Create an assembler with strict label handling
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an assembler with the given label policy
    pub fn with_label_policy(label_policy: LabelPolicy) -> Self {
        Self { label_policy }
    }

    pub fn label_policy(&self) -> LabelPolicy {
        self.label_policy
    }

    /// Assemble cells and labels of one matrix
    ///
    /// # Examples
    /// ```
    /// use matrix_sheets_core::{Cell, GridAssembler, Label};
    ///
    /// let cells = vec![
    ///     Cell::new(1, 0, "c"),
    ///     Cell::new(0, 1, "b"),
    ///     Cell::new(0, 0, "a"),
    ///     Cell::new(1, 1, "d"),
    /// ];
    /// let labels = vec![Label::row(1, "r1"), Label::row(0, "r0"), Label::column(0, "c0")];
    ///
    /// let out = GridAssembler::new().assemble(&cells, &labels).unwrap();
    /// assert_eq!(out.grid, vec![vec!["a", "b"], vec!["c", "d"]]);
    /// assert_eq!(out.row_labels, vec!["r0", "r1"]);
    /// assert_eq!(out.col_labels, vec!["c0"]);
    /// ```
    pub fn assemble(&self, cells: &[Cell], labels: &[Label]) -> Result<AssembledGrid> {
        let grid = build_grid(cells)?;
        let row_labels = self.ordered_names(labels, Axis::Row)?;
        let col_labels = self.ordered_names(labels, Axis::Column)?;

        Ok(AssembledGrid {
            grid,
            row_labels,
            col_labels,
        })
    }

    fn ordered_names(&self, labels: &[Label], axis: Axis) -> Result<Vec<String>> {
        let mut by_index: BTreeMap<u32, &str> = BTreeMap::new();

        for label in labels.iter().filter(|l| l.axis == axis) {
            let previous = by_index.insert(label.index, label.name.as_str());
            if previous.is_some() && self.label_policy == LabelPolicy::Strict {
                return Err(GridError::DuplicateLabel {
                    axis,
                    index: label.index,
                });
            }
        }

        Ok(by_index.into_values().map(str::to_owned).collect())
    }
}

/// Assemble with the default (strict) assembler
pub fn assemble(cells: &[Cell], labels: &[Label]) -> Result<AssembledGrid> {
    GridAssembler::new().assemble(cells, labels)
}

fn build_grid(cells: &[Cell]) -> Result<Vec<Vec<String>>> {
    let (max_row, max_col) = cells
        .iter()
        .fold(None, |acc: Option<(u32, u32)>, c| match acc {
            None => Some((c.row_index, c.col_index)),
            Some((r, col)) => Some((r.max(c.row_index), col.max(c.col_index))),
        })
        .ok_or(GridError::EmptyMatrix)?;

    let rows = u64::from(max_row) + 1;
    let cols = u64::from(max_col) + 1;
    let total = cells.len() as u64;

    // Checked before allocating so a stray huge index cannot blow up memory.
    if rows.checked_mul(cols) != Some(total) {
        return Err(Malformation::ShapeMismatch {
            rows,
            cols,
            cells: total,
        }
        .into());
    }

    let width = cols as usize;
    let mut slots: Vec<Option<&str>> = vec![None; cells.len()];

    for cell in cells {
        let slot = &mut slots[cell.row_index as usize * width + cell.col_index as usize];
        if slot.is_some() {
            return Err(Malformation::DuplicateCell {
                row: cell.row_index,
                col: cell.col_index,
            }
            .into());
        }
        *slot = Some(cell.value.as_str());
    }

    // With the count matching and no duplicates every slot is filled; this
    // loop only names the first gap should that ever not hold.
    let mut grid = Vec::with_capacity(rows as usize);
    for (r, row_slots) in slots.chunks(width).enumerate() {
        let mut row = Vec::with_capacity(width);
        for (c, slot) in row_slots.iter().enumerate() {
            match slot {
                Some(value) => row.push((*value).to_owned()),
                None => {
                    return Err(Malformation::MissingCell {
                        row: r as u32,
                        col: c as u32,
                    }
                    .into())
                }
            }
        }
        grid.push(row);
    }

    Ok(grid)
}

/// Split a grid and its axis names back into cell and label records
///
/// Inverse of [`GridAssembler::assemble`]. Label indices follow list
/// position. The grid must be non-empty and rectangular.
pub fn disassemble(
    grid: &[Vec<String>],
    row_names: &[String],
    col_names: &[String],
) -> Result<(Vec<Cell>, Vec<Label>)> {
    let width = match grid.first() {
        Some(first) if !first.is_empty() => first.len(),
        _ => return Err(GridError::EmptyMatrix),
    };

    if grid.iter().any(|row| row.len() != width) {
        return Err(Malformation::ShapeMismatch {
            rows: grid.len() as u64,
            cols: width as u64,
            cells: grid.iter().map(|row| row.len() as u64).sum(),
        }
        .into());
    }

    let cells = grid
        .iter()
        .enumerate()
        .flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, value)| Cell::new(r as u32, c as u32, value.clone()))
        })
        .collect();

    let labels = row_names
        .iter()
        .enumerate()
        .map(|(i, name)| Label::row(i as u32, name.clone()))
        .chain(
            col_names
                .iter()
                .enumerate()
                .map(|(i, name)| Label::column(i as u32, name.clone())),
        )
        .collect();

    Ok((cells, labels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn square() -> (Vec<Cell>, Vec<Label>) {
        let cells = vec![
            Cell::new(0, 0, "a"),
            Cell::new(0, 1, "b"),
            Cell::new(1, 0, "c"),
            Cell::new(1, 1, "d"),
        ];
        let labels = vec![
            Label::row(0, "r0"),
            Label::row(1, "r1"),
            Label::column(0, "c0"),
            Label::column(1, "c1"),
        ];
        (cells, labels)
    }

    #[test]
    fn test_assemble_square() {
        let (cells, labels) = square();
        let out = assemble(&cells, &labels).unwrap();

        assert_eq!(out.grid, vec![vec!["a", "b"], vec!["c", "d"]]);
        assert_eq!(out.row_labels, vec!["r0", "r1"]);
        assert_eq!(out.col_labels, vec!["c0", "c1"]);
        assert_eq!((out.rows(), out.cols()), (2, 2));
        assert_eq!(out.get(1, 0), Some("c"));
        assert_eq!(out.get(2, 0), None);
    }

    #[test]
    fn test_assemble_unordered_input() {
        let (mut cells, mut labels) = square();
        cells.reverse();
        labels.reverse();

        let out = assemble(&cells, &labels).unwrap();
        assert_eq!(out.grid, vec![vec!["a", "b"], vec!["c", "d"]]);
        assert_eq!(out.row_labels, vec!["r0", "r1"]);
        assert_eq!(out.col_labels, vec!["c0", "c1"]);
    }

    #[test]
    fn test_assemble_non_square() {
        let cells: Vec<Cell> = (0..2)
            .flat_map(|r| (0..3).map(move |c| Cell::new(r, c, format!("{r}{c}"))))
            .collect();
        let out = assemble(&cells, &[]).unwrap();

        assert_eq!(out.grid, vec![vec!["00", "01", "02"], vec!["10", "11", "12"]]);
        assert!(out.row_labels.is_empty());
        assert!(out.col_labels.is_empty());
    }

    #[test]
    fn test_assemble_single_cell() {
        let out = assemble(&[Cell::new(0, 0, "only")], &[]).unwrap();
        assert_eq!(out.grid, vec![vec!["only"]]);
    }

    #[test]
    fn test_empty_matrix() {
        let (_, labels) = square();
        assert_eq!(assemble(&[], &labels), Err(GridError::EmptyMatrix));
    }

    #[test]
    fn test_missing_cell() {
        let (mut cells, labels) = square();
        cells.retain(|c| c.position() != (1, 1));

        assert!(matches!(
            assemble(&cells, &labels),
            Err(GridError::MalformedGrid(_))
        ));
    }

    #[test]
    fn test_duplicate_cell_with_gap() {
        let (mut cells, labels) = square();
        cells.retain(|c| c.position() != (1, 1));
        cells.push(Cell::new(0, 0, "again"));

        assert_eq!(
            assemble(&cells, &labels),
            Err(GridError::MalformedGrid(Malformation::DuplicateCell {
                row: 0,
                col: 0
            }))
        );
    }

    #[test]
    fn test_grid_not_starting_at_zero() {
        let cells = vec![Cell::new(1, 1, "x")];
        assert_eq!(
            assemble(&cells, &[]),
            Err(GridError::MalformedGrid(Malformation::ShapeMismatch {
                rows: 2,
                cols: 2,
                cells: 1
            }))
        );
    }

    #[test]
    fn test_huge_index_rejected_without_allocating() {
        let cells = vec![Cell::new(0, 0, "a"), Cell::new(u32::MAX, u32::MAX, "z")];
        assert!(matches!(
            assemble(&cells, &[]),
            Err(GridError::MalformedGrid(Malformation::ShapeMismatch { .. }))
        ));
    }

    #[test]
    fn test_jagged_rows_rejected() {
        // Row 0 has three columns, row 1 only one; four cells, 2x3 expected.
        let cells = vec![
            Cell::new(0, 0, "a"),
            Cell::new(0, 1, "b"),
            Cell::new(0, 2, "c"),
            Cell::new(1, 0, "d"),
        ];
        assert!(matches!(
            assemble(&cells, &[]),
            Err(GridError::MalformedGrid(_))
        ));
    }

    #[test]
    fn test_duplicate_label_strict() {
        let (cells, mut labels) = square();
        labels.push(Label::column(1, "other"));

        assert_eq!(
            assemble(&cells, &labels),
            Err(GridError::DuplicateLabel {
                axis: Axis::Column,
                index: 1
            })
        );
    }

    #[test]
    fn test_duplicate_label_last_wins() {
        let (cells, mut labels) = square();
        labels.push(Label::column(1, "other"));

        let out = GridAssembler::with_label_policy(LabelPolicy::LastWins)
            .assemble(&cells, &labels)
            .unwrap();
        assert_eq!(out.col_labels, vec!["c0", "other"]);
    }

    #[test]
    fn test_same_index_on_both_axes_is_not_a_duplicate() {
        let (cells, _) = square();
        let labels = vec![Label::row(0, "r"), Label::column(0, "c")];
        let out = assemble(&cells, &labels).unwrap();
        assert_eq!(out.row_labels, vec!["r"]);
        assert_eq!(out.col_labels, vec!["c"]);
    }

    #[test]
    fn test_sparse_labels_keep_index_order() {
        let (cells, _) = square();
        let labels = vec![Label::row(7, "late"), Label::row(2, "early")];
        let out = assemble(&cells, &labels).unwrap();
        assert_eq!(out.row_labels, vec!["early", "late"]);
    }

    #[test]
    fn test_disassemble_reassembles() {
        let grid = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string(), "d".to_string()],
        ];
        let rows = vec!["r0".to_string(), "r1".to_string()];
        let cols = vec!["c0".to_string(), "c1".to_string()];

        let (cells, labels) = disassemble(&grid, &rows, &cols).unwrap();
        assert_eq!(cells.len(), 4);
        assert_eq!(labels.len(), 4);

        let out = assemble(&cells, &labels).unwrap();
        assert_eq!(out.grid, grid);
        assert_eq!(out.row_labels, rows);
        assert_eq!(out.col_labels, cols);
    }

    #[test]
    fn test_disassemble_rejects_empty_and_jagged() {
        assert_eq!(disassemble(&[], &[], &[]), Err(GridError::EmptyMatrix));
        assert_eq!(
            disassemble(&[vec![]], &[], &[]),
            Err(GridError::EmptyMatrix)
        );

        let jagged = vec![vec!["a".to_string(), "b".to_string()], vec!["c".to_string()]];
        assert_eq!(
            disassemble(&jagged, &[], &[]),
            Err(GridError::MalformedGrid(Malformation::ShapeMismatch {
                rows: 2,
                cols: 2,
                cells: 3
            }))
        );
    }
}
