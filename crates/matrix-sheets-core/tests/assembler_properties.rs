//! Property tests for grid assembly

use matrix_sheets_core::{assemble, Axis, Cell, GridError, Label};
use proptest::prelude::*;

fn value_at(r: u32, c: u32) -> String {
    format!("v{r}_{c}")
}

fn rectangle(rows: u32, cols: u32) -> Vec<Cell> {
    (0..rows)
        .flat_map(|r| (0..cols).map(move |c| Cell::new(r, c, value_at(r, c))))
        .collect()
}

proptest! {
    #[test]
    fn complete_rectangle_assembles_in_any_order(
        rows in 1u32..8,
        cols in 1u32..8,
        seed in any::<u64>(),
    ) {
        let mut cells = rectangle(rows, cols);
        // Deterministic shuffle driven by the seed
        let len = cells.len();
        let mut state = seed | 1;
        for i in (1..len).rev() {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            cells.swap(i, (state % (i as u64 + 1)) as usize);
        }

        let out = assemble(&cells, &[]).unwrap();
        prop_assert_eq!(out.grid.len(), rows as usize);
        for (r, row) in out.grid.iter().enumerate() {
            prop_assert_eq!(row.len(), cols as usize);
            for (c, value) in row.iter().enumerate() {
                prop_assert_eq!(value, &value_at(r as u32, c as u32));
            }
        }
    }

    #[test]
    fn labels_sorted_and_partitioned(
        indices in proptest::collection::btree_set(0u32..64, 0..16),
        flags in proptest::collection::vec(any::<bool>(), 16),
    ) {
        let indices: Vec<u32> = indices.into_iter().rev().collect();
        let labels: Vec<Label> = indices
            .iter()
            .zip(flags.iter())
            .flat_map(|(&i, &both)| {
                let mut out = vec![Label::row(i, format!("r{i}"))];
                if both {
                    out.push(Label::column(i, format!("c{i}")));
                }
                out
            })
            .collect();

        let out = assemble(&rectangle(1, 1), &labels).unwrap();

        let rows: Vec<&Label> = labels.iter().filter(|l| l.axis == Axis::Row).collect();
        let cols: Vec<&Label> = labels.iter().filter(|l| l.axis == Axis::Column).collect();
        prop_assert_eq!(out.row_labels.len() + out.col_labels.len(), labels.len());
        prop_assert_eq!(out.row_labels.len(), rows.len());
        prop_assert_eq!(out.col_labels.len(), cols.len());

        let mut expected_rows: Vec<u32> = rows.iter().map(|l| l.index).collect();
        expected_rows.sort_unstable();
        let expected_rows: Vec<String> = expected_rows.iter().map(|i| format!("r{i}")).collect();
        prop_assert_eq!(&out.row_labels, &expected_rows);
        prop_assert!(out.col_labels.iter().all(|n| n.starts_with('c')));
    }

    #[test]
    fn assembly_is_idempotent(rows in 1u32..6, cols in 1u32..6) {
        let cells = rectangle(rows, cols);
        let labels = vec![Label::row(0, "r"), Label::column(0, "c")];
        prop_assert_eq!(assemble(&cells, &labels), assemble(&cells, &labels));
    }

    #[test]
    fn removing_any_cell_is_malformed(rows in 2u32..6, cols in 2u32..6, pick in any::<usize>()) {
        // At least two rows and columns, so the removed cell never shrinks the extent
        let mut cells = rectangle(rows, cols);
        let len = cells.len();
        cells.remove(pick % len);
        prop_assert!(matches!(assemble(&cells, &[]), Err(GridError::MalformedGrid(_))));
    }
}

#[test]
fn scenario_two_by_two() {
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

    let out = assemble(&cells, &labels).unwrap();
    assert_eq!(out.grid, vec![vec!["a", "b"], vec!["c", "d"]]);
    assert_eq!(out.row_labels, vec!["r0", "r1"]);
    assert_eq!(out.col_labels, vec!["c0", "c1"]);
}
