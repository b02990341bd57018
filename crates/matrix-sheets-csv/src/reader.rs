//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;
use matrix_sheets_core::{AssembledGrid, GridError};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a grid with its axis names
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<AssembledGrid> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read CSV from a reader into a grid with its axis names
    ///
    /// Every data record must have the same number of values. With row
    /// labels enabled the header may carry an extra leading corner field,
    /// which is ignored. Empty names past the last non-empty one on each
    /// axis are not labels; earlier empty names keep their position.
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<AssembledGrid> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let field = |s: &str| {
            if options.trim {
                s.trim().to_string()
            } else {
                s.to_string()
            }
        };

        let mut records = csv_reader.records();
        let mut out = AssembledGrid::default();

        let header: Option<Vec<String>> = if options.has_header {
            match records.next() {
                Some(record) => Some(record?.iter().map(field).collect()),
                None => None,
            }
        } else {
            None
        };

        let first_value_col = usize::from(options.has_row_labels);
        let mut width = None;

        for (i, result) in records.enumerate() {
            let record = result?;
            let line = i + 1 + usize::from(options.has_header);

            if record.len() <= first_value_col {
                return Err(CsvError::Parse {
                    row: line,
                    column: record.len() + 1,
                    message: "record has no values".into(),
                });
            }

            let values: Vec<String> = record.iter().skip(first_value_col).map(field).collect();
            match width {
                None => width = Some(values.len()),
                Some(w) if w != values.len() => {
                    return Err(CsvError::Parse {
                        row: line,
                        column: record.len() + 1,
                        message: format!("expected {w} values, found {}", values.len()),
                    })
                }
                Some(_) => {}
            }

            if options.has_row_labels {
                out.row_labels.push(field(&record[0]));
            }
            out.grid.push(values);
        }

        let width = width.ok_or(GridError::EmptyMatrix)?;

        if let Some(mut names) = header {
            if options.has_row_labels && names.len() == width + 1 {
                names.remove(0);
            }
            if names.len() != width {
                return Err(CsvError::Parse {
                    row: 1,
                    column: names.len(),
                    message: format!("header has {} names for {width} columns", names.len()),
                });
            }
            out.col_labels = names;
        }

        drop_unnamed_tail(&mut out.row_labels);
        drop_unnamed_tail(&mut out.col_labels);
        Ok(out)
    }
}

fn drop_unnamed_tail(names: &mut Vec<String>) {
    let named = names.iter().rposition(|n| !n.is_empty()).map_or(0, |i| i + 1);
    names.truncate(named);
}
