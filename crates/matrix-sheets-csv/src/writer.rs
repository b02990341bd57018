//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::{CsvWriteOptions, LineTerminator};
use matrix_sheets_core::{AssembledGrid, Axis};

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a grid to a CSV file
    pub fn write_file<P: AsRef<Path>>(
        grid: &AssembledGrid,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(grid, file, options)
    }

    /// Write a grid to a writer
    ///
    /// The header, when enabled, always spans the full grid width. Missing
    /// row and column names are written as empty fields, which
    /// [`CsvReader`](crate::CsvReader) reads back as "no name".
    pub fn write<W: Write>(
        grid: &AssembledGrid,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        check_names(Axis::Row, grid.row_labels.len(), grid.rows())?;
        check_names(Axis::Column, grid.col_labels.len(), grid.cols())?;

        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .flexible(true)
            .from_writer(writer);

        if options.write_header {
            let mut record: Vec<&str> = Vec::with_capacity(grid.cols() + 1);
            if options.write_row_labels {
                record.push("");
            }
            record.extend(
                (0..grid.cols()).map(|c| grid.col_labels.get(c).map_or("", String::as_str)),
            );
            csv_writer.write_record(&record)?;
        }

        for (r, row) in grid.grid.iter().enumerate() {
            let mut record: Vec<&str> = Vec::with_capacity(row.len() + 1);
            if options.write_row_labels {
                record.push(grid.row_labels.get(r).map_or("", String::as_str));
            }
            record.extend(row.iter().map(String::as_str));
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

fn check_names(axis: Axis, names: usize, len: usize) -> CsvResult<()> {
    if names > len {
        return Err(CsvError::TooManyNames { axis, names, len });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> AssembledGrid {
        AssembledGrid {
            grid: vec![
                vec!["a".into(), "b,c".into()],
                vec!["d".into(), "e".into()],
            ],
            row_labels: vec!["r0".into()],
            col_labels: vec!["x".into(), "y".into()],
        }
    }

    #[test]
    fn test_write_labelled() {
        let mut out = Vec::new();
        CsvWriter::write(&sample(), &mut out, &CsvWriteOptions::default()).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            ",x,y\nr0,a,\"b,c\"\n,d,e\n"
        );
    }

    #[test]
    fn test_write_values_only() {
        let options = CsvWriteOptions {
            write_header: false,
            write_row_labels: false,
            line_terminator: LineTerminator::CRLF,
            ..Default::default()
        };
        let mut out = Vec::new();
        CsvWriter::write(&sample(), &mut out, &options).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "a,\"b,c\"\r\nd,e\r\n");
    }

    #[test]
    fn test_write_pads_header_to_width() {
        let grid = AssembledGrid {
            grid: vec![vec!["a".into(), "b".into(), "c".into()]],
            row_labels: vec![],
            col_labels: vec!["x".into()],
        };
        let mut out = Vec::new();
        CsvWriter::write(&grid, &mut out, &CsvWriteOptions::default()).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), ",x,,\n,a,b,c\n");
    }

    #[test]
    fn test_write_unlabelled_grid_keeps_header() {
        let grid = AssembledGrid {
            grid: vec![vec!["a".into(), "b".into()], vec!["c".into(), "d".into()]],
            row_labels: vec!["r0".into(), "r1".into()],
            col_labels: vec![],
        };
        let mut out = Vec::new();
        CsvWriter::write(&grid, &mut out, &CsvWriteOptions::default()).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), ",,\nr0,a,b\nr1,c,d\n");
    }

    #[test]
    fn test_write_rejects_extra_names() {
        let mut grid = sample();
        grid.col_labels.push("z".into());

        let err = CsvWriter::write(&grid, Vec::new(), &CsvWriteOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            CsvError::TooManyNames {
                axis: Axis::Column,
                names: 3,
                len: 2
            }
        ));
    }
}
