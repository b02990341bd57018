//! # matrix-sheets-csv
//!
//! CSV reader and writer for matrix-sheets.
//!
//! A labelled CSV file has column names in its first record and row names
//! in its first field:
//!
//! ```text
//! ,col0,col1
//! row0,a,b
//! row1,c,d
//! ```

mod reader;
mod writer;
mod options;
mod error;

pub use reader::CsvReader;
pub use writer::CsvWriter;
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use error::{CsvError, CsvResult};
