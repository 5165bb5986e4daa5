//! # csv2xls-csv
//!
//! Lazy row reader for delimited text files.
//!
//! Rows come out one at a time as plain `Vec<String>`; no header handling and
//! no type detection happen here. Records may have differing field counts.

mod error;
mod options;
mod reader;

pub use error::{CsvError, CsvResult};
pub use options::CsvReadOptions;
pub use reader::CsvRows;
