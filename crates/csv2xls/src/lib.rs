//! # csv2xls
//!
//! Merge CSV files into a single spreadsheet workbook, one sheet per file.
//!
//! Sheet names come from the file names: the prefix shared by every input and
//! the extension are dropped, characters a sheet tab cannot hold are replaced
//! and clashing names get `_1`, `_2`, ... suffixes. Fields are written as
//! numbers or dates when they parse as such, and as text otherwise.
//!
//! ## Example
//!
//! ```no_run
//! use csv2xls::{assemble, ConvertOptions};
//!
//! let options = ConvertOptions {
//!     overwrite: true,
//!     ..Default::default()
//! };
//! let report = assemble(&["data/alpha.csv", "data/beta.csv"], "merged.xls", &options)?;
//! for sheet in &report.sheets {
//!     println!("{} -> {}", sheet.source, sheet.sheet_name);
//! }
//! # Ok::<(), csv2xls::Error>(())
//! ```

pub mod assemble;
pub mod error;
pub mod infer;
pub mod naming;
pub mod options;
pub mod output;
pub mod table;

pub use assemble::{
    assemble, clean_inputs, CleanupFailure, CleanupReport, ConversionReport, SheetReport,
};
pub use error::{Error, ErrorKind, Result};
pub use infer::{infer, InferredValue};
pub use naming::{build_sheet_names, sanitize, SheetNameAssignment};
pub use options::{csv_options, ConvertOptions, NameRules, TableWriteOptions};
pub use output::{save_workbook, OutputFormat, SaveError};
pub use table::{write_rows, CellStyles, RowCountWarning, SheetSink, TableSummary};

pub use csv2xls_csv::CsvReadOptions;
