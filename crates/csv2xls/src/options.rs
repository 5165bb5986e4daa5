//! Conversion options

use csv2xls_csv::CsvReadOptions;

use crate::error::{Error, Result};
use crate::output::OutputFormat;

/// Default date pattern used for date recognition (`strftime` syntax)
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Default maximum row index written per sheet
pub const DEFAULT_MAX_ROWS: u32 = 65_535;

/// Default maximum sheet name length before `_k` suffixes
pub const DEFAULT_MAX_NAME_LEN: usize = 28;

/// Rules applied when turning a source identifier into a sheet name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRules {
    /// Characters replaced by `_`
    pub forbidden: Vec<char>,
    /// Forbidden characters whose replacement is not reported
    pub silent: Vec<char>,
    /// Maximum name length in characters
    pub max_len: usize,
}

impl Default for NameRules {
    fn default() -> Self {
        Self {
            forbidden: vec![':', '/', '?', '\\', '*', '[', ']'],
            silent: vec!['/', '\\'],
            max_len: DEFAULT_MAX_NAME_LEN,
        }
    }
}

/// Options for writing one table into one sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableWriteOptions {
    /// Pattern a cell must match exactly to be written as a date
    pub date_format: String,
    /// Infer integer / float / date cells; `false` writes everything as text
    pub inference: bool,
    /// Last row index written; later rows are dropped with a warning
    pub max_rows: u32,
    /// Number of columns kept per row (`None` = no limit beyond the workbook's)
    pub max_cols: Option<u16>,
}

impl Default for TableWriteOptions {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            inference: true,
            max_rows: DEFAULT_MAX_ROWS,
            max_cols: None,
        }
    }
}

impl TableWriteOptions {
    /// Clamp the row and column limits to what `format` can store
    pub fn clamped_to(&self, format: OutputFormat) -> Self {
        let max_cols = match self.max_cols {
            Some(cols) => cols.min(format.max_cols()),
            None => format.max_cols(),
        };
        Self {
            date_format: self.date_format.clone(),
            inference: self.inference,
            max_rows: self.max_rows.min(format.max_rows() - 1),
            max_cols: Some(max_cols),
        }
    }
}

/// Options for a whole conversion run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Do not strip the common prefix of the source identifiers
    pub keep_prefix: bool,
    /// Replace an existing output file instead of failing
    pub overwrite: bool,
    /// Delete the inputs once the workbook is saved
    pub clean: bool,
    pub csv: CsvReadOptions,
    pub table: TableWriteOptions,
    pub names: NameRules,
}

/// Build CSV options from single-character strings such as `";"`.
pub fn csv_options(delimiter: &str, quote: &str) -> Result<CsvReadOptions> {
    CsvReadOptions::from_strs(delimiter, quote).map_err(|e| Error::InvalidOption(e.to_string()))
}
