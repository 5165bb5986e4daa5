//! Output formats and saving

use std::fmt;
use std::path::Path;

use csv2xls_core::Workbook;
use csv2xls_xls::{XlsError, XlsWriter, XLS_MAX_COLS, XLS_MAX_ROWS};
use csv2xls_xlsx::{XlsxError, XlsxWriter};
use thiserror::Error;

use crate::error::{Error, Result};

/// Workbook file format, chosen by the output file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Excel 97-2003 binary workbook
    Xls,
    /// Office Open XML workbook
    Xlsx,
}

impl OutputFormat {
    /// Pick the format from `path`'s extension, ignoring ASCII case.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("xls") => Ok(OutputFormat::Xls),
            Some("xlsx") => Ok(OutputFormat::Xlsx),
            _ => Err(Error::InvalidOutputExtension {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Xls => "xls",
            OutputFormat::Xlsx => "xlsx",
        }
    }

    /// Rows a sheet of this format can hold
    pub fn max_rows(self) -> u32 {
        match self {
            OutputFormat::Xls => XLS_MAX_ROWS,
            OutputFormat::Xlsx => csv2xls_core::MAX_ROWS,
        }
    }

    /// Columns a sheet of this format can hold
    pub fn max_cols(self) -> u16 {
        match self {
            OutputFormat::Xls => XLS_MAX_COLS,
            OutputFormat::Xlsx => csv2xls_core::MAX_COLS,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Failure of one of the format writers
#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Xls(#[from] XlsError),

    #[error(transparent)]
    Xlsx(#[from] XlsxError),
}

/// Serialize `workbook` to `path` in `format`.
pub fn save_workbook(
    workbook: &Workbook,
    path: &Path,
    format: OutputFormat,
) -> std::result::Result<(), SaveError> {
    match format {
        OutputFormat::Xls => XlsWriter::write_file(workbook, path)?,
        OutputFormat::Xlsx => XlsxWriter::write_file(workbook, path)?,
    }
    Ok(())
}
