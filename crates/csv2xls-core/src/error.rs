//! Errors raised by the workbook model

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// A write the workbook model cannot hold
#[derive(Debug, Error)]
pub enum Error {
    #[error("row {0} is past the last sheet row {1}")]
    RowOutOfBounds(u32, u32),

    #[error("column {0} is past the last sheet column {1}")]
    ColumnOutOfBounds(u16, u16),

    #[error("sheet {0} does not exist ({1} sheets)")]
    SheetOutOfBounds(usize, usize),

    #[error("invalid sheet name: {0}")]
    InvalidSheetName(String),

    #[error("a sheet named {0} already exists")]
    DuplicateSheetName(String),
}
