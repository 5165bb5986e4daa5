//! # csv2xls-xls
//!
//! XLS (BIFF8) writer for csv2xls.
//!
//! This crate emits the legacy Excel binary format (.xls): a BIFF8
//! `Workbook` stream inside a version 3 (512-byte sector) Compound File
//! Binary container, the layout Excel itself uses for `.xls`.

pub mod biff;
pub mod error;
pub mod writer;

pub use error::{XlsError, XlsResult};
pub use writer::XlsWriter;

/// Maximum number of rows in a BIFF8 worksheet
pub const XLS_MAX_ROWS: u32 = 65_536;

/// Maximum number of columns in a BIFF8 worksheet
pub const XLS_MAX_COLS: u16 = 256;

/// Maximum number of characters in a cell string
pub const XLS_MAX_STRING_CHARS: usize = 32_767;
