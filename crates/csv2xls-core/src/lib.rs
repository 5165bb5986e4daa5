//! # csv2xls-core
//!
//! In-memory workbook model filled by the converter and serialized by the
//! `.xls` and `.xlsx` writers.
//!
//! Cells hold numbers or text; dates are numbers carrying a date
//! [`NumberFormat`] on their [`Style`].
//!
//! ```rust
//! use csv2xls_core::{Style, Workbook};
//!
//! let mut workbook = Workbook::empty();
//! let sheet = workbook.add_sheet("data")?;
//! sheet.set_cell_value_at(0, 0, "Hello")?;
//! sheet.set_cell_value_at(1, 0, 43831.0)?;
//! sheet.set_cell_style_at(1, 0, &Style::new().number_format("M/D/YY"))?;
//! assert_eq!(workbook.sheet_count(), 1);
//! # Ok::<(), csv2xls_core::Error>(())
//! ```

pub mod cell;
pub mod date;
pub mod error;
pub mod style;
pub mod workbook;
pub mod worksheet;

pub use cell::{CellAddress, CellData, CellValue};
pub use date::excel_serial_1900;
pub use error::{Error, Result};
pub use style::{NumberFormat, Style, StylePool};
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel 2007+ limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel 2007+ limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Characters a sheet name may never contain
pub const INVALID_SHEET_NAME_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
