//! # csv2xls-xlsx
//!
//! XLSX (Office Open XML) writer for csv2xls.

pub mod error;
pub mod writer;

mod styles;

pub use error::{XlsxError, XlsxResult};
pub use writer::XlsxWriter;
