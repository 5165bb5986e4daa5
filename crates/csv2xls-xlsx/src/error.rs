//! XLSX error types

use thiserror::Error;

pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors writing an XLSX package
#[derive(Debug, Error)]
pub enum XlsxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The workbook cannot be represented as a package
    #[error("invalid XLSX content: {0}")]
    InvalidContent(String),
}
