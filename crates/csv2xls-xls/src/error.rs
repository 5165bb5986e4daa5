//! XLS error types

use thiserror::Error;

pub type XlsResult<T> = std::result::Result<T, XlsError>;

/// Errors writing a BIFF8 workbook
#[derive(Debug, Error)]
pub enum XlsError {
    /// File or compound-file failure; `cfb` reports through `io::Error` too
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A cell or sheet does not fit the BIFF8 grid
    #[error("exceeds XLS limits: {0}")]
    Limit(String),
}
