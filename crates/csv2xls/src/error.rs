//! Error types for the conversion

use std::path::PathBuf;

use thiserror::Error;

use crate::output::SaveError;

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad user configuration, detected before anything is written
    Config,
    /// The inputs themselves are unusable
    Validation,
    /// Reading, writing or deleting a file failed
    Io,
}

/// Errors raised while converting CSV files into a workbook
#[derive(Debug, Error)]
pub enum Error {
    #[error("output name should end with .xls or .xlsx, got {}", path.display())]
    InvalidOutputExtension { path: PathBuf },

    #[error("output {} already exists", path.display())]
    OutputExists { path: PathBuf },

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("no input files provided")]
    NoInputs,

    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: csv2xls_csv::CsvError,
    },

    #[error("cannot save {}: {source}", path.display())]
    Save { path: PathBuf, source: SaveError },

    #[error("cannot remove existing output {}: {source}", path.display())]
    RemoveExisting {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("workbook error: {0}")]
    Core(#[from] csv2xls_core::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidOutputExtension { .. }
            | Error::OutputExists { .. }
            | Error::InvalidOption(_) => ErrorKind::Config,
            Error::NoInputs | Error::Core(_) => ErrorKind::Validation,
            Error::Open { .. }
            | Error::Read { .. }
            | Error::Save { .. }
            | Error::RemoveExisting { .. } => ErrorKind::Io,
        }
    }
}
