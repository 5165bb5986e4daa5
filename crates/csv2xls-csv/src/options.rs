//! CSV options

use crate::error::{CsvError, CsvResult};

/// Options for reading CSV files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvReadOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
        }
    }
}

impl CsvReadOptions {
    /// Build options from user-facing strings such as `";"` or `"\t"`.
    pub fn from_strs(delimiter: &str, quote: &str) -> CsvResult<Self> {
        Ok(Self {
            delimiter: single_byte("delimiter", delimiter)?,
            quote: single_byte("quote character", quote)?,
        })
    }
}

fn single_byte(what: &'static str, value: &str) -> CsvResult<u8> {
    match value.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(CsvError::InvalidByte {
            what,
            value: value.to_string(),
        }),
    }
}
