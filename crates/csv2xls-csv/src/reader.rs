//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::CsvReadOptions;

/// Lazy iterator over the rows of a delimited text source.
///
/// Each item is one record as an ordered list of fields. Blank lines are
/// skipped by the underlying parser. The source is dropped (and a file handle
/// closed) as soon as the iterator is dropped.
pub struct CsvRows<R> {
    records: csv::StringRecordsIntoIter<R>,
}

impl CsvRows<File> {
    /// Open a CSV file for row-by-row reading
    pub fn open<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(file, options))
    }
}

impl<R: Read> CsvRows<R> {
    /// Read rows from any reader
    pub fn from_reader(reader: R, options: &CsvReadOptions) -> Self {
        let csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        Self {
            records: csv_reader.into_records(),
        }
    }
}

impl<R: Read> Iterator for CsvRows<R> {
    type Item = CsvResult<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        Some(
            record
                .map(|r| r.iter().map(str::to_owned).collect())
                .map_err(Into::into),
        )
    }
}
