//! Writing one CSV table into one worksheet

use csv2xls_core::{excel_serial_1900, CellValue, Style, Worksheet};
use tracing::{debug, warn};

use crate::infer::{infer, InferredValue};
use crate::options::TableWriteOptions;

/// Display format applied to date cells
pub const DATE_DISPLAY_FORMAT: &str = "M/D/YY";

/// Something cells can be written into, one at a time.
pub trait SheetSink {
    fn write(
        &mut self,
        row: u32,
        col: u16,
        value: CellValue,
        style: Option<&Style>,
    ) -> csv2xls_core::Result<()>;
}

impl SheetSink for Worksheet {
    fn write(
        &mut self,
        row: u32,
        col: u16,
        value: CellValue,
        style: Option<&Style>,
    ) -> csv2xls_core::Result<()> {
        self.set_cell_value_at(row, col, value)?;
        if let Some(style) = style {
            self.set_cell_style_at(row, col, style)?;
        }
        Ok(())
    }
}

/// Styles shared by every sheet of a conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellStyles {
    pub date: Style,
}

impl Default for CellStyles {
    fn default() -> Self {
        Self {
            date: Style::new().number_format(DATE_DISPLAY_FORMAT),
        }
    }
}

/// Rows cut off by the row ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCountWarning {
    pub max_rows: u32,
    pub dropped_rows: u64,
}

/// What [`write_rows`] did with a table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSummary {
    pub rows_written: u64,
    pub cells_written: u64,
    /// Set when the table had more rows than the ceiling allows
    pub row_warning: Option<RowCountWarning>,
    /// Fields past the column limit
    pub dropped_cells: u64,
}

/// Write `rows` into `sink`, row `r` field `c` going to cell `(r, c)`.
///
/// Rows are pulled one at a time. Once the row index passes
/// `options.max_rows` the rest of the table is only counted. Empty fields
/// leave their cell blank.
pub fn write_rows<S, I, R, F, E>(
    sink: &mut S,
    rows: I,
    options: &TableWriteOptions,
    styles: &CellStyles,
) -> Result<TableSummary, E>
where
    S: SheetSink + ?Sized,
    I: IntoIterator<Item = Result<R, E>>,
    R: IntoIterator<Item = F>,
    F: AsRef<str>,
    E: From<csv2xls_core::Error>,
{
    let mut summary = TableSummary::default();
    let mut rows = rows.into_iter();
    let mut index: u32 = 0;

    while let Some(row) = rows.next() {
        let row = row?;
        if index > options.max_rows {
            let mut dropped = 1u64;
            for rest in rows.by_ref() {
                rest?;
                dropped += 1;
            }
            warn!(
                "Exceeding max rows {}, dropping remaining {} rows",
                options.max_rows, dropped
            );
            summary.row_warning = Some(RowCountWarning {
                max_rows: options.max_rows,
                dropped_rows: dropped,
            });
            break;
        }

        for (col, field) in row.into_iter().enumerate() {
            let col = match u16::try_from(col) {
                Ok(col) if options.max_cols.map_or(true, |max| col < max) => col,
                _ => {
                    summary.dropped_cells += 1;
                    continue;
                }
            };
            let field = field.as_ref();
            if field.is_empty() {
                continue;
            }
            let (value, style) = cell_for(field, options, styles);
            sink.write(index, col, value, style)?;
            summary.cells_written += 1;
        }

        summary.rows_written += 1;
        index += 1;
    }

    if summary.dropped_cells > 0 {
        warn!(
            "Exceeding max columns {}, dropped {} cells",
            options.max_cols.unwrap_or(u16::MAX),
            summary.dropped_cells
        );
    }
    debug!(
        rows = summary.rows_written,
        cells = summary.cells_written,
        "table written"
    );
    Ok(summary)
}

fn cell_for<'a>(
    field: &str,
    options: &TableWriteOptions,
    styles: &'a CellStyles,
) -> (CellValue, Option<&'a Style>) {
    if !options.inference {
        return (CellValue::string(field), None);
    }
    match infer(field, &options.date_format) {
        InferredValue::Integer(i) => (CellValue::from(i), None),
        InferredValue::Float(f) => (CellValue::Number(f), None),
        InferredValue::Date(date) => match excel_serial_1900(date) {
            Some(serial) => (CellValue::Number(serial), Some(&styles.date)),
            // No serial before 1900; keep what the file said
            None => (CellValue::string(field), None),
        },
        InferredValue::Text(text) => (CellValue::from(text), None),
    }
}
