//! Building and saving the workbook for a whole run

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use csv2xls_core::Workbook;
use csv2xls_csv::CsvRows;
use tracing::{debug, info, info_span, warn};

use crate::error::{Error, Result};
use crate::naming::build_sheet_names;
use crate::options::ConvertOptions;
use crate::output::{save_workbook, OutputFormat};
use crate::table::{write_rows, CellStyles, TableSummary};

/// Outcome of one sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetReport {
    pub source: String,
    pub sheet_name: String,
    pub summary: TableSummary,
}

/// Outcome of [`assemble`]
#[derive(Debug)]
pub struct ConversionReport {
    pub output: PathBuf,
    pub format: OutputFormat,
    /// Sheets in workbook order
    pub sheets: Vec<SheetReport>,
    /// Present when input cleanup was requested
    pub cleanup: Option<CleanupReport>,
}

impl ConversionReport {
    /// Sum of rows dropped by the row ceiling over all sheets
    pub fn dropped_rows(&self) -> u64 {
        self.sheets
            .iter()
            .filter_map(|s| s.summary.row_warning)
            .map(|w| w.dropped_rows)
            .sum()
    }
}

/// Input files that could not be deleted
#[derive(Debug)]
pub struct CleanupFailure {
    pub path: PathBuf,
    pub error: io::Error,
}

/// Outcome of [`clean_inputs`]
#[derive(Debug, Default)]
pub struct CleanupReport {
    pub removed: Vec<PathBuf>,
    pub failures: Vec<CleanupFailure>,
}

impl CleanupReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Convert `sources` into one workbook at `output`.
///
/// Sheets are added in case-insensitive sheet name order. Nothing is written
/// until every sheet has been built. When `options.clean` is set the inputs
/// are deleted after a successful save; failed deletions end up in the
/// report rather than failing the run.
pub fn assemble<S: AsRef<str>>(
    sources: &[S],
    output: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<ConversionReport> {
    let output = output.as_ref();
    let format = OutputFormat::from_path(output)?;

    let replace_existing = output.exists();
    if replace_existing && !options.overwrite {
        return Err(Error::OutputExists {
            path: output.to_path_buf(),
        });
    }

    let names = build_sheet_names(sources, options.keep_prefix, &options.names)?;
    let table_options = options.table.clamped_to(format);
    let styles = CellStyles::default();

    let mut workbook = Workbook::empty();
    let mut sheets = Vec::with_capacity(names.len());
    for (source, sheet_name) in names.sorted_by_sheet_name() {
        let _span = info_span!("sheet", name = sheet_name).entered();
        info!(
            "Processing {:>30} -> {}/{}",
            source,
            output.display(),
            sheet_name
        );

        let path = Path::new(source);
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let rows = CsvRows::from_reader(file, &options.csv).map(|row| {
            row.map_err(|source| Error::Read {
                path: path.to_path_buf(),
                source,
            })
        });

        let sheet = workbook.add_sheet(sheet_name)?;
        let summary = write_rows(sheet, rows, &table_options, &styles)?;
        sheets.push(SheetReport {
            source: source.to_string(),
            sheet_name: sheet_name.to_string(),
            summary,
        });
    }

    if replace_existing && output.exists() {
        info!("Removing existing {}", output.display());
        fs::remove_file(output).map_err(|source| Error::RemoveExisting {
            path: output.to_path_buf(),
            source,
        })?;
    }

    if let Err(source) = save_workbook(&workbook, output, format) {
        if output.exists() {
            if let Err(e) = fs::remove_file(output) {
                warn!("Could not remove partial output {}: {}", output.display(), e);
            }
        }
        return Err(Error::Save {
            path: output.to_path_buf(),
            source,
        });
    }
    debug!(sheets = sheets.len(), %format, "workbook saved");

    let cleanup = options.clean.then(|| clean_inputs(sources));

    Ok(ConversionReport {
        output: output.to_path_buf(),
        format,
        sheets,
        cleanup,
    })
}

/// Delete every source once, in sorted order, collecting failures.
pub fn clean_inputs<S: AsRef<str>>(sources: &[S]) -> CleanupReport {
    let mut sorted: Vec<&str> = sources.iter().map(AsRef::as_ref).collect();
    sorted.sort_unstable();
    sorted.dedup();

    let mut report = CleanupReport::default();
    for source in sorted {
        info!("Removing {}.", source);
        let path = PathBuf::from(source);
        match fs::remove_file(&path) {
            Ok(()) => report.removed.push(path),
            Err(error) => {
                warn!("Could not remove {}: {}", source, error);
                report.failures.push(CleanupFailure { path, error });
            }
        }
    }
    report
}
