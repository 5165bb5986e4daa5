//! csv2xls CLI - merge CSV files into one workbook

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use csv2xls::{assemble, csv_options, ConvertOptions, TableWriteOptions};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "csv2xls")]
#[command(
    author,
    version,
    about = "Merge CSV files into one .xls or .xlsx workbook, one sheet per file",
    after_help = "Example:\n  csv2xls data/alpha.csv data/beta.csv -o merged.xls\n\n\
                  Sheets are named after the files, without their common prefix and extension."
)]
struct Cli {
    /// CSV files to merge
    #[arg(required = true)]
    files: Vec<String>,

    /// Output workbook, must end in .xls or .xlsx
    #[arg(short, long, default_value = "output.xls")]
    output: PathBuf,

    /// Keep the prefix shared by all file names in sheet names
    #[arg(short, long)]
    keep_prefix: bool,

    /// Overwrite the output if it already exists
    #[arg(short, long)]
    force: bool,

    /// Delete the input files once the workbook is written
    #[arg(short, long)]
    clean: bool,

    /// Field delimiter
    #[arg(short, long, default_value = ",")]
    delimiter: String,

    /// Quote character
    #[arg(short, long = "quotechar", default_value = "\"")]
    quotechar: String,

    /// Write every field as text
    #[arg(short = 'n', long)]
    no_type_inference: bool,

    /// Pattern recognized as a date (strftime syntax)
    #[arg(short = 'D', long, default_value = csv2xls::options::DEFAULT_DATE_FORMAT)]
    date_format: String,

    /// Log debug details
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let options = ConvertOptions {
        keep_prefix: cli.keep_prefix,
        overwrite: cli.force,
        clean: cli.clean,
        csv: csv_options(&cli.delimiter, &cli.quotechar)?,
        table: TableWriteOptions {
            date_format: cli.date_format.clone(),
            inference: !cli.no_type_inference,
            ..Default::default()
        },
        ..Default::default()
    };

    let report = assemble(&cli.files, &cli.output, &options)
        .with_context(|| format!("Failed to build '{}'", cli.output.display()))?;

    let rows: u64 = report.sheets.iter().map(|s| s.summary.rows_written).sum();
    info!(
        "Wrote {} sheets ({} rows) to {}",
        report.sheets.len(),
        rows,
        report.output.display()
    );
    if let Some(cleanup) = &report.cleanup {
        if !cleanup.is_complete() {
            warn!(
                "{} of {} input files could not be removed",
                cleanup.failures.len(),
                cleanup.failures.len() + cleanup.removed.len()
            );
        }
    }
    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over the verbosity flags.
fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
