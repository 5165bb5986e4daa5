//! End-to-end conversions through the file system

mod common;

use std::fs;
use std::io::Read;

use csv2xls::{assemble, ConvertOptions, Error, ErrorKind, TableWriteOptions};
use pretty_assertions::assert_eq;

use common::{read_xls, write_inputs, Cell};

fn text(s: &str) -> Cell {
    Cell::Text(s.to_string())
}

#[test]
fn test_sheets_sorted_and_typed() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = write_inputs(
        dir.path(),
        &[
            ("data/Zeta.csv", "name,qty\nbolt,7\n"),
            ("data/alpha.csv", "day,price\n2020-01-02,2.5\n"),
        ],
    );
    let output = dir.path().join("merged.xls");

    let report = assemble(&inputs, &output, &ConvertOptions::default()).unwrap();
    assert_eq!(report.sheets.len(), 2);
    assert_eq!(report.sheets[0].sheet_name, "alpha");
    assert_eq!(report.dropped_rows(), 0);
    assert!(report.cleanup.is_none());

    let contents = read_xls(&output);
    assert_eq!(contents.sheet_names, vec!["alpha", "Zeta"]);

    let alpha = contents.sheet("alpha");
    assert_eq!(alpha[&(0, 0)], text("day"));
    assert_eq!(alpha[&(1, 0)], Cell::Number(43832.0));
    assert_eq!(alpha[&(1, 1)], Cell::Number(2.5));

    let zeta = contents.sheet("Zeta");
    assert_eq!(zeta[&(1, 0)], text("bolt"));
    assert_eq!(zeta[&(1, 1)], Cell::Number(7.0));
}

#[test]
fn test_duplicate_names_get_suffixes() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = write_inputs(
        dir.path(),
        &[("out/a.csv", "1\n"), ("out/a.txt", "2\n"), ("out/b.csv", "3\n")],
    );
    let output = dir.path().join("dups.xls");

    assemble(&inputs, &output, &ConvertOptions::default()).unwrap();

    let contents = read_xls(&output);
    assert_eq!(contents.sheet_names, vec!["a_1", "a_2", "b"]);
    assert_eq!(contents.sheet("a_1")[&(0, 0)], Cell::Number(1.0));
    assert_eq!(contents.sheet("a_2")[&(0, 0)], Cell::Number(2.0));
}

#[test]
fn test_repeated_input_gets_a_sheet_per_occurrence() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = write_inputs(dir.path(), &[("x.csv", "name,qty\nbolt,7\n")]);
    let sources = vec![inputs[0].clone(), inputs[0].clone()];
    let output = dir.path().join("twice.xls");

    let options = ConvertOptions {
        clean: true,
        ..Default::default()
    };
    let report = assemble(&sources, &output, &options).unwrap();
    assert_eq!(report.sheets.len(), 2);

    let contents = read_xls(&output);
    assert_eq!(contents.sheet_names, vec!["x_1", "x_2"]);
    for name in ["x_1", "x_2"] {
        let sheet = contents.sheet(name);
        assert_eq!(sheet[&(1, 0)], text("bolt"));
        assert_eq!(sheet[&(1, 1)], Cell::Number(7.0));
    }

    // one file on disk, removed once
    let cleanup = report.cleanup.unwrap();
    assert_eq!(cleanup.removed.len(), 1);
    assert!(cleanup.is_complete());
}

#[test]
fn test_row_ceiling() {
    let dir = tempfile::tempdir().unwrap();
    let body: String = (0..70_000).map(|i| format!("{i}\n")).collect();
    let inputs = write_inputs(dir.path(), &[("big.csv", &body)]);
    let output = dir.path().join("big.xls");

    let report = assemble(&inputs, &output, &ConvertOptions::default()).unwrap();
    let summary = &report.sheets[0].summary;
    assert_eq!(summary.rows_written, 65_536);
    let warning = summary.row_warning.unwrap();
    assert_eq!(warning.max_rows, 65_535);
    assert_eq!(warning.dropped_rows, 70_000 - 65_536);

    let sheet = &read_xls(&output).sheets[0];
    assert_eq!(sheet.len(), 65_536);
    assert_eq!(sheet[&(65_535, 0)], Cell::Number(65_535.0));
}

#[test]
fn test_bad_extension_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = write_inputs(dir.path(), &[("a.csv", "1\n")]);
    let output = dir.path().join("result.txt");

    let err = assemble(&inputs, &output, &ConvertOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
    assert!(!output.exists());
}

#[test]
fn test_existing_output_without_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = write_inputs(dir.path(), &[("a.csv", "1\n")]);
    let output = dir.path().join("out.xls");
    fs::write(&output, b"keep me").unwrap();

    let err = assemble(&inputs, &output, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, Error::OutputExists { .. }));
    assert_eq!(err.kind(), ErrorKind::Config);
    assert_eq!(fs::read(&output).unwrap(), b"keep me");
}

#[test]
fn test_overwrite_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = write_inputs(
        dir.path(),
        &[
            ("in/b.csv", "x,y\n1,2\n"),
            ("in/a.csv", "when\n2021-01-01\n"),
        ],
    );
    let output = dir.path().join("out.xls");
    fs::write(&output, b"stale").unwrap();
    let options = ConvertOptions {
        overwrite: true,
        ..Default::default()
    };

    assemble(&inputs, &output, &options).unwrap();
    let first = read_xls(&output);
    assemble(&inputs, &output, &options).unwrap();
    let second = read_xls(&output);

    assert_eq!(first, second);
    assert_eq!(first.sheet_names, vec!["a", "b"]);
}

#[test]
fn test_clean_survives_failed_delete() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = write_inputs(dir.path(), &[("a.csv", "1\n"), ("b.csv", "2\n")]);
    let output = dir.path().join("out.xls");

    // A second reference to an input that cleanup will already have removed
    let alias = dir.path().join(".").join("a.csv").to_string_lossy().into_owned();
    let mut sources = inputs.clone();
    sources.push(alias.clone());

    let options = ConvertOptions {
        clean: true,
        ..Default::default()
    };
    let report = assemble(&sources, &output, &options).unwrap();

    let cleanup = report.cleanup.unwrap();
    assert_eq!(cleanup.removed.len(), 2);
    assert_eq!(cleanup.failures.len(), 1);
    assert!(output.exists());
    for input in &inputs {
        assert!(!std::path::Path::new(input).exists());
    }
}

#[test]
fn test_xlsx_output() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = write_inputs(dir.path(), &[("only.csv", "a;b\n1;2020-01-02\n")]);
    let output = dir.path().join("out.XLSX");
    let options = ConvertOptions {
        csv: csv2xls::csv_options(";", "\"").unwrap(),
        ..Default::default()
    };

    let report = assemble(&inputs, &output, &options).unwrap();
    assert_eq!(report.format, csv2xls::OutputFormat::Xlsx);

    let file = fs::File::open(&output).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut workbook_xml = String::new();
    archive
        .by_name("xl/workbook.xml")
        .unwrap()
        .read_to_string(&mut workbook_xml)
        .unwrap();
    assert!(workbook_xml.contains(r#"name="only""#));

    let mut sheet_xml = String::new();
    archive
        .by_name("xl/worksheets/sheet1.xml")
        .unwrap()
        .read_to_string(&mut sheet_xml)
        .unwrap();
    assert!(sheet_xml.contains("<v>1</v>"));
    assert!(sheet_xml.contains("<v>43832</v>"));
}

#[test]
fn test_inference_off_keeps_text() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = write_inputs(dir.path(), &[("codes.csv", "007,1.50\n")]);
    let output = dir.path().join("codes.xls");
    let options = ConvertOptions {
        table: TableWriteOptions {
            inference: false,
            ..Default::default()
        },
        ..Default::default()
    };

    assemble(&inputs, &output, &options).unwrap();
    let contents = read_xls(&output);
    assert_eq!(contents.sheets[0][&(0, 0)], text("007"));
    assert_eq!(contents.sheets[0][&(0, 1)], text("1.50"));
}

#[test]
fn test_wide_rows_are_cut_for_xls() {
    let dir = tempfile::tempdir().unwrap();
    let row: Vec<String> = (0..300).map(|i| i.to_string()).collect();
    let inputs = write_inputs(dir.path(), &[("wide.csv", &row.join(","))]);
    let output = dir.path().join("wide.xls");

    let report = assemble(&inputs, &output, &ConvertOptions::default()).unwrap();
    assert_eq!(report.sheets[0].summary.dropped_cells, 44);
    assert_eq!(read_xls(&output).sheets[0].len(), 256);
}
