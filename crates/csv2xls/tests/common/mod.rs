//! Helpers for reading back written workbooks

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Reader, Xls};

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
}

/// Sheet names and cell grids of an `.xls` file, in tab order
#[derive(Debug, PartialEq)]
pub struct XlsContents {
    pub sheet_names: Vec<String>,
    pub sheets: Vec<BTreeMap<(u16, u16), Cell>>,
}

impl XlsContents {
    pub fn sheet(&self, name: &str) -> &BTreeMap<(u16, u16), Cell> {
        let index = self
            .sheet_names
            .iter()
            .position(|n| n == name)
            .unwrap_or_else(|| panic!("no sheet {name} in {:?}", self.sheet_names));
        &self.sheets[index]
    }
}

pub fn read_xls(path: &Path) -> XlsContents {
    let mut xls: Xls<_> = open_workbook(path)
        .unwrap_or_else(|e| panic!("cannot open {}: {e}", path.display()));
    let sheet_names = xls.sheet_names();

    let sheets = sheet_names
        .iter()
        .map(|name| {
            let range = xls.worksheet_range(name).unwrap();
            let (top, left) = range.start().unwrap_or((0, 0));
            range
                .used_cells()
                .map(|(row, col, data)| {
                    let cell = match data {
                        Data::Int(i) => Cell::Number(*i as f64),
                        Data::Float(f) => Cell::Number(*f),
                        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
                        Data::String(s) => Cell::Text(s.clone()),
                        other => panic!("unexpected cell {other:?} in {name}"),
                    };
                    let at = ((top as usize + row) as u16, (left as usize + col) as u16);
                    (at, cell)
                })
                .collect()
        })
        .collect();

    XlsContents {
        sheet_names,
        sheets,
    }
}

/// Write `files` (relative name, content) under `dir`, returning their paths
pub fn write_inputs(dir: &Path, files: &[(&str, &str)]) -> Vec<String> {
    files
        .iter()
        .map(|(name, content)| {
            let path: PathBuf = dir.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, content).unwrap();
            path.to_string_lossy().into_owned()
        })
        .collect()
}
