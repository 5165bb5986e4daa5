//! Sparse cell grid
//!
//! CSV tables are written row by row and never edited afterwards, so cells
//! live in ordered per-row maps that the writers walk in row-major order.

use std::collections::BTreeMap;

use super::CellValue;
use crate::style::StylePool;

/// Value and style of one cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellData {
    pub value: CellValue,
    /// Index into the sheet's [`StylePool`] (0 = General)
    pub style_index: u32,
}

impl CellData {
    fn is_blank(&self) -> bool {
        self.value.is_empty() && self.style_index == 0
    }
}

/// Row-major sparse storage: `row -> col -> cell`
#[derive(Debug, Default)]
pub struct CellStorage {
    rows: BTreeMap<u32, BTreeMap<u16, CellData>>,
    style_pool: StylePool,
}

impl CellStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, row: u32, col: u16) -> Option<&CellData> {
        self.rows.get(&row)?.get(&col)
    }

    /// Store `value`, keeping any style already on the cell.
    ///
    /// Storing [`CellValue::Empty`] in an unstyled cell drops it.
    pub fn set_value(&mut self, row: u32, col: u16, value: CellValue) {
        self.update(row, col, |cell| cell.value = value);
    }

    /// Attach a style index, keeping the value.
    pub fn set_style(&mut self, row: u32, col: u16, style_index: u32) {
        self.update(row, col, |cell| cell.style_index = style_index);
    }

    fn update(&mut self, row: u32, col: u16, f: impl FnOnce(&mut CellData)) {
        let cols = self.rows.entry(row).or_default();
        let cell = cols.entry(col).or_insert(CellData {
            value: CellValue::Empty,
            style_index: 0,
        });
        f(cell);
        if cell.is_blank() {
            cols.remove(&col);
            if cols.is_empty() {
                self.rows.remove(&row);
            }
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(first_row, first_col, last_row, last_col)` of the stored cells
    pub fn used_bounds(&self) -> Option<(u32, u16, u32, u16)> {
        let first_row = *self.rows.keys().next()?;
        let last_row = *self.rows.keys().next_back()?;
        let first_col = self.rows.values().filter_map(|r| r.keys().next()).min()?;
        let last_col = self.rows.values().filter_map(|r| r.keys().next_back()).max()?;
        Some((first_row, *first_col, last_row, *last_col))
    }

    /// Cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, data)| (row, col, data)))
    }

    pub fn style_pool(&self) -> &StylePool {
        &self.style_pool
    }

    pub fn style_pool_mut(&mut self) -> &mut StylePool {
        &mut self.style_pool
    }
}
