//! Worksheet type

use crate::cell::{CellAddress, CellData, CellStorage, CellValue};
use crate::error::{Error, Result};
use crate::style::{Style, StylePool};
use crate::{MAX_COLS, MAX_ROWS};

/// One named sheet: a sparse grid of cells plus the styles they use
#[derive(Debug)]
pub struct Worksheet {
    name: String,
    cells: CellStorage,
}

impl Worksheet {
    /// Create an empty worksheet. The name is not validated here; see
    /// [`Workbook::add_sheet`](crate::Workbook::add_sheet).
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: CellStorage::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value at `(row, col)`, [`CellValue::Empty`] for unset cells
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.cells
            .get(row, col)
            .map(|c| c.value.clone())
            .unwrap_or_default()
    }

    /// Non-General style of a cell, if it has one
    pub fn cell_style_at(&self, row: u32, col: u16) -> Option<&Style> {
        match self.cells.get(row, col)?.style_index {
            0 => None,
            idx => self.cells.style_pool().get(idx),
        }
    }

    pub fn style_pool(&self) -> &StylePool {
        self.cells.style_pool()
    }

    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        check_position(row, col)?;
        self.cells.set_value(row, col, value.into());
        Ok(())
    }

    /// Apply `style` to a cell; equal styles share one pool entry.
    pub fn set_cell_style_at(&mut self, row: u32, col: u16, style: &Style) -> Result<()> {
        check_position(row, col)?;
        let style_index = self.cells.style_pool_mut().get_or_insert(style.clone());
        self.cells.set_style(row, col, style_index);
        Ok(())
    }

    /// Stored cells in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.cells.iter()
    }

    /// `(first_row, first_col, last_row, last_col)`, `None` for an empty sheet
    pub fn used_bounds(&self) -> Option<(u32, u16, u32, u16)> {
        self.cells.used_bounds()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    /// `sheet!A1` form of a position, for diagnostics
    pub fn describe_cell(&self, row: u32, col: u16) -> String {
        format!("{}!{}", self.name, CellAddress::new(row, col))
    }
}

fn check_position(row: u32, col: u16) -> Result<()> {
    if row >= MAX_ROWS {
        return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
    }
    if col >= MAX_COLS {
        return Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1));
    }
    Ok(())
}
