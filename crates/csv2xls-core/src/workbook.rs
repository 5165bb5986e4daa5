//! Workbook: the ordered list of sheets that gets written out

use crate::error::{Error, Result};
use crate::worksheet::Worksheet;
use crate::{INVALID_SHEET_NAME_CHARS, MAX_SHEET_NAME_LEN};

/// Sheets in tab order
///
/// Sheets can only be appended, under a name the file formats accept and
/// that no other sheet already uses (ignoring case).
#[derive(Debug, Default)]
pub struct Workbook {
    worksheets: Vec<Worksheet>,
}

impl Workbook {
    /// A workbook without sheets; writers refuse to save it as is
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Exact (case-sensitive) lookup
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.name() == name)
    }

    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Append a sheet, returning its index
    pub fn add_worksheet_with_name(&mut self, name: &str) -> Result<usize> {
        self.check_new_name(name)?;
        self.worksheets.push(Worksheet::new(name));
        Ok(self.worksheets.len() - 1)
    }

    /// Append a sheet and return it for filling
    pub fn add_sheet(&mut self, name: &str) -> Result<&mut Worksheet> {
        let index = self.add_worksheet_with_name(name)?;
        let count = self.worksheets.len();
        self.worksheets
            .get_mut(index)
            .ok_or(Error::SheetOutOfBounds(index, count))
    }

    fn check_new_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("empty name".into()));
        }
        let len = name.chars().count();
        if len > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "{name} is {len} characters long, the limit is {MAX_SHEET_NAME_LEN}"
            )));
        }
        if let Some(c) = name.chars().find(|c| INVALID_SHEET_NAME_CHARS.contains(c)) {
            return Err(Error::InvalidSheetName(format!("{name} contains '{c}'")));
        }

        let lower = name.to_lowercase();
        if self.worksheets.iter().any(|ws| ws.name().to_lowercase() == lower) {
            return Err(Error::DuplicateSheetName(name.into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheets_keep_insertion_order() {
        let mut wb = Workbook::empty();
        wb.add_worksheet_with_name("beta").unwrap();
        wb.add_worksheet_with_name("alpha").unwrap();

        let names: Vec<&str> = wb.worksheets().map(|ws| ws.name()).collect();
        assert_eq!(names, vec!["beta", "alpha"]);
        assert_eq!(wb.worksheet(1).unwrap().name(), "alpha");
    }

    #[test]
    fn test_duplicates_ignore_case() {
        let mut wb = Workbook::empty();
        wb.add_worksheet_with_name("Data").unwrap();
        assert!(matches!(
            wb.add_worksheet_with_name("data"),
            Err(Error::DuplicateSheetName(_))
        ));
        assert_eq!(wb.sheet_count(), 1);
    }

    #[test]
    fn test_rejected_names() {
        let mut wb = Workbook::empty();
        for bad in ["", "a/b", "what?", "x[1]", "c:\\d"] {
            assert!(
                matches!(
                    wb.add_worksheet_with_name(bad),
                    Err(Error::InvalidSheetName(_))
                ),
                "{bad:?} accepted"
            );
        }
        assert!(wb.add_worksheet_with_name(&"x".repeat(32)).is_err());
        assert!(wb.add_worksheet_with_name(&"é".repeat(31)).is_ok());
    }

    #[test]
    fn test_add_sheet_returns_handle() {
        let mut wb = Workbook::empty();
        let sheet = wb.add_sheet("s").unwrap();
        sheet.set_cell_value_at(0, 0, 1.0).unwrap();
        assert_eq!(wb.worksheet_by_name("s").unwrap().cell_count(), 1);
    }
}
