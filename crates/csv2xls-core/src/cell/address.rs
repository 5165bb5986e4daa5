//! A1-style cell references

use std::fmt;

/// 0-based cell position, displayed as `A1`, `AB4`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellAddress {
    pub row: u32,
    pub col: u16,
}

impl CellAddress {
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Bijective base-26 column name: 0 is `A`, 26 is `AA`
    pub fn column_letters(col: u16) -> String {
        let mut letters = Vec::with_capacity(3);
        let mut n = u32::from(col) + 1;
        while n > 0 {
            n -= 1;
            letters.push(b'A' + (n % 26) as u8);
            n /= 26;
        }
        letters.reverse();
        // only ASCII letters were pushed
        String::from_utf8_lossy(&letters).into_owned()
    }

    pub fn to_a1_string(&self) -> String {
        format!("{}{}", Self::column_letters(self.col), u64::from(self.row) + 1)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_string())
    }
}
