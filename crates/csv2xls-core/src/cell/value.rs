//! Cell values

/// Content of one cell
///
/// There is no date variant: a date is its serial day count stored as a
/// [`CellValue::Number`], displayed through a date number format on the
/// cell's style.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn string<S: Into<String>>(s: S) -> Self {
        CellValue::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for CellValue {
    /// Integers beyond 2^53 lose precision, as they do in a spreadsheet
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(CellValue::from(7i64), CellValue::Number(7.0));
        assert_eq!(CellValue::from(3.25), CellValue::Number(3.25));
        assert_eq!(
            CellValue::from(9_007_199_254_740_993i64),
            CellValue::Number(9_007_199_254_740_992.0)
        );

        let s = CellValue::from("hello");
        assert_eq!(s.as_text(), Some("hello"));
        assert_eq!(s.as_number(), None);
        assert!(CellValue::default().is_empty());
    }
}
