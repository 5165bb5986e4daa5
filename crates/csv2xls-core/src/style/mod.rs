//! Cell styling types
//!
//! The converter only ever varies the number format (dates get a display
//! pattern, everything else stays General), so a [`Style`] is a number format
//! plus the [`StylePool`] that deduplicates styles per worksheet.

mod number_format;
mod pool;

pub use number_format::NumberFormat;
pub use pool::StylePool;

/// Complete cell style
///
/// Styles are deduplicated via [`StylePool`]; cells reference them by index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Number format
    pub number_format: NumberFormat,
}

impl Style {
    /// Create a new default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set number format string
    pub fn number_format<S: Into<String>>(mut self, format: S) -> Self {
        self.number_format = NumberFormat::Custom(format.into());
        self
    }

    /// Check whether this is the default (General) style
    pub fn is_default(&self) -> bool {
        *self == Style::default()
    }
}
