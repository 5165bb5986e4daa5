//! Number formats

/// How a numeric cell is displayed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NumberFormat {
    #[default]
    General,

    /// One of the formats every spreadsheet application knows by id
    BuiltIn(u32),

    /// A format code such as `M/D/YY`, registered in the file's format table
    Custom(String),
}

impl NumberFormat {
    /// Lowest id a file may assign to a custom format, in both BIFF8 and
    /// SpreadsheetML
    pub const FIRST_CUSTOM_ID: u32 = 164;

    /// Format code; built-in ids other than the date ones read as `General`
    pub fn format_string(&self) -> &str {
        match self {
            NumberFormat::General => "General",
            NumberFormat::BuiltIn(14) => "m/d/yy",
            NumberFormat::BuiltIn(22) => "m/d/yy h:mm",
            NumberFormat::BuiltIn(_) => "General",
            NumberFormat::Custom(code) => code,
        }
    }
}
