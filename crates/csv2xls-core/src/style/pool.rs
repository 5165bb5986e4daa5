//! Per-sheet style deduplication

use ahash::AHashMap;

use super::Style;

/// Distinct styles of one sheet, addressed by index
///
/// Index 0 is always the General style, so unstyled cells need no entry.
#[derive(Debug)]
pub struct StylePool {
    styles: Vec<Style>,
    lookup: AHashMap<Style, u32>,
}

impl StylePool {
    pub fn new() -> Self {
        let general = Style::default();
        let mut lookup = AHashMap::with_capacity(2);
        lookup.insert(general.clone(), 0);
        Self {
            styles: vec![general],
            lookup,
        }
    }

    /// Index of `style`, adding it on first use
    pub fn get_or_insert(&mut self, style: Style) -> u32 {
        if let Some(&idx) = self.lookup.get(&style) {
            return idx;
        }
        let idx = self.styles.len() as u32;
        self.lookup.insert(style.clone(), idx);
        self.styles.push(style);
        idx
    }

    pub fn get(&self, index: u32) -> Option<&Style> {
        self.styles.get(index as usize)
    }

    /// Number of styles, General included
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// True while only General is present
    pub fn is_empty(&self) -> bool {
        self.styles.len() == 1
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Style)> {
        self.styles.iter().enumerate().map(|(i, s)| (i as u32, s))
    }
}

impl Default for StylePool {
    fn default() -> Self {
        Self::new()
    }
}
