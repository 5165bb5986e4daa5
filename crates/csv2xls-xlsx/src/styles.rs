//! `xl/styles.xml`
//!
//! Cell styles differ only in their number format, so each distinct format
//! becomes one `cellXfs` entry. Entry 0 is General.

use std::collections::HashMap;
use std::fmt::Write as _;

use csv2xls_core::{NumberFormat, Workbook};

use crate::writer::escape_xml;

#[derive(Debug)]
pub(crate) struct XlsxStyleTable {
    /// `numFmtId` of each `cellXfs` entry
    xf_formats: Vec<u32>,
    /// Custom format codes with their assigned ids
    custom_formats: Vec<(u32, String)>,
    /// Per sheet: pool index -> `cellXfs` index
    sheet_maps: Vec<Vec<u32>>,
}

impl XlsxStyleTable {
    pub(crate) fn build(workbook: &Workbook) -> Self {
        let mut table = Self {
            xf_formats: vec![0],
            custom_formats: Vec::new(),
            sheet_maps: Vec::with_capacity(workbook.sheet_count()),
        };
        let mut xf_by_format: HashMap<u32, u32> = HashMap::from([(0, 0)]);

        for sheet in workbook.worksheets() {
            let map = sheet
                .style_pool()
                .iter()
                .map(|(_, style)| {
                    let format_id = table.format_id(&style.number_format);
                    *xf_by_format.entry(format_id).or_insert_with(|| {
                        table.xf_formats.push(format_id);
                        (table.xf_formats.len() - 1) as u32
                    })
                })
                .collect();
            table.sheet_maps.push(map);
        }
        table
    }

    fn format_id(&mut self, format: &NumberFormat) -> u32 {
        match format {
            NumberFormat::General => 0,
            NumberFormat::BuiltIn(id) => *id,
            NumberFormat::Custom(code) => {
                if let Some((id, _)) = self.custom_formats.iter().find(|(_, c)| c == code) {
                    return *id;
                }
                let id = NumberFormat::FIRST_CUSTOM_ID + self.custom_formats.len() as u32;
                self.custom_formats.push((id, code.clone()));
                id
            }
        }
    }

    /// `s` attribute for a cell of sheet `sheet_index` using pool style `style_index`
    pub(crate) fn xf_id_for(&self, sheet_index: usize, style_index: u32) -> u32 {
        self.sheet_maps
            .get(sheet_index)
            .and_then(|m| m.get(style_index as usize).copied())
            .unwrap_or(0)
    }

    pub(crate) fn to_styles_xml(&self) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        if !self.custom_formats.is_empty() {
            let _ = write!(xml, "\n<numFmts count=\"{}\">", self.custom_formats.len());
            for (id, code) in &self.custom_formats {
                let _ = write!(
                    xml,
                    "<numFmt numFmtId=\"{}\" formatCode=\"{}\"/>",
                    id,
                    escape_xml(code)
                );
            }
            xml.push_str("</numFmts>");
        }

        // The first two fills must be none and gray125
        xml.push_str(
            r#"
<fonts count="1"><font><sz val="11"/><name val="Calibri"/><family val="2"/></font></fonts>
<fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>
<borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>
<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#,
        );

        let _ = write!(xml, "\n<cellXfs count=\"{}\">", self.xf_formats.len());
        for &format_id in &self.xf_formats {
            let apply = if format_id != 0 {
                " applyNumberFormat=\"1\""
            } else {
                ""
            };
            let _ = write!(
                xml,
                "<xf numFmtId=\"{format_id}\" fontId=\"0\" fillId=\"0\" borderId=\"0\" xfId=\"0\"{apply}/>"
            );
        }
        xml.push_str("</cellXfs>");

        xml.push_str(
            r#"
<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>
</styleSheet>"#,
        );
        xml
    }
}
