//! XLSX writer
//!
//! Emits the smallest package a spreadsheet application opens without
//! repair: content types, relationships, workbook, styles and one part per
//! worksheet. Worksheet XML is streamed into the archive, so large sheets
//! are never held as one string.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use csv2xls_core::{CellAddress, CellValue, Workbook, Worksheet};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::XlsxStyleTable;

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_PACKAGE_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_DOC_RELS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const CT_SPREADSHEETML: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml";

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a workbook to a file path, replacing any existing file
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsxResult<()> {
        let file = File::create(path)?;
        Self::write(workbook, BufWriter::new(file))
    }

    /// Write a workbook as a ZIP package into `writer`
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> XlsxResult<()> {
        if workbook.is_empty() {
            return Err(XlsxError::InvalidContent(
                "a workbook needs at least one worksheet".into(),
            ));
        }

        let styles = XlsxStyleTable::build(workbook);
        let mut zip = ZipWriter::new(writer);

        start_part(&mut zip, "[Content_Types].xml")?;
        write_content_types(&mut zip, workbook.sheet_count())?;

        start_part(&mut zip, "_rels/.rels")?;
        write!(
            zip,
            r#"{XML_DECL}
<Relationships xmlns="{NS_PACKAGE_RELS}"><Relationship Id="rId1" Type="{NS_DOC_RELS}/officeDocument" Target="xl/workbook.xml"/></Relationships>"#
        )?;

        start_part(&mut zip, "xl/workbook.xml")?;
        write_workbook(&mut zip, workbook)?;

        start_part(&mut zip, "xl/_rels/workbook.xml.rels")?;
        write_workbook_rels(&mut zip, workbook.sheet_count())?;

        start_part(&mut zip, "xl/styles.xml")?;
        zip.write_all(styles.to_styles_xml().as_bytes())?;

        for (index, sheet) in workbook.worksheets().enumerate() {
            start_part(&mut zip, &format!("xl/worksheets/sheet{}.xml", index + 1))?;
            write_worksheet(&mut zip, sheet, index, &styles)?;
        }

        zip.finish()?.flush()?;
        log::debug!("XLSX: wrote {} worksheets", workbook.sheet_count());
        Ok(())
    }
}

fn start_part<W: Write + Seek>(zip: &mut ZipWriter<W>, name: &str) -> XlsxResult<()> {
    zip.start_file(name, SimpleFileOptions::default())?;
    Ok(())
}

fn write_content_types(out: &mut impl Write, sheets: usize) -> XlsxResult<()> {
    write!(
        out,
        r#"{XML_DECL}
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="{CT_SPREADSHEETML}.sheet.main+xml"/>
<Override PartName="/xl/styles.xml" ContentType="{CT_SPREADSHEETML}.styles+xml"/>"#
    )?;
    for n in 1..=sheets {
        write!(
            out,
            r#"
<Override PartName="/xl/worksheets/sheet{n}.xml" ContentType="{CT_SPREADSHEETML}.worksheet+xml"/>"#
        )?;
    }
    out.write_all(b"\n</Types>")?;
    Ok(())
}

fn write_workbook(out: &mut impl Write, workbook: &Workbook) -> XlsxResult<()> {
    write!(
        out,
        r#"{XML_DECL}
<workbook xmlns="{NS_MAIN}" xmlns:r="{NS_DOC_RELS}">
<sheets>"#
    )?;
    for (i, sheet) in workbook.worksheets().enumerate() {
        write!(
            out,
            r#"
<sheet name="{}" sheetId="{n}" r:id="rId{n}"/>"#,
            escape_xml(sheet.name()),
            n = i + 1
        )?;
    }
    out.write_all(b"\n</sheets>\n</workbook>")?;
    Ok(())
}

/// Sheets are `rId1..=rIdN`, styles take the next id
fn write_workbook_rels(out: &mut impl Write, sheets: usize) -> XlsxResult<()> {
    write!(out, r#"{XML_DECL}
<Relationships xmlns="{NS_PACKAGE_RELS}">"#)?;
    for n in 1..=sheets {
        write!(
            out,
            r#"
<Relationship Id="rId{n}" Type="{NS_DOC_RELS}/worksheet" Target="worksheets/sheet{n}.xml"/>"#
        )?;
    }
    write!(
        out,
        r#"
<Relationship Id="rId{}" Type="{NS_DOC_RELS}/styles" Target="styles.xml"/>
</Relationships>"#,
        sheets + 1
    )?;
    Ok(())
}

fn write_worksheet(
    out: &mut impl Write,
    sheet: &Worksheet,
    index: usize,
    styles: &XlsxStyleTable,
) -> XlsxResult<()> {
    write!(out, r#"{XML_DECL}
<worksheet xmlns="{NS_MAIN}">"#)?;

    if let Some((first_row, first_col, last_row, last_col)) = sheet.used_bounds() {
        write!(
            out,
            r#"
<dimension ref="{}:{}"/>"#,
            CellAddress::new(first_row, first_col),
            CellAddress::new(last_row, last_col)
        )?;
    }
    if index == 0 {
        out.write_all(
            b"\n<sheetViews><sheetView tabSelected=\"1\" workbookViewId=\"0\"/></sheetViews>",
        )?;
    }
    out.write_all(b"\n<sheetData>")?;

    let mut open_row: Option<u32> = None;
    for (row, col, cell) in sheet.iter_cells() {
        if cell.value.is_empty() {
            continue;
        }
        if open_row != Some(row) {
            if open_row.is_some() {
                out.write_all(b"</row>")?;
            }
            write!(out, "\n<row r=\"{}\">", row + 1)?;
            open_row = Some(row);
        }

        let cell_ref = CellAddress::new(row, col);
        match styles.xf_id_for(index, cell.style_index) {
            0 => write!(out, "<c r=\"{cell_ref}\"")?,
            xf => write!(out, "<c r=\"{cell_ref}\" s=\"{xf}\"")?,
        }

        match &cell.value {
            CellValue::Number(n) => write!(out, "><v>{n}</v></c>")?,
            CellValue::Text(s) => {
                let text = s.as_str();
                let space = if text.trim() != text {
                    " xml:space=\"preserve\""
                } else {
                    ""
                };
                write!(
                    out,
                    " t=\"inlineStr\"><is><t{space}>{}</t></is></c>",
                    escape_xml(text)
                )?;
            }
            CellValue::Empty => {}
        }
    }
    if open_row.is_some() {
        out.write_all(b"</row>")?;
    }

    out.write_all(b"\n</sheetData>\n</worksheet>")?;
    Ok(())
}

pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
