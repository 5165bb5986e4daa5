//! XLS writer
//!
//! Serializes a [`Workbook`] as a BIFF8 `Workbook` stream wrapped in a
//! Compound File Binary container.

use std::fs::OpenOptions;
use std::io::{Read, Seek, Write};
use std::path::Path;

use ahash::AHashMap;
use csv2xls_core::{CellValue, NumberFormat, Style, Workbook, Worksheet};

use crate::biff::records;
use crate::biff::rk::encode_rk_integer;
use crate::biff::strings::{write_short_string, write_unicode_string, SharedStrings};
use crate::biff::BiffWriter;
use crate::error::{XlsError, XlsResult};
use crate::{XLS_MAX_COLS, XLS_MAX_ROWS, XLS_MAX_STRING_CHARS};

/// Number of style XFs preceding the cell XFs.
const STYLE_XF_COUNT: u16 = 15;
/// XF used by cells without a specific style.
const DEFAULT_CELL_XF: u16 = STYLE_XF_COUNT;
/// Fonts 0..=3 must exist; index 4 is never referenced.
const FONT_COUNT: usize = 4;
/// Workbook streams are padded to at least this size so they stay out of the
/// CFB mini stream.
const MIN_STREAM_LEN: usize = 4096;

const XF_FLAG_LOCKED: u16 = 0x0001;
const XF_FLAG_STYLE: u16 = 0x0004;
const XF_PARENT_NONE: u16 = 0xFFF0;
const COLOR_AUTOMATIC: u16 = 0x7FFF;

/// XLS file writer
pub struct XlsWriter;

impl XlsWriter {
    /// Write a workbook to a file path, replacing any existing file
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsResult<()> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        Self::write(workbook, file)
    }

    /// Write a workbook into a compound file built on `writer`
    pub fn write<W: Read + Write + Seek>(workbook: &Workbook, writer: W) -> XlsResult<()> {
        let stream = Self::workbook_stream(workbook)?;

        let mut compound = cfb::CompoundFile::create_with_version(cfb::Version::V3, writer)?;
        {
            let mut out = compound.create_stream("/Workbook")?;
            out.write_all(&stream)?;
        }
        compound.flush()?;
        Ok(())
    }

    /// Build the raw BIFF8 `Workbook` stream
    pub fn workbook_stream(workbook: &Workbook) -> XlsResult<Vec<u8>> {
        if workbook.is_empty() {
            return Err(XlsError::Limit("a workbook needs at least one worksheet".into()));
        }

        let mut xfs = XfTable::new();
        let mut sst = SharedStrings::new();
        let mut sheet_streams = Vec::with_capacity(workbook.sheet_count());
        for (i, sheet) in workbook.worksheets().enumerate() {
            sheet_streams.push(write_sheet(sheet, i == 0, &mut xfs, &mut sst)?);
        }
        log::debug!(
            "BIFF8: {} sheets, {} cell formats, {} unique strings",
            workbook.sheet_count(),
            xfs.cell_xf_formats.len(),
            sst.len()
        );

        let mut out = BiffWriter::new();
        out.record(records::BOF, &bof(records::BOF_WORKBOOK_GLOBALS));
        out.record(records::CODEPAGE, &records::CODEPAGE_UTF16.to_le_bytes());
        out.record(records::WINDOW1, &window1());
        out.record(records::DATEMODE, &0u16.to_le_bytes());
        for _ in 0..FONT_COUNT {
            out.record(records::FONT, &font("Arial"));
        }
        for (id, code) in &xfs.formats {
            out.record(records::FORMAT, &format_record(*id, code));
        }
        for _ in 0..STYLE_XF_COUNT {
            out.record(records::XF, &xf_record(0, true));
        }
        for &format_id in &xfs.cell_xf_formats {
            out.record(records::XF, &xf_record(format_id, false));
        }
        out.record(records::STYLE, &normal_style());

        let mut sheet_offset_slots = Vec::with_capacity(workbook.sheet_count());
        for sheet in workbook.worksheets() {
            sheet_offset_slots.push(out.position() + 4);
            out.record(records::BOUNDSHEET, &boundsheet(sheet.name()));
        }

        write_sst(&mut out, &sst);
        out.record(records::EOF, &[]);

        for (slot, sheet_stream) in sheet_offset_slots.into_iter().zip(sheet_streams) {
            let offset = out.position() as u32;
            out.patch_u32(slot, offset);
            out.append(sheet_stream);
        }

        let mut stream = out.into_inner();
        if stream.len() < MIN_STREAM_LEN {
            stream.resize(MIN_STREAM_LEN, 0);
        }
        Ok(stream)
    }
}

/// Cell formats collected across all worksheets.
struct XfTable {
    /// Custom FORMAT records as (id, code)
    formats: Vec<(u16, String)>,
    format_ids: AHashMap<String, u16>,
    /// Number format id of each cell XF, starting at [`DEFAULT_CELL_XF`]
    cell_xf_formats: Vec<u16>,
    xf_by_format: AHashMap<u16, u16>,
}

impl XfTable {
    fn new() -> Self {
        let mut xf_by_format = AHashMap::new();
        xf_by_format.insert(0, DEFAULT_CELL_XF);
        Self {
            formats: Vec::new(),
            format_ids: AHashMap::new(),
            cell_xf_formats: vec![0],
            xf_by_format,
        }
    }

    fn xf_for(&mut self, style: &Style) -> u16 {
        let format_id = self.format_id(&style.number_format);
        if let Some(&xf) = self.xf_by_format.get(&format_id) {
            return xf;
        }
        let xf = STYLE_XF_COUNT + self.cell_xf_formats.len() as u16;
        self.cell_xf_formats.push(format_id);
        self.xf_by_format.insert(format_id, xf);
        xf
    }

    fn format_id(&mut self, format: &NumberFormat) -> u16 {
        match format {
            NumberFormat::General => 0,
            NumberFormat::BuiltIn(id) => *id as u16,
            NumberFormat::Custom(code) => {
                if let Some(&id) = self.format_ids.get(code) {
                    return id;
                }
                let id = NumberFormat::FIRST_CUSTOM_ID as u16 + self.formats.len() as u16;
                self.formats.push((id, code.clone()));
                self.format_ids.insert(code.clone(), id);
                id
            }
        }
    }
}

fn write_sheet(
    sheet: &Worksheet,
    selected: bool,
    xfs: &mut XfTable,
    sst: &mut SharedStrings,
) -> XlsResult<BiffWriter> {
    let xf_map: Vec<u16> = sheet
        .style_pool()
        .iter()
        .map(|(_, style)| xfs.xf_for(style))
        .collect();

    let mut out = BiffWriter::new();
    out.record(records::BOF, &bof(records::BOF_WORKSHEET));
    out.record(records::DIMENSION, &dimension(sheet));

    for (row, col, cell) in sheet.iter_cells() {
        if row >= XLS_MAX_ROWS || col >= XLS_MAX_COLS {
            return Err(XlsError::Limit(format!(
                "cell {} is outside the {} x {} grid",
                sheet.describe_cell(row, col),
                XLS_MAX_ROWS,
                XLS_MAX_COLS
            )));
        }
        let xf = xf_map
            .get(cell.style_index as usize)
            .copied()
            .unwrap_or(DEFAULT_CELL_XF);

        match &cell.value {
            CellValue::Empty => {}
            CellValue::Number(n) => match encode_rk_integer(*n) {
                Some(rk) => {
                    let mut body = cell_header(row, col, xf);
                    body.extend_from_slice(&rk.to_le_bytes());
                    out.record(records::RK, &body);
                }
                None => {
                    let mut body = cell_header(row, col, xf);
                    body.extend_from_slice(&n.to_le_bytes());
                    out.record(records::NUMBER, &body);
                }
            },
            CellValue::Text(s) => {
                let text = s.as_str();
                let index = if text.chars().count() > XLS_MAX_STRING_CHARS {
                    log::warn!(
                        "{}: text longer than {} characters truncated",
                        sheet.describe_cell(row, col),
                        XLS_MAX_STRING_CHARS
                    );
                    let truncated: String = text.chars().take(XLS_MAX_STRING_CHARS).collect();
                    sst.intern(&truncated)
                } else {
                    sst.intern(text)
                };
                let mut body = cell_header(row, col, xf);
                body.extend_from_slice(&index.to_le_bytes());
                out.record(records::LABELSST, &body);
            }
        }
    }

    out.record(records::WINDOW2, &window2(selected));
    out.record(records::EOF, &[]);
    Ok(out)
}

fn write_sst(out: &mut BiffWriter, sst: &SharedStrings) {
    let encoded = sst.encode();

    // Absolute stream offset of every SST/CONTINUE record header
    let mut record_starts = Vec::with_capacity(encoded.bodies.len());
    let mut pos = out.position();
    for body in &encoded.bodies {
        record_starts.push(pos);
        pos += 4 + body.len();
    }
    out.record_with_continues(records::SST, &encoded.bodies);

    let mut extsst = Vec::with_capacity(2 + 8 * encoded.bucket_starts.len());
    extsst.extend_from_slice(&encoded.bucket_size.to_le_bytes());
    for start in &encoded.bucket_starts {
        let in_record = 4 + start.offset;
        let absolute = record_starts[start.record] + in_record;
        extsst.extend_from_slice(&(absolute as u32).to_le_bytes());
        extsst.extend_from_slice(&(in_record as u16).to_le_bytes());
        extsst.extend_from_slice(&0u16.to_le_bytes());
    }
    out.record(records::EXTSST, &extsst);
}

fn cell_header(row: u32, col: u16, xf: u16) -> Vec<u8> {
    let mut body = Vec::with_capacity(14);
    body.extend_from_slice(&(row as u16).to_le_bytes());
    body.extend_from_slice(&col.to_le_bytes());
    body.extend_from_slice(&xf.to_le_bytes());
    body
}

fn bof(dt: u16) -> [u8; 16] {
    let mut out = [0u8; 16];
    out[0..2].copy_from_slice(&records::BIFF8_VERSION.to_le_bytes());
    out[2..4].copy_from_slice(&dt.to_le_bytes());
    out[4..6].copy_from_slice(&0x0DBBu16.to_le_bytes()); // build
    out[6..8].copy_from_slice(&0x07CCu16.to_le_bytes()); // year (1996)
    out
}

fn window1() -> [u8; 18] {
    let mut out = [0u8; 18];
    out[4..6].copy_from_slice(&0x3A5Cu16.to_le_bytes()); // width
    out[6..8].copy_from_slice(&0x23BEu16.to_le_bytes()); // height
    out[8..10].copy_from_slice(&0x0038u16.to_le_bytes()); // show scrollbars and tabs
    out[14..16].copy_from_slice(&1u16.to_le_bytes()); // selected tabs
    out[16..18].copy_from_slice(&600u16.to_le_bytes()); // tab bar ratio
    out
}

fn window2(selected: bool) -> [u8; 18] {
    let mut out = [0u8; 18];
    let grbit: u16 = if selected { 0x06B6 } else { 0x00B6 };
    out[0..2].copy_from_slice(&grbit.to_le_bytes());
    out[6..10].copy_from_slice(&0x40u32.to_le_bytes()); // gridline color: automatic
    out
}

fn font(name: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(16 + name.len());
    out.extend_from_slice(&200u16.to_le_bytes()); // 10pt in twips
    out.extend_from_slice(&0u16.to_le_bytes()); // option flags
    out.extend_from_slice(&COLOR_AUTOMATIC.to_le_bytes());
    out.extend_from_slice(&400u16.to_le_bytes()); // normal weight
    out.extend_from_slice(&0u16.to_le_bytes()); // escapement
    out.extend_from_slice(&[0, 0, 0, 0]); // underline, family, charset, reserved
    write_short_string(&mut out, name);
    out
}

fn format_record(id: u16, code: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(5 + code.len());
    out.extend_from_slice(&id.to_le_bytes());
    write_unicode_string(&mut out, code);
    out
}

fn xf_record(format_id: u16, is_style_xf: bool) -> [u8; 20] {
    let mut out = [0u8; 20];
    out[0..2].copy_from_slice(&0u16.to_le_bytes()); // font 0
    out[2..4].copy_from_slice(&format_id.to_le_bytes());

    let flags = if is_style_xf {
        XF_FLAG_LOCKED | XF_FLAG_STYLE | XF_PARENT_NONE
    } else {
        XF_FLAG_LOCKED
    };
    out[4..6].copy_from_slice(&flags.to_le_bytes());

    out[6] = 0x20; // General + Bottom
    out[9] = if is_style_xf { 0x00 } else { 0x04 }; // cell XFs apply their own format
    out[18..20].copy_from_slice(&0x20C0u16.to_le_bytes()); // default pattern colors
    out
}

fn normal_style() -> [u8; 4] {
    let mut out = [0u8; 4];
    out[0..2].copy_from_slice(&0x8000u16.to_le_bytes()); // built-in, style XF 0
    out[2] = 0x00; // "Normal"
    out[3] = 0xFF; // no outline level
    out
}

fn boundsheet(name: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + name.len());
    out.extend_from_slice(&0u32.to_le_bytes()); // stream offset, patched later
    out.push(0); // visible
    out.push(0); // worksheet
    write_short_string(&mut out, name);
    out
}

fn dimension(sheet: &Worksheet) -> [u8; 14] {
    let mut out = [0u8; 14];
    if let Some((first_row, first_col, last_row, last_col)) = sheet.used_bounds() {
        let last_row = last_row.min(XLS_MAX_ROWS - 1);
        let last_col = last_col.min(XLS_MAX_COLS - 1);
        out[0..4].copy_from_slice(&first_row.to_le_bytes());
        out[4..8].copy_from_slice(&(last_row + 1).to_le_bytes());
        out[8..10].copy_from_slice(&first_col.to_le_bytes());
        out[10..12].copy_from_slice(&(last_col + 1).to_le_bytes());
    }
    out
}
