//! Record reading for checking written streams in tests.
//!
//! All multi-byte integers in BIFF8 are little-endian.

use std::io::{self, Read, Seek};

use super::records;
use crate::error::{XlsError, XlsResult};

const FLAG_HIGH_BYTE: u8 = 0x01;

fn malformed(msg: impl Into<String>) -> XlsError {
    XlsError::Io(io::Error::new(io::ErrorKind::InvalidData, msg.into()))
}

/// A single BIFF8 record (with CONTINUE bodies already merged).
#[derive(Debug)]
pub struct BiffRecord {
    pub record_type: u16,
    pub data: Vec<u8>,
    /// Offsets into `data` where each merged CONTINUE body begins.
    pub continue_offsets: Vec<usize>,
    /// Byte offset of this record's header in the stream.
    pub stream_offset: u64,
}

/// Read all records, merging CONTINUE records into their parent.
///
/// Reading stops at end of data or at zero padding after the last record.
pub fn read_all_records<R: Read + Seek>(stream: &mut R) -> XlsResult<Vec<BiffRecord>> {
    let mut records: Vec<BiffRecord> = Vec::new();
    let mut header = [0u8; 4];

    loop {
        let stream_offset = stream.stream_position()?;
        match stream.read_exact(&mut header) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(XlsError::Io(e)),
        }

        let record_type = u16::from_le_bytes([header[0], header[1]]);
        let body_len = u16::from_le_bytes([header[2], header[3]]) as usize;
        if record_type == 0 && body_len == 0 {
            break;
        }

        let mut body = vec![0u8; body_len];
        stream.read_exact(&mut body)?;

        if record_type == records::CONTINUE {
            let prev = records
                .last_mut()
                .ok_or_else(|| malformed("CONTINUE record with no preceding record"))?;
            prev.continue_offsets.push(prev.data.len());
            prev.data.extend_from_slice(&body);
        } else {
            records.push(BiffRecord {
                record_type,
                data: body,
                continue_offsets: Vec::new(),
                stream_offset,
            });
        }
    }

    Ok(records)
}

/// `(version, substream_type)` of a BOF body
pub fn parse_bof(data: &[u8]) -> XlsResult<(u16, u16)> {
    let mut offset = 0;
    let version = read_u16(data, &mut offset)?;
    let dt = read_u16(data, &mut offset)?;
    Ok((version, dt))
}

fn take<'a>(data: &'a [u8], offset: &mut usize, len: usize) -> XlsResult<&'a [u8]> {
    if *offset + len > data.len() {
        return Err(malformed(format!(
            "unexpected end of data at offset {}, need {} bytes",
            *offset, len
        )));
    }
    let slice = &data[*offset..*offset + len];
    *offset += len;
    Ok(slice)
}

pub fn read_u8(data: &[u8], offset: &mut usize) -> XlsResult<u8> {
    Ok(take(data, offset, 1)?[0])
}

pub fn read_u16(data: &[u8], offset: &mut usize) -> XlsResult<u16> {
    let b = take(data, offset, 2)?;
    Ok(u16::from_le_bytes([b[0], b[1]]))
}

pub fn read_u32(data: &[u8], offset: &mut usize) -> XlsResult<u32> {
    let b = take(data, offset, 4)?;
    Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

pub fn read_f64(data: &[u8], offset: &mut usize) -> XlsResult<f64> {
    let b = take(data, offset, 8)?;
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(b);
    Ok(f64::from_le_bytes(bytes))
}

/// Decode an RK-encoded number.
pub fn decode_rk(rk: u32) -> f64 {
    let div100 = (rk & 0x01) != 0;
    let value = if rk & 0x02 != 0 {
        ((rk as i32) >> 2) as f64
    } else {
        f64::from_bits(((rk & 0xFFFF_FFFC) as u64) << 32)
    };
    if div100 {
        value / 100.0
    } else {
        value
    }
}

/// Read a BIFF8 "short" string (1-byte length prefix).
pub fn read_short_string(data: &[u8], offset: &mut usize) -> XlsResult<String> {
    let char_count = read_u8(data, offset)? as usize;
    let flags = read_u8(data, offset)?;
    let mut units = Vec::with_capacity(char_count);
    read_units(data, offset, char_count, flags, &mut units)?;
    decode_units(&units)
}

/// Read a BIFF8 Unicode string with a 2-byte length prefix.
pub fn read_unicode_string(data: &[u8], offset: &mut usize) -> XlsResult<String> {
    let char_count = read_u16(data, offset)? as usize;
    let flags = read_u8(data, offset)?;
    let mut units = Vec::with_capacity(char_count);
    read_units(data, offset, char_count, flags, &mut units)?;
    decode_units(&units)
}

/// Parse an SST body (CONTINUE bodies merged, boundaries in `continue_offsets`).
pub fn parse_sst(data: &[u8], continue_offsets: &[usize]) -> XlsResult<Vec<String>> {
    let mut offset = 0;
    let _total = read_u32(data, &mut offset)?;
    let unique = read_u32(data, &mut offset)? as usize;
    let mut strings = Vec::with_capacity(unique);

    for _ in 0..unique {
        let char_count = read_u16(data, &mut offset)? as usize;
        let mut flags = read_u8(data, &mut offset)?;
        if flags & !FLAG_HIGH_BYTE != 0 {
            return Err(malformed(format!("unsupported SST string flags {flags:#04x}")));
        }

        let mut units = Vec::with_capacity(char_count);
        loop {
            let limit = continue_offsets
                .iter()
                .copied()
                .find(|&b| b > offset)
                .unwrap_or(data.len());
            let char_size = if flags & FLAG_HIGH_BYTE != 0 { 2 } else { 1 };
            let n = ((limit - offset) / char_size).min(char_count - units.len());
            read_units(&data[..limit], &mut offset, n, flags, &mut units)?;
            if units.len() == char_count {
                break;
            }
            if offset != limit || limit == data.len() {
                return Err(malformed("truncated SST string"));
            }
            flags = read_u8(data, &mut offset)?;
        }
        strings.push(decode_units(&units)?);
    }

    Ok(strings)
}

fn read_units(
    data: &[u8],
    offset: &mut usize,
    count: usize,
    flags: u8,
    units: &mut Vec<u16>,
) -> XlsResult<()> {
    let wide = flags & FLAG_HIGH_BYTE != 0;
    let byte_len = if wide { count * 2 } else { count };
    let bytes = take(data, offset, byte_len)?;
    if wide {
        units.extend(bytes.chunks_exact(2).map(|c| u16::from_le_bytes([c[0], c[1]])));
    } else {
        units.extend(bytes.iter().map(|&b| b as u16));
    }
    Ok(())
}

fn decode_units(units: &[u16]) -> XlsResult<String> {
    String::from_utf16(units).map_err(|e| malformed(format!("invalid UTF-16 string: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u16() {
        let data = [0x34, 0x12];
        let mut off = 0;
        assert_eq!(read_u16(&data, &mut off).unwrap(), 0x1234);
        assert_eq!(off, 2);
    }

    #[test]
    fn test_read_past_end() {
        let data = [0x01, 0x02, 0x03];
        let mut off = 0;
        assert!(read_u32(&data, &mut off).is_err());
        assert_eq!(off, 0);
    }

    #[test]
    fn test_read_f64() {
        let bytes = 2.5_f64.to_le_bytes();
        let mut off = 0;
        assert_eq!(read_f64(&bytes, &mut off).unwrap(), 2.5);
        assert_eq!(off, 8);
    }

    #[test]
    fn test_decode_div100() {
        assert!((decode_rk(0x000004EB) - 3.14).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_bof() {
        let mut data = Vec::new();
        data.extend_from_slice(&records::BIFF8_VERSION.to_le_bytes());
        data.extend_from_slice(&records::BOF_WORKSHEET.to_le_bytes());
        assert_eq!(
            parse_bof(&data).unwrap(),
            (records::BIFF8_VERSION, records::BOF_WORKSHEET)
        );
        assert!(parse_bof(&[0x00]).is_err());
    }
}
