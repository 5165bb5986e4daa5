//! BIFF8 Unicode string encoding and the shared string table.
//!
//! BIFF8 strings are stored as:
//! - Header: char_count (1 or 2 bytes) + flags (1 byte)
//! - Flags bit 0 (`fHighByte`): 0 = compressed Latin-1, 1 = UTF-16LE
//! - Then the character data
//!
//! In SST records a string may be cut at a CONTINUE boundary. The
//! continuation then starts with a fresh flags byte before the remaining
//! characters. The string header itself is never split.

use ahash::AHashMap;

use super::records::MAX_RECORD_DATA;

const FLAG_HIGH_BYTE: u8 = 0x01;

/// Character data of a string in its BIFF8 storage form.
struct EncodedChars {
    char_count: u16,
    wide: bool,
    bytes: Vec<u8>,
}

impl EncodedChars {
    /// Latin-1 when every UTF-16 unit fits in a byte, UTF-16LE otherwise.
    ///
    /// Callers keep strings within the u16 character count.
    fn new(text: &str) -> Self {
        let units: Vec<u16> = text.encode_utf16().collect();
        let wide = units.iter().any(|&u| u > 0xFF);
        let bytes = if wide {
            units.iter().flat_map(|u| u.to_le_bytes()).collect()
        } else {
            units.iter().map(|&u| u as u8).collect()
        };
        Self {
            char_count: units.len() as u16,
            wide,
            bytes,
        }
    }

    fn flags(&self) -> u8 {
        if self.wide {
            FLAG_HIGH_BYTE
        } else {
            0
        }
    }

    fn char_size(&self) -> usize {
        if self.wide {
            2
        } else {
            1
        }
    }
}

/// Write a BIFF8 "short" string (1-byte length prefix, used in BOUNDSHEET).
pub fn write_short_string(out: &mut Vec<u8>, text: &str) {
    let enc = EncodedChars::new(text);
    out.push(enc.char_count.min(u8::MAX as u16) as u8);
    out.push(enc.flags());
    let max_bytes = u8::MAX as usize * enc.char_size();
    out.extend_from_slice(&enc.bytes[..enc.bytes.len().min(max_bytes)]);
}

/// Write a BIFF8 Unicode string with a 2-byte length prefix (FORMAT, FONT names).
pub fn write_unicode_string(out: &mut Vec<u8>, text: &str) {
    let enc = EncodedChars::new(text);
    out.extend_from_slice(&enc.char_count.to_le_bytes());
    out.push(enc.flags());
    out.extend_from_slice(&enc.bytes);
}

/// Shared string table collected while writing cells.
///
/// Each distinct string is stored once; cells refer to it by index.
#[derive(Debug, Default)]
pub struct SharedStrings {
    strings: Vec<String>,
    lookup: AHashMap<String, u32>,
    total_refs: u32,
}

/// Location of a string inside the encoded SST record chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SstPosition {
    /// Index of the record body (0 = SST, 1.. = CONTINUE).
    pub record: usize,
    /// Byte offset of the string header within that body.
    pub offset: usize,
}

/// SST record bodies plus the positions EXTSST needs.
#[derive(Debug)]
pub struct EncodedSst {
    pub bodies: Vec<Vec<u8>>,
    /// Position of every `bucket_size`-th string.
    pub bucket_starts: Vec<SstPosition>,
    pub bucket_size: u16,
}

impl SharedStrings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the index of `text`, adding it on first use.
    pub fn intern(&mut self, text: &str) -> u32 {
        self.total_refs += 1;
        if let Some(&index) = self.lookup.get(text) {
            return index;
        }
        let index = self.strings.len() as u32;
        self.strings.push(text.to_string());
        self.lookup.insert(text.to_string(), index);
        index
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn total_refs(&self) -> u32 {
        self.total_refs
    }

    /// EXTSST holds at most 128 buckets of at least 8 strings each.
    fn bucket_size(&self) -> u16 {
        let per_bucket = ((self.strings.len() + 127) / 128).max(8);
        per_bucket.min(u16::MAX as usize) as u16
    }

    /// Encode the table into an SST body followed by CONTINUE bodies.
    pub fn encode(&self) -> EncodedSst {
        let bucket_size = self.bucket_size();
        let mut bodies: Vec<Vec<u8>> = Vec::new();
        let mut current = Vec::with_capacity(MAX_RECORD_DATA);
        let mut bucket_starts = Vec::new();

        current.extend_from_slice(&self.total_refs.to_le_bytes());
        current.extend_from_slice(&(self.strings.len() as u32).to_le_bytes());

        for (i, text) in self.strings.iter().enumerate() {
            let enc = EncodedChars::new(text);

            // Header plus the first character must share a record.
            if current.len() + 3 + enc.char_size() > MAX_RECORD_DATA {
                bodies.push(std::mem::replace(
                    &mut current,
                    Vec::with_capacity(MAX_RECORD_DATA),
                ));
            }

            if i % bucket_size as usize == 0 {
                bucket_starts.push(SstPosition {
                    record: bodies.len(),
                    offset: current.len(),
                });
            }

            current.extend_from_slice(&enc.char_count.to_le_bytes());
            current.push(enc.flags());

            let mut rest = enc.bytes.as_slice();
            loop {
                let room = MAX_RECORD_DATA - current.len();
                let take = rest.len().min(room - room % enc.char_size());
                current.extend_from_slice(&rest[..take]);
                rest = &rest[take..];
                if rest.is_empty() {
                    break;
                }
                bodies.push(std::mem::replace(
                    &mut current,
                    Vec::with_capacity(MAX_RECORD_DATA),
                ));
                current.push(enc.flags());
            }
        }
        bodies.push(current);

        EncodedSst {
            bodies,
            bucket_starts,
            bucket_size,
        }
    }
}
