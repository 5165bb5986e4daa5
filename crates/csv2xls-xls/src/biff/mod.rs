//! BIFF8 (Binary Interchange File Format) handling.
//!
//! A BIFF8 stream is a sequence of records, each with a 4-byte header
//! (2 bytes record type + 2 bytes body length) followed by the body.
//!
//! CONTINUE records (type 0x003C) extend the body of the preceding record
//! beyond the 8224-byte per-record limit.

#[cfg(test)]
pub(crate) mod reader;
pub mod records;
pub mod rk;
pub mod strings;

/// Append-only BIFF8 record stream.
#[derive(Debug, Default)]
pub struct BiffWriter {
    buf: Vec<u8>,
}

impl BiffWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current byte offset, i.e. where the next record header will start.
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    /// Write one record. Bodies over the size limit are split into CONTINUE
    /// records at arbitrary byte boundaries, which is only valid for record
    /// types that do not care where the split lands.
    pub fn record(&mut self, record_type: u16, data: &[u8]) {
        let mut chunks = data.chunks(records::MAX_RECORD_DATA);
        let first = chunks.next().unwrap_or(&[]);
        self.push(record_type, first);
        for chunk in chunks {
            self.push(records::CONTINUE, chunk);
        }
    }

    /// Write a record whose CONTINUE split points were chosen by the caller.
    pub fn record_with_continues(&mut self, record_type: u16, bodies: &[Vec<u8>]) {
        let mut iter = bodies.iter();
        let first = iter.next().map(Vec::as_slice).unwrap_or(&[]);
        self.push(record_type, first);
        for body in iter {
            self.push(records::CONTINUE, body);
        }
    }

    /// Overwrite four bytes at `offset` with a little-endian `u32`.
    pub fn patch_u32(&mut self, offset: usize, value: u32) {
        self.buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    /// Append another record stream verbatim.
    pub fn append(&mut self, other: BiffWriter) {
        self.buf.extend_from_slice(&other.buf);
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    fn push(&mut self, record_type: u16, body: &[u8]) {
        debug_assert!(body.len() <= records::MAX_RECORD_DATA);
        self.buf.extend_from_slice(&record_type.to_le_bytes());
        self.buf.extend_from_slice(&(body.len() as u16).to_le_bytes());
        self.buf.extend_from_slice(body);
    }
}
