// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ogw developers

//! Write/read cursors over the packed wire format.
//!
//! [`WriteCursor`] appends to a growable buffer, so writes are infallible.
//! [`ReadCursor`] borrows a byte slice and bounds-checks every access,
//! reporting the failing offset.

use super::{WireError, WireResult};

/// Continuation bit of a ULEB128 byte (bit 7).
const CONTINUATION_BIT: u8 = 0x80;

/// Data bits of a ULEB128 byte (bits 0-6).
const DATA_MASK: u8 = 0x7F;

/// Maximum encoded length of a u64 varint.
pub const MAX_VARINT_LEN: usize = 10;

/// Generate append methods for little-endian fixed-width primitives.
macro_rules! impl_write_le {
    ($name:ident, $type:ty) => {
        pub fn $name(&mut self, value: $type) {
            self.buf.extend_from_slice(&value.to_le_bytes());
        }
    };
}

/// Generate bounds-checked read methods for little-endian fixed-width
/// primitives.
macro_rules! impl_read_le {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self) -> WireResult<$type> {
            let mut bytes = [0u8; $size];
            bytes.copy_from_slice(self.read_bytes($size)?);
            Ok(<$type>::from_le_bytes(bytes))
        }
    };
}

/// Growable write cursor (append-only, position = bytes written so far).
#[derive(Debug, Default)]
pub struct WriteCursor {
    buf: Vec<u8>,
}

impl WriteCursor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn offset(&self) -> usize {
        self.buf.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    impl_write_le!(write_u16_le, u16);
    impl_write_le!(write_u32_le, u32);
    impl_write_le!(write_u64_le, u64);

    pub fn write_f64_le(&mut self, value: f64) {
        self.write_u64_le(value.to_bits());
    }

    pub fn write_bytes(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Append a u64 as ULEB128: 7 data bits per byte, LSB-first, bit 7 set
    /// while more bytes follow.
    pub fn write_varint(&mut self, mut value: u64) {
        loop {
            let byte = (value & u64::from(DATA_MASK)) as u8;
            value >>= 7;
            if value == 0 {
                self.buf.push(byte);
                return;
            }
            self.buf.push(byte | CONTINUATION_BIT);
        }
    }

    /// Append a length-prefixed UTF-8 string (varint byte count + bytes).
    pub fn write_str(&mut self, value: &str) {
        self.write_varint(value.len() as u64);
        self.buf.extend_from_slice(value.as_bytes());
    }
}

/// Borrowing read cursor (bounds-checked, zero-copy).
#[derive(Debug)]
pub struct ReadCursor<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> ReadCursor<'a> {
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.offset)
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.buf.len()
    }

    pub fn read_u8(&mut self) -> WireResult<u8> {
        let byte = self.read_bytes(1)?;
        Ok(byte[0])
    }

    impl_read_le!(read_u16_le, u16, 2);
    impl_read_le!(read_u32_le, u32, 4);
    impl_read_le!(read_u64_le, u64, 8);

    pub fn read_f64_le(&mut self) -> WireResult<f64> {
        Ok(f64::from_bits(self.read_u64_le()?))
    }

    pub fn read_bytes(&mut self, len: usize) -> WireResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(WireError::ReadFailed {
                offset: self.offset,
                reason: "unexpected end of buffer".into(),
            });
        }
        let slice = &self.buf[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    /// Read a ULEB128 varint as u64.
    ///
    /// Fails with [`WireError::VarintOverflow`] if the encoding runs past 10
    /// bytes or sets bits beyond the 64th, and with a read failure if the
    /// buffer ends while the continuation bit is still set.
    pub fn read_varint(&mut self) -> WireResult<u64> {
        let start = self.offset;
        let mut result: u64 = 0;
        let mut shift: u32 = 0;
        loop {
            if shift > 63 {
                return Err(WireError::VarintOverflow { offset: start });
            }
            let byte = self.read_u8()?;
            let data = u64::from(byte & DATA_MASK);
            // At shift 63 only bit 0 fits into a u64.
            if shift == 63 && data > 1 {
                return Err(WireError::VarintOverflow { offset: start });
            }
            result |= data << shift;
            if byte & CONTINUATION_BIT == 0 {
                return Ok(result);
            }
            shift += 7;
        }
    }

    /// Read a varint that must fit a u32 (field-id deltas, reference ids).
    pub fn read_varint_u32(&mut self) -> WireResult<u32> {
        let start = self.offset;
        let value = self.read_varint()?;
        u32::try_from(value).map_err(|_| WireError::VarintOverflow { offset: start })
    }

    /// Read a length-prefixed UTF-8 string written by
    /// [`WriteCursor::write_str`].
    pub fn read_str(&mut self) -> WireResult<String> {
        let start = self.offset;
        let len = self.read_varint()? as usize;
        let bytes = self.read_bytes(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| WireError::ReadFailed {
            offset: start,
            reason: "string is not valid UTF-8".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_across_numeric_types() {
        let mut writer = WriteCursor::new();
        writer.write_u8(0xAB);
        writer.write_u16_le(0xCDEF);
        writer.write_u32_le(0x1234_5678);
        writer.write_u64_le(0x1122_3344_5566_7788);
        writer.write_f64_le(6.25);
        writer.write_bytes(&[1, 2, 3, 4]);
        let written = writer.offset();
        let bytes = writer.into_bytes();
        assert_eq!(bytes.len(), written);

        let mut reader = ReadCursor::new(&bytes);
        assert_eq!(reader.read_u8().expect("read u8"), 0xAB);
        assert_eq!(reader.read_u16_le().expect("read u16"), 0xCDEF);
        assert_eq!(reader.read_u32_le().expect("read u32"), 0x1234_5678);
        assert_eq!(reader.read_u64_le().expect("read u64"), 0x1122_3344_5566_7788);
        assert!((reader.read_f64_le().expect("read f64") - 6.25).abs() < f64::EPSILON);
        assert_eq!(reader.read_bytes(4).expect("read bytes"), &[1, 2, 3, 4]);
        assert!(reader.is_eof());
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_read_overflow_reports_offset() {
        let bytes = [0u8; 1];
        let mut reader = ReadCursor::new(&bytes);
        assert_eq!(reader.read_u8().expect("read u8"), 0);

        let err = reader.read_u8().unwrap_err();
        assert_eq!(
            err,
            WireError::ReadFailed {
                offset: 1,
                reason: "unexpected end of buffer".into(),
            }
        );
    }

    #[test]
    fn test_varint_known_encodings() {
        let cases: &[(u64, &[u8])] = &[
            (0, &[0x00]),
            (1, &[0x01]),
            (127, &[0x7F]),
            (128, &[0x80, 0x01]),
            (300, &[0xAC, 0x02]),
            (16383, &[0xFF, 0x7F]),
            (16384, &[0x80, 0x80, 0x01]),
        ];
        for &(value, encoded) in cases {
            let mut writer = WriteCursor::new();
            writer.write_varint(value);
            assert_eq!(writer.as_bytes(), encoded, "encoding of {}", value);

            let mut reader = ReadCursor::new(encoded);
            assert_eq!(reader.read_varint().expect("decode varint"), value);
            assert!(reader.is_eof());
        }
    }

    #[test]
    fn test_varint_roundtrip_extremes() {
        for value in [u64::MAX, u64::MAX / 2, u64::from(u32::MAX), 1_000_000] {
            let mut writer = WriteCursor::new();
            writer.write_varint(value);
            assert!(writer.offset() <= MAX_VARINT_LEN);
            let bytes = writer.into_bytes();
            let mut reader = ReadCursor::new(&bytes);
            assert_eq!(reader.read_varint().expect("decode varint"), value);
        }
    }

    #[test]
    fn test_varint_truncated_fails() {
        // Continuation bit set, then nothing.
        let mut reader = ReadCursor::new(&[0x80]);
        let err = reader.read_varint().unwrap_err();
        assert!(matches!(err, WireError::ReadFailed { offset: 1, .. }));

        let mut reader = ReadCursor::new(&[]);
        assert!(reader.read_varint().is_err());
    }

    #[test]
    fn test_varint_overflow_fails() {
        // 11 continuation bytes can never terminate inside a u64.
        let bytes = [0x80u8; 11];
        let mut reader = ReadCursor::new(&bytes);
        assert_eq!(
            reader.read_varint().unwrap_err(),
            WireError::VarintOverflow { offset: 0 }
        );

        // Tenth byte carrying more than bit 0.
        let mut bytes = [0x80u8; 10];
        bytes[9] = 0x02;
        let mut reader = ReadCursor::new(&bytes);
        assert_eq!(
            reader.read_varint().unwrap_err(),
            WireError::VarintOverflow { offset: 0 }
        );
    }

    #[test]
    fn test_varint_u32_overflow() {
        let mut writer = WriteCursor::new();
        writer.write_varint(u64::from(u32::MAX) + 1);
        let bytes = writer.into_bytes();
        let mut reader = ReadCursor::new(&bytes);
        assert_eq!(
            reader.read_varint_u32().unwrap_err(),
            WireError::VarintOverflow { offset: 0 }
        );

        let mut writer = WriteCursor::new();
        writer.write_varint(u64::from(u32::MAX));
        let bytes = writer.into_bytes();
        let mut reader = ReadCursor::new(&bytes);
        assert_eq!(reader.read_varint_u32().expect("valid u32"), u32::MAX);
    }

    #[test]
    fn test_str_roundtrip() {
        let mut writer = WriteCursor::new();
        writer.write_str("Dog");
        writer.write_str("");
        let bytes = writer.into_bytes();
        assert_eq!(&bytes, &[0x03, b'D', b'o', b'g', 0x00]);

        let mut reader = ReadCursor::new(&bytes);
        assert_eq!(reader.read_str().expect("read str"), "Dog");
        assert_eq!(reader.read_str().expect("read empty str"), "");
    }

    #[test]
    fn test_str_invalid_utf8_fails() {
        // Length 2, then an invalid UTF-8 sequence.
        let bytes = [0x02, 0xFF, 0xFE];
        let mut reader = ReadCursor::new(&bytes);
        let err = reader.read_str().unwrap_err();
        assert!(matches!(err, WireError::ReadFailed { offset: 0, .. }));
    }

    #[test]
    fn test_str_truncated_fails() {
        // Claims 5 bytes but only 2 follow.
        let bytes = [0x05, b'D', b'o'];
        let mut reader = ReadCursor::new(&bytes);
        assert!(reader.read_str().is_err());
    }
}
