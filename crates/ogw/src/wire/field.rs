// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ogw developers

//! Field-header codec: the self-describing prefix of every encoded field.
//!
//! Layout (packed, in order):
//!
//! ```text
//! varint(field_id_delta)  u8(wire_tag)  [tag-specific payload]
//!
//!   Null          -> nothing further
//!   Reference     -> varint(reference_id)
//!   ConcreteValue -> varint(token_len) token_bytes, then the body owned by
//!                    the resolved concrete codec
//! ```

use super::cursor::{ReadCursor, WriteCursor};
use super::{WireError, WireResult};

/// Enumerated marker telling the decoder how to interpret the bytes that
/// follow the field-id delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WireTag {
    /// The field value is null; no body, no codec lookup.
    Null = 0,
    /// Back-pointer to a value already carried by this stream.
    Reference = 1,
    /// Full payload, preceded by a type token when the field's static type
    /// is abstract.
    ConcreteValue = 2,
}

impl WireTag {
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    fn from_byte(value: u8, offset: usize) -> WireResult<Self> {
        match value {
            0 => Ok(Self::Null),
            1 => Ok(Self::Reference),
            2 => Ok(Self::ConcreteValue),
            _ => Err(WireError::InvalidTag { offset, value }),
        }
    }
}

/// One decoded field header.
///
/// `type_token` is `Some` iff the tag is [`WireTag::ConcreteValue`] and the
/// stream carried a non-empty token; a zero-length token decodes as `None`
/// (writers never emit one, so `None` marks a malformed stream for
/// abstract-typed fields). `reference_id` is `Some` iff the tag is
/// [`WireTag::Reference`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldHeader {
    pub field_id_delta: u32,
    pub tag: WireTag,
    pub type_token: Option<String>,
    pub reference_id: Option<u32>,
}

impl FieldHeader {
    /// Read one header, advancing the cursor past the tag-specific payload
    /// (but not the body).
    pub fn read(cursor: &mut ReadCursor<'_>) -> WireResult<Self> {
        let field_id_delta = cursor.read_varint_u32()?;
        let tag_offset = cursor.offset();
        let tag = WireTag::from_byte(cursor.read_u8()?, tag_offset)?;
        let mut header = Self {
            field_id_delta,
            tag,
            type_token: None,
            reference_id: None,
        };
        match tag {
            WireTag::Null => {}
            WireTag::Reference => {
                header.reference_id = Some(cursor.read_varint_u32()?);
            }
            WireTag::ConcreteValue => {
                let token = cursor.read_str()?;
                if !token.is_empty() {
                    header.type_token = Some(token);
                }
            }
        }
        Ok(header)
    }
}

/// Write a `Null`-tagged field.
pub fn write_null_field(cursor: &mut WriteCursor, field_id_delta: u32) {
    cursor.write_varint(u64::from(field_id_delta));
    cursor.write_u8(WireTag::Null.as_byte());
}

/// Write a `Reference`-tagged field carrying the given id.
pub fn write_reference_field(cursor: &mut WriteCursor, field_id_delta: u32, reference_id: u32) {
    cursor.write_varint(u64::from(field_id_delta));
    cursor.write_u8(WireTag::Reference.as_byte());
    cursor.write_varint(u64::from(reference_id));
}

/// Write the header of a `ConcreteValue`-tagged field; the caller appends
/// the body immediately after.
pub fn write_value_header(cursor: &mut WriteCursor, field_id_delta: u32, type_token: &str) {
    cursor.write_varint(u64::from(field_id_delta));
    cursor.write_u8(WireTag::ConcreteValue.as_byte());
    cursor.write_str(type_token);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_field_roundtrip() {
        let mut writer = WriteCursor::new();
        write_null_field(&mut writer, 7);
        let bytes = writer.into_bytes();
        assert_eq!(&bytes, &[0x07, 0x00]);

        let mut reader = ReadCursor::new(&bytes);
        let header = FieldHeader::read(&mut reader).expect("read header");
        assert_eq!(header.field_id_delta, 7);
        assert_eq!(header.tag, WireTag::Null);
        assert_eq!(header.type_token, None);
        assert_eq!(header.reference_id, None);
        assert!(reader.is_eof());
    }

    #[test]
    fn test_reference_field_roundtrip() {
        let mut writer = WriteCursor::new();
        write_reference_field(&mut writer, 5, 1);
        let bytes = writer.into_bytes();
        assert_eq!(&bytes, &[0x05, 0x01, 0x01]);

        let mut reader = ReadCursor::new(&bytes);
        let header = FieldHeader::read(&mut reader).expect("read header");
        assert_eq!(header.field_id_delta, 5);
        assert_eq!(header.tag, WireTag::Reference);
        assert_eq!(header.reference_id, Some(1));
    }

    #[test]
    fn test_value_header_roundtrip() {
        let mut writer = WriteCursor::new();
        write_value_header(&mut writer, 3, "Dog");
        let bytes = writer.into_bytes();
        assert_eq!(&bytes, &[0x03, 0x02, 0x03, b'D', b'o', b'g']);

        let mut reader = ReadCursor::new(&bytes);
        let header = FieldHeader::read(&mut reader).expect("read header");
        assert_eq!(header.field_id_delta, 3);
        assert_eq!(header.tag, WireTag::ConcreteValue);
        assert_eq!(header.type_token.as_deref(), Some("Dog"));
    }

    #[test]
    fn test_empty_token_decodes_as_missing() {
        let bytes = [0x03, 0x02, 0x00];
        let mut reader = ReadCursor::new(&bytes);
        let header = FieldHeader::read(&mut reader).expect("read header");
        assert_eq!(header.tag, WireTag::ConcreteValue);
        assert_eq!(header.type_token, None);
    }

    #[test]
    fn test_invalid_tag_reports_offset() {
        let bytes = [0x03, 0x09];
        let mut reader = ReadCursor::new(&bytes);
        let err = FieldHeader::read(&mut reader).unwrap_err();
        assert_eq!(
            err,
            WireError::InvalidTag {
                offset: 1,
                value: 0x09,
            }
        );
    }

    #[test]
    fn test_truncated_header_fails() {
        // Delta only, tag byte missing.
        let mut reader = ReadCursor::new(&[0x03]);
        assert!(FieldHeader::read(&mut reader).is_err());

        // Reference tag without its id.
        let mut reader = ReadCursor::new(&[0x03, 0x01]);
        assert!(FieldHeader::read(&mut reader).is_err());
    }

    #[test]
    fn test_multibyte_delta() {
        let mut writer = WriteCursor::new();
        write_null_field(&mut writer, 300);
        let bytes = writer.into_bytes();
        assert_eq!(&bytes, &[0xAC, 0x02, 0x00]);

        let mut reader = ReadCursor::new(&bytes);
        let header = FieldHeader::read(&mut reader).expect("read header");
        assert_eq!(header.field_id_delta, 300);
    }
}
