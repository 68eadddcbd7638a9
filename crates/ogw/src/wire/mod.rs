// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ogw developers

//! Wire-level primitives: bounds-checked cursors, ULEB128 varints, and the
//! field-header codec.
//!
//! The wire format is packed (no alignment padding) and little-endian for
//! fixed-width integers. Variable-length integers use ULEB128, the same
//! encoding Protocol Buffers uses for unsigned values.

pub mod cursor;
pub mod field;

pub use cursor::{ReadCursor, WriteCursor};
pub use field::{FieldHeader, WireTag};

use std::fmt;

/// Failure while consuming raw bytes.
///
/// Writing cannot fail: [`WriteCursor`] grows its buffer on demand, so only
/// the read side carries an error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    ReadFailed { offset: usize, reason: String },
    InvalidTag { offset: usize, value: u8 },
    VarintOverflow { offset: usize },
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed { offset, reason } => {
                write!(f, "read failed at offset {}: {}", offset, reason)
            }
            Self::InvalidTag { offset, value } => {
                write!(f, "invalid wire tag {:#04x} at offset {}", value, offset)
            }
            Self::VarintOverflow { offset } => {
                write!(f, "varint at offset {} overflows its target width", offset)
            }
        }
    }
}

impl std::error::Error for WireError {}

pub type WireResult<T> = Result<T, WireError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_error_display_variants() {
        let err = WireError::ReadFailed {
            offset: 12,
            reason: "unexpected end of buffer".into(),
        };
        assert_eq!(
            err.to_string(),
            "read failed at offset 12: unexpected end of buffer"
        );

        let err = WireError::InvalidTag {
            offset: 3,
            value: 0x7f,
        };
        assert_eq!(err.to_string(), "invalid wire tag 0x7f at offset 3");

        let err = WireError::VarintOverflow { offset: 0 };
        assert_eq!(
            err.to_string(),
            "varint at offset 0 overflows its target width"
        );
    }
}
