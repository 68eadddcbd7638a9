// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ogw developers

//! Per-pass session state.
//!
//! A session binds one fresh reference table to one frozen registry for the
//! duration of exactly one encode or one decode of an object graph, and owns
//! the cursor for that pass. Sessions are single-threaded by construction
//! (`Rc`-based values make them `!Send`) and are discarded when the pass
//! completes or fails.

use crate::error::{CodecError, CodecResult};
use crate::refs::{DecodeReferences, EncodeReferences};
use crate::registry::CodecRegistry;
use crate::value::SharedValue;
use crate::wire::{field, FieldHeader, ReadCursor, WriteCursor};

/// State for one encode pass.
pub struct EncodeSession<'r> {
    cursor: WriteCursor,
    refs: EncodeReferences,
    registry: &'r CodecRegistry,
}

impl<'r> EncodeSession<'r> {
    #[must_use]
    pub fn new(registry: &'r CodecRegistry) -> Self {
        Self {
            cursor: WriteCursor::new(),
            refs: EncodeReferences::new(),
            registry,
        }
    }

    pub fn registry(&self) -> &'r CodecRegistry {
        self.registry
    }

    pub fn cursor(&self) -> &WriteCursor {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut WriteCursor {
        &mut self.cursor
    }

    /// Reference/null-marker writer.
    ///
    /// Writes a complete `Null` field for a null value, or a complete
    /// `Reference` field for a value already recorded this pass, and returns
    /// `true`: the caller must skip the payload. For a first sighting the
    /// value is recorded under a fresh id, nothing is written, and `false`
    /// is returned: the caller must write the full payload (header, type
    /// token, body).
    pub fn try_write_reference(
        &mut self,
        field_id_delta: u32,
        value: Option<&SharedValue>,
    ) -> bool {
        let Some(value) = value else {
            field::write_null_field(&mut self.cursor, field_id_delta);
            return true;
        };
        if let Some(id) = self.refs.lookup(value) {
            field::write_reference_field(&mut self.cursor, field_id_delta, id);
            return true;
        }
        self.refs.record(value);
        false
    }

    /// Number of values recorded in the reference table so far.
    pub fn recorded(&self) -> usize {
        self.refs.len()
    }

    /// Consume the session, yielding the encoded bytes.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.cursor.into_bytes()
    }
}

/// State for one decode pass over a borrowed byte buffer.
pub struct DecodeSession<'r, 'b> {
    cursor: ReadCursor<'b>,
    refs: DecodeReferences,
    registry: &'r CodecRegistry,
}

impl<'r, 'b> DecodeSession<'r, 'b> {
    #[must_use]
    pub fn new(registry: &'r CodecRegistry, bytes: &'b [u8]) -> Self {
        Self {
            cursor: ReadCursor::new(bytes),
            refs: DecodeReferences::new(),
            registry,
        }
    }

    pub fn registry(&self) -> &'r CodecRegistry {
        self.registry
    }

    pub fn cursor(&self) -> &ReadCursor<'b> {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut ReadCursor<'b> {
        &mut self.cursor
    }

    /// Read the next field header from the stream.
    pub fn read_header(&mut self) -> CodecResult<FieldHeader> {
        FieldHeader::read(&mut self.cursor).map_err(CodecError::from)
    }

    /// Resolve a `Reference`-tagged field to the previously decoded value,
    /// identity preserved.
    pub fn read_reference(&mut self, field: &FieldHeader) -> CodecResult<SharedValue> {
        let id = field.reference_id.unwrap_or(0);
        self.refs
            .lookup(id)
            .ok_or(CodecError::DanglingReference { id })
    }

    /// Reserve the reference id for a value whose body is about to be
    /// decoded. Mirrors the encode side's first-sighting order.
    pub fn reserve_reference(&mut self) -> u32 {
        self.refs.reserve()
    }

    /// Fill a reserved reference slot with the decoded value.
    pub fn fill_reference(&mut self, id: u32, value: &SharedValue) {
        self.refs.fill(id, value);
    }
}
