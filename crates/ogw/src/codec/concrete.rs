// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ogw developers

//! Adapter from a per-type body codec to a registry entry.
//!
//! [`ConcreteCodec`] wraps a user [`ValueCodec`] and takes over everything
//! that is uniform across concrete types: consulting the reference table
//! before writing a payload, emitting the type token, and recording decoded
//! values so later fields can reference them.

use crate::error::{CodecError, CodecResult};
use crate::registry::ErasedFieldCodec;
use crate::session::{DecodeSession, EncodeSession};
use crate::value::{GraphValue, SharedValue};
use crate::wire::{field, FieldHeader};
use std::any::TypeId;
use std::rc::Rc;

/// Per-type body codec contract.
///
/// Implementations own the body format of one concrete value type and are
/// registered under a stream type token. The body may itself contain nested
/// fields (including abstract-typed ones) written through the session.
pub trait ValueCodec: Send + Sync + 'static {
    /// Concrete value type this codec handles.
    type Value: GraphValue;

    /// Stream type token; must be unique within a registry and non-empty.
    const TOKEN: &'static str;

    fn encode_body(
        &self,
        session: &mut EncodeSession<'_>,
        value: &Self::Value,
    ) -> CodecResult<()>;

    fn decode_body(&self, session: &mut DecodeSession<'_, '_>) -> CodecResult<Self::Value>;
}

/// Registry entry wrapping a [`ValueCodec`].
pub struct ConcreteCodec<C> {
    inner: C,
}

impl<C: ValueCodec> ConcreteCodec<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: ValueCodec> ErasedFieldCodec for ConcreteCodec<C> {
    fn concrete_type(&self) -> TypeId {
        TypeId::of::<C::Value>()
    }

    fn token(&self) -> &'static str {
        C::TOKEN
    }

    fn write_field(
        &self,
        session: &mut EncodeSession<'_>,
        field_id_delta: u32,
        value: &SharedValue,
    ) -> CodecResult<()> {
        // Reference table first: repeat sightings emit only a marker.
        if session.try_write_reference(field_id_delta, Some(value)) {
            return Ok(());
        }
        field::write_value_header(session.cursor_mut(), field_id_delta, C::TOKEN);
        let concrete = value
            .as_any()
            .downcast_ref::<C::Value>()
            .ok_or_else(|| CodecError::TypeMismatch {
                expected: C::TOKEN,
                actual: value.type_name().to_string(),
            })?;
        self.inner.encode_body(session, concrete)
    }

    fn read_value(
        &self,
        session: &mut DecodeSession<'_, '_>,
        _field: &FieldHeader,
    ) -> CodecResult<SharedValue> {
        // Reserve the id before the body so nested referenceable values get
        // the same encounter order the encoder used.
        let id = session.reserve_reference();
        let value = self.inner.decode_body(session)?;
        let shared: SharedValue = Rc::new(value);
        session.fill_reference(id, &shared);
        Ok(shared)
    }
}
