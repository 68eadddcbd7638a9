// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ogw developers

//! Field codecs.
//!
//! [`FieldCodec`] is the uniform capability every field codec implements,
//! including [`AbstractTypeCodec`], so container codecs can embed an
//! abstract-typed member like any other field.

mod abstract_type;
mod concrete;

pub use abstract_type::AbstractTypeCodec;
pub use concrete::{ConcreteCodec, ValueCodec};

use crate::error::CodecResult;
use crate::session::{DecodeSession, EncodeSession};
use crate::wire::FieldHeader;

/// Uniform field codec capability: write one field, read one value.
///
/// `write_field` emits the complete field (header plus payload or marker);
/// `read_value` consumes everything after the already-read header. Both
/// advance the session cursor monotonically.
pub trait FieldCodec {
    type Value;

    fn write_field(
        &self,
        session: &mut EncodeSession<'_>,
        field_id_delta: u32,
        value: &Self::Value,
    ) -> CodecResult<()>;

    fn read_value(
        &self,
        session: &mut DecodeSession<'_, '_>,
        field: &FieldHeader,
    ) -> CodecResult<Self::Value>;
}
