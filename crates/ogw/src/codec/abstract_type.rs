// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ogw developers

//! Field codec for abstract-typed fields.
//!
//! Used whenever a field's declared static type is a trait object: the
//! concrete type is only known at runtime, so encoding resolves the codec
//! through the registry by the value's runtime type, and decoding resolves
//! it by the type token carried in the stream.

use crate::error::{CodecError, CodecResult};
use crate::registry::CodecRegistry;
use crate::session::{DecodeSession, EncodeSession};
use crate::value::{AbstractClass, SharedValue};
use crate::wire::{FieldHeader, WireTag};
use std::marker::PhantomData;

use super::FieldCodec;

/// Field codec for fields declared with abstract type `A`.
///
/// Stateless; one instance can serve any number of fields and sessions.
pub struct AbstractTypeCodec<A: AbstractClass> {
    _class: PhantomData<A>,
}

impl<A: AbstractClass> AbstractTypeCodec<A> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _class: PhantomData,
        }
    }
}

impl<A: AbstractClass> Default for AbstractTypeCodec<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: AbstractClass> FieldCodec for AbstractTypeCodec<A> {
    type Value = Option<A::Handle>;

    fn write_field(
        &self,
        session: &mut EncodeSession<'_>,
        field_id_delta: u32,
        value: &Self::Value,
    ) -> CodecResult<()> {
        // A null value has no runtime type to resolve a codec from: write
        // the null marker and exit without any registry lookup.
        let Some(handle) = value else {
            session.try_write_reference(field_id_delta, None);
            return Ok(());
        };

        let erased = A::erase(handle);
        let runtime_type = erased.as_any().type_id();
        let Some(codec) = session.registry().get(runtime_type) else {
            log::debug!(
                "[AbstractCodec] no codec for runtime type {} (field declared as {})",
                erased.type_name(),
                A::NAME
            );
            return Err(CodecError::CodecNotFound {
                type_name: erased.type_name().to_string(),
            });
        };
        codec.write_field(session, field_id_delta, &erased)
    }

    fn read_value(
        &self,
        session: &mut DecodeSession<'_, '_>,
        field: &FieldHeader,
    ) -> CodecResult<Self::Value> {
        match field.tag {
            WireTag::Null => Ok(None),
            WireTag::Reference => {
                let value = session.read_reference(field)?;
                Ok(Some(narrow::<A>(session.registry(), &value)?))
            }
            WireTag::ConcreteValue => {
                let Some(token) = field.type_token.as_deref() else {
                    return Err(CodecError::FieldTypeMissing { expected: A::NAME });
                };
                let Some(codec) = session.registry().get_by_token(token) else {
                    return Err(CodecError::CodecNotFound {
                        type_name: token.to_string(),
                    });
                };
                let value = codec.read_value(session, field)?;
                Ok(Some(narrow::<A>(session.registry(), &value)?))
            }
        }
    }
}

/// Narrow an erased decoded value to `A`'s handle, or fail with a
/// type-mismatch: a runtime type not assignable to the declared abstract
/// type is a stream-integrity violation.
fn narrow<A: AbstractClass>(
    registry: &CodecRegistry,
    value: &SharedValue,
) -> CodecResult<A::Handle> {
    registry
        .narrow::<A>(value)
        .ok_or_else(|| CodecError::TypeMismatch {
            expected: A::NAME,
            actual: value.type_name().to_string(),
        })
}
