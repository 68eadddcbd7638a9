// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ogw developers

//! Codec registry: runtime type -> codec, frozen after build.
//!
//! The registry is populated once through [`CodecRegistryBuilder`] and
//! immutable afterwards (init-then-freeze). Lookups are side-effect free and
//! stable, so a frozen registry can be shared across threads and sessions
//! without synchronization.
//!
//! Besides the codec maps, the registry carries the upcast table that
//! records which abstract field types each concrete type is assignable to;
//! a missing upcast is how a decode pass detects a type mismatch.

use crate::codec::{ConcreteCodec, ValueCodec};
use crate::error::CodecResult;
use crate::session::{DecodeSession, EncodeSession};
use crate::value::{AbstractClass, GraphValue, SharedValue};
use crate::wire::FieldHeader;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

/// Type-erased registry entry: the uniform write/read capability every
/// registered concrete codec exposes. [`ConcreteCodec`] adapts a
/// [`ValueCodec`] into this shape.
pub trait ErasedFieldCodec: Send + Sync {
    /// Runtime type this codec encodes and decodes.
    fn concrete_type(&self) -> TypeId;

    /// Stream type token this codec is registered under.
    fn token(&self) -> &'static str;

    /// Encode one field holding a non-null value of this codec's type,
    /// consulting the reference table before writing a full payload.
    fn write_field(
        &self,
        session: &mut EncodeSession<'_>,
        field_id_delta: u32,
        value: &SharedValue,
    ) -> CodecResult<()>;

    /// Decode the body of a `ConcreteValue` field and record the result in
    /// the reference table.
    fn read_value(
        &self,
        session: &mut DecodeSession<'_, '_>,
        field: &FieldHeader,
    ) -> CodecResult<SharedValue>;
}

type Caster = Box<dyn Fn(&SharedValue) -> Option<Box<dyn Any>> + Send + Sync>;

/// Frozen mapping from runtime type identity to codec.
pub struct CodecRegistry {
    by_type: HashMap<TypeId, Arc<dyn ErasedFieldCodec>>,
    by_token: HashMap<&'static str, Arc<dyn ErasedFieldCodec>>,
    upcasts: HashMap<(TypeId, TypeId), Caster>,
}

impl CodecRegistry {
    #[must_use]
    pub fn builder() -> CodecRegistryBuilder {
        CodecRegistryBuilder::default()
    }

    /// Codec registered for a runtime type (encode-side lookup).
    pub fn get(&self, concrete_type: TypeId) -> Option<&Arc<dyn ErasedFieldCodec>> {
        self.by_type.get(&concrete_type)
    }

    /// Codec registered under a stream type token (decode-side lookup).
    pub fn get_by_token(&self, token: &str) -> Option<&Arc<dyn ErasedFieldCodec>> {
        self.by_token.get(token)
    }

    /// Narrow an erased value to the handle of abstract type `A`.
    ///
    /// Returns `None` when no upcast was registered for the value's concrete
    /// type, i.e. the value is not assignable to `A`.
    pub fn narrow<A: AbstractClass>(&self, value: &SharedValue) -> Option<A::Handle> {
        let key = (value.as_any().type_id(), TypeId::of::<A>());
        let caster = self.upcasts.get(&key)?;
        let handle = caster(value)?;
        handle.downcast::<A::Handle>().ok().map(|boxed| *boxed)
    }

    /// Number of registered codecs.
    pub fn len(&self) -> usize {
        self.by_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_token.is_empty()
    }
}

/// Builder for [`CodecRegistry`]; consumed by [`build`](Self::build).
#[derive(Default)]
pub struct CodecRegistryBuilder {
    by_type: HashMap<TypeId, Arc<dyn ErasedFieldCodec>>,
    by_token: HashMap<&'static str, Arc<dyn ErasedFieldCodec>>,
    upcasts: HashMap<(TypeId, TypeId), Caster>,
}

impl CodecRegistryBuilder {
    /// Register a concrete codec under its value type and token.
    ///
    /// Registering a second codec for the same type or token replaces the
    /// earlier entry; that is a programming error and is logged loudly.
    #[must_use]
    pub fn register<C: ValueCodec>(mut self, codec: C) -> Self {
        let entry: Arc<dyn ErasedFieldCodec> = Arc::new(ConcreteCodec::new(codec));
        if self
            .by_type
            .insert(entry.concrete_type(), entry.clone())
            .is_some()
        {
            log::warn!(
                "[Registry] replacing codec registered for the value type of token {:?}",
                entry.token()
            );
        }
        if self.by_token.insert(entry.token(), entry.clone()).is_some() {
            log::warn!(
                "[Registry] replacing codec registered under token {:?}",
                entry.token()
            );
        }
        self
    }

    /// Declare that concrete type `R` is assignable to abstract type `A`,
    /// with `cast` producing the abstract handle from a shared `R`.
    #[must_use]
    pub fn implements<A, R>(mut self, cast: fn(Rc<R>) -> A::Handle) -> Self
    where
        A: AbstractClass,
        R: GraphValue,
    {
        let caster: Caster = Box::new(move |value: &SharedValue| {
            let concrete = value.clone().into_any().downcast::<R>().ok()?;
            Some(Box::new(cast(concrete)) as Box<dyn Any>)
        });
        self.upcasts
            .insert((TypeId::of::<R>(), TypeId::of::<A>()), caster);
        self
    }

    /// Freeze the registry.
    #[must_use]
    pub fn build(self) -> CodecRegistry {
        log::debug!(
            "[Registry] frozen with {} codecs, {} upcasts",
            self.by_token.len(),
            self.upcasts.len()
        );
        CodecRegistry {
            by_type: self.by_type,
            by_token: self.by_token,
            upcasts: self.upcasts,
        }
    }
}
