// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ogw developers

//! # OGW - Object Graph Wire
//!
//! Binary object-graph serialization with runtime-polymorphic field support.
//!
//! Application code declares fields whose static type is abstract (a trait
//! object behind an `Rc` handle) while the actual value at runtime is some
//! concrete, registered type. OGW encodes and decodes such fields without
//! compile-time knowledge of the concrete type, handles null explicitly, and
//! never duplicates the payload of a value shared elsewhere in the same graph.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use ogw::{
//!     AbstractClass, AbstractTypeCodec, CodecRegistry, CodecResult, DecodeSession,
//!     EncodeSession, FieldCodec, SharedValue, ValueCodec,
//! };
//!
//! // Application trait whose values are polymorphic.
//! trait Animal: ogw::GraphValue {
//!     fn name(&self) -> &str;
//! }
//!
//! struct Dog {
//!     name: String,
//! }
//! ogw::impl_graph_value!(Dog);
//! impl Animal for Dog {
//!     fn name(&self) -> &str {
//!         &self.name
//!     }
//! }
//!
//! // Describes the declared static type of a field: `Rc<dyn Animal>`.
//! struct AnimalClass;
//! impl AbstractClass for AnimalClass {
//!     type Handle = Rc<dyn Animal>;
//!     const NAME: &'static str = "Animal";
//!     fn erase(handle: &Self::Handle) -> SharedValue {
//!         handle.clone()
//!     }
//! }
//!
//! // Concrete body codec for `Dog`, registered under the token "Dog".
//! struct DogCodec;
//! impl ValueCodec for DogCodec {
//!     type Value = Dog;
//!     const TOKEN: &'static str = "Dog";
//!     fn encode_body(&self, session: &mut EncodeSession<'_>, value: &Dog) -> CodecResult<()> {
//!         session.cursor_mut().write_str(&value.name);
//!         Ok(())
//!     }
//!     fn decode_body(&self, session: &mut DecodeSession<'_, '_>) -> CodecResult<Dog> {
//!         let name = session.cursor_mut().read_str()?;
//!         Ok(Dog { name })
//!     }
//! }
//!
//! // Build the registry once, then freeze it.
//! let registry = CodecRegistry::builder()
//!     .register(DogCodec)
//!     .implements::<AnimalClass, Dog>(|dog| dog)
//!     .build();
//!
//! let field: Option<Rc<dyn Animal>> = Some(Rc::new(Dog { name: "Rex".into() }));
//! let codec = AbstractTypeCodec::<AnimalClass>::new();
//!
//! let mut writer = EncodeSession::new(&registry);
//! codec.write_field(&mut writer, 3, &field)?;
//! let bytes = writer.finish();
//!
//! let mut reader = DecodeSession::new(&registry, &bytes);
//! let header = reader.read_header()?;
//! let decoded = codec.read_value(&mut reader, &header)?;
//! assert_eq!(decoded.expect("non-null").name(), "Rex");
//! # Ok::<(), ogw::CodecError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +--------------------------------------------------------------+
//! |                     Application Codecs                       |
//! |   ValueCodec impls | AbstractClass impls | container codecs  |
//! +--------------------------------------------------------------+
//! |                        Codec Layer                           |
//! |   AbstractTypeCodec | ConcreteCodec | FieldCodec capability  |
//! +--------------------------------------------------------------+
//! |                       Session Layer                          |
//! |   EncodeSession / DecodeSession | reference tables | registry|
//! +--------------------------------------------------------------+
//! |                        Wire Layer                            |
//! |   field headers | wire tags | ULEB128 varints | cursors      |
//! +--------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`AbstractTypeCodec`] | Field codec for abstract-typed fields |
//! | [`CodecRegistry`] | Frozen runtime-type-to-codec mapping |
//! | [`EncodeSession`] / [`DecodeSession`] | Per-pass state (cursor + reference table) |
//! | [`ValueCodec`] | Per-type body codec contract users implement |
//! | [`GraphValue`] | Capability every serializable value type exposes |
//!
//! ## Failure Model
//!
//! Every error is fatal for the current pass. There is no partial success and
//! no valid-prefix guarantee on a failed encode; callers discard the buffer.

pub mod codec;
pub mod refs;
pub mod registry;
pub mod session;
pub mod value;
pub mod wire;

mod error;

pub use codec::{AbstractTypeCodec, ConcreteCodec, FieldCodec, ValueCodec};
pub use error::{CodecError, CodecResult};
pub use registry::{CodecRegistry, CodecRegistryBuilder, ErasedFieldCodec};
pub use session::{DecodeSession, EncodeSession};
pub use value::{AbstractClass, GraphValue, SharedValue};
pub use wire::{FieldHeader, WireError, WireResult, WireTag};
