// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ogw developers

//! Shared polymorphic value handles and abstract-type descriptions.
//!
//! Serializable values live behind `Rc` handles so the same instance can be
//! held by several fields of one graph. [`GraphValue`] is the capability
//! every such value type exposes: downcast access plus a diagnostic type
//! name. Use [`impl_graph_value!`](crate::impl_graph_value) to derive it.

use std::any::Any;
use std::rc::Rc;

/// Capability every serializable value type exposes.
///
/// Application value traits take this as a supertrait
/// (`trait Animal: GraphValue`) so their handles can be erased for encoding.
pub trait GraphValue: Any {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Rc<Self>) -> Rc<dyn Any>;
    /// Diagnostic name of the concrete type, used in error messages.
    fn type_name(&self) -> &'static str;
}

/// Type-erased shared handle to a serializable value.
pub type SharedValue = Rc<dyn GraphValue>;

/// Strict address identity of the shared allocation.
///
/// Two structurally equal but distinct instances produce distinct keys; the
/// same `Rc` allocation always produces the same key.
pub(crate) fn identity_key(value: &SharedValue) -> usize {
    Rc::as_ptr(value).cast::<()>() as usize
}

/// Static description of an abstract field type.
///
/// An implementation names the handle type fields of this abstract type hold
/// (e.g. `Rc<dyn Animal>`) and how to erase a handle for encoding. Narrowing
/// a decoded value back into the handle goes through the registry's upcast
/// table (see [`CodecRegistryBuilder::implements`]).
///
/// [`CodecRegistryBuilder::implements`]: crate::CodecRegistryBuilder::implements
pub trait AbstractClass: 'static {
    /// Handle type stored in fields declared with this abstract type.
    type Handle: Clone + 'static;

    /// Diagnostic name, used in error messages.
    const NAME: &'static str;

    /// Erase a handle for encoding, exposing identity and the concrete
    /// runtime type.
    fn erase(handle: &Self::Handle) -> SharedValue;
}

/// Implement [`GraphValue`] for one or more concrete value types.
///
/// # Example
///
/// ```rust
/// struct Dog {
///     name: String,
/// }
/// ogw::impl_graph_value!(Dog);
/// ```
#[macro_export]
macro_rules! impl_graph_value {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::GraphValue for $ty {
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
            fn into_any(self: ::std::rc::Rc<Self>) -> ::std::rc::Rc<dyn ::std::any::Any> {
                self
            }
            fn type_name(&self) -> &'static str {
                ::std::any::type_name::<$ty>()
            }
        }
    )+};
}
