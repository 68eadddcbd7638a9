// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ogw developers

//! Per-pass reference tables.
//!
//! Both tables key values by encounter order: the encode side assigns an id
//! the moment a value is first sighted (before its payload is written), the
//! decode side reserves the matching id when the `ConcreteValue` header is
//! encountered and fills the slot once the body has been decoded. This keeps
//! the two passes' id sequences identical even for nested referenceable
//! values, and makes every reference resolvable strictly backward.
//!
//! Identity is strict address identity of the `Rc` allocation, never
//! structural equality (see `value::identity_key`).

use crate::value::{identity_key, SharedValue};
use std::collections::HashMap;

/// Ids start at 1; id 0 never resolves.
const FIRST_REFERENCE_ID: u32 = 1;

/// Encode-side table: object identity -> reference id.
#[derive(Default)]
pub struct EncodeReferences {
    ids: HashMap<usize, u32>,
    // Pinned clones keep every recorded allocation alive for the pass, so an
    // address cannot be recycled and collide with a later first sighting.
    pinned: Vec<SharedValue>,
}

impl EncodeReferences {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of a previously recorded value, if any.
    pub fn lookup(&self, value: &SharedValue) -> Option<u32> {
        self.ids.get(&identity_key(value)).copied()
    }

    /// Record a first sighting under a freshly allocated id.
    pub fn record(&mut self, value: &SharedValue) -> u32 {
        let id = FIRST_REFERENCE_ID + self.pinned.len() as u32;
        self.ids.insert(identity_key(value), id);
        self.pinned.push(value.clone());
        id
    }

    pub fn len(&self) -> usize {
        self.pinned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pinned.is_empty()
    }
}

/// Decode-side table: reference id -> decoded value.
///
/// Slots are reserved in encounter order and filled after the value's body
/// has been decoded; a reserved-but-unfilled slot is indistinguishable from
/// an unknown id on lookup, which rejects forward references.
#[derive(Default)]
pub struct DecodeReferences {
    values: Vec<Option<SharedValue>>,
}

impl DecodeReferences {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next id for a value whose body is about to be decoded.
    pub fn reserve(&mut self) -> u32 {
        self.values.push(None);
        FIRST_REFERENCE_ID + (self.values.len() as u32 - 1)
    }

    /// Fill a reserved slot with the decoded value.
    pub fn fill(&mut self, id: u32, value: &SharedValue) {
        let index = (id - FIRST_REFERENCE_ID) as usize;
        if let Some(slot) = self.values.get_mut(index) {
            *slot = Some(value.clone());
        }
    }

    /// Previously decoded value for `id`, identity preserved.
    pub fn lookup(&self, id: u32) -> Option<SharedValue> {
        if id < FIRST_REFERENCE_ID {
            return None;
        }
        let index = (id - FIRST_REFERENCE_ID) as usize;
        self.values.get(index)?.clone()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    struct Payload(u32);
    crate::impl_graph_value!(Payload);

    #[test]
    fn test_encode_first_sighting_then_repeat() {
        let mut refs = EncodeReferences::new();
        let value: SharedValue = Rc::new(Payload(1));

        assert_eq!(refs.lookup(&value), None);
        assert_eq!(refs.record(&value), 1);
        assert_eq!(refs.lookup(&value), Some(1));
        assert_eq!(refs.len(), 1);
    }

    #[test]
    fn test_encode_structural_equality_is_not_identity() {
        let mut refs = EncodeReferences::new();
        let a: SharedValue = Rc::new(Payload(42));
        let b: SharedValue = Rc::new(Payload(42));

        assert_eq!(refs.record(&a), 1);
        assert_eq!(refs.record(&b), 2);
        assert_eq!(refs.lookup(&a), Some(1));
        assert_eq!(refs.lookup(&b), Some(2));
    }

    #[test]
    fn test_decode_reserve_fill_lookup() {
        let mut refs = DecodeReferences::new();
        let id = refs.reserve();
        assert_eq!(id, 1);

        // Reserved but unfilled: forward references never resolve.
        assert!(refs.lookup(id).is_none());

        let value: SharedValue = Rc::new(Payload(9));
        refs.fill(id, &value);
        let resolved = refs.lookup(id).expect("filled slot resolves");
        assert_eq!(identity_key(&resolved), identity_key(&value));
    }

    #[test]
    fn test_decode_unknown_ids_do_not_resolve() {
        let refs = DecodeReferences::new();
        assert!(refs.lookup(0).is_none());
        assert!(refs.lookup(1).is_none());
        assert!(refs.lookup(99).is_none());
    }

    #[test]
    fn test_decode_sequential_ids() {
        let mut refs = DecodeReferences::new();
        assert_eq!(refs.reserve(), 1);
        assert_eq!(refs.reserve(), 2);
        assert_eq!(refs.reserve(), 3);
        assert_eq!(refs.len(), 3);
    }
}
