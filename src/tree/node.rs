// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! B-tree node structure and local entry primitives.
//!
//! One `Node` type covers both leaves and internal nodes: the `children`
//! vector is present iff the node is internal. Keys and values are parallel
//! vectors; an internal node additionally keeps `keys.len() + 1` child
//! handles. Every node caches `lower` and `upper`, the minimum and maximum
//! key of its entire subtree, which the cursor exploits to skip subtrees
//! during seeks.
//!
//! ## Invariants (between operations)
//!
//! - Keys are strictly sorted; no duplicates.
//! - Internal node: `children.len() == keys.len() + 1`, and for children
//!   c₀…cₙ with keys k₀…kₙ₋₁: `cᵢ.upper < kᵢ < cᵢ₊₁.lower`.
//! - `lower`/`upper` equal the first child's lower / last child's upper
//!   (internal) or the first/last key (leaf).
//! - Non-root nodes hold between `min_keys` and `max_keys` keys.
//! - `parent_ix` is the node's position in its parent's `children`.
//!
//! Violations indicate an engine bug and are fatal; the balance machinery in
//! `maintain` restores all invariants before returning to the caller.

use super::types::{ChildSide, NodeId};
use crate::key::{greatest_key, least_key, Key};

/// One B-tree node, resident in the tree's arena.
#[derive(Debug, Clone)]
pub(crate) struct Node<V> {
    /// Parent handle; `None` for the root.
    pub parent: Option<NodeId>,

    /// Position of this node in its parent's `children`.
    pub parent_ix: usize,

    /// Sorted keys.
    pub keys: Vec<Key>,

    /// Values, parallel to `keys`.
    pub vals: Vec<V>,

    /// Child handles; present iff the node is internal.
    pub children: Option<Vec<NodeId>>,

    /// Cached minimum key of the whole subtree.
    pub lower: Key,

    /// Cached maximum key of the whole subtree.
    pub upper: Key,
}

/// Entry moved between nodes by splits and rotations: a key, its value and
/// at most one child handle (always `None` for leaves).
pub(crate) type Entry<V> = (Key, V, Option<NodeId>);

impl<V> Node<V> {
    /// Fresh empty leaf with the empty-range summary.
    ///
    /// `lower > upper` encodes "no keys"; only an empty root ever keeps this
    /// state between operations, and cursors never consult root summaries.
    pub fn leaf(key_len: usize) -> Self {
        Self {
            parent: None,
            parent_ix: 0,
            keys: Vec::new(),
            vals: Vec::new(),
            children: None,
            lower: greatest_key(key_len),
            upper: least_key(key_len),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Insertion primitive used by splits and rotations.
    ///
    /// Inserts the entry's key and value at `ix`; an internal node also
    /// receives the entry's child at `ix + side`. Counterpart of `pop`.
    pub fn push(&mut self, ix: usize, entry: Entry<V>, side: ChildSide) {
        let (key, val, child) = entry;
        self.keys.insert(ix, key);
        self.vals.insert(ix, val);
        if let Some(children) = &mut self.children {
            let child = child.expect("internal node entry without child");
            children.insert(ix + side as usize, child);
        }
    }

    /// Removal primitive used by rotations and merges; inverse of `push`.
    pub fn pop(&mut self, ix: usize, side: ChildSide) -> Entry<V> {
        let key = self.keys.remove(ix);
        let val = self.vals.remove(ix);
        let child = self
            .children
            .as_mut()
            .map(|children| children.remove(ix + side as usize));
        (key, val, child)
    }
}
