// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Stateful cursor with summary-skipping seeks.
//!
//! A cursor remembers its last position and reaches the next one in two
//! moves: *ascend* while the current subtree provably cannot contain the
//! answer (its cached `upper` is left of the probe, or the probe is left of
//! its `lower`), then *descend*, at each internal node consulting the target
//! child's `upper` to decide between entering the child and answering with
//! the separator directly. Monotonically increasing probes therefore cost
//! O(log n) amortised instead of a root restart per seek.
//!
//! The cursor borrows its tree, so the borrow checker enforces the
//! invalidation rule: no tree mutation can happen while a cursor is alive.

use super::tree::Tree;
use super::types::NodeId;
use crate::key::{find_gt, find_gte, Element, Key};

/// Cursor over one tree: a `(node, index)` position plus seek operations.
///
/// Returned keys alias the tree's internal buffers; treat them as read-only
/// and clone what must outlive the next operation.
#[derive(Debug)]
pub struct Cursor<'t, V> {
    tree: &'t Tree<V>,
    node: NodeId,
    ix: usize,
}

impl<'t, V> Cursor<'t, V> {
    /// Cursor positioned at the tree root.
    pub fn new(tree: &'t Tree<V>) -> Self {
        Self {
            tree,
            node: tree.root_id(),
            ix: 0,
        }
    }

    /// Key arity of the underlying tree.
    pub fn key_len(&self) -> usize {
        self.tree.key_len()
    }

    /// Move back to the tree root.
    pub fn reset(&mut self) {
        self.node = self.tree.root_id();
        self.ix = 0;
    }

    /// Smallest stored key `>= probe`, or `None` past the end.
    pub fn seek_gte(&mut self, probe: &[Element]) -> Option<&'t Key> {
        self.seek(probe, false)
    }

    /// Smallest stored key `> probe`, or `None` past the end.
    pub fn seek_gt(&mut self, probe: &[Element]) -> Option<&'t Key> {
        self.seek(probe, true)
    }

    fn seek(&mut self, probe: &[Element], strict: bool) -> Option<&'t Key> {
        assert_eq!(
            probe.len(),
            self.tree.key_len(),
            "probe arity does not match tree arity"
        );
        let tree = self.tree;
        let root = tree.root_id();

        // Ascend while the answer cannot be under the current node.
        while self.node != root {
            let node = tree.node(self.node);
            let past_upper = if strict {
                node.upper.as_slice() <= probe
            } else {
                node.upper.as_slice() < probe
            };
            if past_upper || probe < node.lower.as_slice() {
                self.node = node.parent.expect("non-root node without parent");
                self.ix = 0;
            } else {
                break;
            }
        }

        // Descend. At an internal node the separator at `ix` is the answer
        // exactly when the child left of it has nothing at or past the
        // probe; otherwise the answer lies inside that child.
        loop {
            let node = tree.node(self.node);
            self.ix = if strict {
                find_gt(&node.keys, probe)
            } else {
                find_gte(&node.keys, probe)
            };
            match &node.children {
                None => {
                    return if self.ix < node.keys.len() {
                        Some(&node.keys[self.ix])
                    } else {
                        None
                    };
                }
                Some(children) => {
                    let child = children[self.ix];
                    let child_upper = tree.node(child).upper.as_slice();
                    let child_has_answer = if strict {
                        child_upper > probe
                    } else {
                        child_upper >= probe
                    };
                    if child_has_answer {
                        self.node = child;
                    } else if self.ix < node.keys.len() {
                        return Some(&node.keys[self.ix]);
                    } else {
                        return None;
                    }
                }
            }
        }
    }
}
