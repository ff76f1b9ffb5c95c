// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Balance machinery: split, rotate, merge, and lazy summary propagation.
//!
//! `maintain` is the single entry point. Every local mutation (insert into a
//! leaf, entry removal, entry transfer) calls it on the touched node; it
//! re-links children, dispatches to the structural repair that applies, and
//! otherwise refreshes the cached `lower`/`upper` summaries, propagating an
//! edge change toward the root. Structural repairs call `maintain` again on
//! every node they touch, so invariants are restored bottom-up before the
//! original call returns.

use super::node::Node;
use super::tree::Tree;
use super::types::{ChildSide, NodeId};
use crate::key::{greatest_key, least_key, Key};

impl<V> Tree<V> {
    /// Restore node invariants after a local mutation.
    pub(crate) fn maintain(&mut self, id: NodeId) {
        let max_keys = self.branching.max_keys();
        let min_keys = self.branching.min_keys();

        // Re-link children: rotations and splits move them between nodes
        // and entry shifts change their positions.
        if let Some(children) = self.nodes[id as usize].children.clone() {
            for (i, &child) in children.iter().enumerate() {
                let child = &mut self.nodes[child as usize];
                child.parent = Some(id);
                child.parent_ix = i;
            }
        }

        let node = &self.nodes[id as usize];
        let len = node.keys.len();
        let is_root = node.parent.is_none();

        if len > max_keys {
            self.split(id);
        } else if !is_root && len < min_keys {
            self.rotate_left(id);
        } else if len == 0 {
            // Only the root may stay empty.
            if self.nodes[id as usize].is_leaf() {
                let key_len = self.key_len;
                let node = &mut self.nodes[id as usize];
                node.lower = greatest_key(key_len);
                node.upper = least_key(key_len);
            } else {
                self.collapse_root(id);
            }
        } else {
            self.refresh_summaries(id);
        }
    }

    /// Split an overfull node at the median; the median entry and the new
    /// right sibling move up into the parent. A root split installs a fresh
    /// root holding the median and both halves.
    fn split(&mut self, id: NodeId) {
        let key_len = self.key_len;

        let node = &mut self.nodes[id as usize];
        let median = node.keys.len() / 2;
        let mut right_keys = node.keys.split_off(median);
        let mut right_vals = node.vals.split_off(median);
        let median_key = right_keys.remove(0);
        let median_val = right_vals.remove(0);
        let right_children = node
            .children
            .as_mut()
            .map(|children| children.split_off(median + 1));
        let parent = node.parent;
        let parent_ix = node.parent_ix;

        let right_id = self.alloc(Node {
            parent,
            parent_ix: parent_ix + 1,
            keys: right_keys,
            vals: right_vals,
            children: right_children,
            lower: greatest_key(key_len),
            upper: least_key(key_len),
        });

        match parent {
            Some(p) => {
                self.nodes[p as usize].push(
                    parent_ix,
                    (median_key, median_val, Some(right_id)),
                    ChildSide::Right,
                );
                self.maintain(id);
                self.maintain(right_id);
                self.maintain(p);
            }
            None => {
                let root_id = self.alloc(Node {
                    parent: None,
                    parent_ix: 0,
                    keys: vec![median_key],
                    vals: vec![median_val],
                    children: Some(vec![id, right_id]),
                    lower: greatest_key(key_len),
                    upper: least_key(key_len),
                });
                self.root = root_id;
                self.nodes[id as usize].parent = Some(root_id);
                self.nodes[right_id as usize].parent = Some(root_id);
                self.maintain(id);
                self.maintain(right_id);
                self.maintain(root_id);
            }
        }
    }

    /// Borrow the left sibling's last entry through the parent separator.
    /// Falls back to `rotate_right` when there is no left sibling or it has
    /// no key to spare.
    fn rotate_left(&mut self, id: NodeId) {
        let min_keys = self.branching.min_keys();
        let node = &self.nodes[id as usize];
        let p = node.parent.expect("rotate on root");
        let ix = node.parent_ix;

        if ix > 0 {
            let left_id = self.nodes[p as usize].children.as_ref().unwrap()[ix - 1];
            let left_len = self.nodes[left_id as usize].keys.len();
            if left_len > min_keys {
                let entry = self.nodes[left_id as usize].pop(left_len - 1, ChildSide::Right);
                let (key, val, child) = entry;
                let parent = &mut self.nodes[p as usize];
                let sep_key = std::mem::replace(&mut parent.keys[ix - 1], key);
                let sep_val = std::mem::replace(&mut parent.vals[ix - 1], val);
                self.nodes[id as usize].push(0, (sep_key, sep_val, child), ChildSide::Left);
                self.maintain(left_id);
                self.maintain(id);
                return;
            }
        }
        self.rotate_right(id);
    }

    /// Borrow the right sibling's first entry through the parent separator.
    /// Falls back to `merge`.
    fn rotate_right(&mut self, id: NodeId) {
        let min_keys = self.branching.min_keys();
        let node = &self.nodes[id as usize];
        let p = node.parent.expect("rotate on root");
        let ix = node.parent_ix;

        let child_count = self.nodes[p as usize].children.as_ref().unwrap().len();
        if ix + 1 < child_count {
            let right_id = self.nodes[p as usize].children.as_ref().unwrap()[ix + 1];
            if self.nodes[right_id as usize].keys.len() > min_keys {
                let (key, val, child) = self.nodes[right_id as usize].pop(0, ChildSide::Left);
                let parent = &mut self.nodes[p as usize];
                let sep_key = std::mem::replace(&mut parent.keys[ix], key);
                let sep_val = std::mem::replace(&mut parent.vals[ix], val);
                let end = self.nodes[id as usize].keys.len();
                self.nodes[id as usize].push(end, (sep_key, sep_val, child), ChildSide::Right);
                self.maintain(right_id);
                self.maintain(id);
                return;
            }
        }
        self.merge(id);
    }

    /// Merge an underfull node with a sibling: the separator is pulled down
    /// into the left node of the pair, which then absorbs the right node
    /// wholesale. The right node is freed; the parent lost an entry and is
    /// re-maintained, cascading upward.
    fn merge(&mut self, id: NodeId) {
        let node = &self.nodes[id as usize];
        let p = node.parent.expect("merge on root");
        let ix = node.parent_ix;

        let siblings = self.nodes[p as usize].children.as_ref().unwrap();
        let (left_id, right_id, sep) = if ix > 0 {
            (siblings[ix - 1], id, ix - 1)
        } else {
            (id, siblings[ix + 1], ix)
        };

        let (sep_key, sep_val, popped) = self.nodes[p as usize].pop(sep, ChildSide::Right);
        debug_assert_eq!(popped, Some(right_id));

        let right = std::mem::replace(&mut self.nodes[right_id as usize], Node::leaf(0));
        let left = &mut self.nodes[left_id as usize];
        left.keys.push(sep_key);
        left.vals.push(sep_val);
        left.keys.extend(right.keys);
        left.vals.extend(right.vals);
        if let Some(children) = &mut left.children {
            children.extend(right.children.expect("sibling leaf/internal mismatch"));
        }
        self.release(right_id);

        self.maintain(left_id);
        self.maintain(p);
    }

    /// An internal root drained to zero keys hands the tree to its sole
    /// remaining child.
    fn collapse_root(&mut self, id: NodeId) {
        let children = self.nodes[id as usize].children.as_ref().unwrap();
        debug_assert_eq!(children.len(), 1);
        let child = children[0];
        self.nodes[child as usize].parent = None;
        self.nodes[child as usize].parent_ix = 0;
        self.root = child;
        self.release(id);
    }

    /// Recompute this node's summaries from its content and push a changed
    /// edge summary toward the root.
    fn refresh_summaries(&mut self, id: NodeId) {
        let node = &self.nodes[id as usize];
        let (new_lower, new_upper) = match &node.children {
            Some(children) => (
                self.nodes[children[0] as usize].lower.clone(),
                self.nodes[children[children.len() - 1] as usize].upper.clone(),
            ),
            None => (
                node.keys[0].clone(),
                node.keys[node.keys.len() - 1].clone(),
            ),
        };
        if self.nodes[id as usize].lower != new_lower {
            self.update_lower(id, &new_lower);
        }
        if self.nodes[id as usize].upper != new_upper {
            self.update_upper(id, &new_upper);
        }
    }

    /// Replace the cached lower summary; a leftmost child propagates the
    /// change into its parent. Propagation stops at the root.
    fn update_lower(&mut self, id: NodeId, new_lower: &Key) {
        let node = &mut self.nodes[id as usize];
        node.lower = new_lower.clone();
        let parent = node.parent;
        let parent_ix = node.parent_ix;
        if let Some(p) = parent {
            if parent_ix == 0 {
                self.update_lower(p, new_lower);
            }
        }
    }

    /// Replace the cached upper summary; a rightmost child propagates the
    /// change into its parent.
    fn update_upper(&mut self, id: NodeId, new_upper: &Key) {
        let node = &mut self.nodes[id as usize];
        node.upper = new_upper.clone();
        let parent = node.parent;
        let parent_ix = node.parent_ix;
        if let Some(p) = parent {
            let last = self.nodes[p as usize]
                .children
                .as_ref()
                .expect("parent is a leaf")
                .len()
                - 1;
            if parent_ix == last {
                self.update_upper(p, new_upper);
            }
        }
    }
}
