// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! In-memory B-tree index engine.
//!
//! A mutable B-tree over fixed-arity composite keys with cached subtree
//! summaries, plus a stateful cursor whose seeks exploit those summaries to
//! skip whole subtrees.
//!
//! ## Structure
//!
//! - **Arena**: every node lives in the tree's `Vec` arena and is addressed
//!   by a [`NodeId`]; parent/child references are handles, never owning
//!   pointers. Freed nodes return to a free list on merge and root collapse.
//! - **Summaries**: each node caches `lower`/`upper`, the min/max key of its
//!   whole subtree, maintained lazily on the path that changed them.
//! - **Balance**: nodes hold between `min_keys` and `2 * min_keys` keys
//!   (root excepted), restored after every mutation by split, rotation
//!   toward the fuller side, or merge.
//!
//! ## Performance
//!
//! - Insert/remove: O(log n) plus amortised O(1) balance work
//! - Monotone cursor seek sequence: O(log n) amortised per seek

mod cursor;
mod maintain;
mod node;
mod tree;
mod types;

#[cfg(test)]
mod tree_test;

// Re-export public API
pub use cursor::Cursor;
pub use tree::{Iter, Tree};
pub use types::{Branching, NodeId};
