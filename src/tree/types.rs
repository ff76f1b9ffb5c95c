// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Core types for the in-memory B-tree.
//!
//! Defines the arena handle type, the validated branching configuration and
//! the child-attachment side used by the node entry primitives.

use crate::error::{LeapError, LeapResult};
use serde::{Deserialize, Serialize};

/// Node identifier: an index into the tree's node arena.
///
/// Nodes reference each other (parent and children) through these handles
/// instead of owning pointers, so the parent/child cycle never turns into a
/// shared-ownership cycle. 32-bit ids allow ~4 billion nodes per tree.
pub type NodeId = u32;

/// B-tree branching configuration.
///
/// Holds the minimum number of keys per non-root node; the maximum is always
/// twice that, so a split of an overfull node yields two exactly-half-full
/// halves and a merge of two minimal siblings plus their separator exactly
/// fills one node.
///
/// ## Constraints
/// - Minimum branching: 1 (two keys per full node)
///
/// ## Example
/// ```rust
/// use leapbase::tree::Branching;
///
/// let branching = Branching::new(8)?;
/// assert_eq!(branching.min_keys(), 8);
/// assert_eq!(branching.max_keys(), 16);
/// # Ok::<(), leapbase::LeapError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branching(usize);

impl Branching {
    /// Create new branching configuration with validation.
    ///
    /// ## Input
    /// - `min_keys`: Minimum keys per non-root node (must be >= 1)
    ///
    /// ## Output
    /// - `Ok(Branching)`: Valid configuration
    /// - `Err(LeapError::InvalidBranching)`: `min_keys` was zero
    pub fn new(min_keys: usize) -> LeapResult<Self> {
        if min_keys == 0 {
            return Err(LeapError::InvalidBranching { min_keys });
        }
        Ok(Self(min_keys))
    }

    /// Minimum keys per non-root node.
    pub fn min_keys(&self) -> usize {
        self.0
    }

    /// Maximum keys per node (`2 * min_keys`).
    pub fn max_keys(&self) -> usize {
        self.0 * 2
    }
}

/// Side of a separator at which a child is attached.
///
/// The node entry primitives (`push`/`pop`) move a key, a value and one
/// child as a unit; the side selects whether that child sits left or right
/// of the separator slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildSide {
    Left = 0,
    Right = 1,
}
