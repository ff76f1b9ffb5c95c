// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! LeapBase: in-memory ordered index engine with a leapfrog constraint solver.
//!
//! The engine has three layers, leaves first:
//!
//! - [`tree::Tree`]: a mutable B-tree mapping fixed-arity composite keys
//!   ([`key::Key`]) to opaque values, with lazily maintained `lower`/`upper`
//!   subtree summaries.
//! - [`tree::Cursor`]: a stateful cursor over one tree whose `seek_gte` /
//!   `seek_gt` ascend through the cached summaries before descending, so
//!   monotone seek sequences skip whole subtrees.
//! - [`solver::Solver`]: composes several cursors (wrapped in
//!   [`solver::Constraint`]) under variable-binding maps and enumerates every
//!   assignment that satisfies all constraints simultaneously, a multi-way,
//!   worst-case-optimal join primitive.
//!
//! Everything is in-memory and single-threaded. There is no persistence, no
//! wire protocol and no background work; callers bound solver work by capping
//! the number of `next` calls.
//!
//! ## Example Usage
//!
//! ```rust
//! use leapbase::{Branching, Constraint, Cursor, Element, Solver, Tree};
//!
//! let mut edges = Tree::new(Branching::new(8)?, 2);
//! edges.insert(vec![Element::from("a"), Element::from("b")], ());
//! edges.insert(vec![Element::from("b"), Element::from("c")], ());
//!
//! // All (x, y) with an edge x -> y, in key order.
//! let pairs = Solver::new(
//!     2,
//!     vec![Constraint::new(Cursor::new(&edges))],
//!     vec![vec![0, 1]],
//! );
//! for row in pairs {
//!     println!("{:?}", row);
//! }
//! # Ok::<(), leapbase::LeapError>(())
//! ```

pub mod error;
pub mod key;
pub mod solver;
pub mod tree;

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

// Re-exports
pub use error::{LeapError, LeapResult};
pub use key::{Element, Key};
pub use solver::{Constraint, Solver};
pub use tree::{Branching, Cursor, Tree};

/// LeapBase version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
