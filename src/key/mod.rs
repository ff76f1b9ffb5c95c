// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Composite keys and their total order.
//!
//! A key is a fixed-length vector of scalar [`Element`]s. Every tree fixes
//! the key arity at construction; all keys flowing through that tree (and
//! every probe handed to its cursors) must share it.
//!
//! The element order is total across kinds: `Least` sorts below everything,
//! then booleans, numbers, strings, and `Greatest` above everything. Within
//! a kind the natural order applies (numbers via `f64::total_cmp`, so the
//! order stays total in the presence of NaN and signed zero). Key comparison
//! is lexicographic over elements, which Rust's slice ordering provides once
//! `Element` is `Ord`.

mod search;
mod types;

#[cfg(test)]
mod key_test;

// Re-export public API
pub use search::{find_gt, find_gte, prefix_not_equal};
pub use types::{greatest_key, least_key, Element, Key};
