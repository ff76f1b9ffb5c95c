// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Scalar key elements and sentinel-filled bound keys.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Scalar element of a composite key.
///
/// A tagged union of the three primitive kinds plus two sentinels used only
/// as bounds. The sentinels are distinguished variants rather than in-band
/// values, so no boolean, number or string can collide with them.
///
/// ## Ordering
/// - `Least` < `Bool(_)` < `Num(_)` < `Str(_)` < `Greatest`
/// - Within a kind: natural order; numbers use `f64::total_cmp`
/// - `Least == Least` and `Greatest == Greatest`
///
/// ## Example
/// ```rust
/// use leapbase::key::Element;
///
/// assert!(Element::Least < Element::from(false));
/// assert!(Element::from(true) < Element::from(0.0));
/// assert!(Element::from(9000.0) < Element::from(""));
/// assert!(Element::from("zzz") < Element::Greatest);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Element {
    /// Lower bound sentinel; sorts below every stored element.
    Least,

    /// Boolean element.
    Bool(bool),

    /// Numeric element (IEEE 754 double).
    Num(f64),

    /// String element.
    Str(String),

    /// Upper bound sentinel; sorts above every stored element.
    Greatest,
}

impl Element {
    /// Rank of the element's kind in the cross-kind order.
    fn kind_rank(&self) -> u8 {
        match self {
            Self::Least => 0,
            Self::Bool(_) => 1,
            Self::Num(_) => 2,
            Self::Str(_) => 3,
            Self::Greatest => 4,
        }
    }
}

impl Ord for Element {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Num(a), Self::Num(b)) => a.total_cmp(b),
            (Self::Str(a), Self::Str(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

impl PartialOrd for Element {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Element {}

impl From<bool> for Element {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Element {
    fn from(value: f64) -> Self {
        Self::Num(value)
    }
}

impl From<i32> for Element {
    fn from(value: i32) -> Self {
        Self::Num(value as f64)
    }
}

impl From<i64> for Element {
    fn from(value: i64) -> Self {
        Self::Num(value as f64)
    }
}

impl From<&str> for Element {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Element {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// Composite key: a fixed-length vector of elements.
///
/// Arity is a tree-level parameter; key comparison is lexicographic over
/// element comparison (Rust's slice order).
pub type Key = Vec<Element>;

/// Key of the given arity filled with the `Least` sentinel.
///
/// Sorts at or below every key of the same arity.
pub fn least_key(len: usize) -> Key {
    vec![Element::Least; len]
}

/// Key of the given arity filled with the `Greatest` sentinel.
///
/// Sorts at or above every key of the same arity. Also doubles as the
/// "no further match" signal written into solver bound buffers.
pub fn greatest_key(len: usize) -> Key {
    vec![Element::Greatest; len]
}
