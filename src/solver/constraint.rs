// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! One constraint: a cursor plus the bound-tightening operations.
//!
//! A constraint sees the solver's variables only through a `(los, his)` pair
//! of buffers with one slot per key position; the solver shuttles global
//! bounds in and out around every call. All three operations mutate the
//! buffers in place:
//!
//! - `propagate` leapfrogs the cursor to the smallest stored key within the
//!   bounds and tightens `los` with what it finds.
//! - `split_left` pins the first unfixed position to its current low value.
//! - `split_right` advances `los` strictly past everything that shares the
//!   pinned prefix.
//!
//! A failed seek writes the all-`Greatest` sentinel key into `los`; the
//! solver's bound read-back recognises it and fails the branch without
//! emitting anything.

use crate::key::{greatest_key, least_key, Element, Key};
use crate::tree::Cursor;

/// Cursor wrapped for use by the solver.
#[derive(Debug)]
pub struct Constraint<'t, V> {
    cursor: Cursor<'t, V>,
    /// Scratch probe for `split_right`: pinned prefix, `Greatest` suffix.
    right_los: Key,
    /// Cached `greatest_key(key_len)`, the "no further match" signal.
    greatest: Key,
}

/// First position where the bounds have not met.
fn first_open(los: &[Element], his: &[Element]) -> Option<usize> {
    (0..los.len()).find(|&i| los[i] != his[i])
}

/// Copy the found key into `los`. Positions keep copying while found and
/// high meet; the first position still below its high is copied and then
/// copying stops, because later positions cannot be bounded globally while
/// an earlier one remains unfixed.
fn tighten_los(found: &[Element], los: &mut [Element], his: &[Element]) {
    for i in 0..los.len() {
        los[i] = found[i].clone();
        if found[i] != his[i] {
            break;
        }
    }
}

impl<'t, V> Constraint<'t, V> {
    pub fn new(cursor: Cursor<'t, V>) -> Self {
        let key_len = cursor.key_len();
        Self {
            cursor,
            right_los: least_key(key_len),
            greatest: greatest_key(key_len),
        }
    }

    /// Key arity of the wrapped cursor.
    pub fn key_len(&self) -> usize {
        self.cursor.key_len()
    }

    pub(crate) fn reset(&mut self) {
        self.cursor.reset();
    }

    /// Leapfrog to the smallest stored key `>= los` and tighten `los`.
    ///
    /// The suffix past the first unfixed position is widened to
    /// `[Least, Greatest]` first: a lexicographic index cannot bound later
    /// positions while an earlier one is open, and stale suffix bounds from
    /// a previous branch would otherwise skip matches.
    pub fn propagate(&mut self, los: &mut [Element], his: &mut [Element]) {
        if let Some(open) = first_open(los, his) {
            for i in open + 1..los.len() {
                los[i] = Element::Least;
                his[i] = Element::Greatest;
            }
        }
        match self.cursor.seek_gte(los) {
            Some(found) => tighten_los(found, los, his),
            None => los.clone_from_slice(&self.greatest),
        }
    }

    /// Pin the first unfixed position to its current low value. The left
    /// branch of a split explores assignments where that variable equals it.
    pub fn split_left(&mut self, los: &mut [Element], his: &mut [Element]) {
        let open = first_open(los, his).expect("split with every position fixed");
        his[open] = los[open].clone();
    }

    /// Advance `los` strictly past the pinned value at the first unfixed
    /// position. The right branch of a split explores assignments where
    /// that variable is strictly greater than the left branch's pin.
    pub fn split_right(&mut self, los: &mut [Element], his: &mut [Element]) {
        let open = first_open(los, his).expect("split with every position fixed");
        for i in 0..=open {
            self.right_los[i] = los[i].clone();
        }
        for i in open + 1..los.len() {
            self.right_los[i] = Element::Greatest;
        }
        match self.cursor.seek_gt(&self.right_los) {
            Some(found) => tighten_los(found, los, his),
            None => los.clone_from_slice(&self.greatest),
        }
    }
}
