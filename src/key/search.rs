// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Binary search over sorted key vectors.
//!
//! The tree keeps node keys strictly sorted, so both searches reduce to
//! `partition_point`. Probes are slices rather than owned keys; every caller
//! inside the engine seeks with a borrowed buffer.

use super::types::{Element, Key};

/// Index of the first key `> probe` in a sorted key vector.
///
/// ## Input
/// - `keys`: strictly sorted keys of one node
/// - `probe`: key to search past (same arity)
///
/// ## Output
/// - Insertion index; equals `keys.len()` when no key is greater
///
/// ## Performance
/// - O(log m) where m = number of keys
pub fn find_gt(keys: &[Key], probe: &[Element]) -> usize {
    debug_assert!(keys.iter().all(|k| k.len() == probe.len()));
    keys.partition_point(|k| k.as_slice() <= probe)
}

/// Index of the first key `>= probe` in a sorted key vector.
///
/// ## Input
/// - `keys`: strictly sorted keys of one node
/// - `probe`: key to search for (same arity)
///
/// ## Output
/// - Insertion index; equals `keys.len()` when every key is smaller
///
/// ## Performance
/// - O(log m) where m = number of keys
pub fn find_gte(keys: &[Key], probe: &[Element]) -> usize {
    debug_assert!(keys.iter().all(|k| k.len() == probe.len()));
    keys.partition_point(|k| k.as_slice() < probe)
}

/// Whether the first `k` elements of two keys differ anywhere.
///
/// Used by the solver to find the first unfixed position when widening
/// bound buffers.
pub fn prefix_not_equal(a: &[Element], b: &[Element], k: usize) -> bool {
    a[..k].iter().zip(&b[..k]).any(|(x, y)| x != y)
}
