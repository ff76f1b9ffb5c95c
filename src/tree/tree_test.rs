// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Tests for the B-tree: reference-model equivalence, structural
//! invariants, and edge cases around balance operations.

#[cfg(test)]
mod tests {
    use crate::key::{Element, Key};
    use crate::tree::{Branching, NodeId, Tree};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::BTreeMap;

    fn num_key(n: i32) -> Key {
        vec![Element::from(n)]
    }

    fn small_tree(min_keys: usize, key_len: usize) -> Tree<u32> {
        Tree::new(Branching::new(min_keys).unwrap(), key_len)
    }

    // ============================================================================
    // Structural Invariant Auditor
    // ============================================================================

    /// Walk the whole tree and assert every structural invariant; returns
    /// nothing useful, panics on the first violation.
    fn check_invariants<V>(tree: &Tree<V>) {
        let root_id = tree.root_id();
        assert!(tree.node(root_id).parent.is_none(), "root has a parent");
        check_node(tree, root_id, true);
    }

    /// Returns the subtree height so sibling depths can be compared.
    fn check_node<V>(tree: &Tree<V>, id: NodeId, is_root: bool) -> usize {
        let node = tree.node(id);
        let min = tree.branching().min_keys();
        let max = tree.branching().max_keys();

        assert_eq!(node.keys.len(), node.vals.len(), "keys/vals out of step");
        for pair in node.keys.windows(2) {
            assert!(pair[0] < pair[1], "keys not strictly sorted");
        }
        if is_root {
            assert!(node.keys.len() <= max, "root overfull");
        } else {
            assert!(node.keys.len() >= min, "non-root underfull");
            assert!(node.keys.len() <= max, "non-root overfull");
        }

        match &node.children {
            None => {
                if !node.keys.is_empty() {
                    assert_eq!(node.lower, node.keys[0], "leaf lower summary stale");
                    assert_eq!(
                        node.upper,
                        *node.keys.last().unwrap(),
                        "leaf upper summary stale"
                    );
                }
                0
            }
            Some(children) => {
                assert_eq!(
                    children.len(),
                    node.keys.len() + 1,
                    "child count is not keys + 1"
                );
                let mut depth = None;
                for (i, &child_id) in children.iter().enumerate() {
                    let child = tree.node(child_id);
                    assert_eq!(child.parent, Some(id), "child parent link stale");
                    assert_eq!(child.parent_ix, i, "child parent_ix stale");
                    if i < node.keys.len() {
                        assert!(child.upper < node.keys[i], "separator below child upper");
                    }
                    if i > 0 {
                        assert!(node.keys[i - 1] < child.lower, "separator above child lower");
                    }
                    let child_depth = check_node(tree, child_id, false);
                    match depth {
                        None => depth = Some(child_depth),
                        Some(d) => assert_eq!(d, child_depth, "leaves at unequal depth"),
                    }
                }
                assert_eq!(
                    node.lower,
                    tree.node(children[0]).lower,
                    "internal lower summary stale"
                );
                assert_eq!(
                    node.upper,
                    tree.node(*children.last().unwrap()).upper,
                    "internal upper summary stale"
                );
                depth.unwrap() + 1
            }
        }
    }

    fn assert_matches_model(tree: &Tree<u32>, model: &BTreeMap<Key, u32>) {
        assert_eq!(tree.len(), model.len());
        let scanned: Vec<(&Key, &u32)> = tree.iter().collect();
        let expected: Vec<(&Key, &u32)> = model.iter().collect();
        assert_eq!(scanned, expected);
    }

    // ============================================================================
    // Basic Operations
    // ============================================================================

    #[test]
    fn test_insert_and_scan() {
        let mut tree = small_tree(2, 1);
        assert!(!tree.insert(num_key(3), 30));
        assert!(!tree.insert(num_key(1), 10));
        assert!(!tree.insert(num_key(2), 20));

        let keys: Vec<&Key> = tree.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![&num_key(1), &num_key(2), &num_key(3)]);
        check_invariants(&tree);
    }

    #[test]
    fn test_insert_existing_overwrites() {
        let mut tree = small_tree(2, 1);
        assert!(!tree.insert(num_key(1), 10));
        assert!(tree.insert(num_key(1), 99));
        assert_eq!(tree.len(), 1);

        let vals: Vec<u32> = tree.iter().map(|(_, v)| *v).collect();
        assert_eq!(vals, vec![99]);
    }

    #[test]
    fn test_remove_returns_existed() {
        let mut tree = small_tree(2, 1);
        tree.insert(num_key(1), 10);
        assert!(tree.remove(&num_key(1)));
        assert!(!tree.remove(&num_key(1)));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_remove_from_empty() {
        let mut tree = small_tree(2, 1);
        assert!(!tree.remove(&num_key(7)));
    }

    #[test]
    fn test_empty_iter() {
        let tree = small_tree(2, 1);
        assert_eq!(tree.iter().count(), 0);
    }

    #[test]
    #[should_panic(expected = "key arity")]
    fn test_insert_arity_mismatch_panics() {
        let mut tree = small_tree(2, 2);
        tree.insert(num_key(1), 0);
    }

    // ============================================================================
    // Split and Merge Paths
    // ============================================================================

    #[test]
    fn test_ascending_inserts_split() {
        let mut tree = small_tree(2, 1);
        for n in 1..=100 {
            tree.insert(num_key(n), n as u32);
            check_invariants(&tree);
        }
        let keys: Vec<&Key> = tree.iter().map(|(k, _)| k).collect();
        assert_eq!(keys.len(), 100);
        for (i, key) in keys.iter().enumerate() {
            assert_eq!(**key, num_key(i as i32 + 1));
        }
    }

    #[test]
    fn test_descending_inserts_split() {
        let mut tree = small_tree(1, 1);
        for n in (1..=64).rev() {
            tree.insert(num_key(n), n as u32);
            check_invariants(&tree);
        }
        assert_eq!(tree.len(), 64);
        let first = tree.iter().next().unwrap();
        assert_eq!(*first.0, num_key(1));
    }

    #[test]
    fn test_insert_then_delete_all_leaves_empty_leaf_root() {
        let mut tree = small_tree(2, 1);
        for n in 1..=10 {
            tree.insert(num_key(n), n as u32);
        }
        for n in 1..=10 {
            assert!(tree.remove(&num_key(n)));
            check_invariants(&tree);
        }
        assert_eq!(tree.iter().count(), 0);
        let root = tree.node(tree.root_id());
        assert!(root.is_leaf());
        assert!(root.keys.is_empty());
    }

    #[test]
    fn test_delete_from_internal_nodes() {
        // Enough keys for several levels at minimal branching, deleted in
        // an order that forces successor swaps out of internal nodes.
        let mut tree = small_tree(1, 1);
        for n in 1..=32 {
            tree.insert(num_key(n), n as u32);
        }
        // Root and separators hold middle keys; delete middles first.
        for n in [16, 8, 24, 4, 12, 20, 28, 2, 6, 10, 14, 18, 22, 26, 30] {
            assert!(tree.remove(&num_key(n)));
            check_invariants(&tree);
        }
        let remaining: Vec<&Key> = tree.iter().map(|(k, _)| k).collect();
        assert_eq!(remaining.len(), 17);
        check_invariants(&tree);
    }

    #[test]
    fn test_interleaved_insert_remove() {
        let mut tree = small_tree(2, 1);
        for n in 1..=50 {
            tree.insert(num_key(n), n as u32);
        }
        for n in (1..=50).filter(|n| n % 2 == 0) {
            assert!(tree.remove(&num_key(n)));
        }
        for n in 51..=75 {
            tree.insert(num_key(n), n as u32);
        }
        check_invariants(&tree);
        assert_eq!(tree.len(), 50);
    }

    // ============================================================================
    // Mixed-Kind Keys
    // ============================================================================

    #[test]
    fn test_mixed_kind_keys_scan_in_element_order() {
        let mut tree: Tree<u32> = small_tree(2, 1);
        tree.insert(vec![Element::from("b")], 0);
        tree.insert(vec![Element::from(true)], 1);
        tree.insert(vec![Element::from(2)], 2);
        tree.insert(vec![Element::from(false)], 3);
        tree.insert(vec![Element::from("a")], 4);
        tree.insert(vec![Element::from(-7)], 5);

        let keys: Vec<Key> = tree.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(
            keys,
            vec![
                vec![Element::from(false)],
                vec![Element::from(true)],
                vec![Element::from(-7)],
                vec![Element::from(2)],
                vec![Element::from("a")],
                vec![Element::from("b")],
            ]
        );
        check_invariants(&tree);
    }

    // ============================================================================
    // Reference-Model Equivalence (randomised)
    // ============================================================================

    fn random_key(rng: &mut StdRng, key_len: usize) -> Key {
        (0..key_len)
            .map(|_| match rng.gen_range(0..6) {
                0 => Element::from(rng.gen_bool(0.5)),
                1..=3 => Element::from(rng.gen_range(0..6) as f64),
                _ => Element::from(["a", "b", "c", "d"][rng.gen_range(0..4)]),
            })
            .collect()
    }

    fn run_random_workload(seed: u64, min_keys: usize, key_len: usize, ops: usize) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut tree = small_tree(min_keys, key_len);
        let mut model: BTreeMap<Key, u32> = BTreeMap::new();

        for step in 0..ops {
            let key = random_key(&mut rng, key_len);
            if rng.gen_bool(0.6) {
                let val = rng.gen::<u32>();
                let existed = tree.insert(key.clone(), val);
                assert_eq!(existed, model.insert(key, val).is_some());
            } else {
                let existed = tree.remove(&key);
                assert_eq!(existed, model.remove(&key).is_some());
            }
            if step % 64 == 0 {
                check_invariants(&tree);
                assert_matches_model(&tree, &model);
            }
        }
        check_invariants(&tree);
        assert_matches_model(&tree, &model);

        // Drain everything; the tree must come back to an empty leaf root.
        let keys: Vec<Key> = model.keys().cloned().collect();
        for key in keys {
            assert!(tree.remove(&key));
        }
        check_invariants(&tree);
        assert!(tree.is_empty());
        assert!(tree.node(tree.root_id()).is_leaf());
    }

    #[test]
    fn test_random_workload_tiny_nodes() {
        run_random_workload(0x5EED_0001, 1, 1, 1500);
    }

    #[test]
    fn test_random_workload_single_element_keys() {
        run_random_workload(0x5EED_0002, 2, 1, 1500);
    }

    #[test]
    fn test_random_workload_pair_keys() {
        run_random_workload(0x5EED_0003, 2, 2, 1500);
    }

    #[test]
    fn test_random_workload_wide_nodes_triple_keys() {
        run_random_workload(0x5EED_0004, 4, 3, 1500);
    }
}
