// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Leapfrog solver: propagate, split, backtrack.
//!
//! The solver drives its constraints round-robin over a shared pair of
//! global bound vectors (`los`/`his`, one slot per variable). Each step
//! writes the mapped bounds into the constraint's scratch buffers, lets the
//! constraint tighten them, and folds the result back, narrowing only. When
//! a full round passes with no bound moving, the bounds are either a point
//! (a solution) or the first constraint with an unfixed variable splits the
//! space: the left branch pins that variable to its low, and the right
//! branch, saved on a stack and resumed on backtrack, takes everything
//! strictly above it.
//!
//! The bounds vectors, the scratch buffers and the stack of saved bounds
//! are all owned by the solver; constraints own their cursors. Nothing is
//! shared, nothing is global.

use super::constraint::Constraint;
use crate::key::{greatest_key, least_key, Element};

/// Backtrack point: bounds as they were before a split, plus the constraint
/// whose split defined the branch.
#[derive(Debug)]
struct SavedBounds {
    los: Vec<Element>,
    his: Vec<Element>,
    splitter: usize,
}

/// Enumerates all assignments satisfying every constraint simultaneously.
///
/// Constraint order is priority order: propagation rounds visit constraints
/// in it, and splits always pick the first constraint that still has an
/// unfixed variable. Callers who want pruning to prefer smaller relations
/// should pass those first. With variable maps aligned to constraint order,
/// solutions come out in lexicographic order of the variable vector.
///
/// ## Example
/// ```rust
/// use leapbase::{Branching, Constraint, Cursor, Element, Solver, Tree};
///
/// let mut edges = Tree::new(Branching::new(2)?, 2);
/// for (a, b) in [("a", "b"), ("b", "c")] {
///     edges.insert(vec![Element::from(a), Element::from(b)], ());
/// }
///
/// // Paths of length two: (v0, v1) and (v1, v2) both edges.
/// let solver = Solver::new(
///     3,
///     vec![
///         Constraint::new(Cursor::new(&edges)),
///         Constraint::new(Cursor::new(&edges)),
///     ],
///     vec![vec![0, 1], vec![1, 2]],
/// );
/// let paths: Vec<Vec<Element>> = solver.collect();
/// assert_eq!(paths.len(), 1); // a -> b -> c
/// # Ok::<(), leapbase::LeapError>(())
/// ```
#[derive(Debug)]
pub struct Solver<'t, V> {
    constraints: Vec<Constraint<'t, V>>,
    /// `ixes[c][i]` is the global variable bound to constraint `c`'s key
    /// position `i`.
    ixes: Vec<Vec<usize>>,
    /// Per-constraint shuttle buffers for the write/read bounds protocol.
    scratch_los: Vec<Vec<Element>>,
    scratch_his: Vec<Vec<Element>>,
    los: Vec<Element>,
    his: Vec<Element>,
    stack: Vec<SavedBounds>,
    failed: bool,
}

impl<'t, V> Solver<'t, V> {
    /// Build a solver over `num_vars` variables.
    ///
    /// ## Input
    /// - `constraints`: one per index, in priority order
    /// - `ixes`: per constraint, the global variable for each key position
    ///
    /// ## Panics
    /// A malformed constraint set is a caller bug, fatal and not
    /// recoverable: no constraints at all, a map count different from the
    /// constraint count, a map whose length differs from its cursor's key
    /// arity, or a map entry at or past `num_vars`.
    pub fn new(
        num_vars: usize,
        constraints: Vec<Constraint<'t, V>>,
        ixes: Vec<Vec<usize>>,
    ) -> Self {
        assert!(
            !constraints.is_empty(),
            "solver requires at least one constraint"
        );
        assert_eq!(
            ixes.len(),
            constraints.len(),
            "one variable map per constraint"
        );
        for (c, map) in ixes.iter().enumerate() {
            assert_eq!(
                map.len(),
                constraints[c].key_len(),
                "variable map arity does not match cursor key arity"
            );
            for &variable in map {
                assert!(variable < num_vars, "variable index out of range");
            }
        }

        let scratch_los = constraints.iter().map(|c| least_key(c.key_len())).collect();
        let scratch_his = constraints
            .iter()
            .map(|c| greatest_key(c.key_len()))
            .collect();
        Self {
            constraints,
            ixes,
            scratch_los,
            scratch_his,
            los: vec![Element::Least; num_vars],
            his: vec![Element::Greatest; num_vars],
            stack: Vec::new(),
            failed: false,
        }
    }

    /// Rewind to the full search space. Also resets every cursor, which is
    /// required after the underlying trees were mutated.
    pub fn reset(&mut self) {
        for constraint in &mut self.constraints {
            constraint.reset();
        }
        for lo in &mut self.los {
            *lo = Element::Least;
        }
        for hi in &mut self.his {
            *hi = Element::Greatest;
        }
        self.stack.clear();
        self.failed = false;
    }

    /// Gather the global bounds of constraint `c`'s variables into its
    /// scratch buffers.
    fn write_bounds(&mut self, c: usize) {
        for (i, &v) in self.ixes[c].iter().enumerate() {
            self.scratch_los[c][i] = self.los[v].clone();
            self.scratch_his[c][i] = self.his[v].clone();
        }
    }

    /// Fold constraint `c`'s view back into the global bounds, narrowing
    /// only. Returns whether any bound moved; flags failure on a crossed
    /// bound or the sentinel values a failed seek leaves behind.
    fn read_bounds(&mut self, c: usize) -> bool {
        let mut changed = false;
        for (i, &v) in self.ixes[c].iter().enumerate() {
            let lo = &self.scratch_los[c][i];
            if *lo > self.los[v] {
                self.los[v] = lo.clone();
                changed = true;
            }
            let hi = &self.scratch_his[c][i];
            if *hi < self.his[v] {
                self.his[v] = hi.clone();
                changed = true;
            }
            if self.los[v] > self.his[v]
                || self.los[v] == Element::Greatest
                || self.his[v] == Element::Least
            {
                self.failed = true;
            }
        }
        changed
    }

    fn propagate(&mut self, c: usize) -> bool {
        self.write_bounds(c);
        self.constraints[c].propagate(&mut self.scratch_los[c], &mut self.scratch_his[c]);
        self.read_bounds(c)
    }

    fn split_left(&mut self, c: usize) {
        self.write_bounds(c);
        self.constraints[c].split_left(&mut self.scratch_los[c], &mut self.scratch_his[c]);
        self.read_bounds(c);
    }

    fn split_right(&mut self, c: usize) {
        self.write_bounds(c);
        self.constraints[c].split_right(&mut self.scratch_los[c], &mut self.scratch_his[c]);
        self.read_bounds(c);
    }
}

impl<'t, V> Iterator for Solver<'t, V> {
    type Item = Vec<Element>;

    /// Next satisfying assignment, or `None` when the space is exhausted.
    /// Exhaustion is stable: every later call returns `None` as well.
    fn next(&mut self) -> Option<Vec<Element>> {
        let n = self.constraints.len();
        let mut current = 0;
        let mut last_changed = 0;

        loop {
            if self.failed {
                // Backtrack: restore the bounds saved before the most
                // recent split and take its right branch.
                let saved = self.stack.pop()?;
                self.los = saved.los;
                self.his = saved.his;
                self.failed = false;
                self.split_right(saved.splitter);
                current = 0;
                last_changed = 0;
                continue;
            }

            let changed = self.propagate(current);
            if self.failed {
                continue;
            }
            if changed {
                last_changed = current;
                current = (current + 1) % n;
                continue;
            }
            current = (current + 1) % n;
            if current != last_changed {
                continue;
            }

            // Fixpoint: a full round without any bound moving.
            if self.los == self.his {
                let solution = self.los.clone();
                self.failed = true; // force the next call to backtrack
                return Some(solution);
            }
            // Split on the highest-priority constraint that still has an
            // unfixed variable. Splitting in priority order keeps the
            // enumeration in lexicographic variable order when maps are
            // aligned with it, and never lands on a fully-pinned
            // constraint. No candidate means a variable no constraint
            // covers, which can never become fixed.
            let splitter = (0..n)
                .find(|&c| self.ixes[c].iter().any(|&v| self.los[v] != self.his[v]))
                .expect("unfixed variable not covered by any constraint");
            self.stack.push(SavedBounds {
                los: self.los.clone(),
                his: self.his.clone(),
                splitter,
            });
            self.split_left(splitter);
            current = 0;
            last_changed = 0;
        }
    }
}
