// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Constraint solving over multiple indexes.
//!
//! Wraps one cursor per index in a [`Constraint`] and composes them in a
//! [`Solver`] under variable-binding maps. The solver enumerates, in
//! lexicographic variable order, every assignment present in all indexes at
//! once: a worst-case-optimal join executed as interleaved leapfrog seeks,
//! binary splits and stack-based backtracking.
//!
//! The caller supplies the constraint order and the variable maps; there is
//! no planner. Solutions are copies; the shared bound buffers stay inside
//! the solver.

mod constraint;
mod solver;


// Re-export public API
pub use constraint::Constraint;
pub use solver::Solver;
