// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coppice Index: a per-edge sorted rectangle index for drag collision queries.
//!
//! During a drag, every pointer move has to answer "which registered node
//! does the ghost rectangle overlap right now?". Scanning all nodes per
//! frame is O(n) per move; this crate instead keeps, for each of the four
//! rectangle edges, an ascending duplicate-free list of coordinate values
//! where every coordinate owns the bucket of keys whose rectangle has that
//! value on that edge. An overlap query is then the intersection of four
//! one-dimensional threshold scans over the *opposite* edges, each of which
//! short-circuits the whole query when it comes up empty.
//!
//! Edge-touching rectangles count as overlapping (the closed-interval AABB
//! test in [`geom::overlaps`]); that matches drag-and-drop "just touching"
//! semantics.
//!
//! ## Minimal example
//!
//! ```rust
//! use coppice_index::PositionIndex;
//! use kurbo::Rect;
//!
//! let mut index = PositionIndex::new();
//! index.register("a", Rect::new(0.0, 0.0, 10.0, 10.0));
//! index.register("b", Rect::new(8.0, 0.0, 20.0, 10.0));
//! index.register("c", Rect::new(100.0, 100.0, 110.0, 110.0));
//!
//! // A ghost over the a/b seam hits both, and `b` covers more of it.
//! let ghost = Rect::new(6.0, 2.0, 14.0, 8.0);
//! assert_eq!(index.query_overlap(ghost), vec!["a", "b"]);
//! assert_eq!(index.best_target(ghost, None), Some(&"b"));
//!
//! // The dragged node excludes itself from its own candidates.
//! assert_eq!(index.best_target(ghost, Some(&"b")), Some(&"a"));
//! ```
//!
//! Candidates come back in ascending right-edge order, so the "first
//! encountered wins" tie-break in [`PositionIndex::best_target`] is
//! deterministic across runs and independent of hash-map iteration order.
//!
//! Rectangle coordinates must be finite with `x0 <= x1` and `y0 <= y1`;
//! anything else is a programmer error (`debug_assert`ed), not a reportable
//! condition.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod geom;

mod edge;
mod index;

pub use index::PositionIndex;
