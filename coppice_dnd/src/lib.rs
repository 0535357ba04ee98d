// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coppice DnD: drag-and-drop resolution for key-indexed trees.
//!
//! This crate turns "the user is dragging node X and the ghost rectangle is
//! here" into "drop X as a child / previous sibling / next sibling of node
//! Y, or nowhere". It sits on top of:
//!
//! - [`coppice_tree`]: the topology store (who is whose parent/sibling).
//! - [`coppice_index`]: the spatial index (which rectangles the ghost hits).
//!
//! The pieces:
//!
//! - [`DropRules`] / [`DropPolicy`]: per-node permission flags supplied by
//!   the caller as a capability interface; the core never hard-codes what a
//!   node accepts.
//! - [`classify`]: given the winning collision candidate, decide the
//!   insertion relative to it. The candidate rectangle is split at its
//!   midpoint along the layout [`Axis`]; a ghost entirely in the leading
//!   half means "insert before", entirely in the trailing half "insert
//!   after", anything else nests as a child, with a fixed
//!   child → next → previous fallback when the zoned choice is not
//!   permitted. Nesting wins over reordering when the geometry is
//!   ambiguous because nesting is the reversible operation.
//! - [`DragSession`]: the per-drag bookkeeping (source key, live ghost,
//!   last [`Resolution`]).
//! - [`TreeEditor`]: the composed context value (store + index + session)
//!   that operations take explicitly, so each component stays independently
//!   testable and no state hides in globals.
//!
//! ## Minimal example
//!
//! ```rust
//! use coppice_dnd::{Axis, TreeEditor};
//! use coppice_tree::{Placement, Record, TreeStore};
//! use kurbo::Rect;
//!
//! let store = TreeStore::<u32, ()>::from_records([
//!     Record::root(0),
//!     Record::under(1, 0),
//!     Record::under(2, 0),
//! ])
//! .unwrap();
//! let mut editor = TreeEditor::new(store, Axis::Horizontal);
//!
//! // The renderer reports where it actually drew each node.
//! editor.register(0, Rect::new(0.0, 0.0, 200.0, 20.0));
//! editor.register(1, Rect::new(20.0, 30.0, 200.0, 50.0));
//! editor.register(2, Rect::new(20.0, 60.0, 200.0, 80.0));
//!
//! // Drag node 1 over the lower half of node 2: "insert after".
//! editor.begin_drag(1, &()).unwrap();
//! let resolution = editor.drag_to(Rect::new(30.0, 72.0, 90.0, 78.0), &()).unwrap();
//! let resolution = resolution.cloned().unwrap();
//! assert_eq!(resolution.target, 2);
//! assert_eq!(resolution.placement, Some(Placement::Next));
//!
//! // Drop: apply the resolved mutation.
//! editor.apply_drop().unwrap();
//! assert_eq!(editor.store().children(&0), &[2, 1]);
//! ```
//!
//! Everything here is synchronous and single-owner: one pointer-move event
//! is fully resolved before the next is looked at, and a drag session must
//! be ended (or cancelled) before the topology is mutated. Cancelling a
//! drag never touches either index; no mutation is applied speculatively.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod classify;
mod editor;
mod policy;
mod session;

pub use classify::{classify, Axis};
pub use editor::{EditError, TreeEditor};
pub use policy::{DropPolicy, DropRules};
pub use session::{DragSession, Resolution};
