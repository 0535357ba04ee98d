// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coppice Tree: a key-indexed tree topology store.
//!
//! This crate is the structural half of a drag-editable hierarchy: it owns
//! every node in a flat key → node index and records linkage purely through
//! keys (`parent` plus an ordered `children` list). There are no parent or
//! child pointers, so there are no ownership cycles; a [`TreeStore`] is an
//! arena plus an index, nothing more.
//!
//! - Built from an unordered sequence of parent-pointer [`Record`]s.
//!   Children may arrive before their parents; a placeholder node is
//!   synthesized eagerly and completed when its own record shows up.
//! - Mutated incrementally: [`TreeStore::insert`], cascade
//!   [`TreeStore::remove`], atomic [`TreeStore::rekey`], and
//!   [`TreeStore::relocate`] for moving a subtree to a new position.
//! - Stores a per-node fold flag ([`TreeStore::set_visible`]); layout and
//!   rendering decisions belong to the caller.
//!
//! Misuse (duplicate keys, removing the root, moving a node into its own
//! subtree) is never fatal: the operation is a no-op and returns a
//! [`TreeError`] the caller can report or ignore.
//!
//! ## Minimal example
//!
//! ```rust
//! use coppice_tree::{Record, TreeStore};
//!
//! // Records can arrive in any order; `211` shows up before its parent.
//! let store = TreeStore::<u32, ()>::from_records([
//!     Record::under(211, 21),
//!     Record::under(21, 2),
//!     Record::under(2, 0),
//!     Record::under(1, 0),
//!     Record::root(0),
//! ])
//! .unwrap();
//!
//! assert_eq!(store.root(), Some(&0));
//! assert_eq!(store.children(&0), &[2, 1]);
//! assert_eq!(store.children(&21), &[211]);
//! ```
//!
//! Keys are an application concern: any `Clone + Eq + Hash` type works, so
//! integer ids, interned strings, or generational handles from another crate
//! all plug in directly. Payloads are opaque to the store.
//!
//! All operations are synchronous and run to completion; callers serialize
//! mutation themselves (this is a single-threaded, event-driven core).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod store;

pub use error::TreeError;
pub use store::{Node, Placement, Record, TreeStore};
