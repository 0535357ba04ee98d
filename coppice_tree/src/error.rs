// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for store operations.

use core::fmt;

/// Why a [`TreeStore`](crate::TreeStore) operation was refused.
///
/// Every refusal leaves the store exactly as it was; these values exist so
/// callers can surface a warning (or silently drop it) without the core ever
/// panicking on ordinary misuse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeError<K> {
    /// A record or insert used a key that is already indexed.
    DuplicateKey(K),
    /// The named key is not present in the index.
    UnknownKey(K),
    /// An insert referenced a parent that is not present in the index.
    UnknownParent(K),
    /// A second parent-less record was encountered; a tree has one root.
    SecondRoot(K),
    /// No parent-less record was found while building.
    MissingRoot,
    /// The root cannot be removed or relocated.
    RootIsFixed,
    /// Sibling placement relative to the root is impossible.
    RootHasNoSiblings,
    /// Relocating the node would make it its own ancestor.
    WouldCycle(K),
}

impl<K: fmt::Debug> fmt::Display for TreeError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey(k) => write!(f, "key {k:?} is already present"),
            Self::UnknownKey(k) => write!(f, "key {k:?} is not present"),
            Self::UnknownParent(k) => write!(f, "parent {k:?} is not present"),
            Self::SecondRoot(k) => write!(f, "record {k:?} would be a second root"),
            Self::MissingRoot => write!(f, "no parent-less record to act as root"),
            Self::RootIsFixed => write!(f, "the root cannot be removed or moved"),
            Self::RootHasNoSiblings => write!(f, "cannot place a sibling next to the root"),
            Self::WouldCycle(k) => write!(f, "moving {k:?} into its own subtree"),
        }
    }
}

impl<K: fmt::Debug> core::error::Error for TreeError<K> {}
