// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node drop permission flags and the policy lookup trait.

use bitflags::bitflags;

bitflags! {
    /// What a node participates in during drag-and-drop.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DropRules: u8 {
        /// The node itself may be picked up and dragged.
        const DRAG            = 0b0000_0001;
        /// Other nodes may be dropped into it as children.
        const INSERT_CHILD    = 0b0000_0010;
        /// Other nodes may be inserted as its previous sibling.
        const INSERT_PREVIOUS = 0b0000_0100;
        /// Other nodes may be inserted as its next sibling.
        const INSERT_NEXT     = 0b0000_1000;
    }
}

impl Default for DropRules {
    /// Everything allowed.
    fn default() -> Self {
        Self::all()
    }
}

/// Lookup for per-node [`DropRules`].
///
/// Hosts can implement this over a `HashMap`, ECS storage, or any other
/// mapping from node keys to permissions. The unit policy `()` permits
/// everything, and any `Fn(&K) -> DropRules` closure works directly.
pub trait DropPolicy<K> {
    /// Returns the drop rules for the given node key.
    fn rules(&self, key: &K) -> DropRules;
}

impl<K> DropPolicy<K> for () {
    fn rules(&self, _key: &K) -> DropRules {
        DropRules::all()
    }
}

impl<K, F> DropPolicy<K> for F
where
    F: Fn(&K) -> DropRules,
{
    fn rules(&self, key: &K) -> DropRules {
        self(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_policy_permits_everything() {
        let policy = ();
        assert_eq!(DropPolicy::<u32>::rules(&policy, &7), DropRules::all());
    }

    #[test]
    fn closure_policy_is_consulted_per_key() {
        let policy = |key: &u32| {
            if *key == 1 {
                DropRules::DRAG
            } else {
                DropRules::all()
            }
        };
        assert_eq!(policy.rules(&1), DropRules::DRAG);
        assert_eq!(policy.rules(&2), DropRules::all());
    }
}
