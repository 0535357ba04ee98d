// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collision classification: from a winning candidate to an insertion.

use core::hash::Hash;

use coppice_tree::{Placement, TreeStore};
use kurbo::Rect;

use crate::DropRules;

/// Layout axis of the tree, which decides how a candidate rectangle is
/// split into sibling-insert zones.
///
/// - `Vertical` layouts grow downward with siblings spread horizontally, so
///   the candidate is split into a left ("previous") and right ("next")
///   half.
/// - `Horizontal` layouts grow sideways with siblings stacked vertically,
///   so the split is top/bottom.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Split candidates left/right at their horizontal midpoint.
    #[default]
    Vertical,
    /// Split candidates top/bottom at their vertical midpoint.
    Horizontal,
}

/// Decides what dropping `source` onto `candidate` would mean.
///
/// Returns `None` when no insertion is permitted (the UI shows a "not
/// allowed" state). The rules, in order:
///
/// 1. The root only ever accepts children; it has no siblings.
/// 2. A node never drops into its own subtree.
/// 3. Covering the source's current parent blocks `Child`, covering its
///    previous sibling blocks `Next`, and covering its next sibling blocks
///    `Previous` — each of those insertions would reproduce the current
///    topology.
/// 4. Geometric zoning along `axis`: a ghost entirely in the leading half
///    of the candidate inserts before it, entirely in the trailing half
///    inserts after it, anything straddling the midpoint nests as a child.
/// 5. When the zoned choice is not permitted, fall back through
///    `Child → Next → Previous`, taking the first permitted insertion.
pub fn classify<K, P>(
    store: &TreeStore<K, P>,
    source: &K,
    candidate: &K,
    candidate_rect: Rect,
    ghost: Rect,
    rules: DropRules,
    axis: Axis,
) -> Option<Placement>
where
    K: Clone + Eq + Hash,
{
    if store.root() == Some(candidate) {
        return rules
            .contains(DropRules::INSERT_CHILD)
            .then_some(Placement::Child);
    }
    if candidate == source || store.is_descendant_of(candidate, source) {
        return None;
    }

    let cover_is_parent = store.parent_of(source) == Some(candidate);
    let cover_is_previous = store.prev_sibling(source) == Some(candidate);
    let cover_is_next = store.next_sibling(source) == Some(candidate);

    let child_ok = rules.contains(DropRules::INSERT_CHILD) && !cover_is_parent;
    let next_ok = rules.contains(DropRules::INSERT_NEXT) && !cover_is_previous;
    let previous_ok = rules.contains(DropRules::INSERT_PREVIOUS) && !cover_is_next;

    let (mid, ghost_lo, ghost_hi) = match axis {
        Axis::Vertical => (
            (candidate_rect.x0 + candidate_rect.x1) / 2.0,
            ghost.x0,
            ghost.x1,
        ),
        Axis::Horizontal => (
            (candidate_rect.y0 + candidate_rect.y1) / 2.0,
            ghost.y0,
            ghost.y1,
        ),
    };
    if ghost_hi <= mid && previous_ok {
        return Some(Placement::Previous);
    }
    if ghost_lo >= mid && next_ok {
        return Some(Placement::Next);
    }
    if child_ok {
        Some(Placement::Child)
    } else if next_ok {
        Some(Placement::Next)
    } else if previous_ok {
        Some(Placement::Previous)
    } else {
        None
    }
}
