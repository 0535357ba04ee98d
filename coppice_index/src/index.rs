// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The four-edge position index.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};
use kurbo::Rect;

use crate::edge::EdgeList;
use crate::geom;

/// Spatial index over registered node rectangles.
///
/// For each of the four rectangle edges the index keeps an [`EdgeList`]:
/// an ascending coordinate list bucketing the keys whose rectangle has that
/// coordinate on that edge. [`PositionIndex::query_overlap`] intersects four
/// one-dimensional threshold scans (each over the edge *opposite* the query
/// bound) instead of walking every registered rectangle.
///
/// The caller registers rectangles whenever its layout pass moves them and
/// calls [`PositionIndex::reset`] on a full rebuild. Rekeying a node keeps
/// its registration without re-deriving geometry.
#[derive(Clone, Debug)]
pub struct PositionIndex<K> {
    left: EdgeList<K>,
    top: EdgeList<K>,
    right: EdgeList<K>,
    bottom: EdgeList<K>,
    rects: HashMap<K, Rect>,
}

impl<K> Default for PositionIndex<K> {
    fn default() -> Self {
        Self {
            left: EdgeList::default(),
            top: EdgeList::default(),
            right: EdgeList::default(),
            bottom: EdgeList::default(),
            rects: HashMap::new(),
        }
    }
}

impl<K> PositionIndex<K>
where
    K: Clone + Eq + Hash,
{
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or re-registers) the rectangle drawn for `key`.
    ///
    /// The rectangle must be finite and ordered (`x0 <= x1`, `y0 <= y1`);
    /// that is a programmer-error contract, not a reportable condition.
    pub fn register(&mut self, key: K, rect: Rect) {
        geom::debug_check(rect);
        if let Some(old) = self.rects.get(&key).copied() {
            self.remove_edges(old, &key);
        }
        self.left.insert(rect.x0, key.clone());
        self.top.insert(rect.y0, key.clone());
        self.right.insert(rect.x1, key.clone());
        self.bottom.insert(rect.y1, key.clone());
        self.rects.insert(key, rect);
    }

    /// Drops the registration for `key`. Returns `false` when it was not
    /// registered.
    pub fn unregister(&mut self, key: &K) -> bool {
        match self.rects.remove(key) {
            Some(rect) => {
                self.remove_edges(rect, key);
                true
            }
            None => false,
        }
    }

    /// Renames a registration, replacing `old` in every edge bucket and in
    /// the rectangle map. Returns `false` when `old` was not registered.
    pub fn rekey(&mut self, old: &K, new: K) -> bool {
        match self.rects.remove(old) {
            Some(rect) => {
                self.left.rekey(old, new.clone());
                self.top.rekey(old, new.clone());
                self.right.rekey(old, new.clone());
                self.bottom.rekey(old, new.clone());
                self.rects.insert(new, rect);
                true
            }
            None => false,
        }
    }

    /// Clears all buckets and registrations (full layout rebuild).
    pub fn reset(&mut self) {
        self.left.clear();
        self.top.clear();
        self.right.clear();
        self.bottom.clear();
        self.rects.clear();
    }

    /// The registered rectangle for `key`.
    pub fn rect_of(&self, key: &K) -> Option<Rect> {
        self.rects.get(key).copied()
    }

    /// Whether `key` is registered.
    pub fn contains(&self, key: &K) -> bool {
        self.rects.contains_key(key)
    }

    /// Number of registered rectangles.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Keys whose rectangle overlaps `query` (edge-touching included), in
    /// ascending right-edge coordinate order.
    ///
    /// The query itself never filters the dragged node; callers exclude
    /// their own key from the result.
    pub fn query_overlap(&self, query: Rect) -> Vec<K> {
        self.overlap_candidates(query).into_iter().cloned().collect()
    }

    /// The overlapping key covering the largest area of `query`, skipping
    /// `exclude` (typically the dragged key itself).
    ///
    /// Only a strictly larger covered area displaces the current winner, so
    /// ties go to the earliest candidate in scan order; combined with the
    /// deterministic candidate order this makes repeated queries against an
    /// unchanged index stable.
    pub fn best_target(&self, query: Rect, exclude: Option<&K>) -> Option<&K> {
        let mut best: Option<(&K, f64)> = None;
        for key in self.overlap_candidates(query) {
            if exclude == Some(key) {
                continue;
            }
            let Some(rect) = self.rects.get(key) else {
                continue;
            };
            let area = geom::overlap_area(*rect, query);
            if best.is_none_or(|(_, a)| area > a) {
                best = Some((key, area));
            }
        }
        best.map(|(key, _)| key)
    }

    /// One-dimensional set intersection behind [`Self::query_overlap`].
    ///
    /// A rectangle overlaps the query iff its right edge is at or past the
    /// query's left, its bottom at or past the query's top, its left at or
    /// before the query's right, and its top at or before the query's
    /// bottom. Any empty one-dimensional set empties the whole result.
    fn overlap_candidates(&self, query: Rect) -> Vec<&K> {
        geom::debug_check(query);
        let ordered: Vec<&K> = self.right.at_or_above(query.x0).collect();
        if ordered.is_empty() {
            return ordered;
        }
        let bottoms: HashSet<&K> = self.bottom.at_or_above(query.y0).collect();
        if bottoms.is_empty() {
            return Vec::new();
        }
        let lefts: HashSet<&K> = self.left.at_or_below(query.x1).collect();
        if lefts.is_empty() {
            return Vec::new();
        }
        let tops: HashSet<&K> = self.top.at_or_below(query.y1).collect();
        if tops.is_empty() {
            return Vec::new();
        }
        ordered
            .into_iter()
            .filter(|k| bottoms.contains(*k) && lefts.contains(*k) && tops.contains(*k))
            .collect()
    }

    fn remove_edges(&mut self, rect: Rect, key: &K) {
        self.left.remove(rect.x0, key);
        self.top.remove(rect.y0, key);
        self.right.remove(rect.x1, key);
        self.bottom.remove(rect.y1, key);
    }
}
