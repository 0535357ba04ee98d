// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sorted per-edge coordinate list with key buckets.

use alloc::vec::Vec;

use smallvec::SmallVec;

/// Most coordinates are shared by very few rects; two inline slots cover the
/// common "rows share a left edge" case without spilling.
type Bucket<K> = SmallVec<[K; 2]>;

/// Ascending, duplicate-free list of coordinate values for one rectangle
/// edge, where each coordinate owns the bucket of keys whose rectangle has
/// that value on this edge.
///
/// The sorted-list invariant is structural: there is exactly one entry per
/// distinct coordinate and entries are kept ordered by binary-search
/// insertion, so "sorted list == distinct bucket coordinates" cannot drift.
#[derive(Clone, Debug)]
pub(crate) struct EdgeList<K> {
    entries: Vec<(f64, Bucket<K>)>,
}

impl<K> Default for EdgeList<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Eq> EdgeList<K> {
    /// Adds `key` to the bucket at `coord`, creating the coordinate entry in
    /// sorted position when it is new. Re-adding an already bucketed key is
    /// a no-op.
    pub(crate) fn insert(&mut self, coord: f64, key: K) {
        let slot = self.entries.partition_point(|(c, _)| *c < coord);
        match self.entries.get_mut(slot) {
            Some((c, bucket)) if *c == coord => {
                if !bucket.contains(&key) {
                    bucket.push(key);
                }
            }
            _ => {
                let mut bucket = Bucket::new();
                bucket.push(key);
                self.entries.insert(slot, (coord, bucket));
            }
        }
    }

    /// Removes `key` from the bucket at `coord`, dropping the coordinate
    /// entry when its bucket empties.
    pub(crate) fn remove(&mut self, coord: f64, key: &K) {
        let slot = self.entries.partition_point(|(c, _)| *c < coord);
        if let Some((c, bucket)) = self.entries.get_mut(slot)
            && *c == coord
        {
            bucket.retain(|k| k != key);
            if bucket.is_empty() {
                self.entries.remove(slot);
            }
        }
    }

    /// Replaces `old` with `new` wherever it is bucketed. A key appears in
    /// at most one bucket per edge, so the scan stops at the first hit.
    pub(crate) fn rekey(&mut self, old: &K, new: K) {
        for (_, bucket) in &mut self.entries {
            if let Some(slot) = bucket.iter().position(|k| k == old) {
                bucket[slot] = new;
                return;
            }
        }
    }

    /// Keys whose coordinate on this edge is `>= threshold`, in ascending
    /// coordinate order.
    pub(crate) fn at_or_above(&self, threshold: f64) -> impl Iterator<Item = &K> {
        let start = self.entries.partition_point(|(c, _)| *c < threshold);
        self.entries[start..].iter().flat_map(|(_, b)| b.iter())
    }

    /// Keys whose coordinate on this edge is `<= threshold`, in ascending
    /// coordinate order.
    pub(crate) fn at_or_below(&self, threshold: f64) -> impl Iterator<Item = &K> {
        let end = self.entries.partition_point(|(c, _)| *c <= threshold);
        self.entries[..end].iter().flat_map(|(_, b)| b.iter())
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    #[cfg(test)]
    pub(crate) fn coords(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(c, _)| *c)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn insert_keeps_coordinates_sorted_and_distinct() {
        let mut edge = EdgeList::default();
        edge.insert(10.0, "a");
        edge.insert(5.0, "b");
        edge.insert(20.0, "c");
        edge.insert(10.0, "d");
        assert_eq!(edge.coords().collect::<Vec<_>>(), [5.0, 10.0, 20.0]);
    }

    #[test]
    fn reinserting_a_bucketed_key_is_a_noop() {
        let mut edge = EdgeList::default();
        edge.insert(10.0, "a");
        edge.insert(10.0, "a");
        assert_eq!(edge.at_or_above(0.0).count(), 1);
    }

    #[test]
    fn remove_drops_emptied_coordinates() {
        let mut edge = EdgeList::default();
        edge.insert(10.0, "a");
        edge.insert(10.0, "b");
        edge.remove(10.0, &"a");
        assert_eq!(edge.coords().collect::<Vec<_>>(), [10.0]);
        edge.remove(10.0, &"b");
        assert_eq!(edge.coords().count(), 0);
    }

    #[test]
    fn threshold_scans_are_inclusive() {
        let mut edge = EdgeList::default();
        edge.insert(5.0, "a");
        edge.insert(10.0, "b");
        edge.insert(20.0, "c");

        let above: Vec<_> = edge.at_or_above(10.0).collect();
        assert_eq!(above, [&"b", &"c"]);
        let below: Vec<_> = edge.at_or_below(10.0).collect();
        assert_eq!(below, [&"a", &"b"]);
    }

    #[test]
    fn rekey_replaces_in_place() {
        let mut edge = EdgeList::default();
        edge.insert(5.0, "a");
        edge.insert(10.0, "b");
        edge.rekey(&"a", "z");
        let all: Vec<_> = edge.at_or_above(0.0).collect();
        assert_eq!(all, [&"z", &"b"]);
    }
}
