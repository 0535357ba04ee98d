// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The composed editing context: store + index + session.

use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use coppice_index::PositionIndex;
use coppice_tree::{Placement, Record, TreeError, TreeStore};
use kurbo::Rect;

use crate::classify::{classify, Axis};
use crate::policy::{DropPolicy, DropRules};
use crate::session::{DragSession, Resolution};

/// Why a [`TreeEditor`] operation was refused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditError<K> {
    /// Structural mutation was attempted while a drag is active; end or
    /// cancel the session first.
    DragInProgress,
    /// A drag operation was used without an active session.
    NoActiveDrag,
    /// The node is the root or its policy does not permit dragging.
    DragForbidden(K),
    /// The underlying store refused the mutation.
    Tree(TreeError<K>),
}

impl<K> From<TreeError<K>> for EditError<K> {
    fn from(err: TreeError<K>) -> Self {
        Self::Tree(err)
    }
}

impl<K: fmt::Debug> fmt::Display for EditError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DragInProgress => write!(f, "a drag session is active"),
            Self::NoActiveDrag => write!(f, "no drag session is active"),
            Self::DragForbidden(k) => write!(f, "node {k:?} cannot be dragged"),
            Self::Tree(err) => write!(f, "{err}"),
        }
    }
}

impl<K: fmt::Debug> core::error::Error for EditError<K> {}

/// Everything a drag-editable tree needs, in one explicit context value.
///
/// The editor owns the [`TreeStore`], the [`PositionIndex`], and the
/// [`DragSession`], and sequences them: pointer moves resolve against the
/// index and classify against the store, while structural mutation is
/// refused mid-drag so a drop can never observe a half-updated topology.
/// Nothing is global; tests can drive each component separately and
/// compose them here.
///
/// The permission policy and layout axis are configuration supplied by the
/// caller: the policy on each call (it often borrows caller state), the
/// axis at construction.
#[derive(Clone, Debug)]
pub struct TreeEditor<K, P> {
    store: TreeStore<K, P>,
    index: PositionIndex<K>,
    session: DragSession<K>,
    axis: Axis,
}

impl<K, P> TreeEditor<K, P>
where
    K: Clone + Eq + Hash,
{
    /// Wraps an existing store with an empty index and an idle session.
    #[must_use]
    pub fn new(store: TreeStore<K, P>, axis: Axis) -> Self {
        Self {
            store,
            index: PositionIndex::new(),
            session: DragSession::new(),
            axis,
        }
    }

    /// The topology store.
    pub fn store(&self) -> &TreeStore<K, P> {
        &self.store
    }

    /// The position index.
    pub fn index(&self) -> &PositionIndex<K> {
        &self.index
    }

    /// The drag session.
    pub fn session(&self) -> &DragSession<K> {
        &self.session
    }

    /// The layout axis used for collision zoning.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Changes the layout axis (takes effect on the next pointer move).
    pub fn set_axis(&mut self, axis: Axis) {
        self.axis = axis;
    }

    /// Splits the editor back into its store and index.
    pub fn into_parts(self) -> (TreeStore<K, P>, PositionIndex<K>) {
        (self.store, self.index)
    }

    /// Records where the renderer drew `key` in the last layout pass.
    pub fn register(&mut self, key: K, rect: Rect) {
        self.index.register(key, rect);
    }

    /// Clears all registered rectangles (full layout rebuild).
    pub fn reset_index(&mut self) {
        self.index.reset();
    }

    /// Inserts a new node; see [`TreeStore::insert`]. Refused mid-drag.
    pub fn insert(&mut self, record: Record<K, P>, at: Option<usize>) -> Result<(), EditError<K>> {
        self.guard_idle()?;
        self.store.insert(record, at)?;
        Ok(())
    }

    /// Removes a subtree and unregisters every removed rectangle.
    /// Refused mid-drag.
    pub fn remove(&mut self, key: &K) -> Result<Vec<K>, EditError<K>> {
        self.guard_idle()?;
        let removed = self.store.remove(key)?;
        for k in &removed {
            self.index.unregister(k);
        }
        Ok(removed)
    }

    /// Renames a node in the store and the position index in one step, so
    /// no structure ever resolves the old key afterwards. Refused mid-drag.
    pub fn rekey(&mut self, old: &K, new: K) -> Result<(), EditError<K>> {
        self.guard_idle()?;
        self.store.rekey(old, new.clone())?;
        self.index.rekey(old, new);
        Ok(())
    }

    /// Moves a subtree; see [`TreeStore::relocate`]. Refused mid-drag.
    pub fn relocate(
        &mut self,
        key: &K,
        anchor: &K,
        placement: Placement,
    ) -> Result<(), EditError<K>> {
        self.guard_idle()?;
        self.store.relocate(key, anchor, placement)?;
        Ok(())
    }

    /// Sets a node's fold flag; folding is allowed mid-drag since it does
    /// not alter topology.
    pub fn set_visible(&mut self, key: &K, visible: bool) -> Result<(), EditError<K>> {
        self.store.set_visible(key, visible)?;
        Ok(())
    }

    /// Flips a node's fold flag, returning the new value.
    pub fn toggle_visible(&mut self, key: &K) -> Result<bool, EditError<K>> {
        Ok(self.store.toggle_visible(key)?)
    }

    /// Starts dragging `source`.
    ///
    /// Refused while another drag is active, for unknown keys, for the
    /// root, and for nodes whose policy withholds [`DropRules::DRAG`].
    pub fn begin_drag<Pol>(&mut self, source: K, policy: &Pol) -> Result<(), EditError<K>>
    where
        Pol: DropPolicy<K>,
    {
        if self.session.is_active() {
            return Err(EditError::DragInProgress);
        }
        if !self.store.contains(&source) {
            return Err(EditError::Tree(TreeError::UnknownKey(source)));
        }
        if self.store.root() == Some(&source)
            || !policy.rules(&source).contains(DropRules::DRAG)
        {
            return Err(EditError::DragForbidden(source));
        }
        self.session.start(source);
        Ok(())
    }

    /// Resolves the current pointer position.
    ///
    /// Queries the index with the ghost rectangle (excluding the dragged
    /// key), picks the largest-cover candidate, classifies it, and records
    /// the result in the session. Returns `Ok(None)` when the ghost
    /// overlaps nothing. Calling again with an unchanged ghost returns the
    /// recorded resolution without recomputing.
    pub fn drag_to<Pol>(
        &mut self,
        ghost: Rect,
        policy: &Pol,
    ) -> Result<Option<&Resolution<K>>, EditError<K>>
    where
        Pol: DropPolicy<K>,
    {
        let Some(source) = self.session.source().cloned() else {
            return Err(EditError::NoActiveDrag);
        };
        if self.session.ghost() == Some(ghost) {
            return Ok(self.session.resolution());
        }
        self.session.set_ghost(ghost);
        let hit = self.index.best_target(ghost, Some(&source)).cloned();
        let resolution = hit.map(|target| {
            let placement = self.index.rect_of(&target).and_then(|target_rect| {
                classify(
                    &self.store,
                    &source,
                    &target,
                    target_rect,
                    ghost,
                    policy.rules(&target),
                    self.axis,
                )
            });
            Resolution { target, placement }
        });
        self.session.resolve(resolution);
        Ok(self.session.resolution())
    }

    /// Ends the drag, returning the final resolution without applying it.
    /// The caller decides whether to mutate.
    pub fn end_drag(&mut self) -> Option<Resolution<K>> {
        self.session.end()
    }

    /// Abandons the drag; both indices are left exactly as before the drag
    /// started.
    pub fn cancel_drag(&mut self) {
        self.session.cancel();
    }

    /// Ends the drag and applies the resolved insertion, if there is one.
    ///
    /// Returns the `(target, placement)` that was applied, or `Ok(None)`
    /// when the drag resolved to nothing (or to a denied target).
    pub fn apply_drop(&mut self) -> Result<Option<(K, Placement)>, EditError<K>> {
        let source = self.session.source().cloned();
        let resolution = self.session.end();
        let (
            Some(source),
            Some(Resolution {
                target,
                placement: Some(placement),
            }),
        ) = (source, resolution)
        else {
            return Ok(None);
        };
        self.store.relocate(&source, &target, placement)?;
        Ok(Some((target, placement)))
    }

    fn guard_idle(&self) -> Result<(), EditError<K>> {
        if self.session.is_active() {
            Err(EditError::DragInProgress)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> TreeEditor<u32, ()> {
        let store = TreeStore::from_records([
            Record::root(0),
            Record::under(1, 0),
            Record::under(2, 0),
        ])
        .unwrap();
        TreeEditor::new(store, Axis::Vertical)
    }

    #[test]
    fn begin_drag_refuses_root_and_unknown_keys() {
        let mut editor = editor();
        assert_eq!(
            editor.begin_drag(0, &()).unwrap_err(),
            EditError::DragForbidden(0)
        );
        assert_eq!(
            editor.begin_drag(99, &()).unwrap_err(),
            EditError::Tree(TreeError::UnknownKey(99))
        );
        assert!(!editor.session().is_active());
    }

    #[test]
    fn begin_drag_honors_the_policy() {
        let mut editor = editor();
        let pinned = |key: &u32| {
            if *key == 1 {
                DropRules::all() - DropRules::DRAG
            } else {
                DropRules::all()
            }
        };
        assert_eq!(
            editor.begin_drag(1, &pinned).unwrap_err(),
            EditError::DragForbidden(1)
        );
        editor.begin_drag(2, &pinned).unwrap();
    }

    #[test]
    fn mutation_is_blocked_mid_drag() {
        let mut editor = editor();
        editor.begin_drag(1, &()).unwrap();
        assert_eq!(
            editor.insert(Record::under(3, 0), None).unwrap_err(),
            EditError::DragInProgress
        );
        assert_eq!(editor.remove(&2).unwrap_err(), EditError::DragInProgress);
        assert_eq!(
            editor.rekey(&2, 20).unwrap_err(),
            EditError::DragInProgress
        );
        assert_eq!(
            editor.begin_drag(2, &()).unwrap_err(),
            EditError::DragInProgress
        );
        editor.cancel_drag();
        editor.insert(Record::under(3, 0), None).unwrap();
    }

    #[test]
    fn drag_to_without_a_session_is_refused() {
        let mut editor = editor();
        assert_eq!(
            editor
                .drag_to(Rect::new(0.0, 0.0, 1.0, 1.0), &())
                .unwrap_err(),
            EditError::NoActiveDrag
        );
    }

    #[test]
    fn remove_unregisters_rectangles() {
        let mut editor = editor();
        editor.register(1, Rect::new(0.0, 0.0, 10.0, 10.0));
        editor.register(2, Rect::new(0.0, 20.0, 10.0, 30.0));
        editor.remove(&1).unwrap();
        assert!(!editor.index().contains(&1));
        assert!(editor.index().contains(&2));
    }

    #[test]
    fn rekey_updates_store_and_index_together() {
        let mut editor = editor();
        editor.register(1, Rect::new(0.0, 0.0, 10.0, 10.0));
        editor.rekey(&1, 10).unwrap();
        assert!(editor.store().contains(&10));
        assert!(!editor.store().contains(&1));
        assert!(editor.index().contains(&10));
        assert!(!editor.index().contains(&1));
        assert_eq!(editor.store().children(&0), &[10, 2]);
    }
}
