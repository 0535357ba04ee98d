// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The key-indexed tree store.

use alloc::vec;
use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::TreeError;

/// A flat parent-pointer record describing one node.
///
/// A record with no `parent` is the root. Records may reference parents whose
/// own record has not been seen yet; [`TreeStore::from_records`] synthesizes
/// placeholders for those and completes them later.
#[derive(Clone, Debug)]
pub struct Record<K, P> {
    /// Unique key of the node.
    pub key: K,
    /// Parent key, or `None` for the root.
    pub parent: Option<K>,
    /// Opaque caller data carried by the node.
    pub payload: Option<P>,
}

impl<K, P> Record<K, P> {
    /// A parent-less (root) record.
    pub fn root(key: K) -> Self {
        Self {
            key,
            parent: None,
            payload: None,
        }
    }

    /// A record placed under `parent`.
    pub fn under(key: K, parent: K) -> Self {
        Self {
            key,
            parent: Some(parent),
            payload: None,
        }
    }

    /// Attach a payload to this record.
    #[must_use]
    pub fn with_payload(mut self, payload: P) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Where a relocated subtree lands relative to its anchor node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Append as the last child of the anchor.
    Child,
    /// Insert as the sibling immediately before the anchor.
    Previous,
    /// Insert as the sibling immediately after the anchor.
    Next,
}

/// One node in the store.
///
/// Linkage is by key only: a node names its parent and lists its children,
/// but owns neither. The store's index owns every node.
#[derive(Clone, Debug)]
pub struct Node<K, P> {
    parent: Option<K>,
    children: Vec<K>,
    payload: Option<P>,
    visible: bool,
    placeholder: bool,
}

impl<K, P> Node<K, P> {
    /// Parent key, or `None` for the root (and for placeholders whose own
    /// record never arrived).
    pub fn parent(&self) -> Option<&K> {
        self.parent.as_ref()
    }

    /// Child keys in sibling display order.
    pub fn children(&self) -> &[K] {
        &self.children
    }

    /// Caller payload, if any.
    pub fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    /// Fold flag: `false` when the node's subtree is folded away.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// `true` while this node was only ever named as someone's parent.
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }
}

/// Key-indexed tree: a flat node arena plus the root key.
///
/// See the [crate docs](crate) for the overall model. All mutating
/// operations either fully apply or refuse with a [`TreeError`] and change
/// nothing.
#[derive(Clone, Debug)]
pub struct TreeStore<K, P> {
    nodes: HashMap<K, Node<K, P>>,
    root: Option<K>,
}

impl<K, P> Default for TreeStore<K, P> {
    fn default() -> Self {
        Self {
            nodes: HashMap::new(),
            root: None,
        }
    }
}

impl<K, P> TreeStore<K, P>
where
    K: Clone + Eq + Hash,
{
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from an unordered sequence of flat records.
    ///
    /// Children may precede their parents; a placeholder parent is created
    /// eagerly and merged when its own record arrives. The result does not
    /// depend on whether a parent arrived before or after its children;
    /// sibling order is the order child records appear in the input.
    ///
    /// Exactly one record must be parent-less. A second one is rejected with
    /// [`TreeError::SecondRoot`] (accepting "first wins" would make the
    /// result depend on record order), none at all with
    /// [`TreeError::MissingRoot`].
    pub fn from_records<I>(records: I) -> Result<Self, TreeError<K>>
    where
        I: IntoIterator<Item = Record<K, P>>,
    {
        let mut store = Self::new();
        for record in records {
            let Record {
                key,
                parent,
                payload,
            } = record;
            if parent.as_ref() == Some(&key) {
                return Err(TreeError::WouldCycle(key));
            }
            match store.nodes.get_mut(&key) {
                Some(node) if node.placeholder => {
                    node.placeholder = false;
                    node.payload = payload;
                }
                Some(_) => return Err(TreeError::DuplicateKey(key)),
                None => {
                    store.nodes.insert(
                        key.clone(),
                        Node {
                            parent: None,
                            children: Vec::new(),
                            payload,
                            visible: true,
                            placeholder: false,
                        },
                    );
                }
            }
            match parent {
                None => {
                    if store.root.is_some() {
                        return Err(TreeError::SecondRoot(key));
                    }
                    store.root = Some(key);
                }
                Some(parent) => {
                    if let Some(node) = store.nodes.get_mut(&key) {
                        node.parent = Some(parent.clone());
                    }
                    match store.nodes.get_mut(&parent) {
                        Some(parent_node) => parent_node.children.push(key),
                        None => {
                            store.nodes.insert(
                                parent,
                                Node {
                                    parent: None,
                                    children: vec![key],
                                    payload: None,
                                    visible: true,
                                    placeholder: true,
                                },
                            );
                        }
                    }
                }
            }
        }
        if store.root.is_none() {
            return Err(TreeError::MissingRoot);
        }
        Ok(store)
    }

    /// Inserts a single new node.
    ///
    /// `at` is the position within the parent's child list (clamped;
    /// `None` appends). A parent-less record is only accepted while the
    /// store has no root. Duplicate keys and unknown parents are refused
    /// without changing the store.
    pub fn insert(&mut self, record: Record<K, P>, at: Option<usize>) -> Result<(), TreeError<K>> {
        let Record {
            key,
            parent,
            payload,
        } = record;
        if self.nodes.contains_key(&key) {
            return Err(TreeError::DuplicateKey(key));
        }
        if parent.as_ref() == Some(&key) {
            return Err(TreeError::WouldCycle(key));
        }
        match &parent {
            None => {
                if self.root.is_some() {
                    return Err(TreeError::SecondRoot(key));
                }
                self.root = Some(key.clone());
            }
            Some(p) => {
                let Some(parent_node) = self.nodes.get_mut(p) else {
                    return Err(TreeError::UnknownParent(p.clone()));
                };
                let slot = at
                    .unwrap_or(parent_node.children.len())
                    .min(parent_node.children.len());
                parent_node.children.insert(slot, key.clone());
            }
        }
        self.nodes.insert(
            key,
            Node {
                parent,
                children: Vec::new(),
                payload,
                visible: true,
                placeholder: false,
            },
        );
        Ok(())
    }

    /// Removes a node and its whole subtree.
    ///
    /// Returns every removed key (depth-first), so callers can drop the
    /// matching entries from any external index. Removing the root is
    /// refused.
    pub fn remove(&mut self, key: &K) -> Result<Vec<K>, TreeError<K>> {
        if self.root.as_ref() == Some(key) {
            return Err(TreeError::RootIsFixed);
        }
        if !self.nodes.contains_key(key) {
            return Err(TreeError::UnknownKey(key.clone()));
        }
        self.detach(key);
        let mut removed = Vec::new();
        let mut stack = vec![key.clone()];
        while let Some(k) = stack.pop() {
            // Removal from the map doubles as the visited set, so a
            // malformed cycle cannot loop.
            if let Some(node) = self.nodes.remove(&k) {
                stack.extend(node.children);
                removed.push(k);
            }
        }
        Ok(removed)
    }

    /// Renames a node, atomically updating the index slot, the parent's
    /// child list, and every child's parent back-reference.
    ///
    /// Either all of those change or none do; a half-renamed node is never
    /// observable. External indices keyed by node (such as a position index)
    /// must be rekeyed by the caller in the same step.
    pub fn rekey(&mut self, old: &K, new: K) -> Result<(), TreeError<K>> {
        if self.nodes.contains_key(&new) {
            return Err(TreeError::DuplicateKey(new));
        }
        let Some(node) = self.nodes.remove(old) else {
            return Err(TreeError::UnknownKey(old.clone()));
        };
        for child in &node.children {
            if let Some(child_node) = self.nodes.get_mut(child) {
                child_node.parent = Some(new.clone());
            }
        }
        if let Some(parent) = &node.parent
            && let Some(parent_node) = self.nodes.get_mut(parent)
            && let Some(slot) = parent_node.children.iter().position(|k| k == old)
        {
            parent_node.children[slot] = new.clone();
        }
        if self.root.as_ref() == Some(old) {
            self.root = Some(new.clone());
        }
        self.nodes.insert(new, node);
        Ok(())
    }

    /// Moves the subtree rooted at `key` next to (or under) `anchor`.
    ///
    /// Refuses to move the root, to move a node under its own subtree, and
    /// to place siblings relative to the root.
    pub fn relocate(
        &mut self,
        key: &K,
        anchor: &K,
        placement: Placement,
    ) -> Result<(), TreeError<K>> {
        if self.root.as_ref() == Some(key) {
            return Err(TreeError::RootIsFixed);
        }
        if !self.nodes.contains_key(key) {
            return Err(TreeError::UnknownKey(key.clone()));
        }
        if !self.nodes.contains_key(anchor) {
            return Err(TreeError::UnknownKey(anchor.clone()));
        }
        if key == anchor || self.is_descendant_of(anchor, key) {
            return Err(TreeError::WouldCycle(anchor.clone()));
        }
        match placement {
            Placement::Child => {
                self.detach(key);
                if let Some(anchor_node) = self.nodes.get_mut(anchor) {
                    anchor_node.children.push(key.clone());
                }
                if let Some(node) = self.nodes.get_mut(key) {
                    node.parent = Some(anchor.clone());
                }
            }
            Placement::Previous | Placement::Next => {
                let Some(parent) = self.parent_of(anchor).cloned() else {
                    return Err(TreeError::RootHasNoSiblings);
                };
                // Detach first: when source and anchor share a parent the
                // anchor's slot is only meaningful afterwards.
                self.detach(key);
                if let Some(parent_node) = self.nodes.get_mut(&parent)
                    && let Some(slot) = parent_node.children.iter().position(|k| k == anchor)
                {
                    let slot = match placement {
                        Placement::Next => slot + 1,
                        _ => slot,
                    };
                    parent_node.children.insert(slot, key.clone());
                }
                if let Some(node) = self.nodes.get_mut(key) {
                    node.parent = Some(parent);
                }
            }
        }
        Ok(())
    }

    /// Sets the fold flag of a node.
    pub fn set_visible(&mut self, key: &K, visible: bool) -> Result<(), TreeError<K>> {
        match self.nodes.get_mut(key) {
            Some(node) => {
                node.visible = visible;
                Ok(())
            }
            None => Err(TreeError::UnknownKey(key.clone())),
        }
    }

    /// Flips the fold flag of a node, returning the new value.
    pub fn toggle_visible(&mut self, key: &K) -> Result<bool, TreeError<K>> {
        match self.nodes.get_mut(key) {
            Some(node) => {
                node.visible = !node.visible;
                Ok(node.visible)
            }
            None => Err(TreeError::UnknownKey(key.clone())),
        }
    }

    /// Fold flag of a node; unknown keys read as not visible.
    pub fn is_visible(&self, key: &K) -> bool {
        self.nodes.get(key).is_some_and(|n| n.visible)
    }

    /// The root key, if the store is non-empty.
    pub fn root(&self) -> Option<&K> {
        self.root.as_ref()
    }

    /// Looks up a node by key.
    pub fn node(&self, key: &K) -> Option<&Node<K, P>> {
        self.nodes.get(key)
    }

    /// Payload of a node.
    pub fn payload(&self, key: &K) -> Option<&P> {
        self.nodes.get(key).and_then(|n| n.payload.as_ref())
    }

    /// Mutable payload of a node.
    pub fn payload_mut(&mut self, key: &K) -> Option<&mut P> {
        self.nodes.get_mut(key).and_then(|n| n.payload.as_mut())
    }

    /// Parent key of a node.
    pub fn parent_of(&self, key: &K) -> Option<&K> {
        self.nodes.get(key).and_then(|n| n.parent.as_ref())
    }

    /// Child keys of a node in sibling order; empty for unknown keys.
    pub fn children(&self, key: &K) -> &[K] {
        self.nodes.get(key).map_or(&[], |n| &n.children)
    }

    /// The sibling immediately before `key` under its parent.
    pub fn prev_sibling(&self, key: &K) -> Option<&K> {
        let siblings = self.children(self.parent_of(key)?);
        let slot = siblings.iter().position(|k| k == key)?;
        slot.checked_sub(1).map(|i| &siblings[i])
    }

    /// The sibling immediately after `key` under its parent.
    pub fn next_sibling(&self, key: &K) -> Option<&K> {
        let siblings = self.children(self.parent_of(key)?);
        let slot = siblings.iter().position(|k| k == key)?;
        siblings.get(slot + 1)
    }

    /// `true` when `key` sits strictly below `ancestor`.
    ///
    /// The walk is bounded by the store size so a malformed parent chain
    /// cannot spin forever.
    pub fn is_descendant_of(&self, key: &K, ancestor: &K) -> bool {
        let mut current = self.parent_of(key);
        let mut steps = self.nodes.len();
        while let Some(k) = current {
            if k == ancestor {
                return true;
            }
            if steps == 0 {
                return false;
            }
            steps -= 1;
            current = self.parent_of(k);
        }
        false
    }

    /// Whether `key` is indexed.
    pub fn contains(&self, key: &K) -> bool {
        self.nodes.contains_key(key)
    }

    /// Number of indexed nodes (placeholders included).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when no nodes are indexed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over all indexed keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.nodes.keys()
    }

    /// Unlinks `key` from its parent's child list, leaving the node itself
    /// (and its `parent` field) alone.
    fn detach(&mut self, key: &K) {
        let Some(parent) = self.parent_of(key).cloned() else {
            return;
        };
        if let Some(parent_node) = self.nodes.get_mut(&parent)
            && let Some(slot) = parent_node.children.iter().position(|k| k == key)
        {
            parent_node.children.remove(slot);
        }
    }
}
