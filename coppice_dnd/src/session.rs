// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-drag bookkeeping.

use coppice_tree::Placement;
use kurbo::Rect;

/// The outcome of resolving one pointer position against the tree.
///
/// `placement: None` means the ghost does overlap `target` but no insertion
/// is permitted there (the UI typically renders a "not allowed" cue).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution<K> {
    /// The collision target the ghost currently covers.
    pub target: K,
    /// The insertion the drop would perform, if any.
    pub placement: Option<Placement>,
}

/// State of one drag gesture: the dragged key, the live ghost rectangle,
/// and the last resolved collision.
///
/// The session is pure bookkeeping; [`TreeEditor`](crate::TreeEditor) feeds
/// it. It is created empty, filled on every pointer move, and consumed by
/// [`DragSession::end`] on drop or cancellation. Ending a session never
/// touches the tree or the position index.
#[derive(Clone, Debug)]
pub struct DragSession<K> {
    source: Option<K>,
    ghost: Option<Rect>,
    resolution: Option<Resolution<K>>,
}

impl<K> Default for DragSession<K> {
    fn default() -> Self {
        Self {
            source: None,
            ghost: None,
            resolution: None,
        }
    }
}

impl<K> DragSession<K> {
    /// Creates an idle session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins tracking a drag of `source`, clearing any previous state.
    pub fn start(&mut self, source: K) {
        self.source = Some(source);
        self.ghost = None;
        self.resolution = None;
    }

    /// `true` while a drag is being tracked.
    pub fn is_active(&self) -> bool {
        self.source.is_some()
    }

    /// The key being dragged.
    pub fn source(&self) -> Option<&K> {
        self.source.as_ref()
    }

    /// The most recent ghost rectangle.
    pub fn ghost(&self) -> Option<Rect> {
        self.ghost
    }

    /// The last resolved collision, if any pointer move resolved one.
    pub fn resolution(&self) -> Option<&Resolution<K>> {
        self.resolution.as_ref()
    }

    /// Records the ghost rectangle for the current pointer position.
    pub fn set_ghost(&mut self, ghost: Rect) {
        self.ghost = Some(ghost);
    }

    /// Records the resolution computed for the current ghost; `None` means
    /// the ghost overlaps nothing.
    pub fn resolve(&mut self, resolution: Option<Resolution<K>>) {
        self.resolution = resolution;
    }

    /// Ends the drag, returning the final resolution and resetting the
    /// session to idle.
    pub fn end(&mut self) -> Option<Resolution<K>> {
        self.source = None;
        self.ghost = None;
        self.resolution.take()
    }

    /// Abandons the drag without reporting a resolution.
    pub fn cancel(&mut self) {
        self.source = None;
        self.ghost = None;
        self.resolution = None;
    }
}

#[cfg(test)]
mod tests {
    use coppice_tree::Placement;

    use super::*;

    #[test]
    fn fresh_session_is_idle() {
        let session = DragSession::<u32>::new();
        assert!(!session.is_active());
        assert_eq!(session.source(), None);
        assert_eq!(session.ghost(), None);
        assert!(session.resolution().is_none());
    }

    #[test]
    fn start_clears_previous_state() {
        let mut session = DragSession::new();
        session.start(1);
        session.set_ghost(Rect::new(0.0, 0.0, 5.0, 5.0));
        session.resolve(Some(Resolution {
            target: 9,
            placement: Some(Placement::Child),
        }));

        session.start(2);
        assert_eq!(session.source(), Some(&2));
        assert_eq!(session.ghost(), None);
        assert!(session.resolution().is_none());
    }

    #[test]
    fn end_yields_the_last_resolution_once() {
        let mut session = DragSession::new();
        session.start(1);
        session.resolve(Some(Resolution {
            target: 2,
            placement: Some(Placement::Next),
        }));
        let resolution = session.end().unwrap();
        assert_eq!(resolution.target, 2);
        assert_eq!(resolution.placement, Some(Placement::Next));
        assert!(!session.is_active());
        assert!(session.end().is_none());
    }

    #[test]
    fn cancel_discards_everything() {
        let mut session = DragSession::new();
        session.start(1);
        session.resolve(Some(Resolution {
            target: 2,
            placement: None,
        }));
        session.cancel();
        assert!(!session.is_active());
        assert!(session.resolution().is_none());
    }
}
