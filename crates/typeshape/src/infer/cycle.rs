// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Stack of structs currently being descended.

use std::any::TypeId;

/// One struct under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub id: TypeId,
    /// Name the struct descriptor will carry.
    pub name: String,
}

/// Ancestor stack for a single inference call.
#[derive(Debug, Default)]
pub struct CycleTracker {
    frames: Vec<Frame>,
}

impl CycleTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of struct levels between the top of the stack and `id`'s frame,
    /// or `None` if `id` is not an ancestor. The innermost frame is depth 0.
    pub fn depth_of(&self, id: TypeId) -> Option<u32> {
        self.ancestor(id).map(|(depth, _)| depth)
    }

    /// Depth and frame of the nearest ancestor with `id`.
    pub fn ancestor(&self, id: TypeId) -> Option<(u32, &Frame)> {
        let idx = self.frames.iter().rposition(|frame| frame.id == id)?;
        let depth = u32::try_from(self.frames.len() - 1 - idx).ok()?;
        Some((depth, &self.frames[idx]))
    }

    pub fn push(&mut self, id: TypeId, name: String) {
        self.frames.push(Frame { id, name });
    }

    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct A;
    struct B;
    struct C;

    #[test]
    fn test_depth_counts_from_top() {
        let mut tracker = CycleTracker::new();
        tracker.push(TypeId::of::<A>(), "A".into());
        tracker.push(TypeId::of::<B>(), "B".into());

        assert_eq!(tracker.depth_of(TypeId::of::<B>()), Some(0));
        assert_eq!(tracker.depth_of(TypeId::of::<A>()), Some(1));
        assert_eq!(tracker.depth_of(TypeId::of::<C>()), None);
    }

    #[test]
    fn test_pop_restores_previous_state() {
        let mut tracker = CycleTracker::new();
        tracker.push(TypeId::of::<A>(), "A".into());
        tracker.push(TypeId::of::<B>(), String::new());

        let frame = tracker.pop().expect("frame");
        assert_eq!(frame.id, TypeId::of::<B>());
        assert!(frame.name.is_empty());
        assert_eq!(tracker.depth_of(TypeId::of::<B>()), None);
        assert_eq!(tracker.len(), 1);

        tracker.pop();
        assert!(tracker.is_empty());
        assert!(tracker.pop().is_none());
    }
}
