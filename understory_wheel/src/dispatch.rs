// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Applies an [`ItemTransformer`] to every attached child.

use crate::host::ListHost;
use crate::snap::{SnapStrategy, SnapTracker};
use crate::transform::ItemTransformer;

/// Drives item transforms from scroll and layout events.
///
/// Scroll deltas always re-apply transforms. Layout passes only do so after
/// [`on_items_changed`](Self::on_items_changed) or
/// [`invalidate`](Self::invalidate), so an unchanged child set is not
/// transformed twice per frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct TransformDispatcher {
    dirty: bool,
}

impl TransformDispatcher {
    /// Creates a clean dispatcher.
    #[must_use]
    pub const fn new() -> Self {
        Self { dirty: false }
    }

    /// Returns `true` if the next layout pass will re-apply transforms.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Records that the host's child composition changed.
    pub fn on_items_changed(&mut self) {
        self.dirty = true;
    }

    /// Forces the next layout pass to re-apply transforms.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Handles a raw scroll delta (sub-pixel deltas included).
    ///
    /// Returns the centered position the transforms were computed against.
    pub fn on_scroll_changed<H, S, T>(
        &mut self,
        host: &mut H,
        snap: &SnapTracker<S>,
        transformer: &T,
    ) -> Option<usize>
    where
        H: ListHost + ?Sized,
        S: SnapStrategy,
        T: ItemTransformer<H::View> + ?Sized,
    {
        transform_items(host, snap, transformer)
    }

    /// Post-layout hook: re-applies transforms if the child set changed.
    pub fn on_layout_children<H, S, T>(
        &mut self,
        host: &mut H,
        snap: &SnapTracker<S>,
        transformer: &T,
    ) -> Option<usize>
    where
        H: ListHost + ?Sized,
        S: SnapStrategy,
        T: ItemTransformer<H::View> + ?Sized,
    {
        if !self.dirty {
            return None;
        }
        let centered = transform_items(host, snap, transformer);
        self.dirty = false;
        centered
    }
}

fn transform_items<H, S, T>(host: &mut H, snap: &SnapTracker<S>, transformer: &T) -> Option<usize>
where
    H: ListHost + ?Sized,
    S: SnapStrategy,
    T: ItemTransformer<H::View> + ?Sized,
{
    let center = snap.centered_index(host)?;
    for slot in 0..host.child_count() {
        let Some(position) = host.position_of(slot) else {
            continue;
        };
        if let Some(view) = host.child_view_mut(slot) {
            transformer.transform(view, position, center);
        }
    }
    tracing::trace!(center, children = host.child_count(), "transformed wheel items");
    Some(center)
}

#[cfg(test)]
mod tests {
    use kurbo::Vec2;

    use super::*;
    use crate::track::{Unsettled, UnsettledTrack};
    use crate::{ScalingItemTransformer, SlotTrack};

    fn scales(track: &SlotTrack) -> Vec<(usize, f64)> {
        track
            .attached()
            .map(|(position, view)| (position, view.scale.y))
            .collect()
    }

    #[test]
    fn scroll_scales_relative_to_center() {
        let mut track = SlotTrack::new(10, 40, 200);
        track.set_padding_symmetric(80);
        track.set_scroll_offset(80.0);
        let snap = SnapTracker::default();
        let mut dispatcher = TransformDispatcher::new();
        let t = ScalingItemTransformer::default();

        assert_eq!(dispatcher.on_scroll_changed(&mut track, &snap, &t), Some(2));
        for (position, scale) in scales(&track) {
            let expected = t.scale_for(position, 2);
            assert!((scale - expected).abs() < 1e-12, "{position}: {scale}");
        }
    }

    #[test]
    fn dispatch_is_idempotent() {
        let mut track = SlotTrack::new(10, 40, 200);
        track.set_padding_symmetric(80);
        track.set_scroll_offset(120.0);
        let snap = SnapTracker::default();
        let mut dispatcher = TransformDispatcher::new();
        let t = ScalingItemTransformer::default();

        dispatcher.on_scroll_changed(&mut track, &snap, &t);
        let first = scales(&track);
        dispatcher.on_scroll_changed(&mut track, &snap, &t);
        assert_eq!(scales(&track), first);
    }

    #[test]
    fn layout_hook_only_runs_when_dirty() {
        let mut track = SlotTrack::new(10, 40, 200);
        track.set_padding_symmetric(80);
        let snap = SnapTracker::default();
        let mut dispatcher = TransformDispatcher::new();
        let t = ScalingItemTransformer::default();

        assert_eq!(dispatcher.on_layout_children(&mut track, &snap, &t), None);
        assert!(track.attached().all(|(_, v)| v.scale == Vec2::new(1.0, 1.0)));

        dispatcher.on_items_changed();
        assert_eq!(dispatcher.on_layout_children(&mut track, &snap, &t), Some(0));
        assert!(!dispatcher.is_dirty());
        assert!(track.attached().any(|(_, v)| v.scale.x < 1.0));
    }

    #[test]
    fn empty_host_is_a_no_op() {
        let mut track = SlotTrack::new(0, 40, 200);
        let snap = SnapTracker::default();
        let mut dispatcher = TransformDispatcher::new();
        dispatcher.invalidate();
        let t = ScalingItemTransformer::default();
        assert_eq!(dispatcher.on_layout_children(&mut track, &snap, &t), None);
        // The flag is consumed even when nothing could be centered.
        assert!(!dispatcher.is_dirty());
    }

    #[test]
    fn unresolvable_center_leaves_views_untouched() {
        let snap = SnapTracker::default();
        let t = ScalingItemTransformer::default();
        for missing in [Unsettled::Positions, Unsettled::Bounds] {
            let mut track = UnsettledTrack::new(missing);
            let mut dispatcher = TransformDispatcher::new();
            assert_eq!(dispatcher.on_scroll_changed(&mut track, &snap, &t), None);
            dispatcher.invalidate();
            assert_eq!(dispatcher.on_layout_children(&mut track, &snap, &t), None);
            assert!(track.untouched(), "{missing:?}");
        }
    }
}
