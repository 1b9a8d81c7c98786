// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll pacing and the wheel's layout manager.
//!
//! Hosts normally ship a smooth scroller tuned for long lists. A wheel moves
//! at most a few slots at a time, so it asks for a slower, deliberate settle
//! motion instead. [`WheelLayout`] bundles that pace with the
//! [`TransformDispatcher`] that runs after every layout pass; both are plain
//! values picked at construction.

use core::time::Duration;

use crate::dispatch::TransformDispatcher;
use crate::host::{ListHost, ScrollRequest};
use crate::snap::{SnapStrategy, SnapTracker};
use crate::transform::ItemTransformer;

/// Speed of an animated scroll, in milliseconds per inch of travel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollPace {
    millis_per_inch: f32,
}

impl Default for ScrollPace {
    fn default() -> Self {
        Self::WHEEL
    }
}

impl ScrollPace {
    /// The pace a typical host list uses for its own smooth scrolls.
    pub const HOST_DEFAULT: Self = Self::new(25.0);
    /// The slower pace used by wheels.
    pub const WHEEL: Self = Self::new(100.0);

    /// Creates a pace of `millis_per_inch`.
    #[must_use]
    pub const fn new(millis_per_inch: f32) -> Self {
        Self { millis_per_inch }
    }

    /// Milliseconds per inch of travel.
    #[must_use]
    pub const fn millis_per_inch(&self) -> f32 {
        self.millis_per_inch
    }

    /// Milliseconds per device pixel at `density_dpi`.
    #[must_use]
    pub fn millis_per_px(&self, density_dpi: f32) -> f32 {
        self.millis_per_inch / density_dpi
    }

    /// Time to travel `distance_px` device pixels at `density_dpi`, rounded up
    /// to whole milliseconds.
    ///
    /// Degenerate densities (zero, negative, NaN) saturate to [`Duration::MAX`].
    #[must_use]
    pub fn duration_for(&self, distance_px: f64, density_dpi: f32) -> Duration {
        let per_px = f64::from(self.millis_per_px(density_dpi));
        if per_px.is_sign_negative() {
            return Duration::MAX;
        }
        let millis = (distance_px.abs() * per_px).ceil();
        if !millis.is_finite() {
            return Duration::MAX;
        }
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "Finite and non-negative here; `as` saturates anything larger"
        )]
        let millis = millis as u64;
        Duration::from_millis(millis)
    }
}

/// Layout manager of a wheel: scroll pacing plus the post-layout transform hook.
#[derive(Clone, Copy, Debug, Default)]
pub struct WheelLayout {
    pace: ScrollPace,
    dispatcher: TransformDispatcher,
}

impl WheelLayout {
    /// Creates a layout that animates scrolls at `pace`.
    #[must_use]
    pub const fn new(pace: ScrollPace) -> Self {
        Self {
            pace,
            dispatcher: TransformDispatcher::new(),
        }
    }

    /// Pace used for animated scrolls.
    #[must_use]
    pub const fn pace(&self) -> ScrollPace {
        self.pace
    }

    /// Replaces the pace used for animated scrolls.
    pub fn set_pace(&mut self, pace: ScrollPace) {
        self.pace = pace;
    }

    /// The transform dispatcher run after layout.
    #[must_use]
    pub const fn dispatcher(&self) -> &TransformDispatcher {
        &self.dispatcher
    }

    /// Mutable access to the transform dispatcher.
    pub fn dispatcher_mut(&mut self) -> &mut TransformDispatcher {
        &mut self.dispatcher
    }

    /// Records a change in the host's child composition.
    pub fn on_items_changed(&mut self) {
        self.dispatcher.on_items_changed();
    }

    /// Runs the post-layout hook.
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
        self.dispatcher.on_layout_children(host, snap, transformer)
    }

    /// Issues an instant or paced scroll to `target`.
    pub fn scroll_to_position<H: ListHost + ?Sized>(
        &self,
        host: &mut H,
        target: usize,
        animated: bool,
    ) {
        let request = if animated {
            ScrollRequest::Smooth {
                target,
                pace: self.pace,
            }
        } else {
            ScrollRequest::Jump { target }
        };
        tracing::debug!(?request, "wheel scroll requested");
        host.scroll(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SlotTrack;

    #[test]
    fn wheel_pace_is_four_times_slower_than_host() {
        let dpi = 160.0;
        assert_eq!(ScrollPace::HOST_DEFAULT.millis_per_px(dpi), 25.0 / 160.0);
        assert_eq!(ScrollPace::WHEEL.millis_per_px(dpi), 100.0 / 160.0);
        assert_eq!(
            ScrollPace::WHEEL.duration_for(160.0, dpi),
            Duration::from_millis(100)
        );
        assert_eq!(
            ScrollPace::HOST_DEFAULT.duration_for(-160.0, dpi),
            Duration::from_millis(25)
        );
    }

    #[test]
    fn durations_round_up_and_saturate() {
        // 1px at 100ms/inch and 320dpi is 0.3125ms.
        assert_eq!(
            ScrollPace::WHEEL.duration_for(1.0, 320.0),
            Duration::from_millis(1)
        );
        assert_eq!(ScrollPace::WHEEL.duration_for(10.0, 0.0), Duration::MAX);
    }

    #[test]
    fn animated_requests_carry_the_layout_pace() {
        let mut track = SlotTrack::new(10, 40, 200);
        let layout = WheelLayout::new(ScrollPace::new(60.0));

        layout.scroll_to_position(&mut track, 3, true);
        layout.scroll_to_position(&mut track, 5, false);
        assert_eq!(
            track.scroll_log(),
            &[
                ScrollRequest::Smooth {
                    target: 3,
                    pace: ScrollPace::new(60.0),
                },
                ScrollRequest::Jump { target: 5 },
            ]
        );
    }
}
