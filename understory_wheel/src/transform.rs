// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-item visual transforms.

use kurbo::Vec2;

/// Default distance coefficient of [`ScalingItemTransformer`].
pub const DEFAULT_SCALE_COEFFICIENT: f64 = 0.2;

/// Applies a visual transform to an attached item based on its distance from
/// the centered item.
///
/// Implementations must set state rather than accumulate it: calling
/// `transform` twice with the same arguments leaves the view as if it had been
/// called once.
pub trait ItemTransformer<V: ?Sized> {
    /// Transforms `view`, which shows the item at `position`, given that the
    /// item at `center_position` is currently centered.
    fn transform(&self, view: &mut V, position: usize, center_position: usize);
}

impl<V: ?Sized, F> ItemTransformer<V> for F
where
    F: Fn(&mut V, usize, usize),
{
    fn transform(&self, view: &mut V, position: usize, center_position: usize) {
        self(view, position, center_position);
    }
}

/// A view whose render scale can be set.
pub trait ScaledView {
    /// Sets the horizontal and vertical scale factors.
    fn set_scale(&mut self, scale: Vec2);
}

/// Scales items down linearly with their distance from the center.
///
/// The scale factor is `max(0, 1 - distance * coefficient)` on both axes, so
/// with the default coefficient of `0.2` items five or more slots away vanish.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalingItemTransformer {
    coefficient: f64,
}

impl Default for ScalingItemTransformer {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE_COEFFICIENT)
    }
}

impl ScalingItemTransformer {
    /// Creates a transformer with the given per-slot coefficient.
    #[must_use]
    pub const fn new(coefficient: f64) -> Self {
        Self { coefficient }
    }

    /// Returns the per-slot coefficient.
    #[must_use]
    pub const fn coefficient(&self) -> f64 {
        self.coefficient
    }

    /// Scale factor for an item at `position` while `center_position` is centered.
    #[must_use]
    pub fn scale_for(&self, position: usize, center_position: usize) -> f64 {
        #[allow(
            clippy::cast_precision_loss,
            reason = "Slot distances are far below 2^52"
        )]
        let distance = position.abs_diff(center_position) as f64;
        (1.0 - distance * self.coefficient).max(0.0)
    }
}

impl<V: ScaledView + ?Sized> ItemTransformer<V> for ScalingItemTransformer {
    fn transform(&self, view: &mut V, position: usize, center_position: usize) {
        let s = self.scale_for(position, center_position);
        view.set_scale(Vec2::new(s, s));
    }
}
