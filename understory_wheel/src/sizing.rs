// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Self-sizing and center-slot alignment.
//!
//! A wheel shows a whole number of equally tall slots and keeps the middle
//! one aligned with an item. Both follow from a single derived quantity, the
//! item height: the largest decorated height (margins included) among the
//! currently attached children.
//!
//! - When the wheel may pick its own height, it becomes exactly
//!   `item_height * wheel_item_count`.
//! - Top and bottom padding are `(measured_height - item_height) / 2`, which
//!   lets the first and last items reach the center slot.
//!
//! Changing the padding moves which item sits on the center line, so the
//! controller re-snaps afterwards according to its [`ResnapPolicy`].

use crate::host::{HeightSpec, LayoutHeight, ListHost, Padding, ScrollRequest};
use crate::snap::{SnapStrategy, SnapTracker};

/// Default number of simultaneously visible slots.
pub const DEFAULT_WHEEL_ITEM_COUNT: u32 = 5;

/// Where to scroll after the padding changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResnapPolicy {
    /// Jump back to the first item unless it is already centered.
    #[default]
    FirstItem,
    /// Jump back to whichever item was centered before the change.
    PreserveSelection,
}

/// What a measure pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeasureOutcome {
    /// Final measured height of the wheel.
    pub measured_height: u32,
    /// Derived item height, if any child was attached.
    pub item_height: Option<u32>,
    /// Padding newly applied during this pass.
    pub padding: Option<Padding>,
    /// Target of the forced re-snap issued during this pass.
    pub resnap: Option<usize>,
}

/// Keeps the wheel's height and padding consistent with its item height.
#[derive(Clone, Copy, Debug)]
pub struct SelfSizingController {
    wheel_item_count: u32,
    resnap: ResnapPolicy,
    item_height: Option<u32>,
    initial_alignment: bool,
}

impl Default for SelfSizingController {
    fn default() -> Self {
        Self::new(DEFAULT_WHEEL_ITEM_COUNT, ResnapPolicy::default())
    }
}

impl SelfSizingController {
    /// Creates a controller showing `wheel_item_count` slots when self-sized.
    #[must_use]
    pub const fn new(wheel_item_count: u32, resnap: ResnapPolicy) -> Self {
        Self {
            wheel_item_count,
            resnap,
            item_height: None,
            initial_alignment: false,
        }
    }

    /// Number of slots shown when self-sized.
    #[must_use]
    pub const fn wheel_item_count(&self) -> u32 {
        self.wheel_item_count
    }

    /// Re-snap behavior after a padding change.
    #[must_use]
    pub const fn resnap_policy(&self) -> ResnapPolicy {
        self.resnap
    }

    /// Item height derived by the last measure pass.
    #[must_use]
    pub const fn item_height(&self) -> Option<u32> {
        self.item_height
    }

    /// Returns `true` while the initial alignment waits for a layout pass.
    #[must_use]
    pub const fn is_awaiting_initial_alignment(&self) -> bool {
        self.initial_alignment
    }

    /// Largest decorated height among the attached children.
    pub fn measure_item_height<H: ListHost + ?Sized>(host: &mut H) -> Option<u32> {
        (0..host.child_count())
            .filter_map(|slot| host.measure_child(slot))
            .max()
    }

    /// Symmetric padding that centers one slot of `item_height` in `measured_height`.
    #[must_use]
    pub const fn padding_for(measured_height: u32, item_height: u32) -> Padding {
        Padding::symmetric(measured_height.saturating_sub(item_height) / 2)
    }

    /// Handles a measure pass and returns the measured height.
    pub fn on_measure<H, S>(
        &mut self,
        host: &mut H,
        spec: HeightSpec,
        snap: &SnapTracker<S>,
    ) -> MeasureOutcome
    where
        H: ListHost + ?Sized,
        S: SnapStrategy,
    {
        let item_height = Self::measure_item_height(host);
        self.item_height = item_height;
        // Resolved against the old viewport; measuring moves the center line.
        let previous = snap.centered_index(host);

        let measured_height = match item_height {
            Some(ih) if spec.is_intrinsic() => {
                host.measure(HeightSpec::Exactly(ih.saturating_mul(self.wheel_item_count)))
            }
            _ => host.measure(spec),
        };
        let mut outcome = MeasureOutcome {
            measured_height,
            item_height,
            ..MeasureOutcome::default()
        };
        let Some(ih) = item_height else {
            return outcome;
        };

        let padding = Self::padding_for(measured_height, ih);
        if host.padding() == padding {
            return outcome;
        }
        host.set_padding(padding);
        outcome.padding = Some(padding);
        tracing::debug!(
            measured_height,
            item_height = ih,
            padding = padding.top,
            "wheel padding changed"
        );

        let target = match self.resnap {
            ResnapPolicy::FirstItem => previous.filter(|&p| p != 0).map(|_| 0),
            ResnapPolicy::PreserveSelection => previous,
        };
        if let Some(target) = target {
            tracing::debug!(target, ?previous, "re-snapping after padding change");
            host.scroll(ScrollRequest::Jump { target });
            outcome.resnap = Some(target);
        }
        outcome
    }

    /// Handles the first attach of a data source.
    ///
    /// Any height other than [`LayoutHeight::WrapContent`] arms a one-shot
    /// alignment that runs after the next completed layout.
    pub fn on_attach(&mut self, layout_height: LayoutHeight) {
        self.initial_alignment = layout_height != LayoutHeight::WrapContent;
    }

    /// Runs the one-shot initial alignment, if armed.
    ///
    /// Applies the padding for the current viewport and returns `true` if the
    /// caller should post a deferred jump to the first item. The alignment is
    /// consumed even if no child could be measured yet.
    pub fn on_layout_completed<H: ListHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if !core::mem::take(&mut self.initial_alignment) {
            return false;
        }
        let Some(ih) = Self::measure_item_height(host) else {
            return false;
        };
        self.item_height = Some(ih);
        let padding = Self::padding_for(viewport_px(host.viewport().height()), ih);
        host.set_padding(padding);
        tracing::debug!(item_height = ih, padding = padding.top, "initial wheel alignment");
        true
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Viewport heights are non-negative device pixels well within u32"
)]
fn viewport_px(height: f64) -> u32 {
    height.max(0.0).round() as u32
}
