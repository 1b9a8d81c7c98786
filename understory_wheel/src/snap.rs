// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Center-slot resolution.
//!
//! A [`SnapStrategy`] picks the attached child that the wheel considers
//! "snapped". [`SnapTracker`] wraps a strategy and turns its answer into an
//! adapter position. Every miss (no children, unresolved bounds, a child
//! without a position) is `None`, which callers treat as "no change".

use kurbo::Rect;

use crate::host::ListHost;

/// The snapped child: its attached slot and its adapter position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Centered {
    /// Slot among the attached children.
    pub slot: usize,
    /// Adapter position of that child.
    pub position: usize,
}

/// Finds the attached child a wheel should snap to.
pub trait SnapStrategy {
    /// Returns the slot of the snapped child, or `None` if it cannot be resolved.
    fn find_snap_slot<H: ListHost + ?Sized>(&self, host: &H) -> Option<usize>;
}

/// Snaps to the child whose center is closest to the viewport's center line.
///
/// Ties keep the earliest child in attach order.
#[derive(Clone, Copy, Debug, Default)]
pub struct CenterLineSnap;

impl CenterLineSnap {
    /// Distance from a child's vertical center to `line`.
    fn distance(bounds: Rect, line: f64) -> f64 {
        (bounds.center().y - line).abs()
    }
}

impl SnapStrategy for CenterLineSnap {
    fn find_snap_slot<H: ListHost + ?Sized>(&self, host: &H) -> Option<usize> {
        let line = host.viewport().center().y;
        let mut closest: Option<(usize, f64)> = None;
        for slot in 0..host.child_count() {
            // A child without bounds means layout is in flux; report nothing.
            let distance = Self::distance(host.child_bounds(slot)?, line);
            if closest.is_none_or(|(_, best)| distance < best) {
                closest = Some((slot, distance));
            }
        }
        closest.map(|(slot, _)| slot)
    }
}

/// Resolves the centered item of a wheel through a [`SnapStrategy`].
#[derive(Clone, Debug)]
pub struct SnapTracker<S = CenterLineSnap> {
    strategy: S,
}

impl Default for SnapTracker {
    fn default() -> Self {
        Self::new(CenterLineSnap)
    }
}

impl<S: SnapStrategy> SnapTracker<S> {
    /// Creates a tracker around `strategy`.
    #[must_use]
    pub const fn new(strategy: S) -> Self {
        Self { strategy }
    }

    /// Returns the strategy in use.
    #[must_use]
    pub const fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Resolves the snapped child and its adapter position.
    #[must_use]
    pub fn centered_child<H: ListHost + ?Sized>(&self, host: &H) -> Option<Centered> {
        if host.child_count() == 0 {
            return None;
        }
        let slot = self.strategy.find_snap_slot(host)?;
        let position = host.position_of(slot)?;
        Some(Centered { slot, position })
    }

    /// Resolves the adapter position of the centered item.
    #[must_use]
    pub fn centered_index<H: ListHost + ?Sized>(&self, host: &H) -> Option<usize> {
        self.centered_child(host).map(|c| c.position)
    }
}
