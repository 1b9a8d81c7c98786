// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Traits and small types describing the host list engine.
//!
//! The wheel never owns views, recycling, or scroll physics. A host list
//! (a virtualized list view, a retained widget tree, a test fixture such as
//! [`SlotTrack`](crate::SlotTrack), ...) implements [`ListHost`] and forwards
//! its measure, layout, scroll, and draw callbacks to a
//! [`WheelPicker`](crate::WheelPicker).
//!
//! "Attached children" are the views the host currently has laid out, in
//! attach order. Child slots (`0..child_count()`) are distinct from adapter
//! positions (`0..item_count()`): [`ListHost::position_of`] maps one to the
//! other.

use kurbo::Rect;

use crate::scroll::ScrollPace;

/// Stable identity of an item, used only for selection reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub i64);

impl ItemId {
    /// Reported when the data source cannot supply an identity.
    pub const UNKNOWN: Self = Self(-1);
}

/// Data source backing the list.
pub trait ItemSource {
    /// Number of items.
    fn item_count(&self) -> usize;

    /// Stable identity of the item at `position`, if the source has one.
    fn item_id(&self, position: usize) -> Option<ItemId>;
}

/// Height constraint handed down by the host's parent during measure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeightSpec {
    /// The parent fixed the height.
    Exactly(u32),
    /// Size to content, up to the given bound.
    AtMost(u32),
    /// Size to content without a bound.
    Unspecified,
}

impl HeightSpec {
    /// Returns `true` when the wheel is free to choose its own height.
    #[must_use]
    pub const fn is_intrinsic(self) -> bool {
        !matches!(self, Self::Exactly(_))
    }
}

/// Height declared by the wheel's owner, read once on first attach.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutHeight {
    /// A fixed pixel height.
    Fixed(u32),
    /// Fill the parent.
    MatchParent,
    /// Size to content.
    WrapContent,
}

/// Vertical content padding, in device pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Padding {
    /// Padding above the first item.
    pub top: u32,
    /// Padding below the last item.
    pub bottom: u32,
}

impl Padding {
    /// Equal top and bottom padding.
    #[must_use]
    pub const fn symmetric(value: u32) -> Self {
        Self {
            top: value,
            bottom: value,
        }
    }
}

/// A scroll command issued to the host list.
///
/// The host is responsible for superseding any scroll already in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollRequest {
    /// Move immediately so that `target` sits in the first slot after the top padding.
    Jump {
        /// Adapter position to bring into place.
        target: usize,
    },
    /// Animate towards `target` at the given pace.
    Smooth {
        /// Adapter position to bring into place.
        target: usize,
        /// Speed of the animation.
        pace: ScrollPace,
    },
}

impl ScrollRequest {
    /// Adapter position the request scrolls to.
    #[must_use]
    pub const fn target(&self) -> usize {
        match *self {
            Self::Jump { target } | Self::Smooth { target, .. } => target,
        }
    }
}

/// The host list engine a wheel is attached to.
///
/// All geometry is in the wheel's local coordinate space, with `y` growing
/// downwards and the top edge of the wheel at `0.0`.
pub trait ListHost {
    /// View type of the attached children.
    type View;

    /// Number of currently attached children.
    fn child_count(&self) -> usize;

    /// Adapter position of the attached child in `slot`.
    ///
    /// Returns `None` if the slot is out of range or the child is in
    /// transition (for example being removed).
    fn position_of(&self, slot: usize) -> Option<usize>;

    /// Decorated layout bounds of the attached child in `slot`.
    fn child_bounds(&self, slot: usize) -> Option<Rect>;

    /// Measures the attached child in `slot` and returns its decorated height
    /// including vertical margins.
    fn measure_child(&mut self, slot: usize) -> Option<u32>;

    /// Mutable access to the view of the attached child in `slot`.
    fn child_view_mut(&mut self, slot: usize) -> Option<&mut Self::View>;

    /// The wheel's own bounds in local coordinates.
    fn viewport(&self) -> Rect;

    /// Currently applied content padding.
    fn padding(&self) -> Padding;

    /// Applies new content padding.
    fn set_padding(&mut self, padding: Padding);

    /// Runs the host's default measurement and returns the measured height.
    fn measure(&mut self, spec: HeightSpec) -> u32;

    /// Executes a scroll command.
    fn scroll(&mut self, request: ScrollRequest);

    /// The data source, if one is attached.
    fn source(&self) -> Option<&dyn ItemSource>;
}
