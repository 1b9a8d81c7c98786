// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`ListHost`] over a strip of equally tall slots.

use core::fmt;
use core::ops::Range;

use kurbo::{Rect, Vec2};

use crate::host::{HeightSpec, ItemId, ItemSource, ListHost, Padding, ScrollRequest};
use crate::transform::ScaledView;

/// View state of one item in a [`SlotTrack`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotView {
    /// Render scale last applied by an item transformer.
    pub scale: Vec2,
}

impl Default for SlotView {
    fn default() -> Self {
        Self {
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl ScaledView for SlotView {
    fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }
}

type IdFn = dyn Fn(usize) -> ItemId;

/// Reference host list: a dense strip of uniform slots behind a vertical viewport.
///
/// This type:
/// - stores item count, per-item height and margins, viewport size, padding,
///   and scroll offset,
/// - treats every slot intersecting the viewport as an attached child, in
///   position order,
/// - executes scroll requests instantly and keeps a log of them.
///
/// It has no recycling or animation; it exists to drive a
/// [`WheelPicker`](crate::WheelPicker) headlessly in demos and tests.
///
/// ```rust
/// use understory_wheel::{ListHost, ScrollRequest, SlotTrack};
///
/// let mut track = SlotTrack::new(10, 40, 200);
/// track.set_padding_symmetric(80);
/// assert_eq!(track.attached().map(|(p, _)| p).collect::<Vec<_>>(), [0, 1, 2]);
///
/// // Item 4 lands right below the top padding, in the middle slot.
/// track.scroll(ScrollRequest::Jump { target: 4 });
/// assert_eq!(track.scroll_offset(), 160.0);
/// assert_eq!(track.position_of(2), Some(4));
/// assert_eq!(track.child_bounds(2).map(|r| r.y0), Some(80.0));
/// ```
pub struct SlotTrack {
    len: usize,
    item_height: u32,
    margin_top: u32,
    margin_bottom: u32,
    width: u32,
    viewport_height: u32,
    padding: Padding,
    scroll_offset: f64,
    views: Vec<SlotView>,
    scroll_log: Vec<ScrollRequest>,
    ids: Option<Box<IdFn>>,
}

impl fmt::Debug for SlotTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotTrack")
            .field("len", &self.len)
            .field("item_height", &self.item_height)
            .field("viewport_height", &self.viewport_height)
            .field("padding", &self.padding)
            .field("scroll_offset", &self.scroll_offset)
            .field("has_ids", &self.ids.is_some())
            .finish_non_exhaustive()
    }
}

impl SlotTrack {
    /// Creates a track of `len` items, each `item_height` pixels tall, behind
    /// a viewport `viewport_height` pixels tall.
    #[must_use]
    pub fn new(len: usize, item_height: u32, viewport_height: u32) -> Self {
        Self {
            len,
            item_height,
            margin_top: 0,
            margin_bottom: 0,
            width: 0,
            viewport_height,
            padding: Padding::default(),
            scroll_offset: 0.0,
            views: vec![SlotView::default(); len],
            scroll_log: Vec::new(),
            ids: None,
        }
    }

    /// Number of items.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the track has no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sets the number of items, keeping existing view state.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.views.resize(len, SlotView::default());
        self.set_scroll_offset(self.scroll_offset);
    }

    /// Sets the vertical margins around every item.
    pub fn set_item_margins(&mut self, top: u32, bottom: u32) {
        self.margin_top = top;
        self.margin_bottom = bottom;
    }

    /// Decorated height of one slot, margins included.
    #[must_use]
    pub const fn stride(&self) -> u32 {
        self.item_height
            .saturating_add(self.margin_top)
            .saturating_add(self.margin_bottom)
    }

    /// Sets the viewport width.
    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    /// Current viewport height.
    #[must_use]
    pub const fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    /// Applies equal top and bottom padding.
    pub fn set_padding_symmetric(&mut self, value: u32) {
        self.padding = Padding::symmetric(value);
    }

    /// Supplies stable item identities; without them the track reports no source.
    pub fn set_item_ids<F>(&mut self, ids: F)
    where
        F: Fn(usize) -> ItemId + 'static,
    {
        self.ids = Some(Box::new(ids));
    }

    /// Total height of padding plus all slots.
    #[must_use]
    pub fn content_height(&self) -> f64 {
        let slots = f64::from(self.stride()) * to_f64(self.len);
        f64::from(self.padding.top) + slots + f64::from(self.padding.bottom)
    }

    /// Largest valid scroll offset.
    #[must_use]
    pub fn max_scroll_offset(&self) -> f64 {
        (self.content_height() - f64::from(self.viewport_height)).max(0.0)
    }

    /// Current scroll offset.
    #[must_use]
    pub const fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Sets the scroll offset, clamped to the scrollable range.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset.clamp(0.0, self.max_scroll_offset());
    }

    /// Adjusts the scroll offset by `delta`.
    pub fn scroll_by(&mut self, delta: f64) {
        self.set_scroll_offset(self.scroll_offset + delta);
    }

    /// Every scroll request received, oldest first.
    #[must_use]
    pub fn scroll_log(&self) -> &[ScrollRequest] {
        &self.scroll_log
    }

    /// Forgets the recorded scroll requests.
    pub fn clear_scroll_log(&mut self) {
        self.scroll_log.clear();
    }

    /// Adapter positions of the attached children.
    #[must_use]
    pub fn attached_range(&self) -> Range<usize> {
        let stride = f64::from(self.stride());
        if self.len == 0 || stride <= 0.0 {
            return 0..0;
        }
        // y of the first slot's top edge.
        let origin = f64::from(self.padding.top) - self.scroll_offset;
        let start = floor_index(-origin / stride).min(self.len);
        let end = ceil_index((f64::from(self.viewport_height) - origin) / stride).min(self.len);
        start..end.max(start)
    }

    /// Attached children as `(position, view)` pairs, in attach order.
    pub fn attached(&self) -> impl Iterator<Item = (usize, &SlotView)> + '_ {
        let range = self.attached_range();
        self.views[range.clone()]
            .iter()
            .enumerate()
            .map(move |(i, view)| (range.start + i, view))
    }

    fn slot_position(&self, slot: usize) -> Option<usize> {
        let range = self.attached_range();
        let position = range.start.checked_add(slot)?;
        range.contains(&position).then_some(position)
    }
}

impl ItemSource for SlotTrack {
    fn item_count(&self) -> usize {
        self.len
    }

    fn item_id(&self, position: usize) -> Option<ItemId> {
        if position >= self.len {
            return None;
        }
        self.ids.as_ref().map(|ids| ids(position))
    }
}

impl ListHost for SlotTrack {
    type View = SlotView;

    fn child_count(&self) -> usize {
        self.attached_range().len()
    }

    fn position_of(&self, slot: usize) -> Option<usize> {
        self.slot_position(slot)
    }

    fn child_bounds(&self, slot: usize) -> Option<Rect> {
        let position = self.slot_position(slot)?;
        let stride = f64::from(self.stride());
        let y0 = f64::from(self.padding.top) + to_f64(position) * stride - self.scroll_offset;
        Some(Rect::new(0.0, y0, f64::from(self.width), y0 + stride))
    }

    fn measure_child(&mut self, slot: usize) -> Option<u32> {
        self.slot_position(slot).map(|_| self.stride())
    }

    fn child_view_mut(&mut self, slot: usize) -> Option<&mut SlotView> {
        let position = self.slot_position(slot)?;
        self.views.get_mut(position)
    }

    fn viewport(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.viewport_height),
        )
    }

    fn padding(&self) -> Padding {
        self.padding
    }

    fn set_padding(&mut self, padding: Padding) {
        self.padding = padding;
    }

    fn measure(&mut self, spec: HeightSpec) -> u32 {
        let content = to_px(self.content_height());
        self.viewport_height = match spec {
            HeightSpec::Exactly(height) => height,
            HeightSpec::AtMost(bound) => content.min(bound),
            HeightSpec::Unspecified => content,
        };
        self.set_scroll_offset(self.scroll_offset);
        self.viewport_height
    }

    fn scroll(&mut self, request: ScrollRequest) {
        self.scroll_log.push(request);
        let target = request.target().min(self.len.saturating_sub(1));
        self.set_scroll_offset(to_f64(target) * f64::from(self.stride()));
    }

    fn source(&self) -> Option<&dyn ItemSource> {
        self.ids.is_some().then_some(self as &dyn ItemSource)
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "Item counts are far below 2^52"
)]
fn to_f64(n: usize) -> f64 {
    n as f64
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Clamped to non-negative before the cast; `as` saturates large values"
)]
fn floor_index(v: f64) -> usize {
    v.floor().max(0.0) as usize
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Clamped to non-negative before the cast; `as` saturates large values"
)]
fn ceil_index(v: f64) -> usize {
    v.ceil().max(0.0) as usize
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Content heights are non-negative; `as` saturates large values"
)]
fn to_px(v: f64) -> u32 {
    v.max(0.0).round() as u32
}

/// What an [`UnsettledTrack`] fails to report.
#[cfg(test)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Unsettled {
    /// Attached children whose adapter position is not known yet.
    Positions,
    /// Attached children that have not been laid out yet.
    Bounds,
}

/// A host caught mid-layout: three children are attached but the center
/// cannot be resolved.
#[cfg(test)]
#[derive(Debug)]
pub(crate) struct UnsettledTrack {
    pub(crate) missing: Unsettled,
    pub(crate) views: Vec<SlotView>,
    pub(crate) padding: Padding,
    pub(crate) scrolls: Vec<ScrollRequest>,
}

#[cfg(test)]
impl UnsettledTrack {
    pub(crate) fn new(missing: Unsettled) -> Self {
        Self {
            missing,
            views: vec![SlotView::default(); 3],
            padding: Padding::default(),
            scrolls: Vec::new(),
        }
    }

    pub(crate) fn untouched(&self) -> bool {
        self.views.iter().all(|v| *v == SlotView::default())
    }
}

#[cfg(test)]
impl ListHost for UnsettledTrack {
    type View = SlotView;

    fn child_count(&self) -> usize {
        self.views.len()
    }

    fn position_of(&self, slot: usize) -> Option<usize> {
        (self.missing != Unsettled::Positions && slot < self.views.len()).then_some(slot)
    }

    fn child_bounds(&self, slot: usize) -> Option<Rect> {
        if self.missing == Unsettled::Bounds || slot >= self.views.len() {
            return None;
        }
        let y0 = 40.0 * to_f64(slot);
        Some(Rect::new(0.0, y0, 100.0, y0 + 40.0))
    }

    fn measure_child(&mut self, slot: usize) -> Option<u32> {
        (slot < self.views.len()).then_some(40)
    }

    fn child_view_mut(&mut self, slot: usize) -> Option<&mut SlotView> {
        self.views.get_mut(slot)
    }

    fn viewport(&self) -> Rect {
        Rect::new(0.0, 0.0, 100.0, 120.0)
    }

    fn padding(&self) -> Padding {
        self.padding
    }

    fn set_padding(&mut self, padding: Padding) {
        self.padding = padding;
    }

    fn measure(&mut self, _spec: HeightSpec) -> u32 {
        120
    }

    fn scroll(&mut self, request: ScrollRequest) {
        self.scrolls.push(request);
    }

    fn source(&self) -> Option<&dyn ItemSource> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attached_children_are_the_slots_in_view() {
        let mut track = SlotTrack::new(10, 40, 200);
        let positions = |t: &SlotTrack| t.attached().map(|(p, _)| p).collect::<Vec<_>>();
        assert_eq!(positions(&track), [0, 1, 2, 3, 4]);

        track.set_padding_symmetric(80);
        assert_eq!(positions(&track), [0, 1, 2]);

        // A partially visible slot on either edge is still attached.
        track.set_scroll_offset(100.0);
        assert_eq!(positions(&track), [0, 1, 2, 3, 4, 5]);
        assert_eq!(track.child_count(), 6);
        assert_eq!(track.position_of(6), None);
    }

    #[test]
    fn scroll_offset_is_clamped_to_content() {
        let mut track = SlotTrack::new(10, 40, 200);
        track.set_padding_symmetric(80);
        assert_eq!(track.max_scroll_offset(), 360.0);
        track.scroll_by(-10.0);
        assert_eq!(track.scroll_offset(), 0.0);
        track.set_scroll_offset(1000.0);
        assert_eq!(track.scroll_offset(), 360.0);
    }

    #[test]
    fn measure_honors_height_constraint() {
        let mut track = SlotTrack::new(4, 30, 10);
        track.set_padding_symmetric(5);
        assert_eq!(track.measure(HeightSpec::Unspecified), 130);
        assert_eq!(track.measure(HeightSpec::AtMost(100)), 100);
        assert_eq!(track.measure(HeightSpec::Exactly(77)), 77);
        assert_eq!(track.viewport().height(), 77.0);
    }

    #[test]
    fn margins_widen_slots() {
        let mut track = SlotTrack::new(3, 20, 100);
        track.set_item_margins(2, 3);
        assert_eq!(track.stride(), 25);
        assert_eq!(track.measure_child(0), Some(25));
        assert_eq!(track.child_bounds(1).map(|r| (r.y0, r.y1)), Some((25.0, 50.0)));
        assert_eq!(track.measure_child(3), None);
    }

    #[test]
    fn scroll_requests_align_targets_and_are_logged() {
        let mut track = SlotTrack::new(10, 40, 200);
        track.set_padding_symmetric(80);
        track.scroll(ScrollRequest::Jump { target: 3 });
        // Item 0 scrolled fully out of view and is detached.
        assert_eq!(track.position_of(0), Some(1));
        assert_eq!(track.child_bounds(0).map(|r| r.y0), Some(0.0));

        track.scroll(ScrollRequest::Jump { target: 99 });
        assert_eq!(track.scroll_offset(), 360.0);
        assert_eq!(track.scroll_log().len(), 2);
        track.clear_scroll_log();
        assert!(track.scroll_log().is_empty());
    }

    #[test]
    fn source_requires_ids() {
        let mut track = SlotTrack::new(3, 20, 100);
        assert!(track.source().is_none());
        track.set_item_ids(|i| ItemId(i as i64 * 10));
        let source = track.source().map(|s| (s.item_count(), s.item_id(2), s.item_id(3)));
        assert_eq!(source, Some((3, Some(ItemId(20)), None)));
    }
}
