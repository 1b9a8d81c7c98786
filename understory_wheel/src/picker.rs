// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The wheel picker: composition of snapping, transforms, fading and sizing.
//!
//! [`WheelPicker`] holds no views of its own. The host forwards its lifecycle
//! callbacks and the picker drives the host back through [`ListHost`]:
//!
//! | Host event                         | Picker call                                   |
//! |------------------------------------|-----------------------------------------------|
//! | data source attached               | [`on_attach`](WheelPicker::on_attach)         |
//! | measure pass                       | [`on_measure`](WheelPicker::on_measure)       |
//! | layout pass finished               | [`on_layout_completed`](WheelPicker::on_layout_completed) |
//! | child set changed                  | [`on_items_changed`](WheelPicker::on_items_changed) |
//! | scroll offset changed              | [`on_scroll_changed`](WheelPicker::on_scroll_changed) |
//! | content drawn                      | [`draw`](WheelPicker::draw)                   |
//! | idle, after the current frame      | [`run_deferred`](WheelPicker::run_deferred)   |
//!
//! Host callbacks, like the property accessors, belong to the thread that
//! created the picker and panic anywhere else. Only listener registration is
//! open to other threads.
//!
//! Changes that require the host to lay out or redraw again are accumulated
//! as [`Invalidation`] flags and collected with
//! [`take_invalidation`](WheelPicker::take_invalidation).

use core::fmt;

use smallvec::SmallVec;

use crate::color::{Color, ThemeValue, resolve_theme_color};
use crate::fade::{
    DEFAULT_FADE_STRENGTH, DefaultFadingEdgeDrawer, FadeCanvas, FadeParams, FadeStyle,
    FadingEdgeDrawer,
};
use crate::host::{HeightSpec, LayoutHeight, ListHost};
use crate::scroll::{ScrollPace, WheelLayout};
use crate::selection::{DispatchPolicy, ListenerId, ListenerRegistry, Selection, SelectionNotifier};
use crate::sizing::{DEFAULT_WHEEL_ITEM_COUNT, ResnapPolicy, SelfSizingController};
use crate::snap::SnapTracker;
use crate::thread::UiThread;
use crate::transform::{
    DEFAULT_SCALE_COEFFICIENT, ItemTransformer, ScaledView, ScalingItemTransformer,
};

/// Construction-time settings of a [`WheelPicker`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelConfig {
    /// Number of visible slots when the wheel sizes itself.
    pub wheel_item_count: u32,
    /// Color of the default fading edges. [`Color::TRANSPARENT`] disables them.
    pub fade_color: Color,
    /// Damping of the fade ramp, in `(0, 1]`.
    pub fade_strength: f64,
    /// Per-slot coefficient of the default [`ScalingItemTransformer`].
    pub scale_coefficient: f64,
    /// Pace of animated scrolls.
    pub scroll_pace: ScrollPace,
    /// Where to scroll after the padding changed.
    pub resnap: ResnapPolicy,
    /// When to report the centered item.
    pub dispatch: DispatchPolicy,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            wheel_item_count: DEFAULT_WHEEL_ITEM_COUNT,
            fade_color: Color::BLACK,
            fade_strength: DEFAULT_FADE_STRENGTH,
            scale_coefficient: DEFAULT_SCALE_COEFFICIENT,
            scroll_pace: ScrollPace::WHEEL,
            resnap: ResnapPolicy::default(),
            dispatch: DispatchPolicy::default(),
        }
    }
}

impl WheelConfig {
    /// Takes the fade color from the theme's background value, if it has one.
    ///
    /// # Panics
    ///
    /// Panics if `background` is a color integer with an unsupported encoding.
    #[must_use]
    pub fn with_theme_background(mut self, background: Option<ThemeValue>) -> Self {
        self.fade_color = resolve_theme_color(background, Color::BLACK);
        self
    }
}

bitflags::bitflags! {
    /// Work the host should schedule after a picker call.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Invalidation: u8 {
        /// Draw again.
        const REDRAW   = 0b0000_0001;
        /// Measure and lay out again.
        const RELAYOUT = 0b0000_0010;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Deferred {
    JumpTo(usize),
}

type BoxedTransformer<V> = Box<dyn ItemTransformer<V> + Send>;
type BoxedDrawer = Box<dyn FadingEdgeDrawer + Send>;

/// A vertically scrolling selector whose centered item is the selection.
///
/// `V` is the host's child view type.
pub struct WheelPicker<V: 'static> {
    ui: UiThread,
    snap: SnapTracker,
    layout: WheelLayout,
    sizing: SelfSizingController,
    notifier: SelectionNotifier,
    transformer: BoxedTransformer<V>,
    drawer: BoxedDrawer,
    solid_color: Color,
    fade_strength: f64,
    invalidation: Invalidation,
    deferred: SmallVec<[Deferred; 2]>,
}

impl<V: 'static> fmt::Debug for WheelPicker<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WheelPicker")
            .field("layout", &self.layout)
            .field("sizing", &self.sizing)
            .field("notifier", &self.notifier)
            .field("solid_color", &self.solid_color)
            .field("invalidation", &self.invalidation)
            .field("deferred", &self.deferred)
            .finish_non_exhaustive()
    }
}

impl<V: ScaledView + 'static> Default for WheelPicker<V> {
    fn default() -> Self {
        Self::new(WheelConfig::default())
    }
}

impl<V: ScaledView + 'static> WheelPicker<V> {
    /// Creates a picker owned by the calling thread, with the default scaling
    /// transformer and fading-edge drawer.
    #[must_use]
    pub fn new(config: WheelConfig) -> Self {
        Self::with_parts(
            config,
            ScalingItemTransformer::new(config.scale_coefficient),
            DefaultFadingEdgeDrawer::new(FadeStyle::from_color(config.fade_color)),
        )
    }
}

impl<V: 'static> WheelPicker<V> {
    /// Creates a picker with a custom transformer and drawer.
    #[must_use]
    pub fn with_parts<T, D>(config: WheelConfig, transformer: T, drawer: D) -> Self
    where
        T: ItemTransformer<V> + Send + 'static,
        D: FadingEdgeDrawer + Send + 'static,
    {
        Self {
            ui: UiThread::current(),
            snap: SnapTracker::default(),
            layout: WheelLayout::new(config.scroll_pace),
            sizing: SelfSizingController::new(config.wheel_item_count, config.resnap),
            notifier: SelectionNotifier::new(config.dispatch),
            transformer: Box::new(transformer),
            drawer: Box::new(drawer),
            solid_color: config.fade_color,
            fade_strength: config.fade_strength,
            invalidation: Invalidation::empty(),
            deferred: SmallVec::new(),
        }
    }

    /// The snap tracker resolving the centered item.
    #[must_use]
    pub const fn snap(&self) -> &SnapTracker {
        &self.snap
    }

    /// Item height derived by the last measure or alignment pass.
    #[must_use]
    pub const fn item_height(&self) -> Option<u32> {
        self.sizing.item_height()
    }

    /// Adapter position of the centered item.
    pub fn centered_index<H: ListHost + ?Sized>(&self, host: &H) -> Option<usize> {
        self.snap.centered_index(host)
    }

    /// Handles the first attach of a data source.
    #[track_caller]
    pub fn on_attach(&mut self, layout_height: LayoutHeight) {
        self.ui.assert_current();
        self.sizing.on_attach(layout_height);
    }

    /// Handles a measure pass and returns the measured height.
    #[track_caller]
    pub fn on_measure<H>(&mut self, host: &mut H, spec: HeightSpec) -> u32
    where
        H: ListHost<View = V> + ?Sized,
    {
        self.ui.assert_current();
        self.sizing.on_measure(host, spec, &self.snap).measured_height
    }

    /// Handles a finished layout pass.
    ///
    /// Re-applies transforms if the child set changed, then runs the one-shot
    /// initial alignment. The alignment's jump to the first item is deferred
    /// to [`run_deferred`](Self::run_deferred).
    #[track_caller]
    pub fn on_layout_completed<H>(&mut self, host: &mut H)
    where
        H: ListHost<View = V> + ?Sized,
    {
        self.ui.assert_current();
        self.layout
            .on_layout_children(host, &self.snap, self.transformer.as_ref());
        if self.sizing.on_layout_completed(host) {
            self.deferred.push(Deferred::JumpTo(0));
        }
    }

    /// Records that the host's child composition changed.
    #[track_caller]
    pub fn on_items_changed(&mut self) {
        self.ui.assert_current();
        self.layout.on_items_changed();
    }

    /// Handles a scroll offset change: transforms every attached child, then
    /// reports the centered item to listeners.
    ///
    /// Returns the selection if it was dispatched.
    ///
    /// # Panics
    ///
    /// Panics when called off the UI thread, before any listener runs.
    #[track_caller]
    pub fn on_scroll_changed<H>(&mut self, host: &mut H) -> Option<Selection>
    where
        H: ListHost<View = V> + ?Sized,
    {
        self.ui.assert_current();
        self.layout
            .dispatcher_mut()
            .on_scroll_changed(host, &self.snap, self.transformer.as_ref());
        self.notifier.notify(host, &self.snap)
    }

    /// Composites the fading edges after the host drew its content.
    ///
    /// Does nothing until an item height is known. Returns `true` if the
    /// drawer was invoked.
    #[track_caller]
    pub fn draw<H>(&mut self, host: &H, canvas: &mut dyn FadeCanvas) -> bool
    where
        H: ListHost<View = V> + ?Sized,
    {
        self.ui.assert_current();
        let Some(item_height) = self.sizing.item_height() else {
            return false;
        };
        let geometry = host.viewport();
        let params = FadeParams::new(geometry.height(), f64::from(item_height), self.fade_strength);
        self.drawer.draw(geometry, params, canvas);
        true
    }

    /// Runs work posted during the last frame. Returns how many tasks ran.
    #[track_caller]
    pub fn run_deferred<H>(&mut self, host: &mut H) -> usize
    where
        H: ListHost<View = V> + ?Sized,
    {
        self.ui.assert_current();
        let tasks = core::mem::take(&mut self.deferred);
        for task in &tasks {
            match *task {
                Deferred::JumpTo(target) => self.layout.scroll_to_position(host, target, false),
            }
        }
        tasks.len()
    }

    /// Handle to the selection listener registry, usable from any thread.
    #[must_use]
    pub fn listeners(&self) -> ListenerRegistry {
        self.notifier.registry().clone()
    }

    /// Registers a selection listener. May be called from any thread.
    pub fn add_selection_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(Selection) + Send + Sync + 'static,
    {
        self.notifier.registry().add(listener)
    }

    /// Unregisters a selection listener. May be called from any thread.
    pub fn remove_selection_listener(&self, id: ListenerId) -> bool {
        self.notifier.registry().remove(id)
    }

    /// The item transformer.
    ///
    /// # Panics
    ///
    /// Panics when called off the UI thread.
    #[track_caller]
    pub fn item_transformer(&self) -> &(dyn ItemTransformer<V> + Send) {
        self.ui.assert_current();
        self.transformer.as_ref()
    }

    /// Replaces the item transformer and requests a relayout.
    ///
    /// # Panics
    ///
    /// Panics when called off the UI thread.
    #[track_caller]
    pub fn set_item_transformer<T>(&mut self, transformer: T)
    where
        T: ItemTransformer<V> + Send + 'static,
    {
        self.ui.assert_current();
        self.transformer = Box::new(transformer);
        self.layout.dispatcher_mut().invalidate();
        self.invalidation |= Invalidation::RELAYOUT;
        tracing::debug!("item transformer replaced");
    }

    /// The fading-edge drawer.
    ///
    /// # Panics
    ///
    /// Panics when called off the UI thread.
    #[track_caller]
    pub fn fading_edge_drawer(&self) -> &(dyn FadingEdgeDrawer + Send) {
        self.ui.assert_current();
        self.drawer.as_ref()
    }

    /// Mutable access to the fading-edge drawer. Requests a redraw.
    ///
    /// # Panics
    ///
    /// Panics when called off the UI thread.
    #[track_caller]
    pub fn fading_edge_drawer_mut(&mut self) -> &mut (dyn FadingEdgeDrawer + Send) {
        self.ui.assert_current();
        self.invalidation |= Invalidation::REDRAW;
        self.drawer.as_mut()
    }

    /// Replaces the fading-edge drawer and requests a redraw.
    ///
    /// # Panics
    ///
    /// Panics when called off the UI thread.
    #[track_caller]
    pub fn set_fading_edge_drawer<D>(&mut self, drawer: D)
    where
        D: FadingEdgeDrawer + Send + 'static,
    {
        self.ui.assert_current();
        self.drawer = Box::new(drawer);
        self.invalidation |= Invalidation::REDRAW;
        tracing::debug!("fading edge drawer replaced");
    }

    /// The configured fade color.
    ///
    /// # Panics
    ///
    /// Panics when called off the UI thread.
    #[track_caller]
    #[must_use]
    pub fn solid_color(&self) -> Color {
        self.ui.assert_current();
        self.solid_color
    }

    /// Scrolls so that `index` becomes the centered item.
    ///
    /// Does nothing if the centered item cannot be resolved or already is
    /// `index`. Returns `true` if a scroll was issued.
    #[track_caller]
    pub fn scroll_to_position<H>(&mut self, host: &mut H, index: usize, animated: bool) -> bool
    where
        H: ListHost<View = V> + ?Sized,
    {
        self.ui.assert_current();
        let Some(current) = self.snap.centered_index(host) else {
            return false;
        };
        if current == index {
            return false;
        }
        self.layout.scroll_to_position(host, index, animated);
        true
    }

    /// Returns and clears the accumulated invalidation flags.
    pub fn take_invalidation(&mut self) -> Invalidation {
        core::mem::replace(&mut self.invalidation, Invalidation::empty())
    }
}
