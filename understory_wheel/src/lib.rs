// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_wheel --heading-base-level=0

//! Understory Wheel: a renderer-agnostic wheel picker core.
//!
//! A wheel is a vertically scrolling list whose items snap to a center slot.
//! The centered item is the current selection; items further from the center
//! are shrunk, and the top and bottom edges fade out.
//!
//! This crate provides the behavior and leaves views to the host:
//!
//! - [`SnapTracker`]: resolves the item nearest to the viewport's center line
//!   through a pluggable [`SnapStrategy`].
//! - [`ItemTransformer`] and [`TransformDispatcher`]: re-style every attached
//!   child by its distance from the center after each scroll or relevant layout.
//! - [`SelfSizingController`]: derives the item height, sizes the wheel to a
//!   whole number of slots, and pads it so that the first and last items can
//!   reach the center.
//! - [`FadingEdgeDrawer`]: computes the gradient masks composited over both
//!   edges.
//! - [`SelectionNotifier`] and [`ListenerRegistry`]: report the centered item
//!   to listeners registered from any thread.
//! - [`WheelPicker`]: composes all of the above behind host callbacks.
//!
//! The crate deliberately does **not** own a list engine. Hosts implement
//! [`ListHost`] over their virtualized list (child recycling, fling physics,
//! and touch handling stay there) and forward measure, layout, scroll and draw
//! events. [`SlotTrack`] is a small in-memory host used for headless driving
//! and testing.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use understory_wheel::{HeightSpec, SlotTrack, SlotView, WheelPicker};
//!
//! // 10 items, 40px each, in a 100px viewport; the parent lets the wheel
//! // pick its own height.
//! let mut track = SlotTrack::new(10, 40, 100);
//! let mut picker = WheelPicker::<SlotView>::default();
//! assert_eq!(picker.on_measure(&mut track, HeightSpec::Unspecified), 200);
//!
//! let selected = Arc::new(Mutex::new(None));
//! let sink = Arc::clone(&selected);
//! picker.add_selection_listener(move |s| *sink.lock().unwrap() = Some(s.position));
//!
//! // Scroll by three slots; the host reports the scroll to the picker.
//! track.scroll_by(120.0);
//! picker.on_scroll_changed(&mut track);
//! assert_eq!(*selected.lock().unwrap(), Some(3));
//! ```
//!
//! Logging goes through [`tracing`]; the crate never installs a subscriber.
//!
//! This crate requires `std` and targets Rust 1.88 or later.

mod color;
mod dispatch;
mod fade;
mod host;
mod picker;
mod scroll;
mod selection;
mod sizing;
mod snap;
mod thread;
mod track;
mod transform;

pub use color::{
    Color, ColorError, ENCODING_ARGB4, ENCODING_ARGB8, ENCODING_RGB4, ENCODING_RGB8, ThemeValue,
    resolve_theme_color,
};
pub use dispatch::TransformDispatcher;
pub use fade::{
    BlendMode, DEFAULT_FADE_STRENGTH, DefaultFadingEdgeDrawer, FadeCanvas, FadeGradient,
    FadeParams, FadeStyle, FadingEdgeDrawer, GradientFill, RecordingCanvas,
};
pub use host::{HeightSpec, ItemId, ItemSource, LayoutHeight, ListHost, Padding, ScrollRequest};
pub use picker::{Invalidation, WheelConfig, WheelPicker};
pub use scroll::{ScrollPace, WheelLayout};
pub use selection::{DispatchPolicy, ListenerId, ListenerRegistry, Selection, SelectionNotifier};
pub use sizing::{DEFAULT_WHEEL_ITEM_COUNT, MeasureOutcome, ResnapPolicy, SelfSizingController};
pub use snap::{CenterLineSnap, Centered, SnapStrategy, SnapTracker};
pub use thread::UiThread;
pub use track::{SlotTrack, SlotView};
pub use transform::{DEFAULT_SCALE_COEFFICIENT, ItemTransformer, ScaledView, ScalingItemTransformer};
