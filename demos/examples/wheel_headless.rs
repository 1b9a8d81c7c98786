// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless wheel: drive a `WheelPicker` over an in-memory `SlotTrack`.
//!
//! This example walks through the host side of a wheel:
//! - measure with a wrap-content constraint so the wheel sizes itself,
//! - lay out, then scroll in small steps and report each step to the picker,
//! - settle on the centered item, then animate to another one,
//! - composite the fading edges into a canvas that prints what it receives.
//!
//! Run:
//! - `cargo run -p understory_wheel_demos --example wheel_headless`
//! - `RUST_LOG=understory_wheel=trace cargo run -p understory_wheel_demos --example wheel_headless`

use kurbo::Rect;
use tracing_subscriber::EnvFilter;
use understory_wheel::{
    BlendMode, FadeCanvas, FadeGradient, HeightSpec, ItemId, LayoutHeight, ListHost,
    ScrollRequest, SlotTrack, SlotView, WheelConfig, WheelPicker,
};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Prints every gradient fill instead of rasterizing it.
struct PrintCanvas;

impl FadeCanvas for PrintCanvas {
    fn fill_gradient(&mut self, rect: Rect, gradient: &FadeGradient, blend: BlendMode) {
        let start = gradient.start();
        let end = gradient.end();
        println!(
            "  fill {:>5.1}..{:>5.1}  ramp ({:.1}) -> ({:.1})  {:?} -> {:?}  {blend:?}",
            rect.y0, rect.y1, start.y, end.y, gradient.from, gradient.to
        );
    }
}

fn print_wheel(track: &SlotTrack) {
    for (position, view) in track.attached() {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "Bar width is a small non-negative number"
        )]
        let bar = (view.scale.y * 20.0).round() as usize;
        println!("  {:>3} {:<20} {:.2}", MONTHS[position], "#".repeat(bar), view.scale.y);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut track = SlotTrack::new(MONTHS.len(), 36, 120);
    track.set_width(160);
    track.set_item_ids(|i| ItemId(1000 + i64::try_from(i).unwrap_or(i64::MAX)));

    let mut picker = WheelPicker::<SlotView>::new(WheelConfig::default());
    picker.add_selection_listener(|s| {
        println!("  selected {} (id {})", MONTHS[s.position], s.item_id.0);
    });

    // Attach, measure and lay out as a host would on first frame.
    picker.on_attach(LayoutHeight::WrapContent);
    let height = picker.on_measure(&mut track, HeightSpec::AtMost(600));
    println!(
        "measured {height}px with item height {:?}, padding {:?}",
        picker.item_height(),
        track.padding()
    );
    picker.on_items_changed();
    picker.on_layout_completed(&mut track);
    picker.run_deferred(&mut track);

    println!("initial wheel:");
    print_wheel(&track);

    // A short drag, reported tick by tick.
    println!("dragging:");
    for _ in 0..6 {
        track.scroll_by(13.0);
        picker.on_scroll_changed(&mut track);
    }

    // Settle the drag on whatever is centered now.
    if let Some(centered) = picker.centered_index(&track) {
        track.scroll(ScrollRequest::Jump { target: centered });
        picker.on_scroll_changed(&mut track);
    }
    println!("after settling:");
    print_wheel(&track);

    // Animate to December. The track executes requests instantly.
    println!("scrolling to Dec:");
    if picker.scroll_to_position(&mut track, 11, true) {
        println!("  host received {:?}", track.scroll_log().last());
        picker.on_scroll_changed(&mut track);
    }
    print_wheel(&track);

    println!("fading edges:");
    picker.draw(&track, &mut PrintCanvas);
}
