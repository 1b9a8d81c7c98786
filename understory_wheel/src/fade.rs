// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fading-edge compositing.
//!
//! After the host has drawn the list content, the wheel composites two
//! gradient masks over its top and bottom edges. This module computes those
//! masks; it never touches pixels. A host implements [`FadeCanvas`] to turn
//! each `(rect, gradient, blend)` triple into real drawing.
//!
//! ## Geometry
//!
//! Each gradient is a unit vertical ramp from `(0, 0)` to `(0, 1)`, mapped
//! into wheel coordinates by [`FadeGradient::transform`]:
//!
//! - bottom edge: scale by `(1, fade_height * fade_strength)`, rotate 180°,
//!   then translate to the bottom-left corner, so the ramp runs upwards;
//! - top edge: the same scale, translated to the top-left corner.
//!
//! Only a band of [`FadeParams::fade_length`] at each edge is filled. Outside
//! the ramp the gradient clamps to its end color.
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_wheel::{DefaultFadingEdgeDrawer, FadeParams, FadeStyle, RecordingCanvas, Color};
//! use understory_wheel::FadingEdgeDrawer;
//!
//! let mut drawer = DefaultFadingEdgeDrawer::new(FadeStyle::from_color(Color::WHITE));
//! let params = FadeParams::new(200.0, 40.0, 0.9);
//! let mut canvas = RecordingCanvas::default();
//! drawer.draw(Rect::new(0.0, 0.0, 120.0, 200.0), params, &mut canvas);
//!
//! assert_eq!(canvas.fills.len(), 2);
//! assert_eq!(canvas.fills[0].rect, Rect::new(0.0, 120.0, 120.0, 200.0));
//! assert_eq!(canvas.fills[1].rect, Rect::new(0.0, 0.0, 120.0, 80.0));
//! ```

use core::f64::consts::PI;

use kurbo::{Affine, Point, Rect, Vec2};

use crate::color::Color;

/// Default damping applied to the fade ramp.
pub const DEFAULT_FADE_STRENGTH: f64 = 0.9;

/// Per-pass fade parameters derived from the wheel's geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeParams {
    /// Half of the viewport not covered by the center slot.
    pub fade_height: f64,
    /// Damping applied to the ramp length, in `(0, 1]`.
    pub fade_strength: f64,
    /// Drawn extent of each edge.
    pub fade_length: f64,
}

impl FadeParams {
    /// Computes the fade parameters for a viewport of `viewport_height` with a
    /// center slot of `item_height`.
    ///
    /// `fade_length` equals `fade_height` unless that would make the two edges
    /// overlap, in which case each edge gets exactly half of the viewport. It
    /// is never negative.
    #[must_use]
    pub fn new(viewport_height: f64, item_height: f64, fade_strength: f64) -> Self {
        let viewport_height = viewport_height.max(0.0);
        let fade_height = (viewport_height - item_height) / 2.0;
        let half = viewport_height / 2.0;
        let fade_length = if fade_height > half {
            half
        } else {
            fade_height.max(0.0)
        };
        Self {
            fade_height,
            fade_strength,
            fade_length,
        }
    }

    /// Length of the gradient ramp after damping.
    #[must_use]
    pub fn ramp_length(&self) -> f64 {
        self.fade_height * self.fade_strength
    }
}

/// How the fade mask is composited over the content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendMode {
    /// Paint the gradient over the content.
    SourceOver,
    /// Erase the content in proportion to the gradient's alpha.
    DestinationOut,
}

/// What the fading edges do, derived from the configured fade color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeStyle {
    /// No fading; nothing is drawn.
    Disabled,
    /// Erase the edges towards transparency.
    Erase,
    /// Paint the edges with a ramp of the given color.
    Paint(Color),
}

impl FadeStyle {
    /// Picks a style for `color`.
    ///
    /// [`Color::TRANSPARENT`] disables fading. Any other color with a zero
    /// alpha channel erases; everything else paints with the color's RGB.
    #[must_use]
    pub const fn from_color(color: Color) -> Self {
        if color.0 == Color::TRANSPARENT.0 {
            Self::Disabled
        } else if color.is_transparent() {
            Self::Erase
        } else {
            Self::Paint(color)
        }
    }

    /// The ramp end points and blend mode, or `None` when disabled.
    #[must_use]
    pub const fn shader(self) -> Option<(Color, Color, BlendMode)> {
        match self {
            Self::Disabled => None,
            Self::Erase => Some((
                Color::BLACK,
                Color::TRANSPARENT,
                BlendMode::DestinationOut,
            )),
            Self::Paint(c) => Some((c.with_alpha(0xff), c.with_alpha(0), BlendMode::SourceOver)),
        }
    }
}

/// A linear vertical gradient placed in wheel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeGradient {
    /// Maps the unit ramp `(0, 0) -> (0, 1)` into wheel coordinates.
    pub transform: Affine,
    /// Color at the start of the ramp.
    pub from: Color,
    /// Color at the end of the ramp and beyond.
    pub to: Color,
}

impl FadeGradient {
    /// Start of the ramp in wheel coordinates.
    #[must_use]
    pub fn start(&self) -> Point {
        self.transform * Point::ORIGIN
    }

    /// End of the ramp in wheel coordinates.
    #[must_use]
    pub fn end(&self) -> Point {
        self.transform * Point::new(0.0, 1.0)
    }

    /// Samples the gradient at `point`, clamping outside the ramp.
    #[must_use]
    pub fn sample(&self, point: Point) -> Color {
        if self.transform.determinant() == 0.0 {
            // A collapsed ramp is all end color.
            return self.to;
        }
        let local = self.transform.inverse() * point;
        self.from.lerp(self.to, local.y)
    }
}

/// Destination for fade masks.
pub trait FadeCanvas {
    /// Fills `rect` with `gradient`, composited with `blend`.
    fn fill_gradient(&mut self, rect: Rect, gradient: &FadeGradient, blend: BlendMode);
}

/// One recorded [`FadeCanvas::fill_gradient`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientFill {
    /// Filled area.
    pub rect: Rect,
    /// Gradient used for the fill.
    pub gradient: FadeGradient,
    /// Compositing mode.
    pub blend: BlendMode,
}

/// A [`FadeCanvas`] that records fills, for hosts that batch drawing and for tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    /// Fills in the order they were issued.
    pub fills: Vec<GradientFill>,
}

impl FadeCanvas for RecordingCanvas {
    fn fill_gradient(&mut self, rect: Rect, gradient: &FadeGradient, blend: BlendMode) {
        self.fills.push(GradientFill {
            rect,
            gradient: *gradient,
            blend,
        });
    }
}

/// Draws the fading edges of a wheel.
pub trait FadingEdgeDrawer {
    /// Composites the edges for a wheel occupying `geometry`.
    ///
    /// Called once per draw pass, after the list content.
    fn draw(&mut self, geometry: Rect, params: FadeParams, canvas: &mut dyn FadeCanvas);
}

/// The built-in [`FadingEdgeDrawer`].
#[derive(Clone, Copy, Debug)]
pub struct DefaultFadingEdgeDrawer {
    style: FadeStyle,
}

impl Default for DefaultFadingEdgeDrawer {
    fn default() -> Self {
        Self::new(FadeStyle::from_color(Color::BLACK))
    }
}

impl DefaultFadingEdgeDrawer {
    /// Creates a drawer with the given style.
    #[must_use]
    pub const fn new(style: FadeStyle) -> Self {
        Self { style }
    }

    /// Current style.
    #[must_use]
    pub const fn style(&self) -> FadeStyle {
        self.style
    }

    /// Switches the style to the one implied by `color`.
    pub fn set_color(&mut self, color: Color) {
        self.style = FadeStyle::from_color(color);
    }
}

impl FadingEdgeDrawer for DefaultFadingEdgeDrawer {
    fn draw(&mut self, geometry: Rect, params: FadeParams, canvas: &mut dyn FadeCanvas) {
        let Some((from, to, blend)) = self.style.shader() else {
            return;
        };
        if params.fade_length <= 0.0 {
            return;
        }
        let scale = Affine::scale_non_uniform(1.0, params.ramp_length());
        let (left, right) = (geometry.x0, geometry.x1);
        let (top, bottom) = (geometry.y0, geometry.y1);

        // Bottom edge.
        let gradient = FadeGradient {
            transform: scale.then_rotate(PI).then_translate(Vec2::new(left, bottom)),
            from,
            to,
        };
        canvas.fill_gradient(
            Rect::new(left, bottom - params.fade_length, right, bottom),
            &gradient,
            blend,
        );

        // Top edge.
        let gradient = FadeGradient {
            transform: scale.then_translate(Vec2::new(left, top)),
            from,
            to,
        };
        canvas.fill_gradient(
            Rect::new(left, top, right, top + params.fade_length),
            &gradient,
            blend,
        );
    }
}
