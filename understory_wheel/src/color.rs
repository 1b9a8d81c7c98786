// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packed ARGB colors and theme color decoding.
//!
//! The wheel only needs enough color handling to pick a fade style and to
//! build the two gradient stops of a fading edge. Colors are packed as
//! `0xAARRGGBB`, matching what host toolkits usually hand over from their
//! theme or attribute systems.
//!
//! Theme values arrive as a raw `(encoding, data)` pair. [`ThemeValue::try_to_color`]
//! decodes the four packed integer encodings and reports anything else in the
//! color-integer family as a [`ColorError`]. [`resolve_theme_color`] is the
//! strict wrapper used when building a [`WheelConfig`](crate::WheelConfig):
//! an unsupported encoding there is a misuse of the API and panics.

use thiserror::Error;

/// A packed `0xAARRGGBB` color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    /// Fully transparent black. Also the "no fade" sentinel.
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self(0xff00_0000);
    /// Opaque white.
    pub const WHITE: Self = Self(0xffff_ffff);

    /// Builds a color from individual channels.
    #[must_use]
    pub const fn argb(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self(u32::from_be_bytes([alpha, red, green, blue]))
    }

    /// Alpha channel.
    #[must_use]
    pub const fn alpha(self) -> u8 {
        self.0.to_be_bytes()[0]
    }

    /// Red channel.
    #[must_use]
    pub const fn red(self) -> u8 {
        self.0.to_be_bytes()[1]
    }

    /// Green channel.
    #[must_use]
    pub const fn green(self) -> u8 {
        self.0.to_be_bytes()[2]
    }

    /// Blue channel.
    #[must_use]
    pub const fn blue(self) -> u8 {
        self.0.to_be_bytes()[3]
    }

    /// Returns the same color with its alpha channel replaced.
    #[must_use]
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self::argb(alpha, self.red(), self.green(), self.blue())
    }

    /// Returns `true` if the alpha channel is zero.
    #[must_use]
    pub const fn is_transparent(self) -> bool {
        self.alpha() == 0
    }

    /// Linearly interpolates each channel; `t` is clamped into `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| channel(f64::from(a) + (f64::from(b) - f64::from(a)) * t);
        Self::argb(
            mix(self.alpha(), other.alpha()),
            mix(self.red(), other.red()),
            mix(self.green(), other.green()),
            mix(self.blue(), other.blue()),
        )
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Callers interpolate between two u8 values, so the rounded value fits"
)]
fn channel(v: f64) -> u8 {
    v.round() as u8
}

/// Encoding code for a packed `#AARRGGBB` theme value.
pub const ENCODING_ARGB8: u8 = 0x1c;
/// Encoding code for a packed `#RRGGBB` theme value.
pub const ENCODING_RGB8: u8 = 0x1d;
/// Encoding code for a packed `#ARGB` theme value.
pub const ENCODING_ARGB4: u8 = 0x1e;
/// Encoding code for a packed `#RGB` theme value.
pub const ENCODING_RGB4: u8 = 0x1f;

/// Errors produced while decoding a theme color.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    /// The value claimed to be a color integer but used an unknown encoding.
    #[error("unknown color encoding (0x{0:02x})")]
    UnsupportedEncoding(u8),
}

/// A raw value resolved from the host theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeValue {
    /// A packed color integer together with its encoding code.
    ColorInt {
        /// One of the `ENCODING_*` codes.
        encoding: u8,
        /// Packed channel data.
        data: u32,
    },
    /// A value of any other kind (string, reference, dimension, ...).
    Other,
}

impl ThemeValue {
    /// Decodes the value into a [`Color`].
    ///
    /// Returns `Ok(None)` for values that are not color integers, so callers
    /// can fall back to a default.
    ///
    /// 4-bit channels are expanded by nibble replication (`0xA` becomes `0xAA`).
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::UnsupportedEncoding`] for a color integer whose
    /// encoding is not one of the `ENCODING_*` codes.
    pub fn try_to_color(self) -> Result<Option<Color>, ColorError> {
        let Self::ColorInt { encoding, data } = self else {
            return Ok(None);
        };
        let nibble = |shift: u32| -> u8 {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Masked to four bits before the cast"
            )]
            let n = ((data >> shift) & 0xf) as u8;
            n * 0x11
        };
        let color = match encoding {
            ENCODING_ARGB8 => Color(data),
            ENCODING_RGB8 => Color(data | 0xff00_0000),
            ENCODING_ARGB4 => Color::argb(nibble(12), nibble(8), nibble(4), nibble(0)),
            ENCODING_RGB4 => Color::argb(0xff, nibble(8), nibble(4), nibble(0)),
            other => return Err(ColorError::UnsupportedEncoding(other)),
        };
        Ok(Some(color))
    }
}

/// Resolves a theme value into a color, falling back to `default`.
///
/// # Panics
///
/// Panics if `value` is a color integer with an unsupported encoding.
#[must_use]
pub fn resolve_theme_color(value: Option<ThemeValue>, default: Color) -> Color {
    match value.map(ThemeValue::try_to_color).transpose() {
        Ok(color) => color.flatten().unwrap_or(default),
        Err(err) => panic!("cannot resolve theme color: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_round_trip_through_argb() {
        let c = Color::argb(0x12, 0x34, 0x56, 0x78);
        assert_eq!(c, Color(0x1234_5678));
        assert_eq!(
            (c.alpha(), c.red(), c.green(), c.blue()),
            (0x12, 0x34, 0x56, 0x78)
        );
        assert_eq!(c.with_alpha(0xff), Color(0xff34_5678));
    }

    #[test]
    fn lerp_hits_endpoints_and_midpoint() {
        let a = Color::argb(0xff, 0, 0, 0);
        let b = Color::argb(0, 200, 100, 0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Color::argb(0x80, 100, 50, 0));
        // Out-of-range factors clamp.
        assert_eq!(a.lerp(b, 7.0), b);
    }

    #[test]
    fn short_encodings_expand_nibbles() {
        let argb4 = ThemeValue::ColorInt {
            encoding: ENCODING_ARGB4,
            data: 0x8f0a,
        };
        assert_eq!(argb4.try_to_color(), Ok(Some(Color(0x88ff_00aa))));

        let rgb4 = ThemeValue::ColorInt {
            encoding: ENCODING_RGB4,
            data: 0x0123,
        };
        assert_eq!(rgb4.try_to_color(), Ok(Some(Color(0xff11_2233))));

        let rgb8 = ThemeValue::ColorInt {
            encoding: ENCODING_RGB8,
            data: 0x00ab_cdef,
        };
        assert_eq!(rgb8.try_to_color(), Ok(Some(Color(0xffab_cdef))));
    }

    #[test]
    fn non_color_values_fall_back() {
        assert_eq!(ThemeValue::Other.try_to_color(), Ok(None));
        assert_eq!(resolve_theme_color(None, Color::BLACK), Color::BLACK);
        assert_eq!(
            resolve_theme_color(Some(ThemeValue::Other), Color::WHITE),
            Color::WHITE
        );
    }

    #[test]
    fn unknown_encoding_is_an_error() {
        let bad = ThemeValue::ColorInt {
            encoding: 0x20,
            data: 0,
        };
        assert_eq!(bad.try_to_color(), Err(ColorError::UnsupportedEncoding(0x20)));
    }

    #[test]
    #[should_panic(expected = "unknown color encoding")]
    fn resolving_unknown_encoding_panics() {
        let bad = ThemeValue::ColorInt {
            encoding: 0x42,
            data: 0,
        };
        let _ = resolve_theme_color(Some(bad), Color::BLACK);
    }
}
