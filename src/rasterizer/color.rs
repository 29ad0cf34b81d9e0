//! Color types: 8-bit sRGB for storage, linear float for blending

use std::ops::{Add, Mul};
use serde::{Serialize, Deserialize};

/// sRGB color (0-255 per channel), what a Surface stores
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorU8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorU8 {
    pub const BLACK: ColorU8 = ColorU8 { r: 0, g: 0, b: 0 };
    pub const WHITE: ColorU8 = ColorU8 { r: 255, g: 255, b: 255 };
    pub const RED: ColorU8 = ColorU8 { r: 255, g: 0, b: 0 };
    pub const GREEN: ColorU8 = ColorU8 { r: 0, g: 255, b: 0 };
    pub const BLUE: ColorU8 = ColorU8 { r: 0, g: 0, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// sRGB color with straight alpha, as decoded from image files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorU8Alpha {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ColorU8Alpha {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Drop the alpha channel
    pub fn rgb(self) -> ColorU8 {
        ColorU8::new(self.r, self.g, self.b)
    }
}

/// Linear color, nominally 0.0-1.0 per channel
///
/// Blending and interpolation happen in this space. Values outside 0-1 are
/// allowed in intermediate results and clamped on conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorF {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl ColorF {
    pub const BLACK: ColorF = ColorF { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: ColorF = ColorF { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn scale(self, s: f32) -> Self {
        Self {
            r: self.r * s,
            g: self.g * s,
            b: self.b * s,
        }
    }
}

impl Add for ColorF {
    type Output = ColorF;
    fn add(self, other: ColorF) -> ColorF {
        ColorF {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
        }
    }
}

impl Mul<f32> for ColorF {
    type Output = ColorF;
    fn mul(self, s: f32) -> ColorF {
        self.scale(s)
    }
}

/// Encode one linear channel with the sRGB transfer curve, 0.0-1.0 in and out
#[inline]
fn encode_channel(c: f32) -> f32 {
    let c = c.clamp(0.0, 1.0);
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

#[inline]
fn decode_channel(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn quantize(c: f32) -> u8 {
    // NaN falls through clamp unchanged and casts to 0
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Convert a linear color to 8-bit sRGB (nearest, clamped to 0-255)
pub fn linear_to_srgb(color: ColorF) -> ColorU8 {
    ColorU8 {
        r: quantize(encode_channel(color.r)),
        g: quantize(encode_channel(color.g)),
        b: quantize(encode_channel(color.b)),
    }
}

/// Convert an 8-bit sRGB color to linear
pub fn srgb_to_linear(color: ColorU8) -> ColorF {
    ColorF {
        r: decode_channel(color.r as f32 / 255.0),
        g: decode_channel(color.g as f32 / 255.0),
        b: decode_channel(color.b as f32 / 255.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_to_srgb_endpoints() {
        assert_eq!(linear_to_srgb(ColorF::BLACK), ColorU8::BLACK);
        assert_eq!(linear_to_srgb(ColorF::WHITE), ColorU8::WHITE);
        assert_eq!(linear_to_srgb(ColorF::new(1.0, 0.0, 0.0)), ColorU8::RED);
    }

    #[test]
    fn test_linear_to_srgb_clamps_out_of_range() {
        let c = linear_to_srgb(ColorF::new(-0.5, 2.0, f32::NAN));
        assert_eq!(c, ColorU8::new(0, 255, 0));
    }

    #[test]
    fn test_linear_mid_grey_is_brighter_in_srgb() {
        // 18% linear grey encodes to roughly sRGB 118
        let c = linear_to_srgb(ColorF::new(0.18, 0.18, 0.18));
        assert!((c.r as i32 - 118).abs() <= 1);
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
    }

    #[test]
    fn test_srgb_round_trips_every_level() {
        for v in 0..=255u8 {
            let c = ColorU8::new(v, v, v);
            assert_eq!(linear_to_srgb(srgb_to_linear(c)), c);
        }
    }

    #[test]
    fn test_colorf_blend() {
        let a = ColorF::new(1.0, 0.0, 0.0);
        let b = ColorF::new(0.0, 1.0, 0.0);
        let mix = a * 0.25 + b * 0.75;
        assert!((mix.r - 0.25).abs() < 0.0001);
        assert!((mix.g - 0.75).abs() < 0.0001);
        assert_eq!(mix.b, 0.0);
    }
}
