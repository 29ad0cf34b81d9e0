//! Axis-aligned rectangles
//!
//! Coverage is half-open: integer column x is covered when
//! `min.x <= x < max.x`, and likewise for rows. Corners may be given in any
//! order and anywhere; coverage is clamped to the surface.

use super::color::ColorU8;
use super::math::Vec2;
use super::surface::Surface;

/// Integer span [start, end) covered by the interval between a and b
fn covered_span(a: f32, b: f32) -> Option<(i32, i32)> {
    if !(a.is_finite() && b.is_finite()) {
        return None;
    }
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let start = lo.ceil() as i32;
    let end = hi.ceil() as i32;
    if start < end {
        Some((start, end))
    } else {
        None
    }
}

/// Fill a rectangle
pub fn draw_rectangle_solid(surface: &mut Surface, min_corner: Vec2, max_corner: Vec2, color: ColorU8) {
    let (Some((x0, x1)), Some((y0, y1))) = (
        covered_span(min_corner.x, max_corner.x),
        covered_span(min_corner.y, max_corner.y),
    ) else {
        return;
    };

    let x0 = x0.max(0);
    let x1 = x1.min(surface.width() as i32);
    let y0 = y0.max(0);
    let y1 = y1.min(surface.height() as i32);

    for y in y0..y1 {
        for x in x0..x1 {
            surface.set_pixel(x as u32, y as u32, color);
        }
    }
}

/// Draw the first and last covered row and column of a rectangle
///
/// Sides that fall outside the surface are not drawn.
pub fn draw_rectangle_outline(surface: &mut Surface, min_corner: Vec2, max_corner: Vec2, color: ColorU8) {
    let (Some((x0, x1)), Some((y0, y1))) = (
        covered_span(min_corner.x, max_corner.x),
        covered_span(min_corner.y, max_corner.y),
    ) else {
        return;
    };

    let w = surface.width() as i32;
    let h = surface.height() as i32;

    // Horizontal sides
    for y in [y0, y1 - 1] {
        if y >= 0 && y < h {
            for x in x0.max(0)..x1.min(w) {
                surface.set_pixel(x as u32, y as u32, color);
            }
        }
    }

    // Vertical sides
    for x in [x0, x1 - 1] {
        if x >= 0 && x < w {
            for y in y0.max(0)..y1.min(h) {
                surface.set_pixel(x as u32, y as u32, color);
            }
        }
    }
}
