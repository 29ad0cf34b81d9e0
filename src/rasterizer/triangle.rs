//! Triangle rasterization with edge functions over the clamped bounding box

use super::color::{linear_to_srgb, ColorF, ColorU8};
use super::line::draw_line_solid;
use super::math::{edge_function, edge_function_at, Vec2};
use super::surface::Surface;

/// Triangles with less signed double area than this are skipped
const DEGENERATE_AREA: f64 = 1e-6;

/// Per-call triangle state: vertices, reciprocal area, pixel bounds
struct TriangleSetup {
    v0: Vec2,
    v1: Vec2,
    v2: Vec2,
    inv_area: f64,
    min_x: u32,
    max_x: u32,
    min_y: u32,
    max_y: u32,
}

/// Inclusive pixel range [lo, hi] covered by the extent [min, max], clamped to [0, size)
fn pixel_range(min: f32, max: f32, size: u32) -> Option<(u32, u32)> {
    // Float to int casts saturate, so far-off vertices stay in range
    let lo = (min.floor() as i64).max(0);
    let hi = (max.ceil() as i64).min(size as i64 - 1);
    if lo > hi {
        return None;
    }
    Some((lo as u32, hi as u32))
}

impl TriangleSetup {
    /// None for degenerate triangles and triangles that miss the surface
    fn new(surface: &Surface, v0: Vec2, v1: Vec2, v2: Vec2) -> Option<Self> {
        let area = edge_function(v0, v1, v2);
        if !area.is_finite() || area.abs() < DEGENERATE_AREA {
            return None;
        }

        let (min_x, max_x) = pixel_range(
            v0.x.min(v1.x).min(v2.x),
            v0.x.max(v1.x).max(v2.x),
            surface.width(),
        )?;
        let (min_y, max_y) = pixel_range(
            v0.y.min(v1.y).min(v2.y),
            v0.y.max(v1.y).max(v2.y),
            surface.height(),
        )?;

        Some(Self {
            v0,
            v1,
            v2,
            inv_area: 1.0 / area,
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }

    /// Barycentric weights of the sample point (px, py), summing to 1
    ///
    /// Dividing by the signed area makes all three non-negative inside the
    /// triangle for either winding.
    #[inline]
    fn weights(&self, px: f64, py: f64) -> [f64; 3] {
        [
            edge_function_at(self.v1, self.v2, px, py) * self.inv_area,
            edge_function_at(self.v2, self.v0, px, py) * self.inv_area,
            edge_function_at(self.v0, self.v1, px, py) * self.inv_area,
        ]
    }

    /// Call `f(x, y, weights)` for every pixel whose center is inside the triangle
    fn for_each_covered(&self, mut f: impl FnMut(u32, u32, [f32; 3])) {
        for y in self.min_y..=self.max_y {
            let py = y as f64 + 0.5;
            for x in self.min_x..=self.max_x {
                let w = self.weights(x as f64 + 0.5, py);
                if w[0] >= 0.0 && w[1] >= 0.0 && w[2] >= 0.0 {
                    f(x, y, [w[0] as f32, w[1] as f32, w[2] as f32]);
                }
            }
        }
    }
}

/// Fill a triangle with a flat color
///
/// A pixel is filled when its center lies inside or on the triangle. Zero-area
/// triangles draw nothing.
pub fn draw_triangle_solid(surface: &mut Surface, p0: Vec2, p1: Vec2, p2: Vec2, color: ColorU8) {
    if let Some(tri) = TriangleSetup::new(surface, p0, p1, p2) {
        tri.for_each_covered(|x, y, _| surface.set_pixel(x, y, color));
    }
}

/// Fill a triangle, interpolating linear vertex colors (affine, no perspective)
pub fn draw_triangle_interp(
    surface: &mut Surface,
    p0: Vec2,
    p1: Vec2,
    p2: Vec2,
    c0: ColorF,
    c1: ColorF,
    c2: ColorF,
) {
    if let Some(tri) = TriangleSetup::new(surface, p0, p1, p2) {
        tri.for_each_covered(|x, y, w| {
            let color = c0 * w[0] + c1 * w[1] + c2 * w[2];
            surface.set_pixel(x, y, linear_to_srgb(color));
        });
    }
}

/// Outline a triangle with three clipped lines
pub fn draw_triangle_wireframe(surface: &mut Surface, p0: Vec2, p1: Vec2, p2: Vec2, color: ColorU8) {
    draw_line_solid(surface, p0, p1, color);
    draw_line_solid(surface, p1, p2, color);
    draw_line_solid(surface, p2, p0, color);
}
