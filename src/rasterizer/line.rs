//! Line rasterization: Liang-Barsky clipping followed by Bresenham

use super::color::ColorU8;
use super::math::Vec2;
use super::surface::Surface;

/// Liang-Barsky clip of segment p0-p1 against the rectangle [0, width] x [0, height]
///
/// Returns the clipped endpoints (not yet snapped to pixels), or None if no
/// part of the segment covers a pixel of the surface.
pub fn clip_line(width: u32, height: u32, p0: Vec2, p1: Vec2) -> Option<(Vec2, Vec2)> {
    if !(p0.x.is_finite() && p0.y.is_finite() && p1.x.is_finite() && p1.y.is_finite()) {
        return None;
    }

    let w = width as f64;
    let h = height as f64;
    let (x0, y0) = (p0.x as f64, p0.y as f64);
    let (dx, dy) = (p1.x as f64 - x0, p1.y as f64 - y0);

    // Left, right, top, bottom
    let p = [-dx, dx, -dy, dy];
    let q = [x0, w - x0, y0, h - y0];

    // Parameter and boundary index where the segment enters and leaves
    let mut enter = (0.0f64, None);
    let mut leave = (1.0f64, None);
    for (i, (pi, qi)) in p.into_iter().zip(q).enumerate() {
        if pi == 0.0 {
            // Parallel to this boundary and on its outer side
            if qi < 0.0 {
                return None;
            }
        } else {
            let t = qi / pi;
            if pi < 0.0 {
                if t > enter.0 {
                    enter = (t, Some(i));
                }
            } else if t < leave.0 {
                leave = (t, Some(i));
            }
        }
    }

    if enter.0 > leave.0 {
        return None;
    }

    // The clipped coordinate is put exactly on its boundary; t alone loses
    // it when the endpoints are far away
    let bounds = [0.0, w, 0.0, h];
    let point_at = |(t, edge): (f64, Option<usize>)| {
        let mut x = x0 + dx * t;
        let mut y = y0 + dy * t;
        match edge {
            Some(i @ (0 | 1)) => x = bounds[i],
            Some(i) => y = bounds[i],
            None => {}
        }
        (x, y)
    };
    let a = point_at(enter);
    let b = point_at(leave);

    // Entirely on the right or bottom boundary: touches no pixel
    if (a.0 >= w && b.0 >= w) || (a.1 >= h && b.1 >= h) {
        return None;
    }

    Some((
        Vec2::new(a.0 as f32, a.1 as f32),
        Vec2::new(b.0 as f32, b.1 as f32),
    ))
}

/// Draw a solid line from p0 to p1
///
/// Endpoints may lie anywhere; the segment is clipped to the surface first,
/// so nothing is written out of bounds. Both endpoints are drawn.
pub fn draw_line_solid(surface: &mut Surface, p0: Vec2, p1: Vec2, color: ColorU8) {
    let (a, b) = match clip_line(surface.width(), surface.height(), p0, p1) {
        Some(clipped) => clipped,
        None => return,
    };

    let max_x = surface.width() as i32 - 1;
    let max_y = surface.height() as i32 - 1;
    // Clipped points can sit exactly on the far boundary or a hair outside
    // the near one after rounding
    let snap = |v: Vec2| {
        (
            (v.x.floor() as i32).clamp(0, max_x),
            (v.y.floor() as i32).clamp(0, max_y),
        )
    };
    let (x0, y0) = snap(a);
    let (x1, y1) = snap(b);

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut x = x0;
    let mut y = y0;

    // A clipped line never needs more steps than this
    let budget = surface.width() as usize + surface.height() as usize + 1;

    for _ in 0..budget {
        surface.set_pixel(x as u32, y as u32, color);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Draw connected segments through `points`
///
/// A single point draws one pixel; an empty slice draws nothing.
pub fn draw_line_strip(surface: &mut Surface, points: &[Vec2], color: ColorU8) {
    match points {
        [] => {}
        [p] => draw_line_solid(surface, *p, *p, color),
        _ => {
            for seg in points.windows(2) {
                draw_line_solid(surface, seg[0], seg[1], color);
            }
        }
    }
}
