//! 2D vector math for pixel-space geometry

use std::ops::{Add, Mul, Sub};
use serde::{Serialize, Deserialize};

/// 2D Vector (pixel-space point or offset)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn scale(self, s: f32) -> Vec2 {
        Vec2 {
            x: self.x * s,
            y: self.y * s,
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f32) -> Vec2 {
        self.scale(s)
    }
}

/// 2x2 matrix, row-major
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat22 {
    pub m00: f32,
    pub m01: f32,
    pub m10: f32,
    pub m11: f32,
}

impl Mat22 {
    pub const IDENTITY: Mat22 = Mat22 { m00: 1.0, m01: 0.0, m10: 0.0, m11: 1.0 };

    pub fn new(m00: f32, m01: f32, m10: f32, m11: f32) -> Self {
        Self { m00, m01, m10, m11 }
    }
}

impl Mul for Mat22 {
    type Output = Mat22;
    fn mul(self, rhs: Mat22) -> Mat22 {
        Mat22 {
            m00: self.m00 * rhs.m00 + self.m01 * rhs.m10,
            m01: self.m00 * rhs.m01 + self.m01 * rhs.m11,
            m10: self.m10 * rhs.m00 + self.m11 * rhs.m10,
            m11: self.m10 * rhs.m01 + self.m11 * rhs.m11,
        }
    }
}

impl Mul<Vec2> for Mat22 {
    type Output = Vec2;
    fn mul(self, v: Vec2) -> Vec2 {
        Vec2 {
            x: self.m00 * v.x + self.m01 * v.y,
            y: self.m10 * v.x + self.m11 * v.y,
        }
    }
}

/// Rotation by `angle` radians (counter-clockwise with y pointing up,
/// clockwise on screen where y points down)
pub fn make_rotation_2d(angle: f32) -> Mat22 {
    let (sin, cos) = angle.sin_cos();
    Mat22::new(cos, -sin, sin, cos)
}

/// Signed edge function for point p relative to edge (a -> b).
///
/// This is the 2D cross product (p - a) x (b - a). Evaluated with the third
/// vertex of a triangle as `p`, it gives the triangle's signed double area.
/// Computed in f64 so huge but finite vertices do not overflow.
#[inline]
pub fn edge_function(a: Vec2, b: Vec2, p: Vec2) -> f64 {
    edge_function_at(a, b, p.x as f64, p.y as f64)
}

/// Edge function at a double-precision sample point
#[inline]
pub fn edge_function_at(a: Vec2, b: Vec2, px: f64, py: f64) -> f64 {
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (bx, by) = (b.x as f64, b.y as f64);
    (px - ax) * (by - ay) - (py - ay) * (bx - ax)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_vec2_ops() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, -4.0);
        assert_eq!(a + b, Vec2::new(4.0, -2.0));
        assert_eq!(a - b, Vec2::new(-2.0, 6.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert!((a.dot(b) + 5.0).abs() < 0.001);
    }

    #[test]
    fn test_rotation_quarter_turn() {
        let r = make_rotation_2d(FRAC_PI_2);
        let v = r * Vec2::new(1.0, 0.0);
        assert!(v.x.abs() < 0.0001);
        assert!((v.y - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_mat22_mul_composes_rotations() {
        let a = make_rotation_2d(0.3);
        let b = make_rotation_2d(0.5);
        let c = a * b;
        let expected = make_rotation_2d(0.8);
        assert!((c.m00 - expected.m00).abs() < 0.0001);
        assert!((c.m01 - expected.m01).abs() < 0.0001);
        assert!((c.m10 - expected.m10).abs() < 0.0001);
        assert!((c.m11 - expected.m11).abs() < 0.0001);
        assert_eq!(Mat22::IDENTITY * a, a);
    }

    #[test]
    fn test_edge_function_sign_follows_winding() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        let c = Vec2::new(0.0, 10.0);
        let area = edge_function(a, b, c);
        let flipped = edge_function(a, c, b);
        assert!((area + flipped).abs() < 0.001);
        assert!((area.abs() - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_edge_function_huge_coordinates_stay_finite() {
        let a = Vec2::new(-1e20, -1e20);
        let b = Vec2::new(3e20, -1e20);
        let c = Vec2::new(-1e20, 3e20);
        let area = edge_function(a, b, c);
        assert!(area.is_finite());
        assert!((area.abs() / 16e40 - 1.0).abs() < 1e-6);
        assert!(edge_function_at(a, b, 0.5, 0.5).signum() == area.signum());
    }
}
