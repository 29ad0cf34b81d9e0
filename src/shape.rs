//! Line strips: polylines in model space placed on the surface with a 2D transform

use serde::{Serialize, Deserialize};
use crate::rasterizer::{draw_line_strip, make_rotation_2d, ColorU8, Surface, Vec2};

/// Placement of a model-space shape: scale, then rotate, then translate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform2D {
    pub position: Vec2,
    /// Radians
    pub rotation: f32,
    pub scale: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: 1.0,
        }
    }
}

impl Transform2D {
    pub fn apply(&self, p: Vec2) -> Vec2 {
        self.position + make_rotation_2d(self.rotation) * (p * self.scale)
    }
}

/// Connected sequence of points
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineStrip {
    pub points: Vec<Vec2>,
}

impl LineStrip {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// Closed spaceship outline, nose at the origin pointing along +x
    pub fn spaceship() -> Self {
        let points = [
            (0.0, 0.0),
            (-20.0, 40.0),
            (-100.0, 100.0),
            (-80.0, 80.0),
            (-50.0, 30.0),
            (-120.0, 0.0),
            (-50.0, -30.0),
            (-80.0, -80.0),
            (-100.0, -100.0),
            (-20.0, -40.0),
            (0.0, 0.0),
        ];
        Self::new(points.iter().map(|&(x, y)| Vec2::new(x, y)).collect())
    }

    pub fn transformed(&self, transform: &Transform2D) -> Vec<Vec2> {
        self.points.iter().map(|&p| transform.apply(p)).collect()
    }

    pub fn draw(&self, surface: &mut Surface, transform: &Transform2D, color: ColorU8) {
        draw_line_strip(surface, &self.transformed(transform), color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_transform_order() {
        let t = Transform2D {
            position: Vec2::new(100.0, 50.0),
            rotation: PI,
            scale: 2.0,
        };
        let p = t.apply(Vec2::new(1.0, 0.0));
        assert!((p.x - 98.0).abs() < 0.001);
        assert!((p.y - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_spaceship_is_closed() {
        let ship = LineStrip::spaceship();
        assert_eq!(ship.points.first(), ship.points.last());
    }

    #[test]
    fn test_draw_places_shape() {
        let mut s = Surface::new(200, 200).unwrap();
        let ship = LineStrip::spaceship();
        let t = Transform2D {
            position: Vec2::new(150.0, 100.0),
            rotation: 0.0,
            scale: 0.5,
        };
        ship.draw(&mut s, &t, ColorU8::WHITE);
        // Nose lands on the position
        assert_eq!(s.get_pixel(150, 100), ColorU8::WHITE);
        // Tail at x = 150 - 60
        assert_eq!(s.get_pixel(90, 100), ColorU8::WHITE);
        assert_eq!(s.get_pixel(10, 10), ColorU8::BLACK);
    }
}
