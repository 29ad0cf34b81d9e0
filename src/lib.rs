//! draw2d: software 2D rasterizer
//!
//! Draws lines, triangles and rectangles into an in-memory RGB surface:
//! - Liang-Barsky clipped Bresenham lines
//! - Edge-function triangles, flat or with linear color interpolation
//! - Half-open rectangles
//! - Alpha-masked image blits
//! - RON scene files describing what to draw

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod rasterizer;
pub mod scene;
pub mod shape;

pub use rasterizer::*;
