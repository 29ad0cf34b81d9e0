//! Software 2D rasterizer
//!
//! Features:
//! - Owned RGB8 surface, row-major, origin top-left
//! - Lines: Liang-Barsky clipping + Bresenham
//! - Triangles: edge-function fill, flat or with linear color interpolation
//! - Rectangles: half-open fill and outline
//! - RGBA images: alpha-masked and opaque blits
//!
//! Every entry point takes geometry in surface pixel space, writes in place
//! and never touches pixels outside the surface.

mod blit;
mod color;
mod line;
mod math;
mod rect;
mod surface;
mod triangle;

pub use blit::*;
pub use color::*;
pub use line::*;
pub use math::*;
pub use rect::*;
pub use surface::*;
pub use triangle::*;
