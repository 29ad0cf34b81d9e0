//! Surface: owned RGB8 pixel buffer that all rasterizers draw into

use super::color::ColorU8;

/// Bytes per pixel (R, G, B)
const BYTES_PER_PIXEL: usize = 3;

/// Error type for surface construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceError {
    /// Width or height was zero
    ZeroDimension { width: u32, height: u32 },
    /// A side exceeds i32::MAX or the buffer cannot be allocated
    TooLarge { width: u32, height: u32 },
}

impl std::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceError::ZeroDimension { width, height } => {
                write!(f, "Surface dimensions must be positive, got {}x{}", width, height)
            }
            SurfaceError::TooLarge { width, height } => {
                write!(f, "Surface {}x{} is too large to allocate", width, height)
            }
        }
    }
}

impl std::error::Error for SurfaceError {}

/// RGB pixel buffer for software rendering
///
/// Row-major, origin top-left. The byte layout is private; everything goes
/// through the pixel accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl Surface {
    /// Create a black surface
    ///
    /// Zero-sized surfaces are rejected, as are sides above `i32::MAX`, so
    /// signed pixel coordinates always reach the far edge.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::ZeroDimension { width, height });
        }
        let too_large = SurfaceError::TooLarge { width, height };
        if width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(too_large);
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or(too_large)?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| too_large)?;
        pixels.resize(len, 0);

        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check if signed coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as u32) < self.width && y >= 0 && (y as u32) < self.height
    }

    /// Byte offset of pixel (x, y)
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) outside {}x{} surface",
            x,
            y,
            self.width,
            self.height
        );
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }

    /// Reset every pixel to black
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Set every pixel to `color`
    pub fn fill(&mut self, color: ColorU8) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&bytes);
        }
    }

    /// Write a pixel. The caller guarantees `x < width` and `y < height`.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: ColorU8) {
        let idx = self.pixel_index(x, y);
        self.pixels[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&color.to_bytes());
    }

    /// Read a pixel. The caller guarantees `x < width` and `y < height`.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> ColorU8 {
        let idx = self.pixel_index(x, y);
        ColorU8::new(self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2])
    }

    /// Write a pixel if (x, y) is on the surface. Returns whether it was written.
    #[inline]
    pub fn set_pixel_checked(&mut self, x: i32, y: i32, color: ColorU8) -> bool {
        if self.in_bounds(x, y) {
            self.set_pixel(x as u32, y as u32, color);
            true
        } else {
            false
        }
    }

    /// Read a pixel, None if out of bounds
    #[inline]
    pub fn pixel_at(&self, x: i32, y: i32) -> Option<ColorU8> {
        if self.in_bounds(x, y) {
            Some(self.get_pixel(x as u32, y as u32))
        } else {
            None
        }
    }

    /// Number of pixels exactly equal to `color`
    pub fn count_pixels(&self, color: ColorU8) -> usize {
        let bytes = color.to_bytes();
        self.pixels
            .chunks_exact(BYTES_PER_PIXEL)
            .filter(|px| *px == bytes)
            .count()
    }

    /// Opaque RGBA8 copy, for uploading to a display texture
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.width as usize * self.height as usize * 4);
        for px in self.pixels.chunks_exact(BYTES_PER_PIXEL) {
            out.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        out
    }
}
