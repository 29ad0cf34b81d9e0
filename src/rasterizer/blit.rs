//! RGBA images and blitting them onto a surface

use super::color::{ColorU8, ColorU8Alpha};
use super::math::Vec2;
use super::surface::Surface;

/// Pixels with alpha below this are treated as transparent by `blit_masked`
pub const ALPHA_THRESHOLD: u8 = 128;

/// RGBA image, row-major, origin top-left
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRgba {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<ColorU8Alpha>,
    pub name: String,
}

impl ImageRgba {
    /// Fully transparent image
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![ColorU8Alpha::default(); width as usize * height as usize],
            name: String::new(),
        }
    }

    /// Load an image from a PNG/JPEG/BMP file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let img = ::image::open(path)
            .map_err(|e| format!("Failed to load {}: {}", path.display(), e))?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self::from_dynamic(img, name))
    }

    /// Load an image from encoded bytes
    pub fn from_bytes(bytes: &[u8], name: String) -> Result<Self, String> {
        let img = ::image::load_from_memory(bytes)
            .map_err(|e| format!("Failed to decode image: {}", e))?;
        Ok(Self::from_dynamic(img, name))
    }

    fn from_dynamic(img: ::image::DynamicImage, name: String) -> Self {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let pixels = rgba
            .pixels()
            .map(|p| ColorU8Alpha::new(p[0], p[1], p[2], p[3]))
            .collect();

        Self {
            width,
            height,
            pixels,
            name,
        }
    }

    /// Opaque/transparent checkerboard with 4-pixel cells
    pub fn checkerboard(width: u32, height: u32, color: ColorU8) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                let alpha = if ((x / 4) + (y / 4)) % 2 == 0 { 255 } else { 0 };
                pixels.push(ColorU8Alpha::new(color.r, color.g, color.b, alpha));
            }
        }
        Self { width, height, pixels, name: "checkerboard".to_string() }
    }

    /// Pixel at (x, y), transparent black outside the image
    pub fn get_pixel(&self, x: u32, y: u32) -> ColorU8Alpha {
        if x < self.width && y < self.height {
            self.pixels[y as usize * self.width as usize + x as usize]
        } else {
            ColorU8Alpha::default()
        }
    }
}

/// Load an image file; see `ImageRgba::from_file`
pub fn load_image<P: AsRef<std::path::Path>>(path: P) -> Result<ImageRgba, String> {
    ImageRgba::from_file(path)
}

/// Integer destination rectangle of an image placed at `position`, clipped
/// to the surface. Returns (dst_x, dst_y, src_x0, src_y0, src_x1, src_y1).
fn blit_bounds(surface: &Surface, image: &ImageRgba, position: Vec2) -> Option<(i64, i64, u32, u32, u32, u32)> {
    if !(position.x.is_finite() && position.y.is_finite()) {
        return None;
    }
    let dst_x = position.x.floor() as i64;
    let dst_y = position.y.floor() as i64;

    // Source rows/cols that land on the surface
    let src_x0 = (-dst_x).clamp(0, image.width as i64);
    let src_y0 = (-dst_y).clamp(0, image.height as i64);
    let src_x1 = (surface.width() as i64 - dst_x).clamp(0, image.width as i64);
    let src_y1 = (surface.height() as i64 - dst_y).clamp(0, image.height as i64);
    if src_x0 >= src_x1 || src_y0 >= src_y1 {
        return None;
    }

    Some((dst_x, dst_y, src_x0 as u32, src_y0 as u32, src_x1 as u32, src_y1 as u32))
}

/// Copy an image onto the surface with its top-left corner at `position`,
/// skipping pixels with alpha below `ALPHA_THRESHOLD`
pub fn blit_masked(surface: &mut Surface, image: &ImageRgba, position: Vec2) {
    let Some((dst_x, dst_y, sx0, sy0, sx1, sy1)) = blit_bounds(surface, image, position) else {
        return;
    };

    for sy in sy0..sy1 {
        let row = sy as usize * image.width as usize;
        for sx in sx0..sx1 {
            let px = image.pixels[row + sx as usize];
            if px.a >= ALPHA_THRESHOLD {
                surface.set_pixel((dst_x + sx as i64) as u32, (dst_y + sy as i64) as u32, px.rgb());
            }
        }
    }
}

/// Copy every image pixel onto the surface, ignoring alpha
pub fn blit_opaque(surface: &mut Surface, image: &ImageRgba, position: Vec2) {
    let Some((dst_x, dst_y, sx0, sy0, sx1, sy1)) = blit_bounds(surface, image, position) else {
        return;
    };

    for sy in sy0..sy1 {
        let row = sy as usize * image.width as usize;
        for sx in sx0..sx1 {
            let px = image.pixels[row + sx as usize];
            surface.set_pixel((dst_x + sx as i64) as u32, (dst_y + sy as i64) as u32, px.rgb());
        }
    }
}
