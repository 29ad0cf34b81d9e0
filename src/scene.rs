//! Scene loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable scene files. A scene
//! is a surface size, a background color and a list of shapes drawn in order.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};
use crate::rasterizer::{
    blit_masked, draw_line_solid, draw_rectangle_outline, draw_rectangle_solid,
    draw_triangle_interp, draw_triangle_solid, draw_triangle_wireframe, load_image, ColorF,
    ColorU8, ImageRgba, Surface, SurfaceError, Vec2,
};
use crate::shape::{LineStrip, Transform2D};

/// Error type for scene loading and rendering
#[derive(Debug)]
pub enum SceneError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    SurfaceError(SurfaceError),
    ImageError(String),
}

impl From<std::io::Error> for SceneError {
    fn from(e: std::io::Error) -> Self {
        SceneError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for SceneError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneError::ParseError(e)
    }
}

impl From<ron::Error> for SceneError {
    fn from(e: ron::Error) -> Self {
        SceneError::SerializeError(e)
    }
}

impl From<SurfaceError> for SceneError {
    fn from(e: SurfaceError) -> Self {
        SceneError::SurfaceError(e)
    }
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::IoError(e) => write!(f, "IO error: {}", e),
            SceneError::ParseError(e) => write!(f, "Parse error: {}", e),
            SceneError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            SceneError::SurfaceError(e) => write!(f, "Surface error: {}", e),
            SceneError::ImageError(e) => write!(f, "Image error: {}", e),
        }
    }
}

impl std::error::Error for SceneError {}

/// One drawable item in a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Line {
        from: Vec2,
        to: Vec2,
        color: ColorU8,
    },
    Triangle {
        points: [Vec2; 3],
        color: ColorU8,
    },
    TriangleInterp {
        points: [Vec2; 3],
        /// Linear colors, one per vertex
        colors: [ColorF; 3],
    },
    TriangleWireframe {
        points: [Vec2; 3],
        color: ColorU8,
    },
    Rectangle {
        min: Vec2,
        max: Vec2,
        color: ColorU8,
    },
    RectangleOutline {
        min: Vec2,
        max: Vec2,
        color: ColorU8,
    },
    Strip {
        strip: LineStrip,
        #[serde(default)]
        transform: Transform2D,
        color: ColorU8,
    },
    /// Alpha-masked image, path relative to the scene file
    Image {
        path: String,
        position: Vec2,
    },
}

/// A surface description plus the shapes drawn onto it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub background: ColorU8,
    #[serde(default)]
    pub shapes: Vec<Shape>,
    /// Directory image paths are resolved against (not serialized)
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
    /// Decoded images keyed by their path in the scene (not serialized)
    #[serde(skip)]
    pub images: HashMap<String, ImageRgba>,
}

/// Image path as written in the scene, resolved against the scene's directory
fn resolve_image_path(base_dir: Option<&Path>, path: &str) -> PathBuf {
    match base_dir {
        Some(dir) => dir.join(path),
        None => PathBuf::from(path),
    }
}

impl Scene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: ColorU8::BLACK,
            shapes: Vec::new(),
            base_dir: None,
            images: HashMap::new(),
        }
    }

    /// Decode every referenced image that is not cached yet
    pub fn load_images(&mut self) -> Result<(), SceneError> {
        for shape in &self.shapes {
            if let Shape::Image { path, .. } = shape {
                if self.images.contains_key(path) {
                    continue;
                }
                let full = resolve_image_path(self.base_dir.as_deref(), path);
                let image = load_image(&full).map_err(SceneError::ImageError)?;
                self.images.insert(path.clone(), image);
            }
        }
        Ok(())
    }

    /// Rasterize the scene into a fresh surface
    pub fn render(&self) -> Result<Surface, SceneError> {
        let mut surface = Surface::new(self.width, self.height)?;
        self.render_into(&mut surface)?;
        Ok(surface)
    }

    /// Clear `surface` to the background and draw every shape in order
    pub fn render_into(&self, surface: &mut Surface) -> Result<(), SceneError> {
        surface.fill(self.background);

        for shape in &self.shapes {
            match shape {
                Shape::Line { from, to, color } => draw_line_solid(surface, *from, *to, *color),
                Shape::Triangle { points: [a, b, c], color } => {
                    draw_triangle_solid(surface, *a, *b, *c, *color)
                }
                Shape::TriangleInterp { points: [a, b, c], colors: [ca, cb, cc] } => {
                    draw_triangle_interp(surface, *a, *b, *c, *ca, *cb, *cc)
                }
                Shape::TriangleWireframe { points: [a, b, c], color } => {
                    draw_triangle_wireframe(surface, *a, *b, *c, *color)
                }
                Shape::Rectangle { min, max, color } => draw_rectangle_solid(surface, *min, *max, *color),
                Shape::RectangleOutline { min, max, color } => {
                    draw_rectangle_outline(surface, *min, *max, *color)
                }
                Shape::Strip { strip, transform, color } => strip.draw(surface, transform, *color),
                Shape::Image { path, position } => match self.images.get(path) {
                    Some(image) => blit_masked(surface, image, *position),
                    // Not cached: decode for this render only
                    None => {
                        let full = resolve_image_path(self.base_dir.as_deref(), path);
                        let image = load_image(&full).map_err(SceneError::ImageError)?;
                        blit_masked(surface, &image, *position);
                    }
                },
            }
        }

        Ok(())
    }

    /// Spin every line strip by `delta` radians
    pub fn rotate_strips(&mut self, delta: f32) {
        for shape in &mut self.shapes {
            if let Shape::Strip { transform, .. } = shape {
                transform.rotation += delta;
            }
        }
    }
}

/// Load a scene from a RON file, decoding its images once
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, SceneError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let mut scene: Scene = ron::from_str(&contents)?;
    scene.base_dir = path.parent().map(Path::to_path_buf);
    scene.load_images()?;
    Ok(scene)
}

/// Save a scene to a RON file
pub fn save_scene<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<(), SceneError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(scene, config)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Load a scene from a RON string (for the embedded default scene or testing)
pub fn load_scene_from_str(s: &str) -> Result<Scene, SceneError> {
    Ok(ron::from_str(s)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_SCENE: &str = include_str!("../assets/scenes/spaceship.ron");

    #[test]
    fn test_default_scene_parses_and_renders() {
        let scene = load_scene_from_str(DEFAULT_SCENE).unwrap();
        assert_eq!((scene.width, scene.height), (320, 240));
        assert!(scene.shapes.iter().any(|s| matches!(s, Shape::Strip { .. })));

        let surface = scene.render().unwrap();
        assert_eq!(surface.width(), 320);
        assert!(surface.count_pixels(scene.background) < 320 * 240);
    }

    #[test]
    fn test_render_draws_in_order() {
        let mut scene = Scene::new(32, 32);
        scene.background = ColorU8::new(0, 0, 64);
        scene.shapes.push(Shape::Rectangle {
            min: Vec2::new(0.0, 0.0),
            max: Vec2::new(16.0, 16.0),
            color: ColorU8::RED,
        });
        scene.shapes.push(Shape::Line {
            from: Vec2::new(0.0, 8.0),
            to: Vec2::new(31.0, 8.0),
            color: ColorU8::WHITE,
        });

        let s = scene.render().unwrap();
        assert_eq!(s.get_pixel(4, 4), ColorU8::RED);
        assert_eq!(s.get_pixel(4, 8), ColorU8::WHITE);
        assert_eq!(s.get_pixel(20, 20), ColorU8::new(0, 0, 64));
        assert_eq!(s.count_pixels(ColorU8::RED), 16 * 16 - 16);
    }

    #[test]
    fn test_zero_sized_scene_is_an_error() {
        let scene = Scene::new(0, 10);
        assert!(matches!(scene.render(), Err(SceneError::SurfaceError(_))));
    }

    #[test]
    fn test_missing_image_is_an_error() {
        let mut scene = Scene::new(8, 8);
        scene.shapes.push(Shape::Image {
            path: "does/not/exist.png".to_string(),
            position: Vec2::ZERO,
        });
        let err = scene.render().unwrap_err();
        assert!(matches!(err, SceneError::ImageError(_)));
        assert!(err.to_string().contains("exist.png"));
    }

    #[test]
    fn test_loaded_images_are_cached() {
        let dir = std::env::temp_dir().join(format!("draw2d_images_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let image_path = dir.join("dot.png");
        let dot = ::image::RgbaImage::from_pixel(2, 2, ::image::Rgba([255, 0, 0, 255]));
        dot.save(&image_path).unwrap();
        let scene_path = dir.join("scene.ron");
        fs::write(
            &scene_path,
            r#"Scene(width: 8, height: 8, shapes: [Image(path: "dot.png", position: (x: 3.0, y: 3.0))])"#,
        )
        .unwrap();

        let scene = load_scene(&scene_path).unwrap();
        // Rendering no longer touches the file
        fs::remove_file(&image_path).unwrap();
        let first = scene.render().unwrap();
        let second = scene.render().unwrap();
        let _ = fs::remove_dir_all(&dir);

        assert!(scene.images.contains_key("dot.png"));
        assert_eq!(first.count_pixels(ColorU8::RED), 4);
        assert_eq!(first.get_pixel(3, 3), ColorU8::RED);
        assert_eq!(first, second);
    }

    #[test]
    fn test_load_scene_reports_missing_image() {
        let dir = std::env::temp_dir().join(format!("draw2d_missing_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let scene_path = dir.join("scene.ron");
        fs::write(
            &scene_path,
            r#"Scene(width: 8, height: 8, shapes: [Image(path: "gone.png", position: (x: 0.0, y: 0.0))])"#,
        )
        .unwrap();

        let result = load_scene(&scene_path);
        let _ = fs::remove_dir_all(&dir);
        assert!(matches!(result, Err(SceneError::ImageError(_))));
    }

    #[test]
    fn test_parse_error_is_reported() {
        assert!(matches!(load_scene_from_str("Scene(width: )"), Err(SceneError::ParseError(_))));
    }

    #[test]
    fn test_rotate_strips_only_touches_strips() {
        let mut scene = load_scene_from_str(DEFAULT_SCENE).unwrap();
        let before = scene.clone();
        scene.rotate_strips(0.5);
        for (a, b) in before.shapes.iter().zip(&scene.shapes) {
            match (a, b) {
                (Shape::Strip { transform: ta, .. }, Shape::Strip { transform: tb, .. }) => {
                    assert!((tb.rotation - ta.rotation - 0.5).abs() < 0.0001);
                }
                _ => assert_eq!(a, b),
            }
        }
    }

    #[test]
    fn test_save_and_load_file() {
        let scene = load_scene_from_str(DEFAULT_SCENE).unwrap();
        let path = std::env::temp_dir().join(format!("draw2d_scene_{}.ron", std::process::id()));
        save_scene(&scene, &path).unwrap();
        let loaded = load_scene(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded.shapes, scene.shapes);
        assert_eq!(loaded.base_dir.as_deref(), path.parent());
    }
}
