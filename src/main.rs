//! draw2d viewer
//!
//! Renders a RON scene with the software rasterizer and shows the surface
//! in a window, scaled up with nearest filtering.
//!
//! Usage: `draw2d [scene.ron]` (without a path the built-in scene is shown)
//!
//! Keys: Left/Right spin line strips, O open a scene, S save the scene as.

use draw2d::scene::{load_scene, load_scene_from_str, Scene};
use draw2d::{Surface, VERSION};
use macroquad::prelude::*;
use std::path::PathBuf;

const DEFAULT_SCENE: &str = include_str!("../assets/scenes/spaceship.ron");

/// Strip rotation speed, radians per second
const SPIN_SPEED: f32 = 1.5;

const STATUS_BAR_HEIGHT: f32 = 24.0;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("draw2d v{}", VERSION),
        window_width: 960,
        window_height: 720 + STATUS_BAR_HEIGHT as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

struct Viewer {
    scene: Scene,
    current_file: Option<PathBuf>,
    surface: Option<Surface>,
    texture: Option<Texture2D>,
    dirty: bool,
    status: String,
    status_timer: f32,
}

impl Viewer {
    fn new(scene: Scene, current_file: Option<PathBuf>) -> Self {
        Self {
            scene,
            current_file,
            surface: None,
            texture: None,
            dirty: true,
            status: String::new(),
            status_timer: 0.0,
        }
    }

    fn set_status(&mut self, msg: &str, duration: f32) {
        self.status = msg.to_string();
        self.status_timer = duration;
    }

    fn set_scene(&mut self, scene: Scene, path: PathBuf) {
        self.scene = scene;
        self.current_file = Some(path);
        self.dirty = true;
    }

    /// Rasterize the scene and upload it, reusing the surface when the size is unchanged
    fn rerender(&mut self) {
        self.dirty = false;

        if self.scene.width > u16::MAX as u32 || self.scene.height > u16::MAX as u32 {
            self.set_status("Scene is too large to display", 5.0);
            return;
        }

        let result = match self.surface.as_mut() {
            Some(surface)
                if surface.width() == self.scene.width && surface.height() == self.scene.height =>
            {
                self.scene.render_into(surface)
            }
            _ => match self.scene.render() {
                Ok(surface) => {
                    self.surface = Some(surface);
                    Ok(())
                }
                Err(e) => Err(e),
            },
        };

        if let Err(e) = result {
            eprintln!("Render failed: {}", e);
            self.set_status(&format!("Render failed: {}", e), 5.0);
            return;
        }

        if let Some(surface) = &self.surface {
            let texture = Texture2D::from_rgba8(
                surface.width() as u16,
                surface.height() as u16,
                &surface.to_rgba8(),
            );
            texture.set_filter(FilterMode::Nearest);
            self.texture = Some(texture);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn prompt_open(&mut self) {
        let mut dialog = rfd::FileDialog::new().add_filter("RON Scene", &["ron"]);
        if let Some(dir) = self.current_file.as_ref().and_then(|p| p.parent()) {
            dialog = dialog.set_directory(dir);
        }

        if let Some(path) = dialog.pick_file() {
            match load_scene(&path) {
                Ok(scene) => {
                    println!("Loaded scene {} ({} shapes)", path.display(), scene.shapes.len());
                    self.set_status(&format!("Loaded {}", path.display()), 3.0);
                    self.set_scene(scene, path);
                }
                Err(e) => {
                    eprintln!("Failed to load scene {}: {}", path.display(), e);
                    self.set_status(&format!("Load failed: {}", e), 5.0);
                }
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn prompt_save(&mut self) {
        use draw2d::scene::save_scene;

        let file_name = self
            .current_file
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "scene.ron".to_string());
        let mut dialog = rfd::FileDialog::new()
            .add_filter("RON Scene", &["ron"])
            .set_file_name(&file_name);
        if let Some(dir) = self.current_file.as_ref().and_then(|p| p.parent()) {
            dialog = dialog.set_directory(dir);
        }

        if let Some(path) = dialog.save_file() {
            match save_scene(&self.scene, &path) {
                Ok(()) => {
                    println!("Saved scene to {}", path.display());
                    self.set_status(&format!("Saved as {}", path.display()), 3.0);
                    self.current_file = Some(path);
                }
                Err(e) => {
                    eprintln!("Failed to save scene {}: {}", path.display(), e);
                    self.set_status(&format!("Save failed: {}", e), 5.0);
                }
            }
        }
    }

    fn draw(&self) {
        let avail_w = screen_width();
        let avail_h = screen_height() - STATUS_BAR_HEIGHT;

        if let Some(texture) = &self.texture {
            let (tw, th) = (texture.width(), texture.height());
            // Whole-number upscaling keeps pixels square
            let mut scale = (avail_w / tw).min(avail_h / th);
            if scale >= 1.0 {
                scale = scale.floor();
            }
            let (w, h) = (tw * scale, th * scale);

            draw_texture_ex(
                texture,
                ((avail_w - w) * 0.5).floor(),
                ((avail_h - h) * 0.5).floor(),
                WHITE,
                DrawTextureParams {
                    dest_size: Some(macroquad::math::Vec2::new(w, h)),
                    ..Default::default()
                },
            );
        }

        let bar_y = screen_height() - STATUS_BAR_HEIGHT;
        draw_rectangle(0.0, bar_y, avail_w, STATUS_BAR_HEIGHT, Color::from_rgba(20, 20, 24, 255));

        let text = if self.status_timer > 0.0 {
            self.status.clone()
        } else {
            let name = self
                .current_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in scene".to_string());
            format!(
                "{} - {}x{} - {} shapes - Left/Right: spin  O: open  S: save",
                name,
                self.scene.width,
                self.scene.height,
                self.scene.shapes.len()
            )
        };
        draw_text(&text, 8.0, bar_y + 17.0, 18.0, Color::from_rgba(200, 200, 200, 255));
    }
}

/// Scene from the command line, falling back to the built-in one
fn initial_scene() -> (Scene, Option<PathBuf>) {
    if let Some(arg) = std::env::args().nth(1) {
        let path = PathBuf::from(arg);
        match load_scene(&path) {
            Ok(scene) => {
                println!("Loaded scene {} ({} shapes)", path.display(), scene.shapes.len());
                return (scene, Some(path));
            }
            Err(e) => eprintln!("Failed to load scene {}: {}, using built-in scene", path.display(), e),
        }
    }

    match load_scene_from_str(DEFAULT_SCENE) {
        Ok(scene) => (scene, None),
        Err(e) => {
            eprintln!("Built-in scene is invalid: {}", e);
            (Scene::new(320, 240), None)
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let (scene, current_file) = initial_scene();
    let mut viewer = Viewer::new(scene, current_file);

    println!("=== draw2d v{} ===", VERSION);

    loop {
        let dt = get_frame_time();
        viewer.status_timer = (viewer.status_timer - dt).max(0.0);

        let mut spin = 0.0;
        if is_key_down(KeyCode::Left) {
            spin -= SPIN_SPEED * dt;
        }
        if is_key_down(KeyCode::Right) {
            spin += SPIN_SPEED * dt;
        }
        if spin != 0.0 {
            viewer.scene.rotate_strips(spin);
            viewer.dirty = true;
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            if is_key_pressed(KeyCode::O) {
                viewer.prompt_open();
            }
            if is_key_pressed(KeyCode::S) {
                viewer.prompt_save();
            }
        }

        if viewer.dirty {
            viewer.rerender();
        }

        clear_background(Color::from_rgba(30, 30, 35, 255));
        viewer.draw();

        next_frame().await;
    }
}
