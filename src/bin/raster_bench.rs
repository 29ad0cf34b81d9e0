//! Rasterizer microbenchmarks
//!
//! Compares Bresenham against a floating-point DDA for a full-surface
//! diagonal, and alpha-masked against opaque blits, at several resolutions.
//!
//! Usage: `raster-bench [image.png]` (without a path a generated
//! checkerboard is blitted)

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), String> {
    native::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{Duration, Instant};
    use draw2d::{
        blit_masked, blit_opaque, draw_line_solid, load_image, ColorU8, ImageRgba, Surface, Vec2,
    };
    use indicatif::{ProgressBar, ProgressStyle};

    const RESOLUTIONS: [(u32, u32); 4] = [(320, 240), (1280, 720), (1920, 1080), (7680, 4320)];
    const ITERATIONS: u64 = 50;

    /// Floating-point DDA line, the baseline Bresenham is measured against
    fn draw_line_dda(surface: &mut Surface, x0: i32, y0: i32, x1: i32, y1: i32, color: ColorU8) {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let steps = dx.abs().max(dy.abs());
        if steps == 0 {
            surface.set_pixel_checked(x0, y0, color);
            return;
        }

        let x_inc = dx as f32 / steps as f32;
        let y_inc = dy as f32 / steps as f32;
        let mut x = x0 as f32;
        let mut y = y0 as f32;
        for _ in 0..=steps {
            surface.set_pixel_checked(x.round() as i32, y.round() as i32, color);
            x += x_inc;
            y += y_inc;
        }
    }

    struct Report {
        name: &'static str,
        width: u32,
        height: u32,
        per_iter: Duration,
        bytes_per_iter: u64,
    }

    impl Report {
        fn print(&self) {
            let secs = self.per_iter.as_secs_f64();
            let throughput = if secs > 0.0 {
                self.bytes_per_iter as f64 / secs / (1024.0 * 1024.0)
            } else {
                f64::INFINITY
            };
            println!(
                "{:<18} {:>5}x{:<5} {:>12.3?} {:>10.1} MiB/s",
                self.name, self.width, self.height, self.per_iter, throughput
            );
        }
    }

    /// Time `ITERATIONS` runs of `f`
    fn measure(progress: &ProgressBar, mut f: impl FnMut()) -> Duration {
        let start = Instant::now();
        for _ in 0..ITERATIONS {
            f();
            progress.inc(1);
        }
        start.elapsed() / ITERATIONS as u32
    }

    pub fn run() -> Result<(), String> {
        let image = match std::env::args().nth(1) {
            Some(path) => load_image(&path)?,
            None => ImageRgba::checkerboard(512, 512, ColorU8::new(200, 80, 40)),
        };
        println!("Blitting {} ({}x{})", image.name, image.width, image.height);

        let benches_per_resolution = 5;
        let total = RESOLUTIONS.len() as u64 * benches_per_resolution * ITERATIONS;
        let progress = ProgressBar::new(total);
        progress.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let mut reports = Vec::new();
        for (width, height) in RESOLUTIONS {
            let mut surface = Surface::new(width, height).map_err(|e| e.to_string())?;
            progress.set_message(format!("{}x{}", width, height));

            // Clearing is timed on its own so it stays out of the line numbers
            let clear_bytes = width as u64 * height as u64 * 3;
            let per_iter = measure(&progress, || surface.clear());
            reports.push(Report { name: "clear", width, height, per_iter, bytes_per_iter: clear_bytes });

            // A diagonal writes one pixel per step along the major axis
            let line_bytes = width.max(height) as u64 * 3;
            let end = Vec2::new(width as f32 - 1.0, height as f32 - 1.0);

            let per_iter = measure(&progress, || {
                draw_line_solid(&mut surface, Vec2::ZERO, end, ColorU8::WHITE);
            });
            reports.push(Report { name: "line bresenham", width, height, per_iter, bytes_per_iter: line_bytes });

            surface.clear();
            let per_iter = measure(&progress, || {
                draw_line_dda(&mut surface, 0, 0, width as i32 - 1, height as i32 - 1, ColorU8::WHITE);
            });
            reports.push(Report { name: "line dda", width, height, per_iter, bytes_per_iter: line_bytes });

            // Read + write of every blitted pixel
            let blit_bytes = 2 * width.min(image.width) as u64 * height.min(image.height) as u64 * 4;

            let per_iter = measure(&progress, || blit_masked(&mut surface, &image, Vec2::ZERO));
            reports.push(Report { name: "blit masked", width, height, per_iter, bytes_per_iter: blit_bytes });

            let per_iter = measure(&progress, || blit_opaque(&mut surface, &image, Vec2::ZERO));
            reports.push(Report { name: "blit opaque", width, height, per_iter, bytes_per_iter: blit_bytes });
        }
        progress.finish_and_clear();

        println!("{:<18} {:>11} {:>12} {:>16}", "benchmark", "size", "time/iter", "throughput");
        for report in &reports {
            report.print();
        }

        Ok(())
    }
}
