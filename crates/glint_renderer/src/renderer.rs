//! Render driver.
//!
//! Walks every pixel, averages jittered samples, and follows each sample
//! through the scene until it escapes, is absorbed, or runs out of bounces.

use crate::{Camera, Color, HitRecord, Hittable, RenderError, RenderResult};
use glint_math::{Interval, Ray};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

/// Smallest accepted hit distance. Keeps scattered rays from re-hitting the
/// surface they start on.
pub const T_MIN: f32 = 0.001;

/// Render configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Background color when ray doesn't hit anything
    pub background: Color,
    /// Whether to use sky gradient instead of solid background
    pub use_sky_gradient: bool,
    /// Base seed; each image row derives its own generator from it
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 100,
            max_depth: 50,
            background: Color::ZERO,
            use_sky_gradient: true,
            seed: 0,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> RenderResult<()> {
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidConfig("samples_per_pixel must be at least 1".into()));
        }
        if self.max_depth == 0 {
            return Err(RenderError::InvalidConfig("max_depth must be at least 1".into()));
        }
        Ok(())
    }
}

/// Compute the color seen along a ray.
///
/// Bounces up to `depth` times, multiplying in each material's attenuation.
/// A miss returns the background, absorption and an exhausted depth return black.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut ray = *ray;
    let mut attenuation = Color::ONE;

    for _ in 0..depth {
        let mut rec = HitRecord::default();

        if !world.hit(&ray, Interval::new(T_MIN, f32::INFINITY), &mut rec) {
            return attenuation * background(&ray, config);
        }

        match rec.material.scatter(&ray, &rec, rng) {
            Some(result) => {
                attenuation *= result.attenuation;
                ray = result.scattered;
            }
            None => return Color::ZERO,
        }
    }

    Color::ZERO
}

fn background(ray: &Ray, config: &RenderConfig) -> Color {
    if config.use_sky_gradient {
        sky_gradient(ray)
    } else {
        config.background
    }
}

/// Compute sky gradient background.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let to_byte = |c: f32| (255.0 * linear_to_gamma(c).clamp(0.0, 1.0)) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z), 255]
}

/// Render a single pixel with multi-sampling.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, config, rng);
    }

    pixel_color / config.samples_per_pixel as f32
}

/// Seed for one image row. Rows never share a stream, so the result does not
/// depend on how rayon schedules them.
fn row_seed(seed: u64, row: u32) -> u64 {
    seed ^ u64::from(row).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Render the entire scene to an image buffer, one rayon task per row.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
) -> RenderResult<ImageBuffer> {
    config.validate()?;
    if camera.image_width == 0 || camera.image_height == 0 {
        return Err(RenderError::InvalidConfig(format!(
            "image size must be non-zero, got {}x{}",
            camera.image_width, camera.image_height
        )));
    }

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        camera.image_width,
        camera.image_height,
        config.samples_per_pixel,
        config.max_depth
    );
    let start = Instant::now();

    let width = camera.image_width;
    let pixels: Vec<Color> = (0..camera.image_height)
        .into_par_iter()
        .flat_map_iter(|y| {
            let mut rng = StdRng::seed_from_u64(row_seed(config.seed, y));
            (0..width)
                .map(|x| render_pixel(camera, world, x, y, config, &mut rng))
                .collect::<Vec<_>>()
        })
        .collect();

    log::info!("Rendered in {:.2?}", start.elapsed());

    Ok(ImageBuffer {
        width,
        height: camera.image_height,
        pixels,
    })
}

/// Row-major linear color buffer.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Linear color at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Overwrite the linear color at `(x, y)`.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Gamma-corrected RGBA bytes.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// Write the image; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        let image = image::RgbImage::from_fn(self.width, self.height, |x, y| {
            let [r, g, b, _] = color_to_rgba(self.get(x, y));
            image::Rgb([r, g, b])
        });
        image.save(path)?;
        log::info!("Saved {}", path.display());
        Ok(())
    }
}
