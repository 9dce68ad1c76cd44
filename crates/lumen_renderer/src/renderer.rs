//! Image-level rendering.
//!
//! Averages `samples_per_pixel` integrator estimates per pixel, spreading
//! buckets across threads with rayon. Each bucket owns a generator seeded
//! from the render seed and the bucket index, so a render is reproducible
//! whatever the thread scheduling.

use crate::bucket::{generate_buckets, render_bucket, DEFAULT_BUCKET_SIZE};
use crate::{Camera, Integrator};
use lumen_core::{Color, Scene};
use rand::RngCore;
use rayon::prelude::*;
use std::time::Instant;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Camera rays averaged per pixel
    pub samples_per_pixel: u32,
    /// Edge length of a bucket in pixels
    pub bucket_size: u32,
    /// Base seed for the per-bucket generators
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 16,
            bucket_size: DEFAULT_BUCKET_SIZE,
            seed: 0,
        }
    }
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

/// Convert a linear color to gamma-corrected 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let to_byte = |c: f32| (255.0 * linear_to_gamma(c).clamp(0.0, 1.0)) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z), 255]
}

/// Average of `samples_per_pixel` radiance estimates through pixel (x, y).
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    integrator: &dyn Integrator,
    x: u32,
    y: u32,
    samples_per_pixel: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let samples = samples_per_pixel.max(1);
    let mut pixel_color = Color::ZERO;

    for _ in 0..samples {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += integrator.compute_color(&ray, scene.objects(), scene.lights(), rng);
    }

    pixel_color / samples as f32
}

/// Linear RGB image, row-major with row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
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

    /// Offset of (x, y) in `pixels`. `width * height` may exceed `u32::MAX`.
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Gamma-corrected 8-bit RGBA bytes.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_rgba(*c)).collect()
    }

    /// Linear float RGB values, three per pixel.
    pub fn to_rgb_f32(&self) -> Vec<f32> {
        self.pixels.iter().flat_map(|c| c.to_array()).collect()
    }
}

/// Render the whole image in parallel buckets.
pub fn render(
    camera: &Camera,
    scene: &Scene,
    integrator: &dyn Integrator,
    config: &RenderConfig,
) -> ImageBuffer {
    let width = camera.image_width;
    let height = camera.image_height;
    let buckets = generate_buckets(width, height, config.bucket_size.max(1));

    log::info!(
        "Rendering {}x{} @ {} spp in {} buckets ({} objects, {} lights)",
        width,
        height,
        config.samples_per_pixel,
        buckets.len(),
        scene.object_count(),
        scene.light_count()
    );
    let start = Instant::now();

    let results: Vec<_> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, camera, scene, integrator, config))
        .collect();

    let mut image = ImageBuffer::new(width, height);
    for result in &results {
        result.write_into(&mut image);
    }

    log::info!("Rendered in {:.2?}", start.elapsed());
    image
}
