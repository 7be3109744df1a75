//! Render loop: per-pixel stochastic accumulation over the whole frame.
//!
//! Implements:
//! - 64 jittered camera rays per pixel (anti-aliasing, soft shadows and
//!   depth of field in one pass)
//! - A running sum on top of a near-black base color
//! - Sequential rendering with one shared generator, or bucketed parallel
//!   rendering with one generator per bucket

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::shader::DEFAULT_MAX_DEPTH;
use crate::{Camera, Color, Scene, Shader};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use std::time::Instant;

/// Output width in pixels.
pub const IMAGE_WIDTH: u32 = 512;

/// Output height in pixels.
pub const IMAGE_HEIGHT: u32 = 512;

/// Camera rays accumulated per pixel.
pub const SAMPLES_PER_PIXEL: u32 = 64;

/// Starting value of every pixel's running sum.
const BASE_COLOR: Color = Color::new(13.0, 13.0, 13.0);

/// Weight of one sample in the running sum.
const SAMPLE_WEIGHT: f64 = 3.5;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Camera rays accumulated per pixel
    pub samples_per_pixel: u32,
    /// Maximum rays in one shading path (camera ray plus mirror bounces)
    pub max_depth: u32,
    /// Seed for the random source; `None` draws one from OS entropy
    pub seed: Option<u64>,
    /// Render buckets on the rayon thread pool
    pub parallel: bool,
    /// Bucket edge length in pixels for parallel rendering
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: SAMPLES_PER_PIXEL,
            max_depth: DEFAULT_MAX_DEPTH,
            seed: None,
            parallel: true,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

/// Render a single pixel with multi-sampling.
///
/// Returns `(13, 13, 13) + 3.5 * sum(samples)`. The value is not averaged
/// or clamped; the image writer narrows it to bytes.
pub fn render_pixel(
    camera: &Camera,
    shader: &Shader,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = BASE_COLOR;

    for _ in 0..config.samples_per_pixel {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += shader.sample(&ray, rng) * SAMPLE_WEIGHT;
    }

    pixel_color
}

/// Accumulated pixel colors of a frame.
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
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Pixel coordinates in output order: `y` from the last row down to
    /// 0, and within a row `x` from the last column down to 0.
    pub fn scan_order(&self) -> impl Iterator<Item = (u32, u32)> {
        let width = self.width;
        (0..self.height)
            .rev()
            .flat_map(move |y| (0..width).rev().map(move |x| (x, y)))
    }

    /// Pixel colors in output order (see [`ImageBuffer::scan_order`]).
    pub fn scanlines(&self) -> impl Iterator<Item = Color> + '_ {
        self.scan_order().map(move |(x, y)| self.get(x, y))
    }

    /// Copy a rendered bucket into place.
    pub fn blit(&mut self, result: &BucketResult) {
        for ((x, y), color) in result.bucket.scan_order().zip(&result.pixels) {
            self.set(x, y, *color);
        }
    }
}

/// Render the frame on the calling thread.
///
/// `rng` is advanced pixel by pixel in output order, so a seeded generator
/// reproduces the same image.
pub fn render_sequential(
    camera: &Camera,
    shader: &Shader,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> ImageBuffer {
    let mut image = ImageBuffer::new(IMAGE_WIDTH, IMAGE_HEIGHT);

    for y in (0..image.height).rev() {
        for x in (0..image.width).rev() {
            let color = render_pixel(camera, shader, x, y, config, rng);
            image.set(x, y, color);
        }
    }

    image
}

/// Render the frame in buckets across the rayon thread pool.
///
/// Every bucket owns a generator seeded from `seed` and its index, so the
/// result depends only on `seed`, not on scheduling.
pub fn render_parallel(
    camera: &Camera,
    shader: &Shader,
    config: &RenderConfig,
    seed: u64,
) -> ImageBuffer {
    let mut image = ImageBuffer::new(IMAGE_WIDTH, IMAGE_HEIGHT);
    let buckets = generate_buckets(image.width, image.height, config.bucket_size);
    log::debug!("Rendering {} buckets of {}px", buckets.len(), config.bucket_size);

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let pixels = render_bucket(bucket, camera, shader, config, seed);
            BucketResult::new(*bucket, pixels)
        })
        .collect();

    for result in &results {
        image.blit(result);
    }

    image
}

/// Render the logo scene with the fixed camera.
pub fn render(scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let camera = Camera::new();
    let shader = Shader::new(scene).with_max_depth(config.max_depth);

    let seed = config.seed.unwrap_or_else(|| StdRng::from_entropy().next_u64());

    log::info!(
        "Rendering {}x{} @ {} spp ({}, seed {})",
        IMAGE_WIDTH,
        IMAGE_HEIGHT,
        config.samples_per_pixel,
        if config.parallel { "parallel" } else { "sequential" },
        seed
    );

    let start = Instant::now();
    let image = if config.parallel {
        render_parallel(&camera, &shader, config, seed)
    } else {
        let mut rng = StdRng::seed_from_u64(seed);
        render_sequential(&camera, &shader, config, &mut rng)
    };
    log::info!("Rendered in {:?}", start.elapsed());

    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn small_config(samples: u32) -> RenderConfig {
        RenderConfig {
            samples_per_pixel: samples,
            ..RenderConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.samples_per_pixel, 64);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_accumulation_base_is_not_reset() {
        let scene = Scene::logo();
        let camera = Camera::new();
        let shader = Shader::new(&scene);

        // A constant generator makes every sample of a pixel identical
        let one = render_pixel(&camera, &shader, 200, 300, &small_config(1), &mut StepRng::new(0, 0));
        let four = render_pixel(&camera, &shader, 200, 300, &small_config(4), &mut StepRng::new(0, 0));
        let sample = (one - BASE_COLOR) / SAMPLE_WEIGHT;

        assert!(((four - BASE_COLOR) - sample * SAMPLE_WEIGHT * 4.0).length() < 1e-9);
        assert!((four - (BASE_COLOR + sample * 3.5 * 4.0)).length() < 1e-9);
    }

    #[test]
    fn test_render_pixel_matches_manual_sum() {
        let scene = Scene::logo();
        let camera = Camera::new();
        let shader = Shader::new(&scene);

        let mut rng = StdRng::seed_from_u64(11);
        let pixel = render_pixel(&camera, &shader, 10, 20, &small_config(3), &mut rng);

        let mut rng = StdRng::seed_from_u64(11);
        let mut expected = Color::new(13.0, 13.0, 13.0);
        for _ in 0..3 {
            let ray = camera.get_ray(10, 20, &mut rng);
            expected += shader.sample(&ray, &mut rng) * 3.5;
        }
        assert_eq!(pixel, expected);
    }

    #[test]
    fn test_zero_samples_leaves_base() {
        let scene = Scene::logo();
        let shader = Shader::new(&scene);
        let mut rng = StdRng::seed_from_u64(1);
        let pixel = render_pixel(&Camera::new(), &shader, 0, 0, &small_config(0), &mut rng);
        assert_eq!(pixel, BASE_COLOR);
    }

    #[test]
    fn test_scan_order_is_descending() {
        let image = ImageBuffer::new(3, 2);
        let order: Vec<(u32, u32)> = image.scan_order().collect();
        assert_eq!(order, vec![(2, 1), (1, 1), (0, 1), (2, 0), (1, 0), (0, 0)]);
    }

    #[test]
    fn test_image_buffer_get_set() {
        let mut image = ImageBuffer::new(4, 4);
        image.set(1, 2, Color::new(1.0, 2.0, 3.0));
        assert_eq!(image.get(1, 2), Color::new(1.0, 2.0, 3.0));
        assert_eq!(image.get(2, 1), Color::ZERO);
        assert_eq!(image.scanlines().next(), Some(image.get(3, 3)));
    }
}
