//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon. Each bucket draws from its
//! own generator, so the frame is reproducible for a given seed no matter
//! how the thread pool schedules the work.

use crate::renderer::render_pixel;
use crate::{Camera, Color, RenderConfig, Shader};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of the bucket's lowest column
    pub x: u32,
    /// Y coordinate of the bucket's lowest row
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket; also selects its random stream
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Global pixel coordinates in the same descending order the full
    /// frame is scanned in.
    pub fn scan_order(&self) -> impl Iterator<Item = (u32, u32)> {
        let (x0, width) = (self.x, self.width);
        (self.y..self.y + self.height)
            .rev()
            .flat_map(move |y| (x0..x0 + width).rev().map(move |x| (x, y)))
    }

    /// Seed for this bucket's generator, derived from the frame seed.
    pub fn seed(&self, frame_seed: u64) -> u64 {
        frame_seed ^ (self.index as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets covering a `width` x `height` image in row-major order.
///
/// Edge buckets shrink to fit. A zero `bucket_size` is treated as 1.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();
    let mut index = 0;

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    buckets
}

/// Render a single bucket to a vector of colors.
///
/// Returns pixels in [`Bucket::scan_order`].
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    shader: &Shader,
    config: &RenderConfig,
    frame_seed: u64,
) -> Vec<Color> {
    let mut rng = StdRng::seed_from_u64(bucket.seed(frame_seed));
    let pixels: Vec<Color> = bucket
        .scan_order()
        .map(|(x, y)| render_pixel(camera, shader, x, y, config, &mut rng))
        .collect();

    log::debug!("Bucket {} done ({} px)", bucket.index, pixels.len());
    pixels
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in the bucket's scan order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }
}
