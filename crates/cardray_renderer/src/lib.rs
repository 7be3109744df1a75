//! cardray renderer - distributed ray tracing of the business-card scene.
//!
//! A tiny stochastic ray tracer: a logo of unit spheres over a checkered
//! floor, lit by a jittered point light under a gradient sky. Every pixel
//! averages many jittered rays, which gives anti-aliasing, soft shadows and
//! depth of field in one loop.

mod hit;
mod scene;
mod shader;
mod camera;
mod renderer;
mod bucket;
pub mod ppm;

pub use hit::{HitKind, TraceResult, HIT_EPSILON, NO_HIT_DISTANCE};
pub use scene::{Scene, SphereGrid, GRID_COLUMNS, GRID_ROWS, LOGO_ROW_MASKS};
pub use shader::{checker_color, sky_gradient, Shader, BOUNCE_ATTENUATION, DEFAULT_MAX_DEPTH};
pub use camera::Camera;
pub use renderer::{
    render, render_parallel, render_pixel, render_sequential, ImageBuffer, RenderConfig,
    IMAGE_HEIGHT, IMAGE_WIDTH, SAMPLES_PER_PIXEL,
};
pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use ppm::{channel_to_byte, save_ppm, write_ppm, PpmError, PpmResult, PPM_HEADER};

/// Re-export the math types from cardray_math
pub use cardray_math::{Color, Ray, Vec3};

use rand::{Rng, RngCore};

/// Draw a uniform value in `[0, 1)` from any generator.
#[inline]
pub(crate) fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}
