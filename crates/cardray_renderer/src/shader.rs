//! Recursive shading of traced rays.
//!
//! Combines direct lighting from a jittered point light, hard shadow rays,
//! a specular highlight, the checkered floor, the sky gradient and one
//! mirror bounce per sphere hit.

use crate::gen_f64;
use crate::hit::HitKind;
use crate::scene::Scene;
use cardray_math::{Color, Ray, Vec3};
use rand::RngCore;

/// Default limit on the number of rays in one shading path (the camera ray
/// plus its mirror bounces). Paths in the logo scene stay far below it.
pub const DEFAULT_MAX_DEPTH: u32 = 64;

/// Corner of the square area light; each shading call jitters x and y by
/// up to one unit.
const LIGHT_BASE: Vec3 = Vec3::new(9.0, 9.0, 16.0);

const SKY_COLOR: Color = Color::new(0.7, 0.6, 1.0);
const CHECKER_RED: Color = Color::new(3.0, 1.0, 1.0);
const CHECKER_WHITE: Color = Color::new(3.0, 3.0, 3.0);

const SPECULAR_EXPONENT: i32 = 99;

/// Share of a mirror bounce carried back to the surface that spawned it.
pub const BOUNCE_ATTENUATION: f64 = 0.5;

/// Computes the color seen along a ray.
#[derive(Debug, Clone, Copy)]
pub struct Shader<'a> {
    scene: &'a Scene,
    max_depth: u32,
}

impl<'a> Shader<'a> {
    /// Create a shader over `scene` with the default depth limit.
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the maximum number of rays in one path.
    ///
    /// Once exhausted, the shader returns black instead of tracing further.
    /// A depth of 1 shades the camera ray without any mirror bounce.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Get the scene being shaded.
    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    /// Compute the color seen by `ray`.
    ///
    /// The result is linear and unclamped. `ray.direction` must be
    /// normalized. Consumes two uniforms from `rng` per surface hit for the
    /// light jitter.
    pub fn sample(&self, ray: &Ray, rng: &mut dyn RngCore) -> Color {
        self.sample_depth(ray, self.max_depth, rng)
    }

    fn sample_depth(&self, ray: &Ray, depth: u32, rng: &mut dyn RngCore) -> Color {
        // Path budget exhausted: no more light
        if depth == 0 {
            return Color::ZERO;
        }

        let rec = self.scene.trace(ray);
        let normal = match (rec.kind, rec.normal) {
            (HitKind::Sky, _) | (_, None) => return sky_gradient(ray.direction),
            (_, Some(normal)) => normal,
        };

        let h = ray.at(rec.distance);
        let jitter = Vec3::new(gen_f64(rng), gen_f64(rng), 0.0);
        let l = (LIGHT_BASE + jitter - h).normalize();
        let r = reflect(ray.direction, normal);

        // Lambertian factor, zeroed when facing away or in shadow
        let mut b = l.dot(normal);
        if b < 0.0 || self.scene.trace(&Ray::new(h, l)).is_hit() {
            b = 0.0;
        }

        // No highlight in shadow
        let p = if b > 0.0 {
            l.dot(r).max(0.0).powi(SPECULAR_EXPONENT)
        } else {
            0.0
        };

        if rec.kind == HitKind::Floor {
            return checker_color(h) * (b * 0.2 + 0.1);
        }

        Color::splat(p)
            + self.sample_depth(&Ray::new(h, r), depth - 1, rng) * BOUNCE_ATTENUATION
    }
}

/// Sky color for a ray escaping in `direction`, `(0.7, 0.6, 1.0) * (1 - z)^4`.
/// Zero for a ray going straight up.
pub fn sky_gradient(direction: Vec3) -> Color {
    SKY_COLOR * (1.0 - direction.z).powi(4)
}

/// Checkerboard albedo of the floor at world point `h`, with 5-unit tiles.
pub fn checker_color(h: Vec3) -> Color {
    let h = h * 0.2;
    let parity = (h.x.ceil() + h.y.ceil()) as i64 & 1;
    if parity == 1 {
        CHECKER_RED
    } else {
        CHECKER_WHITE
    }
}

/// Reflect a direction about a unit normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - n * 2.0 * n.dot(v)
}
