//! Fixed pinhole-with-aperture camera for primary ray generation.

use crate::gen_f64;
use cardray_math::{Ray, Vec3};
use rand::RngCore;

/// Eye position.
const EYE: Vec3 = Vec3::new(17.0, 16.0, 8.0);

/// Unnormalized view direction.
const VIEW: Vec3 = Vec3::new(-6.0, -16.0, 0.0);

/// World units covered by one pixel on the image plane.
const PIXEL_PITCH: f64 = 0.002;

/// Half the image extent in pixels; shifts pixel (0, 0) to a corner.
const HALF_EXTENT: f64 = 256.0;

/// Aperture size, in pixel-pitch units, of the depth of field jitter.
const APERTURE: f64 = 99.0;

/// Distance to the plane of perfect focus.
const FOCUS_DISTANCE: f64 = 16.0;

/// Camera generating jittered primary rays.
///
/// Pixel x steps along `a` and pixel y along `b`; both are one pixel long.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    eye: Vec3,
    /// Unit view direction
    g: Vec3,
    /// Pixel step for x
    a: Vec3,
    /// Pixel step for y
    b: Vec3,
    /// Offset from the eye to the image corner
    c: Vec3,
}

impl Camera {
    /// Create the fixed camera looking at the logo.
    pub fn new() -> Self {
        let g = VIEW.normalize();
        let a = Vec3::Z.cross(g).normalize() * PIXEL_PITCH;
        let b = g.cross(a).normalize() * PIXEL_PITCH;
        let c = (a + b) * -HALF_EXTENT + g;

        Self { eye: EYE, g, a, b, c }
    }

    /// Eye position.
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Unit view direction.
    pub fn direction(&self) -> Vec3 {
        self.g
    }

    /// Generate a ray for pixel (x, y) with lens and pixel jitter.
    ///
    /// Draws four uniforms from `rng`, in order: two for the aperture
    /// offset, then the sub-pixel offsets along `a` and `b`.
    pub fn get_ray(&self, x: u32, y: u32, rng: &mut dyn RngCore) -> Ray {
        let t = self.a * (gen_f64(rng) - 0.5) * APERTURE + self.b * (gen_f64(rng) - 0.5) * APERTURE;

        let on_plane = self.a * (gen_f64(rng) + x as f64) + self.b * (gen_f64(rng) + y as f64) + self.c;
        let direction = (-t + on_plane * FOCUS_DISTANCE).normalize();

        Ray::new(self.eye + t, direction)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_camera_basis() {
        let camera = Camera::new();

        assert!((camera.g.length() - 1.0).abs() < 1e-12);
        assert!((camera.a.length() - PIXEL_PITCH).abs() < 1e-12);
        assert!((camera.b.length() - PIXEL_PITCH).abs() < 1e-12);

        // Orthogonal basis, "up" stays horizontal
        assert!(camera.a.dot(camera.g).abs() < 1e-12);
        assert!(camera.b.dot(camera.g).abs() < 1e-12);
        assert!(camera.a.dot(camera.b).abs() < 1e-12);
        assert!(camera.a.z.abs() < 1e-12);
    }

    #[test]
    fn test_center_ray_points_along_view() {
        let camera = Camera::new();
        // All uniforms 0.5: no aperture offset, pixel center
        let mut rng = StepRng::new(1 << 63, 0);

        let ray = camera.get_ray(256, 256, &mut rng);
        assert_eq!(ray.origin, EYE);
        // (a + b) * 256.5 + c == g + (a + b) * 0.5
        let expected = (camera.g + (camera.a + camera.b) * 0.5).normalize();
        assert!((ray.direction - expected).length() < 1e-9);
    }

    #[test]
    fn test_rays_are_normalized_and_near_eye() {
        let camera = Camera::new();
        let mut rng = StdRng::seed_from_u64(42);

        for &(x, y) in &[(0, 0), (511, 0), (0, 511), (511, 511), (100, 300)] {
            let ray = camera.get_ray(x, y, &mut rng);
            assert!((ray.direction.length() - 1.0).abs() < 1e-9);
            // Aperture offset is at most 99 * 0.002 / 2 along each axis
            assert!((ray.origin - EYE).length() < 0.15);
            assert!(ray.direction.dot(camera.g) > 0.0);
        }
    }

    #[test]
    fn test_pixel_axes() {
        let camera = Camera::new();
        let mut rng = StepRng::new(1 << 63, 0);

        let origin = camera.get_ray(0, 0, &mut rng).direction;
        let step_x = camera.get_ray(511, 0, &mut rng).direction;
        let step_y = camera.get_ray(0, 511, &mut rng).direction;

        // x walks along a, y walks along b
        assert!((step_x - origin).dot(camera.a) > 0.0);
        assert!((step_y - origin).dot(camera.b) > 0.0);
    }
}
