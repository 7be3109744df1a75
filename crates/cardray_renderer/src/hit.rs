//! Trace results for ray-scene intersection.

use cardray_math::Vec3;

/// Distance reported when nothing closer has been found.
pub const NO_HIT_DISTANCE: f64 = 1e9;

/// Hits closer than this to the ray origin are ignored, so secondary rays
/// leaving a surface do not immediately hit it again.
pub const HIT_EPSILON: f64 = 0.01;

/// What a traced ray ended up hitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    /// Nothing hit; the ray escapes to the sky.
    Sky,
    /// The horizontal plane z = 0, before any sphere.
    Floor,
    /// A sphere of the logo, before the floor.
    Sphere,
}

/// Record of the nearest intersection along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceResult {
    /// Which surface was hit
    pub kind: HitKind,
    /// Ray parameter of the hit, or [`NO_HIT_DISTANCE`] for the sky
    pub distance: f64,
    /// Outward unit normal at the hit; `None` for the sky
    pub normal: Option<Vec3>,
}

impl Default for TraceResult {
    fn default() -> Self {
        Self {
            kind: HitKind::Sky,
            distance: NO_HIT_DISTANCE,
            normal: None,
        }
    }
}

impl TraceResult {
    /// Offer a candidate hit at `distance`.
    ///
    /// The candidate replaces the current record only if it lies strictly
    /// in front of the current best and beyond [`HIT_EPSILON`]. Returns
    /// whether it was accepted, so `distance` never grows.
    pub fn offer(&mut self, kind: HitKind, distance: f64, normal: impl FnOnce() -> Vec3) -> bool {
        if distance < self.distance && distance > HIT_EPSILON {
            self.kind = kind;
            self.distance = distance;
            self.normal = Some(normal());
            true
        } else {
            false
        }
    }

    /// True if anything other than the sky was hit.
    pub fn is_hit(&self) -> bool {
        self.kind != HitKind::Sky
    }
}
