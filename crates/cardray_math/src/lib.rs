// Re-export glam for convenience
pub use glam::*;

// cardray math types
mod ray;
pub use ray::Ray;

/// Spatial point or direction. Double precision throughout the tracer.
pub type Vec3 = DVec3;

/// RGB color triplet. Same representation as [`Vec3`], different role.
pub type Color = DVec3;
