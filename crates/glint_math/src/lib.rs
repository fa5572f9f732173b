//! Glint math types.
//!
//! Double precision throughout: `Vec3` is glam's `DVec3` and is used as a
//! point, a direction and a color depending on context.

mod interval;
mod ray;
pub mod random;
pub mod vector;

pub use interval::Interval;
pub use ray::Ray;

pub use glam::DVec3;

/// 3D vector of doubles.
pub type Vec3 = DVec3;

/// A position in world space.
pub type Point3 = DVec3;

/// Linear RGB radiance or reflectance.
pub type Color = DVec3;
