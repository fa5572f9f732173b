//! Geometry helpers on top of `Vec3`: reflection, refraction and the
//! rejection samplers used by materials and the camera lens.

use rand::RngCore;

use crate::random::{gen_f64, gen_range_f64};
use crate::Vec3;

/// Components smaller than this count as zero in [`near_zero`].
pub const NEAR_ZERO_EPSILON: f64 = 1e-8;

/// True if every component is close to zero.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.x.abs() < NEAR_ZERO_EPSILON && v.y.abs() < NEAR_ZERO_EPSILON && v.z.abs() < NEAR_ZERO_EPSILON
}

/// Mirror `v` about the normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with unit normal `n`
/// (on the same side as `uv` came from) using Snell's law.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Vector with each component uniform in [min, max).
pub fn random_vector(rng: &mut dyn RngCore, min: f64, max: f64) -> Vec3 {
    Vec3::new(
        gen_range_f64(rng, min, max),
        gen_range_f64(rng, min, max),
        gen_range_f64(rng, min, max),
    )
}

/// Uniform point strictly inside the unit disk in the z = 0 plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(gen_f64(rng) * 2.0 - 1.0, gen_f64(rng) * 2.0 - 1.0, 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Uniform point strictly inside the unit sphere.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_vector(rng, -1.0, 1.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Random direction on the unit sphere.
///
/// A sample of exactly the origin would normalize to NaN; the odds of drawing
/// one are negligible and the result is not guarded.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    random_in_unit_sphere(rng).normalize()
}
