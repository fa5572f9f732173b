//! Uniform random draws from an explicit generator.
//!
//! Everything takes `&mut dyn RngCore` so callers choose between a seeded
//! `StdRng` (tests, reproducible renders) and an entropy-seeded one.

use rand::{Rng, RngCore};

/// Uniform f64 in [0, 1).
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniform f64 in [min, max).
#[inline]
pub fn gen_range_f64(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    min + (max - min) * gen_f64(rng)
}
