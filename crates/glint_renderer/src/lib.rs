//! Glint renderer - CPU path tracing
//!
//! A brute-force Monte Carlo path tracer for spheres with diffuse, metal,
//! glass and emissive materials. Scanlines are rendered in parallel and the
//! result is written as a plain-text pixel map or PNG.

mod camera;
mod hittable;
mod material;
mod renderer;
mod sphere;
mod world;

pub mod output;

pub use camera::Camera;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Dielectric, DiffuseLight, Lambertian, Material, Metal, ScatterResult};
pub use output::{
    gamma_quantize, save_image, save_png, save_ppm, write_ppm, OutputError, OutputResult,
};
pub use renderer::{ray_color, render, render_pixel, render_seeded, ImageBuffer, MIN_HIT_DISTANCE};
pub use sphere::Sphere;
pub use world::{build_world, create_material};

/// Re-export the math types used throughout the renderer
pub use glint_math::{Color, Interval, Point3, Ray, Vec3};
