//! Core path tracing renderer.
//!
//! Implements brute-force Monte Carlo path tracing with:
//! - Recursive ray tracing bounded by the camera's max depth
//! - Anti-aliasing via jittered multi-sampling
//! - Scanline-parallel rendering on the rayon pool

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use crate::output::gamma_quantize;
use crate::{Camera, Color, HitRecord, Hittable, Ray};
use glint_math::Interval;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

/// Hits closer than this are ignored so a scattered ray does not
/// re-intersect the surface it just left.
pub const MIN_HIT_DISTANCE: f64 = 0.001;

/// Compute the radiance carried back along a ray.
///
/// Recurses once per bounce. Returns black once `depth` reaches zero,
/// `background` for rays that escape, and otherwise the surface emission
/// plus the attenuated radiance of the scattered ray.
pub fn ray_color(
    ray: &Ray,
    background: Color,
    world: &dyn Hittable,
    depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let mut rec = HitRecord::default();

    if !world.hit(ray, Interval::new(MIN_HIT_DISTANCE, f64::INFINITY), &mut rec) {
        return background;
    }

    let emission = rec.material.emitted();

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            let scattered_color = ray_color(&result.scattered, background, world, depth - 1, rng);
            emission + result.attenuation * scattered_color
        }
        None => emission,
    }
}

/// Sum of `samples_per_pixel` radiance samples for pixel (i, j).
///
/// The camera must be initialized. The sum is averaged at output time.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    background: Color,
    i: u32,
    j: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel {
        let ray = camera.get_ray(i, j, rng);
        pixel_color += ray_color(&ray, background, world, camera.max_depth, rng);
    }

    pixel_color
}

/// Accumulated render output.
///
/// Pixels hold the per-pixel *sum* of sample radiances, row-major from the
/// top-left corner.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32, samples_per_pixel: u32) -> Self {
        Self {
            width,
            height,
            samples_per_pixel,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the accumulated sum at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the accumulated sum at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Averaged linear color at (x, y).
    pub fn average(&self, x: u32, y: u32) -> Color {
        self.get(x, y) / self.samples_per_pixel.max(1) as f64
    }

    /// Gamma-corrected 8-bit RGB, row-major.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&gamma_quantize(*color, self.samples_per_pixel));
        }
        bytes
    }
}

/// Render the scene with entropy-seeded random numbers.
///
/// Initializes the camera, renders every scanline in parallel and returns
/// the buffer in row-major order regardless of completion order.
pub fn render(camera: &mut Camera, world: &dyn Hittable, background: Color) -> ImageBuffer {
    render_rows(camera, world, background, |_| StdRng::from_entropy())
}

/// Render the scene reproducibly.
///
/// Each scanline gets its own generator derived from `seed` and the row
/// index, so the image does not depend on thread scheduling.
pub fn render_seeded(
    camera: &mut Camera,
    world: &dyn Hittable,
    background: Color,
    seed: u64,
) -> ImageBuffer {
    render_rows(camera, world, background, |row| row_rng(seed, row))
}

/// Generator for one scanline of a seeded render.
fn row_rng(seed: u64, row: u32) -> StdRng {
    StdRng::seed_from_u64(seed ^ (row as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Rows between progress reports: about ten reports per image.
fn progress_interval(height: u32) -> u32 {
    (height / 10).max(1)
}

fn render_rows<F>(
    camera: &mut Camera,
    world: &dyn Hittable,
    background: Color,
    make_rng: F,
) -> ImageBuffer
where
    F: Fn(u32) -> StdRng + Sync,
{
    camera.initialize();
    let camera = &*camera;

    let width = camera.image_width;
    let height = camera.image_height();

    if camera.samples_per_pixel == 0 {
        log::warn!("samples_per_pixel is 0, the image will be black");
    }
    log::info!(
        "Rendering {}x{} @ {} spp, max depth {} on {} threads",
        width,
        height,
        camera.samples_per_pixel,
        camera.max_depth,
        rayon::current_num_threads()
    );

    let start = Instant::now();
    let rows_done = AtomicU32::new(0);
    let interval = progress_interval(height);

    // One row per work item so expensive rows do not stall a whole chunk
    let rows: Vec<Vec<Color>> = (0..height)
        .into_par_iter()
        .with_max_len(1)
        .map(|j| {
            let mut rng = make_rng(j);
            let row: Vec<Color> = (0..width)
                .map(|i| render_pixel(camera, world, background, i, j, &mut rng))
                .collect();

            let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
            if done % interval == 0 || done == height {
                log::info!("Scanlines remaining: {}", height - done);
            } else {
                log::debug!("Scanlines remaining: {}", height - done);
            }
            row
        })
        .collect();

    log::info!("Rendered in {:.2?}", start.elapsed());

    let mut image = ImageBuffer::new(width, height, camera.samples_per_pixel);
    for (j, row) in (0..height).zip(rows) {
        for (i, color) in (0..width).zip(row) {
            image.set(i, j, color);
        }
    }
    image
}

impl Camera {
    /// Render `world` against `background`. See [`render`].
    pub fn render(&mut self, world: &dyn Hittable, background: Color) -> ImageBuffer {
        render(self, world, background)
    }

    /// Reproducible render. See [`render_seeded`].
    pub fn render_seeded(
        &mut self,
        world: &dyn Hittable,
        background: Color,
        seed: u64,
    ) -> ImageBuffer {
        render_seeded(self, world, background, seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiffuseLight, HittableList, Lambertian, Metal, Sphere};
    use glint_math::{Point3, Vec3};
    use std::sync::Arc;

    fn small_camera(width: u32, samples: u32, max_depth: u32) -> Camera {
        Camera::new()
            .with_resolution(width, 2.0)
            .with_quality(samples, max_depth)
            .with_position(Point3::ZERO, Point3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0)
    }

    fn lit_world() -> HittableList {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(
            Point3::new(0.0, 0.0, -1.0),
            0.5,
            Arc::new(Lambertian::new(Color::new(0.7, 0.3, 0.3))),
        )));
        world.add(Box::new(Sphere::new(
            Point3::new(0.0, 3.0, -1.0),
            1.0,
            Arc::new(DiffuseLight::new(Color::splat(4.0))),
        )));
        world
    }

    #[test]
    fn test_ray_color_depth_zero_is_black() {
        let world = lit_world();
        let mut rng = StdRng::seed_from_u64(42);
        let background = Color::new(0.5, 0.7, 1.0);

        // Aimed straight at the light, and at nothing
        for direction in [Vec3::Y, Vec3::new(0.0, 0.0, -1.0), -Vec3::Y] {
            let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), direction);
            assert_eq!(ray_color(&ray, background, &world, 0, &mut rng), Color::ZERO);
        }
    }

    #[test]
    fn test_ray_color_miss_returns_background() {
        let world = lit_world();
        let mut rng = StdRng::seed_from_u64(42);
        let background = Color::new(0.5, 0.7, 1.0);

        let ray = Ray::new(Point3::ZERO, -Vec3::Y);
        assert_eq!(ray_color(&ray, background, &world, 10, &mut rng), background);
    }

    #[test]
    fn test_ray_color_light_returns_emission() {
        let world = lit_world();
        let mut rng = StdRng::seed_from_u64(42);

        // Start between the diffuse sphere and the light
        let ray = Ray::new(Point3::new(0.0, 1.0, -1.0), Vec3::Y);
        assert_eq!(ray_color(&ray, Color::ZERO, &world, 1, &mut rng), Color::splat(4.0));
    }

    #[test]
    fn test_ray_color_absorbed_by_depth_one_surface() {
        // One bounce budget: the diffuse hit spends it, the continuation is black
        let world = lit_world();
        let mut rng = StdRng::seed_from_u64(42);

        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(ray_color(&ray, Color::ONE, &world, 1, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_mirror_bounces_background() {
        // A perfect mirror facing the camera returns the attenuated background
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(
            Point3::new(0.0, 0.0, -2.0),
            1.0,
            Arc::new(Metal::new(Color::splat(0.5), 0.0)),
        )));
        let mut rng = StdRng::seed_from_u64(42);

        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let color = ray_color(&ray, Color::splat(0.8), &world, 5, &mut rng);
        assert!((color - Color::splat(0.4)).length() < 1e-12);
    }

    #[test]
    fn test_render_pixel_sums_samples() {
        let mut camera = small_camera(8, 5, 3);
        camera.initialize();
        let world = HittableList::new();
        let mut rng = StdRng::seed_from_u64(42);

        let color = render_pixel(&camera, &world, Color::new(0.1, 0.2, 0.3), 4, 2, &mut rng);
        assert!((color - Color::new(0.5, 1.0, 1.5)).length() < 1e-12);
    }

    #[test]
    fn test_render_dimensions_and_order() {
        let mut camera = small_camera(16, 2, 4);
        let image = camera.render(&lit_world(), Color::new(0.5, 0.7, 1.0));

        assert_eq!(image.width, 16);
        assert_eq!(image.height, 8);
        assert_eq!(image.samples_per_pixel, 2);
        assert_eq!(image.pixels.len(), 16 * 8);

        // Bottom rows look below the horizon and miss everything
        for x in 0..16 {
            let color = image.average(x, 7);
            assert!((color - Color::new(0.5, 0.7, 1.0)).length() < 1e-12);
        }
    }

    #[test]
    fn test_render_seeded_is_reproducible() {
        let world = lit_world();
        let background = Color::new(0.5, 0.7, 1.0);

        let a = small_camera(12, 4, 8).render_seeded(&world, background, 7);
        let b = small_camera(12, 4, 8).render_seeded(&world, background, 7);
        assert_eq!(a.pixels, b.pixels);

        let c = small_camera(12, 4, 8).render_seeded(&world, background, 8);
        assert_ne!(a.pixels, c.pixels);
    }

    #[test]
    fn test_render_seeded_places_rows_in_order() {
        // Replay each scanline serially and compare against the parallel render
        let world = lit_world();
        let background = Color::new(0.5, 0.7, 1.0);
        let mut camera = small_camera(12, 3, 6);
        let image = camera.render_seeded(&world, background, 99);

        for j in 0..image.height {
            let mut rng = row_rng(99, j);
            for i in 0..image.width {
                let expected = render_pixel(&camera, &world, background, i, j, &mut rng);
                assert_eq!(image.get(i, j), expected);
            }
        }
    }

    #[test]
    fn test_progress_interval() {
        assert_eq!(progress_interval(1), 1);
        assert_eq!(progress_interval(9), 1);
        assert_eq!(progress_interval(225), 22);

        // The final row is always reported
        let height = 225;
        let interval = progress_interval(height);
        let reports = (1..=height).filter(|done| done % interval == 0 || *done == height);
        assert_eq!(reports.count(), 11);
    }

    #[test]
    fn test_emissive_sphere_fills_frame() {
        // Camera sits inside a large emitter, every ray hits it
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(
            Point3::ZERO,
            50.0,
            Arc::new(DiffuseLight::new(Color::new(4.0, 4.0, 4.0))),
        )));

        let mut camera = small_camera(10, 1, 10);
        let image = camera.render(&world, Color::ZERO);

        // sqrt(4) saturates at 0.999, and 0.999 * 256 truncates to 255
        for chunk in image.to_rgb8().chunks(3) {
            assert_eq!(chunk, &[255, 255, 255]);
        }
    }

    #[test]
    fn test_empty_scene_is_background() {
        let world = HittableList::new();
        let mut camera = small_camera(10, 4, 10);
        let image = camera.render(&world, Color::new(0.5, 0.7, 1.0));

        let expected = gamma_quantize(Color::new(0.5, 0.7, 1.0), 1);
        assert_eq!(expected, [181, 214, 255]);
        for chunk in image.to_rgb8().chunks(3) {
            assert_eq!(chunk, &expected);
        }
    }

    #[test]
    fn test_image_buffer_get_set() {
        let mut image = ImageBuffer::new(3, 2, 4);
        image.set(2, 1, Color::new(4.0, 2.0, 0.0));

        assert_eq!(image.get(2, 1), Color::new(4.0, 2.0, 0.0));
        assert_eq!(image.average(2, 1), Color::new(1.0, 0.5, 0.0));
        assert_eq!(image.pixels[5], Color::new(4.0, 2.0, 0.0));
    }
}
