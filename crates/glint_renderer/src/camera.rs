//! Camera for ray generation.

use crate::Ray;
use glint_core::CameraSettings;
use glint_math::random::gen_f64;
use glint_math::vector::random_in_unit_disk;
use glint_math::{Point3, Vec3};
use rand::RngCore;

/// Camera for generating rays into the scene.
///
/// The public fields are configuration. Everything else is derived by
/// [`Camera::initialize`], which the renderer calls at the start of every
/// render, and is only read while rays are generated.
#[derive(Clone, Debug)]
pub struct Camera {
    // Image settings
    pub aspect_ratio: f64,
    pub image_width: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,

    // Camera positioning
    pub look_from: Point3,
    pub look_at: Point3,
    pub vup: Vec3,

    // Lens settings
    pub vfov: f64,          // Vertical field of view in degrees
    pub defocus_angle: f64, // Variation angle of rays through each pixel
    pub focus_dist: f64,    // Distance from camera to plane of perfect focus

    // Cached computed values (set by initialize())
    image_height: u32,
    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::from(&CameraSettings::default())
    }

    /// Set image width and aspect ratio; the height is derived.
    pub fn with_resolution(mut self, image_width: u32, aspect_ratio: f64) -> Self {
        self.image_width = image_width;
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples;
        self.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings. Angles are in degrees.
    pub fn with_lens(mut self, vfov: f64, defocus_angle: f64, focus_dist: f64) -> Self {
        self.vfov = vfov;
        self.defocus_angle = defocus_angle;
        self.focus_dist = focus_dist;
        self
    }

    /// Recompute the derived state from the current configuration.
    pub fn initialize(&mut self) {
        self.image_height = ((self.image_width as f64 / self.aspect_ratio) as u32).max(1);
        self.center = self.look_from;

        // Viewport is sized at the look-at distance and placed at the focus distance
        let focal_length = (self.look_from - self.look_at).length();
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * focal_length;
        let viewport_width = viewport_height * (self.image_width as f64 / self.image_height as f64);

        // Calculate camera basis vectors
        self.w = (self.look_from - self.look_at).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Calculate viewport vectors
        let viewport_u = viewport_width * self.u;
        let viewport_v = viewport_height * -self.v;

        // Calculate pixel delta vectors
        self.pixel_delta_u = viewport_u / self.image_width as f64;
        self.pixel_delta_v = viewport_v / self.image_height as f64;

        // Calculate upper left pixel location
        let viewport_upper_left =
            self.center - self.focus_dist * self.w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        // Calculate defocus disk basis vectors
        let defocus_radius = self.focus_dist * (self.defocus_angle / 2.0).to_radians().tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;

        log::debug!(
            "Camera {}x{}, frame u={:?} v={:?} w={:?}, defocus radius {:.4}",
            self.image_width,
            self.image_height,
            self.u,
            self.v,
            self.w,
            defocus_radius
        );
    }

    /// Generate a ray for pixel (i, j) with random sampling.
    ///
    /// The target is jittered uniformly over the pixel's square. With a
    /// positive defocus angle the ray starts on the defocus disk and aims at
    /// the same target, so points on the focus plane stay sharp.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + ((i as f64) + offset.x) * self.pixel_delta_u
            + ((j as f64) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }

    /// Rendered image height, valid after [`Camera::initialize`].
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Camera position, valid after [`Camera::initialize`].
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Orthonormal camera frame (right, up, backward).
    pub fn frame(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&CameraSettings> for Camera {
    fn from(settings: &CameraSettings) -> Self {
        let mut camera = Self {
            aspect_ratio: settings.aspect_ratio,
            image_width: settings.image_width,
            samples_per_pixel: settings.samples_per_pixel,
            max_depth: settings.max_depth,
            look_from: settings.look_from,
            look_at: settings.look_at,
            vup: settings.vup,
            vfov: settings.vfov,
            defocus_angle: settings.defocus_angle,
            focus_dist: settings.focus_dist,
            image_height: 1,
            center: Point3::ZERO,
            pixel00_loc: Point3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            defocus_disk_u: Vec3::ZERO,
            defocus_disk_v: Vec3::ZERO,
        };
        camera.initialize();
        camera
    }
}

/// Sample a random point in the square [-0.5, 0.5) x [-0.5, 0.5).
fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(gen_f64(rng) - 0.5, gen_f64(rng) - 0.5, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pinhole(width: u32, aspect_ratio: f64) -> Camera {
        let mut camera = Camera::new()
            .with_resolution(width, aspect_ratio)
            .with_position(Point3::ZERO, Point3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0);
        camera.initialize();
        camera
    }

    #[test]
    fn test_image_height() {
        assert_eq!(pinhole(400, 16.0 / 9.0).image_height(), 225);
        assert_eq!(pinhole(100, 2.0).image_height(), 50);
        // Floored at one row
        assert_eq!(pinhole(10, 100.0).image_height(), 1);
    }

    #[test]
    fn test_camera_frame() {
        let camera = pinhole(200, 2.0);
        let (u, v, w) = camera.frame();

        assert_eq!(camera.center(), Point3::ZERO);
        assert!((w - Vec3::Z).length() < 1e-12);
        assert!((u - Vec3::X).length() < 1e-12);
        assert!((v - Vec3::Y).length() < 1e-12);
    }

    #[test]
    fn test_frame_is_orthonormal() {
        let mut camera = Camera::new().with_position(
            Point3::new(13.0, 2.0, 3.0),
            Point3::ZERO,
            Vec3::Y,
        );
        camera.initialize();
        let (u, v, w) = camera.frame();

        for axis in [u, v, w] {
            assert!((axis.length() - 1.0).abs() < 1e-12);
        }
        assert!(u.dot(v).abs() < 1e-12);
        assert!(v.dot(w).abs() < 1e-12);
        assert!(w.dot(u).abs() < 1e-12);
    }

    #[test]
    fn test_pixel_grid() {
        // 90 degree fov at distance 1: viewport is 2 units tall, 4 wide
        let camera = pinhole(4, 2.0);
        assert!((camera.pixel_delta_u - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-12);
        assert!((camera.pixel_delta_v - Vec3::new(0.0, -1.0, 0.0)).length() < 1e-12);
        assert!((camera.pixel00_loc - Point3::new(-1.5, 0.5, -1.0)).length() < 1e-12);
    }

    #[test]
    fn test_rays_stay_inside_their_pixel() {
        let camera = pinhole(4, 2.0);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let ray = camera.get_ray(0, 0, &mut rng);
            assert_eq!(ray.origin(), Point3::ZERO);

            // Viewport plane is at z = -1, so the direction is the sample point
            let target = ray.at(1.0);
            assert!((target.z + 1.0).abs() < 1e-12);
            assert!((-2.0..=-1.0).contains(&target.x));
            assert!((0.0..=1.0).contains(&target.y));
        }
    }

    #[test]
    fn test_defocus_rays_converge_on_focus_plane() {
        let mut camera = Camera::new()
            .with_resolution(10, 1.0)
            .with_position(Point3::ZERO, Point3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 10.0, 5.0);
        camera.initialize();

        let mut rng = StdRng::seed_from_u64(42);
        let pixel_center =
            camera.pixel00_loc + 5.0 * camera.pixel_delta_u + 5.0 * camera.pixel_delta_v;
        let mut moved = 0;

        for _ in 0..200 {
            let ray = camera.get_ray(5, 5, &mut rng);
            if ray.origin() != camera.center() {
                moved += 1;
            }
            // Origin lies on the lens disk
            let radius = 5.0 * (5.0_f64).to_radians().tan();
            assert!(ray.origin().z.abs() < 1e-12);
            assert!(ray.origin().length() <= radius + 1e-12);

            // t = 1 lands on the focus plane, within the pixel
            let target = ray.at(1.0);
            assert!((target.z + 5.0).abs() < 1e-9);
            assert!((target - pixel_center).x.abs() <= 0.5 * camera.pixel_delta_u.length() + 1e-9);
        }

        assert!(moved > 0);
    }

    #[test]
    fn test_from_settings() {
        let settings = CameraSettings {
            image_width: 64,
            aspect_ratio: 1.0,
            samples_per_pixel: 3,
            max_depth: 7,
            ..Default::default()
        };
        let camera = Camera::from(&settings);

        assert_eq!(camera.image_width, 64);
        assert_eq!(camera.image_height(), 64);
        assert_eq!(camera.samples_per_pixel, 3);
        assert_eq!(camera.max_depth, 7);
        assert_eq!(camera.center(), settings.look_from);
    }
}
