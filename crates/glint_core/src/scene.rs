//! Scene description types for Glint.
//!
//! A scene is plain data: camera settings, a background color, a table of
//! named materials and a flat list of primitives referring to materials by
//! name. The renderer turns this into its own hittable/material objects.

use std::collections::BTreeMap;

use glint_math::{Color, Point3, Vec3};
use serde::{Deserialize, Serialize};

/// Camera configuration as supplied by a caller or a scene file.
///
/// Angles are in degrees. Every field has a default so scene files only need
/// to list what they change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Image width over height
    pub aspect_ratio: f64,
    /// Rendered image width in pixels
    pub image_width: u32,
    /// Random samples per pixel
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces
    pub max_depth: u32,
    /// Vertical field of view in degrees
    pub vfov: f64,
    pub look_from: Point3,
    pub look_at: Point3,
    /// Camera-relative "up" direction
    pub vup: Vec3,
    /// Variation angle of rays through each pixel, 0 disables depth of field
    pub defocus_angle: f64,
    /// Distance from `look_from` to the plane of perfect focus
    pub focus_dist: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            image_width: 400,
            samples_per_pixel: 100,
            max_depth: 10,
            vfov: 90.0,
            look_from: Point3::new(0.0, 0.0, -1.0),
            look_at: Point3::ZERO,
            vup: Vec3::Y,
            defocus_angle: 0.0,
            focus_dist: 10.0,
        }
    }
}

/// A surface material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    /// Matte diffuse surface
    Lambertian { albedo: Color },
    /// Specular reflector; `fuzz` 0 is a perfect mirror
    Metal { albedo: Color, fuzz: f64 },
    /// Clear refractive medium (1.0 = air, 1.5 = glass)
    Dielectric { refraction_index: f64 },
    /// Pure emitter
    DiffuseLight { emit: Color },
}

/// A geometric primitive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectDesc {
    Sphere {
        center: Point3,
        radius: f64,
        /// Key into [`SceneDescription::materials`]
        material: String,
    },
}

impl ObjectDesc {
    /// Name of the material this object uses.
    pub fn material(&self) -> &str {
        match self {
            ObjectDesc::Sphere { material, .. } => material,
        }
    }
}

/// Complete description of something to render.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub camera: CameraSettings,
    /// Radiance returned for rays that hit nothing
    pub background: Color,
    pub materials: BTreeMap<String, MaterialDesc>,
    pub objects: Vec<ObjectDesc>,
}

impl SceneDescription {
    /// Create an empty scene with the given camera.
    pub fn new(camera: CameraSettings) -> Self {
        Self {
            camera,
            ..Default::default()
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Register (or replace) a named material.
    pub fn add_material(&mut self, name: impl Into<String>, material: MaterialDesc) {
        self.materials.insert(name.into(), material);
    }

    /// Add a sphere using a previously registered material name.
    pub fn add_sphere(&mut self, center: Point3, radius: f64, material: impl Into<String>) {
        self.objects.push(ObjectDesc::Sphere {
            center,
            radius,
            material: material.into(),
        });
    }

    /// The demo scene: a metal ground and metal spheres lit by three small
    /// emitters, seen through a wide lens with strong depth of field.
    pub fn showcase() -> Self {
        let camera = CameraSettings {
            vfov: 90.0,
            look_from: Point3::new(4.0, 3.0, 0.0),
            look_at: Point3::new(0.0, 2.0, 0.0),
            vup: Vec3::Y,
            defocus_angle: 10.0,
            focus_dist: 5.0,
            samples_per_pixel: 100,
            max_depth: 100,
            ..Default::default()
        };

        let mut scene = Self::new(camera).with_background(Color::splat(0.01));

        scene.add_material(
            "ground",
            MaterialDesc::Lambertian {
                albedo: Color::splat(0.5),
            },
        );
        scene.add_material(
            "matte",
            MaterialDesc::Lambertian {
                albedo: Color::splat(0.1),
            },
        );
        scene.add_material(
            "glass",
            MaterialDesc::Dielectric {
                refraction_index: 1.5,
            },
        );
        scene.add_material(
            "metal",
            MaterialDesc::Metal {
                albedo: Color::new(0.8, 0.6, 0.2),
                fuzz: 0.01,
            },
        );
        scene.add_material(
            "light",
            MaterialDesc::DiffuseLight {
                emit: Color::splat(4.0),
            },
        );

        scene.add_sphere(Point3::new(0.0, -1000.0, 0.0), 1000.0, "metal");
        scene.add_sphere(Point3::new(0.0, 0.0, 0.0), 50.0, "metal");
        scene.add_sphere(Point3::new(0.0, 2.0, 0.0), 2.0, "metal");
        scene.add_sphere(Point3::new(0.0, 4.0, 3.0), 0.5, "light");
        scene.add_sphere(Point3::new(0.0, 4.0, -3.0), 0.5, "light");
        scene.add_sphere(Point3::new(3.0, 1.0, 0.0), 0.5, "light");

        scene
    }
}
