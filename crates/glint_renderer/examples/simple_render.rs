//! Simple path tracer example.
//!
//! Renders the classic random-spheres scene and saves it in PPM format.

use std::sync::Arc;

use glint_math::random::gen_f64;
use glint_math::vector::random_vector;
use glint_renderer::{
    save_image, Camera, Color, Dielectric, HittableList, Lambertian, Material, Metal, Point3,
    Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    println!("Glint Path Tracer - Simple Example");
    println!("==================================");

    // Build the scene
    let start = std::time::Instant::now();
    let world = build_scene();
    println!("Scene built with {} objects in {:?}", world.len(), start.elapsed());

    let mut camera = Camera::new()
        .with_resolution(400, 16.0 / 9.0)
        .with_quality(32, 10)
        .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.6, 10.0);

    let start = std::time::Instant::now();
    let image = camera.render_seeded(&world, Color::new(0.5, 0.7, 1.0), 42);
    println!("Rendered {}x{} in {:?}", image.width, image.height, start.elapsed());

    let filename = "output.ppm";
    save_image(&image, filename)?;
    println!("Saved to {}", filename);

    Ok(())
}

fn build_scene() -> HittableList {
    let mut rng = StdRng::seed_from_u64(7);
    let mut world = HittableList::new();

    // Ground
    world.add(Box::new(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::new(Color::splat(0.5))),
    )));

    // Small random spheres
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    for a in -5..5 {
        for b in -5..5 {
            let center = Point3::new(
                a as f64 + 0.9 * gen_f64(&mut rng),
                0.2,
                b as f64 + 0.9 * gen_f64(&mut rng),
            );
            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let choose = gen_f64(&mut rng);
            let material: Arc<dyn Material> = if choose < 0.8 {
                let albedo = random_vector(&mut rng, 0.0, 1.0) * random_vector(&mut rng, 0.0, 1.0);
                Arc::new(Lambertian::new(albedo))
            } else if choose < 0.95 {
                let albedo = random_vector(&mut rng, 0.5, 1.0);
                Arc::new(Metal::new(albedo, 0.5 * gen_f64(&mut rng)))
            } else {
                glass.clone()
            };

            world.add(Box::new(Sphere::new(center, 0.2, material)));
        }
    }

    // Three main spheres
    world.add(Box::new(Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0, glass)));
    world.add(Box::new(Sphere::new(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    )));
    world.add(Box::new(Sphere::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    world
}
