//! Conversion from a scene description to renderable objects.

use std::collections::HashMap;
use std::sync::Arc;

use glint_core::{MaterialDesc, ObjectDesc, SceneDescription, SceneError, SceneResult};

use crate::{Dielectric, DiffuseLight, HittableList, Lambertian, Material, Metal, Sphere};

/// Instantiate a material from its description.
pub fn create_material(desc: &MaterialDesc) -> Arc<dyn Material> {
    match *desc {
        MaterialDesc::Lambertian { albedo } => Arc::new(Lambertian::new(albedo)),
        MaterialDesc::Metal { albedo, fuzz } => Arc::new(Metal::new(albedo, fuzz)),
        MaterialDesc::Dielectric { refraction_index } => {
            Arc::new(Dielectric::new(refraction_index))
        }
        MaterialDesc::DiffuseLight { emit } => Arc::new(DiffuseLight::new(emit)),
    }
}

/// Build the world for a scene.
///
/// Each named material is created once and shared by every object that
/// references it.
pub fn build_world(scene: &SceneDescription) -> SceneResult<HittableList> {
    let materials: HashMap<&str, Arc<dyn Material>> = scene
        .materials
        .iter()
        .map(|(name, desc)| (name.as_str(), create_material(desc)))
        .collect();

    let mut world = HittableList::new();

    for (index, object) in scene.objects.iter().enumerate() {
        let material = materials
            .get(object.material())
            .cloned()
            .ok_or_else(|| SceneError::UnknownMaterial {
                index,
                name: object.material().to_string(),
            })?;

        match object {
            ObjectDesc::Sphere { center, radius, .. } => {
                world.add(Box::new(Sphere::new(*center, *radius, material)));
            }
        }
    }

    log::info!(
        "Built world: {} materials, {} objects",
        materials.len(),
        world.len()
    );

    Ok(world)
}
