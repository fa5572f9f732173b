//! Scene file loading.
//!
//! Scene files are JSON documents matching [`SceneDescription`]. Loading
//! validates material references and the camera configuration so that the
//! renderer only ever sees a scene it can build.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::scene::{CameraSettings, SceneDescription};

/// Errors that can occur while loading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Object {index} references unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),
}

/// Result type for scene loading.
pub type SceneResult<T> = Result<T, SceneError>;

/// Load and validate a scene file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<SceneDescription> {
    let path = path.as_ref();
    log::info!("Loading scene: {}", path.display());

    let text = fs::read_to_string(path)?;
    load_scene_from_str(&text)
}

/// Parse and validate a scene from a JSON string.
pub fn load_scene_from_str(text: &str) -> SceneResult<SceneDescription> {
    let scene: SceneDescription = serde_json::from_str(text)?;
    validate(&scene)?;

    log::debug!(
        "Scene has {} materials, {} objects",
        scene.materials.len(),
        scene.objects.len()
    );

    Ok(scene)
}

/// Check that every object's material exists and the camera is usable.
pub fn validate(scene: &SceneDescription) -> SceneResult<()> {
    for (index, object) in scene.objects.iter().enumerate() {
        if !scene.materials.contains_key(object.material()) {
            return Err(SceneError::UnknownMaterial {
                index,
                name: object.material().to_string(),
            });
        }
    }

    validate_camera(&scene.camera)
}

fn validate_camera(camera: &CameraSettings) -> SceneResult<()> {
    if camera.image_width == 0 {
        return Err(SceneError::InvalidCamera("image_width must be positive".into()));
    }
    if !(camera.aspect_ratio.is_finite() && camera.aspect_ratio > 0.0) {
        return Err(SceneError::InvalidCamera(format!(
            "aspect_ratio must be positive, got {}",
            camera.aspect_ratio
        )));
    }
    if camera.samples_per_pixel == 0 {
        return Err(SceneError::InvalidCamera(
            "samples_per_pixel must be positive".into(),
        ));
    }
    if camera.look_from == camera.look_at {
        return Err(SceneError::InvalidCamera(
            "look_from and look_at must differ".into(),
        ));
    }
    if camera.vup.cross(camera.look_from - camera.look_at).length_squared() == 0.0 {
        return Err(SceneError::InvalidCamera(
            "vup must not be parallel to the view direction".into(),
        ));
    }

    Ok(())
}
