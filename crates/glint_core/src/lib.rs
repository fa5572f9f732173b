//! Glint Core - renderer-agnostic scene description.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `CameraSettings`,
//!   `MaterialDesc`, `ObjectDesc`
//! - **Loading**: JSON scene files via serde
//!
//! # Example
//!
//! ```ignore
//! use glint_core::load_scene;
//!
//! let scene = load_scene("scenes/showcase.json")?;
//! println!("Loaded {} materials, {} objects",
//!     scene.materials.len(),
//!     scene.objects.len());
//! ```

pub mod loader;
pub mod scene;

pub use loader::{load_scene, load_scene_from_str, validate, SceneError, SceneResult};
pub use scene::{CameraSettings, MaterialDesc, ObjectDesc, SceneDescription};
