mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use glint_core::{load_scene, validate, SceneDescription};
use glint_renderer::{build_world, save_image, Camera};

use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Glint");

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the render thread pool")?;
    }

    let mut scene = match &args.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene given, rendering the showcase scene");
            SceneDescription::showcase()
        }
    };

    args.apply_overrides(&mut scene);
    validate(&scene).context("Invalid scene after applying overrides")?;

    let world = build_world(&scene).context("Failed to build world")?;
    let mut camera = Camera::from(&scene.camera);

    let image = match args.seed {
        Some(seed) => camera.render_seeded(&world, scene.background, seed),
        None => camera.render(&world, scene.background),
    };

    save_image(&image, &args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;

    Ok(())
}
