use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glint_core::SceneDescription;
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "A brute-force Monte Carlo path tracer")]
pub struct Args {
    /// Scene file (JSON). Renders the built-in showcase scene when omitted.
    pub scene: Option<PathBuf>,

    /// Output image path (.ppm or .png)
    #[arg(short, long, default_value = "output.ppm")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Samples per pixel
    #[arg(short, long)]
    pub samples: Option<u32>,

    /// Maximum bounces per path
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Seed for a reproducible render
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads (defaults to one per core)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply the camera overrides given on the command line.
    pub fn apply_overrides(&self, scene: &mut SceneDescription) {
        if let Some(width) = self.width {
            scene.camera.image_width = width;
        }
        if let Some(samples) = self.samples {
            scene.camera.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            scene.camera.max_depth = max_depth;
        }
    }
}
