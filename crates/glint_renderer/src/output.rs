//! Writing rendered images.
//!
//! Linear sums from the renderer are averaged, gamma corrected with a
//! square root, clamped to [0, 0.999] and scaled by 256 into 8-bit channels.
//! Two formats are supported:
//! - plain-text `P3` pixel maps (`.ppm`)
//! - PNG through the `image` crate (`.png`)

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use glint_math::{Color, Interval};
use thiserror::Error;

use crate::ImageBuffer;

/// Errors that can occur while saving an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Displayable channel range before scaling to 8 bits.
const INTENSITY: Interval = Interval::new(0.0, 0.999);

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a sum of `samples` radiance estimates to 8-bit RGB.
pub fn gamma_quantize(sum: Color, samples: u32) -> [u8; 3] {
    let scale = 1.0 / samples.max(1) as f64;
    let channel = |linear: f64| (INTENSITY.clamp(linear_to_gamma(linear * scale)) * 256.0) as u8;
    [channel(sum.x), channel(sum.y), channel(sum.z)]
}

/// Write a plain-text `P3` pixel map: header, then one `r g b` line per
/// pixel, row-major from the top-left corner.
pub fn write_ppm<W: Write>(image: &ImageBuffer, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for color in &image.pixels {
        let [r, g, b] = gamma_quantize(*color, image.samples_per_pixel);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    writer.flush()
}

/// Save as a `P3` pixel map.
pub fn save_ppm<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> OutputResult<()> {
    let file = File::create(path)?;
    write_ppm(image, BufWriter::new(file))?;
    Ok(())
}

/// Save as an 8-bit PNG.
pub fn save_png<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> OutputResult<()> {
    image::save_buffer(
        path,
        &image.to_rgb8(),
        image.width,
        image.height,
        image::ColorType::Rgb8,
    )?;
    Ok(())
}

/// Save choosing the format from the file extension.
pub fn save_image<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> OutputResult<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "ppm" => save_ppm(image, path)?,
        "png" => save_png(image, path)?,
        _ => return Err(OutputError::UnsupportedFormat(path.display().to_string())),
    }

    log::info!("Image saved as {}", path.display());
    Ok(())
}
