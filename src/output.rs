//! # Output Module
//!
//! Writes a rendered [`Frame`] to disk:
//! - PNG: 8-bit RGBA, each channel clamped to [0, 1] and scaled to [0, 255]
//! - EXR: 32-bit float RGBA, linear values kept as rendered (HDR-safe)
//!
//! Both writers create the destination directory when it does not exist.

use std::fs;
use std::path::{Path, PathBuf};

use exr::prelude::write_rgba_file;
use image::{ImageBuffer, Rgba};
use log::{debug, info};

use crate::error::{RaycastError, Result};
use crate::frame::Frame;

/// Supported output encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// 8-bit PNG with alpha
    Png,
    /// 32-bit float OpenEXR with alpha
    Exr,
}

impl OutputFormat {
    /// Pick the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(OutputFormat::Png),
            "exr" => Ok(OutputFormat::Exr),
            _ => Err(RaycastError::UnsupportedFormat(ext)),
        }
    }
}

/// `dir/Texture_{width}x{height}.png`, the default output naming.
pub fn default_output_path(dir: impl AsRef<Path>, width: u32, height: u32) -> PathBuf {
    dir.as_ref().join(format!("Texture_{}x{}.png", width, height))
}

/// Save `frame` in the format implied by the extension of `path`.
pub fn save(frame: &Frame, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match OutputFormat::from_path(path)? {
        OutputFormat::Png => save_png(frame, path),
        OutputFormat::Exr => save_exr(frame, path),
    }
}

/// Save `frame` as an 8-bit RGBA PNG.
///
/// Channels are clamped to [0, 1] and scaled linearly to [0, 255] with
/// rounding; no gamma curve is applied, so stored values are written as-is.
pub fn save_png(frame: &Frame, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let source = frame.as_image();
    let u8_image: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_fn(source.width(), source.height(), |x, y| {
            let Rgba(c) = *source.get_pixel(x, y);
            Rgba(c.map(to_u8))
        });

    u8_image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| match e {
            image::ImageError::IoError(io) => RaycastError::Io(io),
            other => other.into(),
        })?;
    info!("Image saved as {}", path.display());
    Ok(())
}

/// Save `frame` as a 32-bit float RGBA OpenEXR file, without tone mapping.
pub fn save_exr(frame: &Frame, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let source = frame.as_image();
    write_rgba_file(
        path,
        source.width() as usize,
        source.height() as usize,
        |x, y| {
            let Rgba([r, g, b, a]) = *source.get_pixel(x as u32, y as u32);
            (r, g, b, a)
        },
    )
    .map_err(|e| match e {
        exr::error::Error::Io(io) => RaycastError::Io(io),
        other => other.into(),
    })?;
    info!("HDR image saved as EXR: {}", path.display());
    Ok(())
}

fn to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            debug!("Creating output directory {}", dir.display());
            fs::create_dir_all(dir)?;
        }
    }
    Ok(())
}
