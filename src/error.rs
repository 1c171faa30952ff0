//! Error types for the ray caster.

use thiserror::Error;

/// Errors surfaced by a render invocation.
///
/// Every variant is terminal for the pass that produced it. Degenerate
/// shading geometry never shows up here; it is resolved inside
/// [`crate::shading`].
#[derive(Error, Debug)]
pub enum RaycastError {
    /// Width or height of the requested image is zero.
    #[error("invalid image dimensions {width}x{height}: both must be at least 1")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// Camera parameters are unusable for ray generation.
    #[error("invalid camera: {0}")]
    InvalidCamera(String),

    /// Light parameters are out of range.
    #[error("invalid light: {0}")]
    InvalidLight(String),

    /// Output directory or file could not be created or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// PNG encoding failed.
    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),

    /// EXR encoding failed.
    #[error("EXR encoding error: {0}")]
    Exr(#[from] exr::error::Error),

    /// Output path has an extension no encoder handles.
    #[error("unsupported output format '{0}': only .png and .exr are supported")]
    UnsupportedFormat(String),

    /// Configuration file could not be parsed or holds invalid values.
    #[error("configuration error: {0}")]
    Config(String),

    /// A cancellable render was stopped before every pixel was written.
    #[error("render cancelled before completion")]
    Cancelled,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RaycastError>;
