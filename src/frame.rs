//! Fixed-size RGBA image buffer the renderer writes into.

use image::{Rgba, Rgba32FImage};

use crate::error::{RaycastError, Result};
use crate::hittable::Color;

/// A width x height grid of linear RGBA f32 pixels.
///
/// Coordinates have a bottom-left origin, matching the camera's sampling
/// plane: `(0, 0)` is the bottom-left pixel. The backing image is stored
/// top-down so encoders write it upright. Dimensions never change after
/// creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    image: Rgba32FImage,
}

impl Frame {
    /// Allocate a frame filled with transparent black.
    ///
    /// Fails with `InvalidDimensions` before allocating when either side is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RaycastError::InvalidDimensions { width, height });
        }
        Ok(Self {
            image: Rgba32FImage::new(width, height),
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Total pixel count.
    pub(crate) fn len(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Color at `(x, y)`, bottom-left origin.
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let Rgba(c) = *self.image.get_pixel(x, self.row(y));
        Color::from_array(c)
    }

    /// Store `color` at `(x, y)`, bottom-left origin.
    pub(crate) fn set(&mut self, x: u32, y: u32, color: Color) {
        let row = self.row(y);
        self.image.put_pixel(x, row, Rgba(color.to_array()));
    }

    /// Every pixel as `(x, y, color)`, bottom-left origin.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Color)> + '_ {
        let height = self.height();
        self.image
            .enumerate_pixels()
            .map(move |(x, row, Rgba(c))| (x, height - 1 - row, Color::from_array(*c)))
    }

    /// Mutable access to every pixel with bottom-left coordinates.
    pub(crate) fn pixels_mut(
        &mut self,
    ) -> impl Iterator<Item = (u32, u32, &mut Rgba<f32>)> + Send + '_ {
        let height = self.height();
        self.image
            .enumerate_pixels_mut()
            .map(move |(x, row, pixel)| (x, height - 1 - row, pixel))
    }

    /// The upright backing image.
    pub fn as_image(&self) -> &Rgba32FImage {
        &self.image
    }

    fn row(&self, y: u32) -> u32 {
        self.height() - 1 - y
    }
}
