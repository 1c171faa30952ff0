//! Point light parameters.

use glam::Vec3A;

use crate::error::{RaycastError, Result};
use crate::interval::Interval;

/// Accepted range of the ambient coefficient.
pub const AMBIENT_RANGE: Interval = Interval { min: 0.0, max: 1.0 };
/// Accepted range of the specular exponent.
pub const SPECULAR_RANGE: Interval = Interval { min: 0.0, max: 100.0 };

/// A single point light with global ambient and specular settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Light position in world space
    pub position: Vec3A,
    /// Fraction of the base color always present, in [0, 1]
    pub ambient: f32,
    /// Blinn-Phong specular exponent, in [0, 100]
    pub specular_exponent: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3A::new(0.0, 5.0, -5.0),
            ambient: 0.1,
            specular_exponent: 10.0,
        }
    }
}

impl Light {
    /// Create a light after range-checking its coefficients.
    pub fn new(position: Vec3A, ambient: f32, specular_exponent: f32) -> Result<Self> {
        let light = Self {
            position,
            ambient,
            specular_exponent,
        };
        light.validate()?;
        Ok(light)
    }

    /// Check position finiteness and coefficient ranges.
    pub fn validate(&self) -> Result<()> {
        if !self.position.is_finite() {
            return Err(RaycastError::InvalidLight("position must be finite".into()));
        }
        if !AMBIENT_RANGE.contains(self.ambient) {
            return Err(RaycastError::InvalidLight(format!(
                "ambient coefficient {} outside [0, 1]",
                self.ambient
            )));
        }
        if !SPECULAR_RANGE.contains(self.specular_exponent) {
            return Err(RaycastError::InvalidLight(format!(
                "specular exponent {} outside [0, 100]",
                self.specular_exponent
            )));
        }
        Ok(())
    }
}
