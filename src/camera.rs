//! Orthographic camera and pixel-to-ray mapping.

use glam::{Vec3A, Vec4};
use log::{debug, warn};

use crate::error::{RaycastError, Result};
use crate::hittable::Color;
use crate::ray::Ray;

/// Distance along the forward axis by which every ray origin is pushed off
/// the sampling plane, so rays never start on the emitting surface itself.
pub const RAY_START_OFFSET: f32 = 0.1;

/// Orthographic camera casting parallel rays from a square sampling plane.
///
/// All rays share the forward direction; only their origins vary across
/// the plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Center of the sampling plane in world space
    pub position: Vec3A,
    /// Viewing direction; normalized when the sampling plane is built
    pub forward: Vec3A,
    /// Up hint used to derive the plane's local X/Y axes
    pub up: Vec3A,
    /// Full edge length of the square sampling plane (must be > 0)
    pub size: f32,
    /// Color written for rays that hit nothing
    pub background: Color,
    /// Length of the debug ray segment; never used for ray generation
    pub distance: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Creates a camera at the origin looking down +Z.
    ///
    /// Default: size 1, black opaque background, debug distance 5.
    pub fn new() -> Self {
        Self {
            position: Vec3A::ZERO,
            forward: Vec3A::Z,
            up: Vec3A::Y,
            size: 1.0,
            background: Vec4::new(0.0, 0.0, 0.0, 1.0),
            distance: 5.0,
        }
    }

    /// Check the invariants ray generation relies on.
    pub fn validate(&self) -> Result<()> {
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(RaycastError::InvalidCamera(format!(
                "size must be a positive finite number, got {}",
                self.size
            )));
        }
        if !self.position.is_finite() {
            return Err(RaycastError::InvalidCamera("position must be finite".into()));
        }
        if !self.up.is_finite() {
            return Err(RaycastError::InvalidCamera("up hint must be finite".into()));
        }
        if !self.forward.is_finite() || self.forward.length_squared() == 0.0 {
            return Err(RaycastError::InvalidCamera(
                "forward direction must be a finite non-zero vector".into(),
            ));
        }
        Ok(())
    }

    /// Local (right, up, forward) unit axes of the sampling plane.
    ///
    /// Right is `up × forward`, so a camera looking down +Z with up +Y has
    /// +X as right. When the up hint is parallel to forward an arbitrary
    /// perpendicular axis is used instead.
    pub fn basis(&self) -> (Vec3A, Vec3A, Vec3A) {
        let forward = self.forward.normalize_or_zero();
        let mut right = self.up.cross(forward);
        if right.length_squared() < 1e-12 {
            warn!(
                "Camera up hint {:?} is parallel to forward {:?}, choosing another axis",
                self.up, forward
            );
            right = forward.any_orthonormal_vector();
        }
        let right = right.normalize();
        let up = forward.cross(right);
        (right, up, forward)
    }

    /// The debug ray segment `(start, end)`: from the camera along forward
    /// for `distance` units.
    pub fn debug_ray(&self) -> (Vec3A, Vec3A) {
        let forward = self.forward.normalize_or_zero();
        (self.position, self.position + forward * self.distance)
    }

    /// Build the pixel-to-ray mapping for a `width` x `height` image.
    ///
    /// Fails with `InvalidDimensions` for a zero side and `InvalidCamera`
    /// for an unusable camera.
    pub fn sampling_plane(&self, width: u32, height: u32) -> Result<SamplingPlane> {
        if width == 0 || height == 0 {
            return Err(RaycastError::InvalidDimensions { width, height });
        }
        self.validate()?;

        let (right, up, forward) = self.basis();
        let (start, end) = self.debug_ray();
        debug!("Camera debug ray {:?} -> {:?}", start, end);

        Ok(SamplingPlane {
            origin: self.position + forward * RAY_START_OFFSET,
            right,
            up,
            forward,
            size: self.size,
            width,
            height,
        })
    }
}

/// Precomputed mapping from pixel coordinates to primary rays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingPlane {
    origin: Vec3A,
    right: Vec3A,
    up: Vec3A,
    forward: Vec3A,
    size: f32,
    width: u32,
    height: u32,
}

impl SamplingPlane {
    /// Plane coordinates `(px, py)` of pixel `(x, y)`.
    ///
    /// Pixel (0, 0) maps to the bottom-left corner `(-size/2, -size/2)`;
    /// the last pixel lands one step short of the top-right corner.
    pub fn plane_coords(&self, x: u32, y: u32) -> (f32, f32) {
        let half = self.size * 0.5;
        let px = x as f32 / self.width as f32 * self.size - half;
        let py = y as f32 / self.height as f32 * self.size - half;
        (px, py)
    }

    /// Primary ray for pixel `(x, y)`.
    pub fn ray(&self, x: u32, y: u32) -> Ray {
        let (px, py) = self.plane_coords(x, y);
        Ray::new(self.origin + px * self.right + py * self.up, self.forward)
    }
}
