//! Local lighting models.
//!
//! Shading is a pure function of the hit, the camera position and the light.
//! Degenerate geometry (a zero normal, a hit point sitting exactly on the
//! light or the camera, or light and view pointing exactly apart) contributes
//! no diffuse or specular light instead of producing NaN. This holds for a
//! zero specular exponent too: only a defined half vector gets `0^0 = 1`.

use glam::{Vec3A, Vec4};
use serde::Deserialize;

use crate::camera::Camera;
use crate::hittable::{Color, HitRecord};
use crate::light::Light;

/// Specular highlight color.
pub const WHITE: Color = Vec4::ONE;

/// Lighting model applied to every hit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShadingModel {
    /// Ambient + diffuse + half-vector specular.
    #[default]
    BlinnPhong,
    /// Plain Lambertian falloff: `base * max(0, light · normal)`.
    Lambert,
}

impl ShadingModel {
    /// Shade `hit` as seen from `camera` under `light`.
    pub fn shade(&self, hit: &HitRecord, camera: &Camera, light: &Light) -> Color {
        match self {
            ShadingModel::BlinnPhong => shade(hit, camera, light),
            ShadingModel::Lambert => shade_lambert(hit, light),
        }
    }
}

/// Blinn-Phong shading.
///
/// `ambient + diffuse + specular`, summed channel-wise over RGBA and left
/// unclamped; see [`crate::renderer::ColorPolicy`] for how the sum is stored.
pub fn shade(hit: &HitRecord, camera: &Camera, light: &Light) -> Color {
    let ambient = hit.color * light.ambient;
    match blinn_phong_intensity(hit, camera.position, light.position) {
        Some(intensity) => {
            let diffuse = hit.color * intensity;
            let specular = WHITE * intensity.powf(light.specular_exponent);
            ambient + diffuse + specular
        }
        None => ambient,
    }
}

/// `max(0, half · normal)`, or `None` when any of the directions is undefined.
pub fn blinn_phong_intensity(hit: &HitRecord, eye: Vec3A, light_position: Vec3A) -> Option<f32> {
    let normal = hit.normal.normalize_or_zero();
    let light_dir = (light_position - hit.point).normalize_or_zero();
    let view_dir = (eye - hit.point).normalize_or_zero();
    if normal == Vec3A::ZERO || light_dir == Vec3A::ZERO || view_dir == Vec3A::ZERO {
        return None;
    }
    // Light and view exactly opposite leave no half vector.
    let half_dir = (light_dir + view_dir).try_normalize()?;
    Some(half_dir.dot(normal).max(0.0))
}

/// Lambertian shading without ambient or specular terms.
pub fn shade_lambert(hit: &HitRecord, light: &Light) -> Color {
    let normal = hit.normal.normalize_or_zero();
    let light_dir = (light.position - hit.point).normalize_or_zero();
    hit.color * light_dir.dot(normal).max(0.0)
}
