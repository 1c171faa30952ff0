//! TOML configuration for a render.
//!
//! Every section is optional; missing values fall back to the defaults below.
//!
//! ```toml
//! output = "Textures/Texture_50x50.png"
//!
//! [resolution]
//! width = 50
//! height = 50
//! filter = "bilinear"
//!
//! [camera]
//! position = [0.0, 0.0, 0.0]
//! forward = [0.0, 0.0, 1.0]
//! size = 1.0
//! background = [0.0, 0.0, 0.0, 1.0]
//!
//! [light]
//! position = [0.0, 5.0, -5.0]
//! ambient = 0.1
//! specular = 10.0
//!
//! [[scene.planes]]
//! point = [0.0, 0.0, 5.0]
//! normal = [0.0, 0.0, -1.0]
//! color = [1.0, 0.0, 0.0, 1.0]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use glam::{Vec3A, Vec4};
use log::debug;
use serde::Deserialize;

use crate::camera::Camera;
use crate::error::{RaycastError, Result};
use crate::hittable::{Color, HittableList};
use crate::light::Light;
use crate::output::default_output_path;
use crate::plane::Plane;
use crate::renderer::{ColorPolicy, Renderer};
use crate::shading::ShadingModel;
use crate::sphere::Sphere;

/// Directory used when no output path is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "Textures";

/// Texture filtering for live display.
///
/// Carried for viewers of the result; it never changes pixel values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Nearest-neighbour sampling
    Nearest,
    /// Bilinear sampling
    #[default]
    Bilinear,
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Output file; `.png` or `.exr`
    pub output: Option<PathBuf>,
    /// `[resolution]`
    pub resolution: ResolutionConfig,
    /// `[camera]`
    pub camera: CameraConfig,
    /// `[light]`
    pub light: LightConfig,
    /// `[render]`
    pub render: RenderConfig,
    /// `[scene]`
    pub scene: SceneConfig,
}

/// Output image size and display filtering.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolutionConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Display-only filtering
    pub filter: FilterMode,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            filter: FilterMode::default(),
        }
    }
}

/// Mirrors [`Camera`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    /// Sampling plane center
    pub position: Vec3A,
    /// Viewing direction
    pub forward: Vec3A,
    /// Up hint
    pub up: Vec3A,
    /// Sampling plane edge length
    pub size: f32,
    /// Miss color
    pub background: Color,
    /// Debug ray length
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let camera = Camera::new();
        Self {
            position: camera.position,
            forward: camera.forward,
            up: camera.up,
            size: camera.size,
            background: camera.background,
            distance: camera.distance,
        }
    }
}

/// Mirrors [`Light`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightConfig {
    /// Light position
    pub position: Vec3A,
    /// Ambient coefficient in [0, 1]
    pub ambient: f32,
    /// Specular exponent in [0, 100]
    pub specular: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        let light = Light::default();
        Self {
            position: light.position,
            ambient: light.ambient,
            specular: light.specular_exponent,
        }
    }
}

/// Renderer settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Lighting model
    pub shading: ShadingModel,
    /// Clamp or keep HDR values
    pub color: ColorPolicy,
    /// Spread pixels over a thread pool
    pub parallel: bool,
    /// Worker threads for parallel renders; 0 lets rayon decide
    pub threads: usize,
    /// Show a progress bar
    pub progress: bool,
}

/// Built-in primitives making up the scene.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// `[[scene.spheres]]` entries
    pub spheres: Vec<SphereConfig>,
    /// `[[scene.planes]]` entries
    pub planes: Vec<PlaneConfig>,
}

/// A sphere; color defaults to opaque white.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(missing_docs)]
pub struct SphereConfig {
    pub center: Vec3A,
    pub radius: f32,
    #[serde(default = "default_surface_color")]
    pub color: Color,
}

/// A plane; color defaults to opaque white.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(missing_docs)]
pub struct PlaneConfig {
    pub point: Vec3A,
    pub normal: Vec3A,
    #[serde(default = "default_surface_color")]
    pub color: Color,
}

fn default_surface_color() -> Color {
    Vec4::ONE
}

impl Config {
    /// Read and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parse and validate configuration text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(text).map_err(|e| RaycastError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value the render relies on.
    pub fn validate(&self) -> Result<()> {
        let ResolutionConfig { width, height, .. } = self.resolution;
        if width == 0 || height == 0 {
            return Err(RaycastError::InvalidDimensions { width, height });
        }
        self.camera().validate()?;
        self.light()?;
        if let Some(bad) = self.scene.planes.iter().find(|p| p.normal.length_squared() == 0.0) {
            return Err(RaycastError::Config(format!(
                "plane through {:?} has a zero normal",
                bad.point
            )));
        }
        let bad_sphere = self
            .scene
            .spheres
            .iter()
            .find(|s| s.radius.is_nan() || s.radius <= 0.0);
        if let Some(bad) = bad_sphere {
            return Err(RaycastError::Config(format!(
                "sphere at {:?} has non-positive radius {}",
                bad.center, bad.radius
            )));
        }
        Ok(())
    }

    /// The configured camera.
    pub fn camera(&self) -> Camera {
        let c = &self.camera;
        Camera {
            position: c.position,
            forward: c.forward,
            up: c.up,
            size: c.size,
            background: c.background,
            distance: c.distance,
        }
    }

    /// The configured light, range-checked.
    pub fn light(&self) -> Result<Light> {
        let l = &self.light;
        Light::new(l.position, l.ambient, l.specular)
    }

    /// Renderer settings from the `[render]` section.
    pub fn renderer(&self) -> Renderer {
        Renderer {
            shading: self.render.shading,
            color_policy: self.render.color,
            show_progress: self.render.progress,
        }
    }

    /// Build the configured primitives into a scene.
    pub fn build_scene(&self) -> HittableList {
        let mut world = HittableList::new();
        for s in &self.scene.spheres {
            world.add(Box::new(Sphere::new(s.center, s.radius, s.color)));
        }
        for p in &self.scene.planes {
            world.add(Box::new(Plane::new(p.point, p.normal, p.color)));
        }
        world
    }

    /// Configured output path, or `Textures/Texture_{w}x{h}.png`.
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            default_output_path(DEFAULT_OUTPUT_DIR, self.resolution.width, self.resolution.height)
        })
    }
}
