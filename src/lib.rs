//! Orthocast ray caster
//!
//! Casts one parallel ray per pixel from a square camera plane into a scene,
//! shades the nearest hit with Blinn-Phong lighting, and writes the result to
//! PNG or EXR.
//!
//! ```no_run
//! use glam::{Vec3A, Vec4};
//! use orthocast::{render, save, Camera, HittableList, Light, Plane};
//!
//! let mut world = HittableList::new();
//! world.add(Box::new(Plane::new(
//!     Vec3A::new(0.0, 0.0, 5.0),
//!     Vec3A::NEG_Z,
//!     Vec4::new(1.0, 0.0, 0.0, 1.0),
//! )));
//! let frame = render(&Camera::new(), &Light::default(), &world, 50, 50)?;
//! save(&frame, "Textures/Texture_50x50.png")?;
//! # Ok::<(), orthocast::RaycastError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod config;
pub mod error;
pub mod frame;
pub mod hittable;
pub mod interval;
pub mod light;
pub mod output;
pub mod plane;
pub mod ray;
pub mod renderer;
pub mod shading;
pub mod sphere;

pub use camera::Camera;
pub use config::Config;
pub use error::{RaycastError, Result};
pub use frame::Frame;
pub use hittable::{Color, HitRecord, Hittable, HittableList, SceneQuery};
pub use light::Light;
pub use output::save;
pub use plane::Plane;
pub use ray::Ray;
pub use renderer::{render, CancelToken, ColorPolicy, Renderer};
pub use shading::{shade, ShadingModel};
pub use sphere::Sphere;
