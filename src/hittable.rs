//! Ray-scene intersection system.
//!
//! Defines the [`SceneQuery`] trait the renderer consumes, the [`HitRecord`]
//! it produces, and [`HittableList`], a linear nearest-hit search over the
//! built-in primitives.

use glam::{Vec3A, Vec4};

use crate::interval::Interval;
use crate::ray::Ray;

/// RGBA color, nominally in [0, 1] per channel.
pub type Color = Vec4;

/// Ray-surface intersection information.
///
/// Carries everything shading needs, with the surface color already
/// resolved so the renderer never looks anything up in a scene graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point where the ray intersects the surface
    pub point: Vec3A,
    /// Surface normal at the intersection point (unit vector, facing the ray)
    pub normal: Vec3A,
    /// Distance along the ray to the intersection point
    pub t: f32,
    /// Flat base color of the struck surface
    pub color: Color,
}

impl HitRecord {
    /// Build a record, orienting the normal against the incident ray.
    pub fn new(r: &Ray, t: f32, outward_normal: Vec3A, color: Color) -> Self {
        let normal = if r.direction.dot(outward_normal) < 0.0 {
            outward_normal
        } else {
            -outward_normal
        };
        Self {
            point: r.at(t),
            normal,
            t,
            color,
        }
    }
}

/// Anything that answers "nearest surface along this ray".
///
/// Must return the closest intersection along the ray's positive direction,
/// or `None`. Implementations are read-only during a render pass and must be
/// `Sync` so parallel renders can share them.
pub trait SceneQuery: Sync {
    /// Nearest intersection of `ray` with the scene, if any.
    fn intersect(&self, ray: &Ray) -> Option<HitRecord>;
}

/// A geometric primitive that can be intersected within a parameter range.
pub trait Hittable: Sync + Send {
    /// Test for ray intersection within `ray_t`.
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord>;
}

/// Collection of objects forming a scene.
///
/// Uses linear search for intersection testing. Supports polymorphic
/// objects through `Box<dyn Hittable>`.
#[derive(Default)]
pub struct HittableList {
    /// Vector of boxed hittable objects
    pub objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Number of objects in the scene.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when the scene holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableList {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(r, Interval::new(ray_t.min, closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

impl SceneQuery for HittableList {
    fn intersect(&self, ray: &Ray) -> Option<HitRecord> {
        self.hit(ray, Interval::FORWARD)
    }
}
