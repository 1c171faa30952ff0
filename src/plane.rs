//! Infinite plane primitive.

use glam::Vec3A;

use crate::hittable::{Color, HitRecord, Hittable};
use crate::interval::Interval;
use crate::ray::Ray;

/// Infinite plane through `point` with unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Any point on the plane.
    pub point: Vec3A,
    /// Plane normal; normalized by the constructor.
    pub normal: Vec3A,
    /// Base color reported on hit.
    pub color: Color,
}

impl Plane {
    /// Create a new plane. A zero normal yields a plane nothing can hit.
    pub fn new(point: Vec3A, normal: Vec3A, color: Color) -> Self {
        Self {
            point,
            normal: normal.normalize_or_zero(),
            color,
        }
    }
}

impl Hittable for Plane {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let denom = self.normal.dot(r.direction);
        // Parallel rays (and a zero normal) never meet the plane.
        if denom.abs() < 1e-8 {
            return None;
        }
        let t = self.normal.dot(self.point - r.origin) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }
        Some(HitRecord::new(r, t, self.normal, self.color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::{HittableList, SceneQuery};
    use crate::sphere::Sphere;
    use glam::Vec4;

    const RED: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
    const BLUE: Vec4 = Vec4::new(0.0, 0.0, 1.0, 1.0);

    #[test]
    fn test_hit_facing_plane() {
        let p = Plane::new(Vec3A::new(0.0, 0.0, 3.0), Vec3A::NEG_Z, RED);
        let r = Ray::new(Vec3A::new(0.5, -0.5, 0.0), Vec3A::Z);
        let rec = p.hit(&r, Interval::FORWARD).expect("plane in front of ray");
        assert!((rec.t - 3.0).abs() < 1e-6);
        assert_eq!(rec.normal, Vec3A::NEG_Z);
        assert_eq!(rec.color, RED);
    }

    #[test]
    fn test_normal_flipped_toward_ray() {
        let p = Plane::new(Vec3A::new(0.0, 0.0, 3.0), Vec3A::Z, RED);
        let r = Ray::new(Vec3A::ZERO, Vec3A::Z);
        let rec = p.hit(&r, Interval::FORWARD).expect("plane in front of ray");
        assert_eq!(rec.normal, Vec3A::NEG_Z);
    }

    #[test]
    fn test_parallel_and_behind_miss() {
        let p = Plane::new(Vec3A::new(0.0, 0.0, 3.0), Vec3A::NEG_Z, RED);
        assert!(p.hit(&Ray::new(Vec3A::ZERO, Vec3A::X), Interval::FORWARD).is_none());
        assert!(p.hit(&Ray::new(Vec3A::ZERO, Vec3A::NEG_Z), Interval::FORWARD).is_none());
    }

    #[test]
    fn test_list_returns_nearest() {
        let mut world = HittableList::new();
        world.add(Box::new(Plane::new(Vec3A::new(0.0, 0.0, 10.0), Vec3A::NEG_Z, RED)));
        world.add(Box::new(Sphere::new(Vec3A::new(0.0, 0.0, 5.0), 1.0, BLUE)));
        assert_eq!(world.len(), 2);

        let hit = world.intersect(&Ray::new(Vec3A::ZERO, Vec3A::Z)).expect("both objects on axis");
        assert_eq!(hit.color, BLUE);
        assert!((hit.t - 4.0).abs() < 1e-5);

        let hit = world
            .intersect(&Ray::new(Vec3A::new(3.0, 0.0, 0.0), Vec3A::Z))
            .expect("plane is infinite");
        assert_eq!(hit.color, RED);
    }

    #[test]
    fn test_empty_list_misses() {
        let world = HittableList::new();
        assert!(world.is_empty());
        assert!(world.intersect(&Ray::new(Vec3A::ZERO, Vec3A::Z)).is_none());
    }
}
