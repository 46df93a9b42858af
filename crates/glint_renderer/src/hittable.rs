//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Material, Ray, ScatterResult};
use glint_math::{Interval, Vec3};
use rand::RngCore;

/// A dummy material used for HitRecord::default().
/// Always absorbs light (returns None from scatter).
#[derive(Debug)]
struct DummyMaterial;

impl Material for DummyMaterial {
    fn scatter(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        None
    }
}

/// Static dummy material instance for Default impl.
static DUMMY_MATERIAL: DummyMaterial = DummyMaterial;

/// Record of a ray-object intersection.
#[derive(Clone)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a dyn Material,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> Default for HitRecord<'a> {
    fn default() -> Self {
        Self {
            p: Vec3::ZERO,
            normal: Vec3::ZERO,
            material: &DUMMY_MATERIAL,
            t: 0.0,
            front_face: false,
        }
    }
}

impl<'a> HitRecord<'a> {
    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
///
/// Implementors are shared read-only between render workers.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object within the given interval.
    ///
    /// Returns true if hit, and fills in the hit record. The record is
    /// left untouched on a miss.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool;
}

/// A list of hittable objects, searched linearly for the nearest hit.
#[derive(Default)]
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableList {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if object.hit(ray, ray_t.with_max(closest_so_far), rec) {
                hit_anything = true;
                closest_so_far = rec.t;
            }
        }

        hit_anything
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Sphere};
    use std::sync::Arc;

    fn sphere(center: Vec3, radius: f32) -> Box<Sphere> {
        let material = Arc::new(Lambertian::new(Vec3::splat(0.5)));
        Box::new(Sphere::new(center, radius, material).unwrap())
    }

    #[test]
    fn test_list_returns_nearest_hit() {
        // Insert the far sphere first so insertion order can't be what wins
        let mut list = HittableList::new();
        list.add(sphere(Vec3::new(0.0, 0.0, -10.0), 1.0));
        list.add(sphere(Vec3::new(0.0, 0.0, -4.0), 1.0));
        assert_eq!(list.len(), 2);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let mut rec = HitRecord::default();
        assert!(list.hit(&ray, Interval::from_min(0.001), &mut rec));
        assert!((rec.t - 3.0).abs() < 1e-5);
        assert!((rec.p - Vec3::new(0.0, 0.0, -3.0)).length() < 1e-5);
    }

    #[test]
    fn test_list_miss_leaves_record_untouched() {
        let mut list = HittableList::new();
        list.add(sphere(Vec3::new(0.0, 0.0, -4.0), 1.0));

        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        let mut rec = HitRecord::default();
        assert!(!list.hit(&ray, Interval::from_min(0.001), &mut rec));
        assert_eq!(rec.t, 0.0);
        assert_eq!(rec.normal, Vec3::ZERO);
    }

    #[test]
    fn test_empty_list_never_hits() {
        let list = HittableList::default();
        assert!(list.is_empty());

        let mut rec = HitRecord::default();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(!list.hit(&ray, Interval::from_min(f32::NEG_INFINITY), &mut rec));
    }

    #[test]
    fn test_set_face_normal() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let mut rec = HitRecord::default();

        rec.set_face_normal(&ray, Vec3::Z);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);

        rec.set_face_normal(&ray, Vec3::NEG_Z);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_default_material_absorbs() {
        let rec = HitRecord::default();
        let mut rng = rand::rngs::mock::StepRng::new(0, 1);
        assert!(rec.material.scatter(&Ray::default(), &rec, &mut rng).is_none());
    }
}
