//! Sphere primitive for ray tracing.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray, RenderError,
};
use glint_math::{Interval, Vec3};

/// The space a sphere occupies, used to keep placed spheres apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub center: Vec3,
    pub radius: f32,
}

impl Footprint {
    /// True if a sphere at `center` with `radius` would clip into this one.
    pub fn clips(&self, center: Vec3, radius: f32) -> bool {
        (center - self.center).length() < radius + self.radius
    }
}

/// A sphere primitive.
///
/// The material is shared, so many spheres can point at one instance.
#[derive(Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<dyn Material>,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Fails if the radius is not a positive finite number.
    pub fn new(
        center: Vec3,
        radius: f32,
        material: Arc<dyn Material>,
    ) -> Result<Self, RenderError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(RenderError::InvalidRadius(radius));
        }

        Ok(Self {
            center,
            radius,
            material,
        })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &Arc<dyn Material> {
        &self.material
    }

    pub fn footprint(&self) -> Footprint {
        Footprint {
            center: self.center,
            radius: self.radius,
        }
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.contains(root) {
            root = (h + sqrtd) / a;
            if !ray_t.contains(root) {
                return false;
            }
        }

        rec.t = root;
        rec.p = ray.at(rec.t);
        let outward_normal = (rec.p - self.center) / self.radius;
        rec.set_face_normal(ray, outward_normal);
        rec.material = self.material.as_ref();

        true
    }
}
