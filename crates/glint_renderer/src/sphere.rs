//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use glint_math::{Interval, Point3};
use std::sync::Arc;

/// A sphere with a shared material.
///
/// The radius is taken as given. A negative radius still intersects like its
/// absolute value, but its outward normal points inward.
#[derive(Clone)]
pub struct Sphere {
    center: Point3,
    radius: f32,
    material: Arc<dyn Material>,
}

impl Sphere {
    /// Create a new sphere sharing `material`.
    pub fn new(center: Point3, radius: f32, material: Arc<dyn Material>) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    /// Center of the sphere.
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Radius as given, sign included.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Material shared with any other sphere built from the same `Arc`.
    pub fn material(&self) -> &Arc<dyn Material> {
        &self.material
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        // |origin + t*dir - center|^2 = r^2, with b = 2 * half_b
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.surrounds(root) {
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
