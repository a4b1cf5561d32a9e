//! Hittable trait, HitRecord, and the scene collection.

use crate::{Material, Ray, ScatterResult};
use glint_math::{Interval, Point3, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// Placeholder material for `HitRecord::default()`. Absorbs everything.
struct Absorber;

impl Material for Absorber {
    fn scatter(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        None
    }
}

static ABSORBER: Absorber = Absorber;

/// Record of a ray-object intersection.
///
/// Only meaningful after a `hit` call returned true; on a miss the contents
/// are whatever the last writer left behind.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Point3,
    /// Unit surface normal, always facing against the incoming ray
    pub normal: Vec3,
    /// Material of the surface that was hit, borrowed from the scene
    pub material: &'a dyn Material,
    /// Ray parameter of the intersection
    pub t: f32,
    /// Whether the geometric outward normal already faced the ray
    pub front_face: bool,
}

impl<'a> Default for HitRecord<'a> {
    fn default() -> Self {
        Self {
            p: Point3::ZERO,
            normal: Vec3::ZERO,
            material: &ABSORBER,
            t: 0.0,
            front_face: false,
        }
    }
}

impl<'a> std::fmt::Debug for HitRecord<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitRecord")
            .field("p", &self.p)
            .field("normal", &self.normal)
            .field("t", &self.t)
            .field("front_face", &self.front_face)
            .finish_non_exhaustive()
    }
}

impl<'a> HitRecord<'a> {
    /// Set the normal from the geometric outward normal (assumed unit length).
    ///
    /// The stored normal always points against the ray, so `front_face`
    /// remembers which side was hit.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Anything a ray can intersect.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object with `t` strictly inside `ray_t`.
    ///
    /// Returns true on a hit and fills in `rec`. On a miss `rec` must not be read.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool;
}

/// An ordered list of shared hittables. Reports the nearest hit.
#[derive(Clone, Default)]
pub struct HittableList {
    objects: Vec<Arc<dyn Hittable>>,
}

impl HittableList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Create a list holding a single object.
    pub fn with_object(object: Arc<dyn Hittable>) -> Self {
        let mut list = Self::new();
        list.add(object);
        list
    }

    /// Append an object; earlier objects win equal-distance ties.
    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Remove all objects, dropping the list's references to them.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Number of objects in the list.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if the list holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in insertion order.
    pub fn objects(&self) -> &[Arc<dyn Hittable>] {
        &self.objects
    }
}

impl Hittable for HittableList {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let mut temp_rec = HitRecord::default();
        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;

        // Each hit narrows the window, so later objects only win if strictly closer
        for object in &self.objects {
            if object.hit(ray, ray_t.with_max(closest_so_far), &mut temp_rec) {
                hit_anything = true;
                closest_so_far = temp_rec.t;
                *rec = temp_rec;
            }
        }

        hit_anything
    }
}
