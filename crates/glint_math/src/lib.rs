//! Glint math - the numeric substrate of the ray tracer.
//!
//! Vectors come from glam; this crate adds the pieces a ray tracer needs on
//! top of them: rays, parameter intervals, reflection/refraction and random
//! direction sampling.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;
mod sampling;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use sampling::{
    random_f32, random_in_unit_disk, random_in_unit_sphere, random_on_hemisphere, random_range,
    random_unit_vector, random_vec, random_vec_range,
};
pub use vector::{reflect, refract, unit_vector, Color, Point3, Vec3Ext, NEAR_ZERO_EPSILON};
