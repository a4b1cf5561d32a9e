//! Vector helpers used throughout the tracer.
//!
//! `Vec3` itself is glam's, which already provides the arithmetic operator set,
//! `dot`, `cross`, `length` and panicking indexing. What lives here is the
//! optics on top of it.

use glam::Vec3;

/// A position in space. Same type as `Vec3`, named for readability.
pub type Point3 = Vec3;

/// Linear RGB color, typically in [0, 1] per channel.
pub type Color = Vec3;

/// Components below this magnitude count as zero in [`Vec3Ext::near_zero`].
pub const NEAR_ZERO_EPSILON: f32 = 1e-8;

/// Extra vector queries glam does not provide.
pub trait Vec3Ext {
    /// True if every component is within [`NEAR_ZERO_EPSILON`] of zero.
    fn near_zero(&self) -> bool;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn near_zero(&self) -> bool {
        self.x.abs() < NEAR_ZERO_EPSILON
            && self.y.abs() < NEAR_ZERO_EPSILON
            && self.z.abs() < NEAR_ZERO_EPSILON
    }
}

/// Scale `v` to unit length.
///
/// A zero vector yields NaN components; callers guarantee non-zero input.
#[inline]
pub fn unit_vector(v: Vec3) -> Vec3 {
    v / v.length()
}

/// Reflect `v` about the unit normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with unit normal `n`.
///
/// `n` must face against `uv`. `etai_over_etat` is the ratio of the refractive
/// index on the incoming side over the index on the far side. Total internal
/// reflection is not detected here; the `abs` only absorbs float error.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}
