use crate::{Point3, Vec3};

/// A half-line `origin + t * direction`.
///
/// The direction is not required to be normalized; `t` is measured in
/// multiples of its length.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vec3,
}

impl Ray {
    #[inline]
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Point along the ray at parameter `t`.
    #[inline]
    pub fn at(&self, t: f32) -> Point3 {
        self.origin + t * self.direction
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Point3::ZERO,
            direction: Vec3::Z,
        }
    }
}
