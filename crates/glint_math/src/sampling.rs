//! Random sampling of scalars and directions.
//!
//! Every function takes the generator explicitly. Nothing here touches a
//! global stream, so parallel callers each bring their own `Rng`.
//!
//! The rejection loops have no iteration cap. Each attempt succeeds with
//! probability pi/6 (sphere) or pi/4 (disk), so they finish almost surely.

use crate::vector::unit_vector;
use glam::Vec3;
use rand::Rng;

/// Uniform random number in [0, 1).
#[inline]
pub fn random_f32<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen::<f32>()
}

/// Uniform random number in [min, max).
#[inline]
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + (max - min) * random_f32(rng)
}

/// Vector with each component uniform in [0, 1).
pub fn random_vec<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(random_f32(rng), random_f32(rng), random_f32(rng))
}

/// Vector with each component uniform in [min, max).
pub fn random_vec_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> Vec3 {
    Vec3::new(
        random_range(rng, min, max),
        random_range(rng, min, max),
        random_range(rng, min, max),
    )
}

/// Uniform random point strictly inside the unit ball.
pub fn random_in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let p = random_vec_range(rng, -1.0, 1.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Uniformly distributed direction on the unit sphere.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    unit_vector(random_in_unit_sphere(rng))
}

/// Random unit vector in the hemisphere around `normal`.
pub fn random_on_hemisphere<R: Rng + ?Sized>(rng: &mut R, normal: Vec3) -> Vec3 {
    let on_unit_sphere = random_unit_vector(rng);
    if on_unit_sphere.dot(normal) > 0.0 {
        on_unit_sphere
    } else {
        -on_unit_sphere
    }
}

/// Uniform random point strictly inside the unit disk in the XY plane.
pub fn random_in_unit_disk<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let p = Vec3::new(random_range(rng, -1.0, 1.0), random_range(rng, -1.0, 1.0), 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    const SAMPLES: usize = 10_000;

    #[test]
    fn test_random_range_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..SAMPLES {
            let x = random_range(&mut rng, -2.0, 3.0);
            assert!((-2.0..3.0).contains(&x));
        }
    }

    #[test]
    fn test_random_vec_bounds() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..SAMPLES {
            let v = random_vec(&mut rng);
            assert!(v.min_element() >= 0.0 && v.max_element() < 1.0);
        }
    }

    #[test]
    fn test_random_in_unit_sphere_stays_inside() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..SAMPLES {
            assert!(random_in_unit_sphere(&mut rng).length_squared() < 1.0);
        }
    }

    #[test]
    fn test_random_in_unit_disk_stays_inside() {
        let mut rng = StdRng::seed_from_u64(43);
        for _ in 0..SAMPLES {
            let p = random_in_unit_disk(&mut rng);
            assert!(p.length_squared() < 1.0);
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn test_random_unit_vector_is_unit() {
        let mut rng = StdRng::seed_from_u64(44);
        for _ in 0..SAMPLES {
            assert!((random_unit_vector(&mut rng).length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_random_unit_vector_covers_sphere() {
        // Mean direction of a uniform distribution is close to zero
        let mut rng = StdRng::seed_from_u64(45);
        let sum: Vec3 = (0..SAMPLES).map(|_| random_unit_vector(&mut rng)).sum();
        assert!((sum / SAMPLES as f32).length() < 0.05);
    }

    #[test]
    fn test_random_on_hemisphere_matches_normal() {
        let mut rng = StdRng::seed_from_u64(46);
        let normal = unit_vector(Vec3::new(0.3, -1.0, 0.2));
        for _ in 0..SAMPLES {
            assert!(random_on_hemisphere(&mut rng, normal).dot(normal) >= 0.0);
        }
    }

    #[test]
    fn test_works_through_dyn_rng() {
        let mut rng = StdRng::seed_from_u64(47);
        let dyn_rng: &mut dyn RngCore = &mut rng;
        let p = random_in_unit_sphere(dyn_rng);
        assert!(p.length_squared() < 1.0);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            assert_eq!(random_unit_vector(&mut a), random_unit_vector(&mut b));
        }
    }
}
