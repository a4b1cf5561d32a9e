//! Material trait for surface scattering.

use crate::{hittable::HitRecord, Ray};
use glint_math::{random_f32, random_unit_vector, reflect, refract, unit_vector, Color, Vec3Ext};
use rand::RngCore;

/// Result of a successful scatter.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Color weight applied to light arriving along `scattered`
    pub attenuation: Color,
    /// The outgoing ray, starting at the hit point
    pub scattered: Ray,
}

/// How light interacts with a surface.
///
/// Materials are immutable once built and shared between primitives and threads.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` when the ray is absorbed. Randomness comes only from
    /// `rng`, so each tracing thread passes its own generator.
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult>;
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }
}

impl Material for Lambertian {
    fn scatter(
        &self,
        _ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if scatter_direction.near_zero() {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scatter_direction),
        })
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror. Values above 1.0 are
    ///   lowered to 1.0; values below zero are kept.
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.min(1.0),
        }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    pub fn fuzz(&self) -> f32 {
        self.fuzz
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = reflect(unit_vector(ray_in.direction()), rec.normal);
        let scattered_dir = reflected + self.fuzz * random_unit_vector(rng);

        // Fuzz may push the reflection below the surface, which absorbs it
        if scattered_dir.dot(rec.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.albedo,
                scattered: Ray::new(rec.p, scattered_dir),
            })
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone)]
pub struct Dielectric {
    /// Index of refraction
    ir: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ir`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ir: f32) -> Self {
        Self { ir }
    }

    pub fn refraction_index(&self) -> f32 {
        self.ir
    }

    /// Schlick's approximation for reflectance.
    ///
    /// `r0` is symmetric in `ref_idx` and `1 / ref_idx`, so either the raw
    /// index or the refraction ratio may be passed.
    pub fn reflectance(cosine: f32, ref_idx: f32) -> f32 {
        let r0 = ((1.0 - ref_idx) / (1.0 + ref_idx)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let refraction_ratio = if rec.front_face { 1.0 / self.ir } else { self.ir };

        let unit_direction = unit_vector(ray_in.direction());
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction = if cannot_refract
            || random_f32(rng) < Self::reflectance(cos_theta, refraction_ratio)
        {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction),
        })
    }
}
