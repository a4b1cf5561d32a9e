//! Camera for ray generation.

use glint_math::{random_f32, random_in_unit_disk, Point3, Ray, Vec3};
use rand::RngCore;

/// Pinhole or thin-lens camera generating primary rays.
///
/// Configure with the `with_*` builders, then call [`Camera::initialize`]
/// before asking for rays.
#[derive(Debug, Clone)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    look_from: Point3,
    look_at: Point3,
    vup: Vec3,

    // Lens settings
    vfov: f32,          // Vertical field of view in degrees
    defocus_angle: f32, // Variation angle of rays through each pixel
    focus_dist: f32,    // Distance from camera to plane of perfect focus

    // Cached computed values (set by initialize())
    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            image_width: 400,
            image_height: 225,
            look_from: Point3::ZERO,
            look_at: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            defocus_angle: 0.0,
            focus_dist: 1.0,
            center: Point3::ZERO,
            pixel00_loc: Point3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            w: Vec3::Z,
            defocus_disk_u: Vec3::ZERO,
            defocus_disk_v: Vec3::ZERO,
        }
    }

    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings. Angles are in degrees.
    pub fn with_lens(mut self, vfov: f32, defocus_angle: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.defocus_angle = defocus_angle;
        self.focus_dist = focus_dist;
        self
    }

    /// Compute the viewport. Must be called after configuration changes.
    pub fn initialize(&mut self) {
        self.center = self.look_from;

        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width = viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Orthonormal basis: w points backwards, u right, v up
        self.w = (self.look_from - self.look_at).normalize();
        let u = self.vup.cross(self.w).normalize();
        let v = self.w.cross(u);

        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        self.pixel_delta_u = viewport_u / self.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        let viewport_upper_left =
            self.center - self.focus_dist * self.w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        let defocus_radius = self.focus_dist * (self.defocus_angle / 2.0).to_radians().tan();
        self.defocus_disk_u = u * defocus_radius;
        self.defocus_disk_v = v * defocus_radius;

        log::debug!(
            "Camera initialized: {}x{}, viewport {:.3}x{:.3}",
            self.image_width,
            self.image_height,
            viewport_width,
            viewport_height
        );
    }

    /// Generate a ray through a random point of pixel (i, j).
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + ((i as f32) + offset.x) * self.pixel_delta_u
            + ((j as f32) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Random offset in [-0.5, 0.5) x [-0.5, 0.5).
fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(random_f32(rng) - 0.5, random_f32(rng) - 0.5, 0.0)
}
