//! Glint renderer - recursive CPU ray tracing.
//!
//! The core is the intersection/scatter pipeline: [`Hittable`] surfaces
//! report the nearest [`HitRecord`], and a [`Material`] decides whether the
//! ray is absorbed or bounces on. [`Camera`] and [`render`] drive that
//! pipeline over an image.
//!
//! ```no_run
//! use glint_renderer::{
//!     render, Camera, Color, HittableList, Lambertian, RenderConfig, Sphere, Vec3,
//! };
//! use std::sync::Arc;
//!
//! let mut world = HittableList::new();
//! world.add(Arc::new(Sphere::new(
//!     Vec3::new(0.0, 0.0, -1.0),
//!     0.5,
//!     Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5))),
//! )));
//!
//! let mut camera = Camera::new().with_resolution(200, 100);
//! camera.initialize();
//!
//! let image = render(&camera, &world, &RenderConfig::default())?;
//! image.save("out.png")?;
//! # Ok::<(), glint_renderer::RenderError>(())
//! ```

mod camera;
mod error;
mod hittable;
mod material;
mod renderer;
mod sphere;

pub use camera::Camera;
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use renderer::{
    color_to_rgba, linear_to_gamma, ray_color, render, render_pixel, ImageBuffer, RenderConfig,
    T_MIN,
};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Color, Interval, Point3, Ray, Vec3};
