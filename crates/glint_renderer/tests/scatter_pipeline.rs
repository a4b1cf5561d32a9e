//! Intersection and scattering working together through the public API.

use glint_renderer::{
    ray_color, Color, Dielectric, HitRecord, Hittable, HittableList, Interval, Lambertian,
    Material, Metal, Point3, Ray, RenderConfig, Sphere, Vec3, T_MIN,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

const EPS: f32 = 1e-4;

fn forward() -> Interval {
    Interval::new(T_MIN, f32::INFINITY)
}

#[test]
fn unit_sphere_end_to_end() {
    let albedo = Color::new(0.5, 0.5, 0.5);
    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(
        Point3::ZERO,
        1.0,
        Arc::new(Lambertian::new(albedo)),
    )));

    let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
    let mut rec = HitRecord::default();

    assert!(world.hit(&ray, forward(), &mut rec));
    assert!((rec.t - 4.0).abs() < EPS);
    assert!((rec.p - Point3::new(0.0, 0.0, -1.0)).length() < EPS);
    assert!((rec.normal - Vec3::new(0.0, 0.0, -1.0)).length() < EPS);
    assert!(rec.front_face);

    let mut rng = StdRng::seed_from_u64(2024);
    let scatter = rec
        .material
        .scatter(&ray, &rec, &mut rng)
        .expect("diffuse surfaces always scatter");
    assert_eq!(scatter.attenuation, albedo);
    assert_eq!(scatter.scattered.origin(), rec.p);
    // Leaves on the camera side of the sphere
    assert!(scatter.scattered.direction().dot(rec.normal) >= 0.0);
}

#[test]
fn materials_are_shared_not_copied() {
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    let mut world = HittableList::new();
    for x in [-2.0, 0.0, 2.0] {
        world.add(Arc::new(Sphere::new(Point3::new(x, 0.0, -3.0), 0.5, glass.clone())));
    }
    assert_eq!(Arc::strong_count(&glass), 4);

    let mut rec = HitRecord::default();
    let ray = Ray::new(Point3::ZERO, Vec3::new(2.0, 0.0, -3.0));
    assert!(world.hit(&ray, forward(), &mut rec));
    assert!(std::ptr::addr_eq(rec.material, Arc::as_ptr(&glass)));
}

#[test]
fn mirror_bounces_between_spheres() {
    // A perfect mirror below reflects the ray straight up into a diffuse sphere
    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, -101.0, 0.0),
        100.0,
        Arc::new(Metal::new(Color::new(0.9, 0.9, 0.9), 0.0)),
    )));
    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, 3.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.5, 0.25, 0.1))),
    )));

    let ray = Ray::new(Point3::new(0.0, 0.5, 0.0), -Vec3::Y);
    let mut rec = HitRecord::default();
    assert!(world.hit(&ray, forward(), &mut rec));
    assert!((rec.p.y + 1.0).abs() < EPS);

    let mut rng = StdRng::seed_from_u64(11);
    let bounce = rec.material.scatter(&ray, &rec, &mut rng).expect("mirror reflects");
    assert!((bounce.scattered.direction().normalize() - Vec3::Y).length() < EPS);

    let mut next = HitRecord::default();
    assert!(world.hit(&bounce.scattered, forward(), &mut next));
    assert!((next.p.y - 2.0).abs() < EPS);
    assert!(next.front_face);
}

#[test]
fn traced_color_stays_within_background_bounds() {
    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, -100.5, -1.0),
        100.0,
        Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0))),
    )));
    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, 0.0, -1.0),
        0.5,
        Arc::new(Dielectric::new(1.5)),
    )));
    world.add(Arc::new(Sphere::new(
        Point3::new(1.0, 0.0, -1.0),
        0.5,
        Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.3)),
    )));

    let config = RenderConfig {
        max_depth: 20,
        ..RenderConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(3);

    for i in 0..500 {
        let angle = i as f32 * 0.01;
        let ray = Ray::new(Point3::ZERO, Vec3::new(angle.sin(), -0.2, -angle.cos()));
        let color = ray_color(&ray, &world, config.max_depth, &config, &mut rng);
        // Attenuations never exceed one and the sky tops out at white
        assert!(color.min_element() >= 0.0);
        assert!(color.max_element() <= 1.0 + EPS);
        assert!(color.is_finite());
    }
}
