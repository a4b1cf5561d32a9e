//! JSON scene descriptions.
//!
//! A scene file names its materials once and lets any number of spheres refer
//! to them, so every sphere using "glass" shares one `Dielectric`.
//!
//! ```json
//! {
//!   "camera": { "look_from": [13, 2, 3], "look_at": [0, 0, 0], "vfov": 20 },
//!   "render": { "samples_per_pixel": 50, "max_depth": 10 },
//!   "materials": {
//!     "ground": { "type": "lambertian", "albedo": [0.5, 0.5, 0.5] },
//!     "glass": { "type": "dielectric", "ior": 1.5 }
//!   },
//!   "objects": [
//!     { "type": "sphere", "center": [0, -1000, 0], "radius": 1000, "material": "ground" },
//!     { "type": "sphere", "center": [0, 1, 0], "radius": 1, "material": "glass" }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glint_renderer::{
    Camera, Color, Dielectric, HittableList, Lambertian, Material, Metal, Point3, RenderConfig,
    Sphere, Vec3,
};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scene description: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Object {index} uses unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Camera placement and image size.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraDesc {
    pub width: u32,
    pub height: u32,
    pub look_from: Point3,
    pub look_at: Point3,
    pub vup: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
    pub defocus_angle: f32,
    pub focus_dist: f32,
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            width: 400,
            height: 225,
            look_from: Point3::ZERO,
            look_at: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            defocus_angle: 0.0,
            focus_dist: 1.0,
        }
    }
}

impl CameraDesc {
    /// Build the camera. The caller initializes it once overrides are applied.
    pub fn to_camera(&self) -> Camera {
        Camera::new()
            .with_resolution(self.width, self.height)
            .with_position(self.look_from, self.look_at, self.vup)
            .with_lens(self.vfov, self.defocus_angle, self.focus_dist)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MaterialDesc {
    Lambertian {
        albedo: Color,
    },
    Metal {
        albedo: Color,
        #[serde(default)]
        fuzz: f32,
    },
    Dielectric {
        ior: f32,
    },
}

impl MaterialDesc {
    fn build(&self) -> Arc<dyn Material> {
        match *self {
            MaterialDesc::Lambertian { albedo } => Arc::new(Lambertian::new(albedo)),
            MaterialDesc::Metal { albedo, fuzz } => {
                if fuzz < 0.0 {
                    log::warn!("Metal fuzz {} is negative and will be used as-is", fuzz);
                }
                Arc::new(Metal::new(albedo, fuzz))
            }
            MaterialDesc::Dielectric { ior } => Arc::new(Dielectric::new(ior)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectDesc {
    Sphere {
        center: Point3,
        radius: f32,
        material: String,
    },
}

/// On-disk scene layout.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneFile {
    #[serde(default)]
    pub camera: CameraDesc,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDesc>,
    #[serde(default)]
    pub objects: Vec<ObjectDesc>,
}

/// A scene ready to render, apart from camera initialization.
pub struct Scene {
    pub camera: Camera,
    pub config: RenderConfig,
    pub world: HittableList,
}

impl SceneFile {
    pub fn build(&self) -> SceneResult<Scene> {
        let materials: BTreeMap<&str, Arc<dyn Material>> = self
            .materials
            .iter()
            .map(|(name, desc)| (name.as_str(), desc.build()))
            .collect();

        let mut world = HittableList::new();
        for (index, object) in self.objects.iter().enumerate() {
            match object {
                ObjectDesc::Sphere {
                    center,
                    radius,
                    material,
                } => {
                    let material = materials.get(material.as_str()).ok_or_else(|| {
                        SceneError::UnknownMaterial {
                            index,
                            name: material.clone(),
                        }
                    })?;
                    if *radius <= 0.0 {
                        log::warn!("Sphere {} has non-positive radius {}", index, radius);
                    }
                    world.add(Arc::new(Sphere::new(*center, *radius, material.clone())));
                }
            }
        }

        if world.is_empty() {
            log::warn!("Scene has no objects; only the background will be visible");
        }
        log::info!(
            "Built scene with {} objects and {} materials",
            world.len(),
            materials.len()
        );

        Ok(Scene {
            camera: self.camera.to_camera(),
            config: self.render.clone(),
            world,
        })
    }
}

pub fn parse_scene(json: &str) -> SceneResult<Scene> {
    let file: SceneFile = serde_json::from_str(json)?;
    file.build()
}

pub fn load_scene(path: &Path) -> SceneResult<Scene> {
    let json = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Read {} bytes from {}", json.len(), path.display());
    parse_scene(&json)
}

/// Ground plus one glass, one diffuse and one metal sphere.
pub fn default_scene() -> Scene {
    let ground: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    let diffuse: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1)));
    let metal: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0));

    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(Point3::new(0.0, -1000.0, 0.0), 1000.0, ground)));
    world.add(Arc::new(Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0, glass.clone())));
    // Negative radius inside the glass ball makes it a hollow bubble
    world.add(Arc::new(Sphere::new(Point3::new(0.0, 1.0, 0.0), -0.9, glass)));
    world.add(Arc::new(Sphere::new(Point3::new(-4.0, 1.0, 0.0), 1.0, diffuse)));
    world.add(Arc::new(Sphere::new(Point3::new(4.0, 1.0, 0.0), 1.0, metal)));

    let camera = CameraDesc {
        width: 800,
        height: 450,
        look_from: Point3::new(13.0, 2.0, 3.0),
        look_at: Point3::ZERO,
        vup: Vec3::Y,
        vfov: 20.0,
        defocus_angle: 0.6,
        focus_dist: 10.0,
    };

    Scene {
        camera: camera.to_camera(),
        config: RenderConfig {
            samples_per_pixel: 50,
            max_depth: 10,
            ..RenderConfig::default()
        },
        world,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_renderer::{HitRecord, Hittable, Interval, Ray};

    const SCENE: &str = r#"{
        "camera": { "width": 64, "height": 32, "look_from": [0, 0, 5], "look_at": [0, 0, 0] },
        "render": { "samples_per_pixel": 4, "max_depth": 6, "seed": 9 },
        "materials": {
            "red": { "type": "lambertian", "albedo": [0.8, 0.1, 0.1] },
            "mirror": { "type": "metal", "albedo": [0.9, 0.9, 0.9] },
            "glass": { "type": "dielectric", "ior": 1.5 }
        },
        "objects": [
            { "type": "sphere", "center": [-1, 0, 0], "radius": 0.5, "material": "red" },
            { "type": "sphere", "center": [1, 0, 0], "radius": 0.5, "material": "red" },
            { "type": "sphere", "center": [0, 0, -2], "radius": 1, "material": "mirror" }
        ]
    }"#;

    fn hit_from(world: &HittableList, origin: Point3, direction: Vec3) -> Option<HitRecord<'_>> {
        let mut rec = HitRecord::default();
        world
            .hit(&Ray::new(origin, direction), Interval::new(0.001, f32::INFINITY), &mut rec)
            .then_some(rec)
    }

    #[test]
    fn test_parse_scene() {
        let scene = parse_scene(SCENE).expect("valid scene");

        assert_eq!(scene.world.len(), 3);
        assert_eq!(scene.camera.image_width, 64);
        assert_eq!(scene.camera.image_height, 32);
        assert_eq!(scene.config.samples_per_pixel, 4);
        assert_eq!(scene.config.max_depth, 6);
        assert_eq!(scene.config.seed, 9);
        // Unspecified render fields keep their defaults
        assert!(scene.config.use_sky_gradient);
    }

    #[test]
    fn test_named_materials_are_shared() {
        let scene = parse_scene(SCENE).expect("valid scene");
        let origin = Point3::new(0.0, 0.0, 5.0);

        let left = hit_from(&scene.world, origin, Point3::new(-1.0, 0.0, 0.0) - origin)
            .expect("left sphere");
        let right = hit_from(&scene.world, origin, Point3::new(1.0, 0.0, 0.0) - origin)
            .expect("right sphere");
        let back = hit_from(&scene.world, origin, Point3::new(0.0, 0.0, -2.0) - origin)
            .expect("mirror sphere");

        assert!(std::ptr::addr_eq(left.material, right.material));
        assert!(!std::ptr::addr_eq(left.material, back.material));
    }

    #[test]
    fn test_unknown_material() {
        let json = r#"{ "objects": [
            { "type": "sphere", "center": [0, 0, 0], "radius": 1, "material": "nope" }
        ] }"#;

        match parse_scene(json) {
            Err(SceneError::UnknownMaterial { index, name }) => {
                assert_eq!(index, 0);
                assert_eq!(name, "nope");
            }
            other => panic!("expected unknown material, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_scene("{ not json"), Err(SceneError::Parse(_))));
        assert!(matches!(
            parse_scene(r#"{ "materials": { "x": { "type": "plastic" } } }"#),
            Err(SceneError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_scene_uses_defaults() {
        let scene = parse_scene("{}").expect("empty scene is valid");

        assert!(scene.world.is_empty());
        assert_eq!(scene.camera.image_width, 400);
        assert_eq!(scene.config.samples_per_pixel, 100);
    }

    #[test]
    fn test_metal_fuzz_defaults_to_mirror() {
        let file: SceneFile = serde_json::from_str(
            r#"{ "materials": { "m": { "type": "metal", "albedo": [1, 1, 1] } } }"#,
        )
        .expect("valid scene");

        match &file.materials["m"] {
            MaterialDesc::Metal { fuzz, .. } => assert_eq!(*fuzz, 0.0),
            other => panic!("unexpected material {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = load_scene(Path::new("/definitely/not/here.json")).err();
        assert!(matches!(err, Some(SceneError::Io { .. })));
    }

    #[test]
    fn test_default_scene() {
        let scene = default_scene();
        assert_eq!(scene.world.len(), 5);
        assert!(scene.config.validate().is_ok());

        // Looking straight down at the ground from above
        let rec = hit_from(&scene.world, Point3::new(2.0, 5.0, 2.0), -Vec3::Y).expect("ground");
        assert!(rec.p.y.abs() < 1e-2);
    }
}
