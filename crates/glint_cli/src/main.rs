//! `glint` - render a sphere scene to an image file.

mod scene;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use glint_renderer::render;
use scene::{default_scene, load_scene, Scene};

#[derive(Parser, Debug)]
#[command(name = "glint", version, about = "Recursive ray tracer for sphere scenes")]
struct Args {
    /// JSON scene description. Renders the built-in scene when omitted.
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Output image; the format follows the extension.
    #[arg(short, long, default_value = "output.png")]
    output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Samples per pixel
    #[arg(long)]
    samples: Option<u32>,

    /// Maximum bounces per sample
    #[arg(long)]
    depth: Option<u32>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
}

/// Command-line flags win over the scene file.
fn apply_overrides(args: &Args, scene: &mut Scene) {
    if let Some(width) = args.width {
        scene.camera.image_width = width;
    }
    if let Some(height) = args.height {
        scene.camera.image_height = height;
    }
    if let Some(samples) = args.samples {
        scene.config.samples_per_pixel = samples;
    }
    if let Some(depth) = args.depth {
        scene.config.max_depth = depth;
    }
    if let Some(seed) = args.seed {
        scene.config.seed = seed;
    }
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    log::info!("Starting glint");

    let mut scene = match &args.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene given, using the built-in scene");
            default_scene()
        }
    };

    apply_overrides(&args, &mut scene);
    scene.camera.initialize();

    let image = render(&scene.camera, &scene.world, &scene.config).context("Render failed")?;
    image
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}
