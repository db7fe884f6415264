use anyhow::{Context, Result};
use clap::Parser;
use std::time::Instant;

mod cli;
mod output;

use cli::Args;
use orb_core::load_scene;
use orb_renderer::{render, RenderConfig};

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let mut scene = load_scene(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;

    log::info!(
        "Loaded {} ({} spheres, {} materials, {} cameras)",
        args.scene.display(),
        scene.sphere_count(),
        scene.material_count(),
        scene.camera_count()
    );
    if scene.camera_count() > 1 {
        log::warn!("Scene has {} cameras, only the first is rendered", scene.camera_count());
    }

    let camera = scene
        .primary_camera_mut()
        .context("Scene has nothing to render")?;
    args.apply_resolution(camera);
    let output_path = args.output_path(&camera.image_name);

    let config = RenderConfig::default().with_parallel(args.parallel);

    let start = Instant::now();
    let output = render(&scene, &config).context("Render failed")?;
    log::info!(
        "Rendered {}x{} in {:.2?}: {} of {} pixels hit a sphere",
        output.image.width,
        output.image.height,
        start.elapsed(),
        output.stats.hits,
        output.stats.pixels
    );

    output::save_image(&output.image, &output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    Ok(())
}
