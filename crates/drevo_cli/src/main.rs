//! `drevo`: render a scene to a PPM or PNG file from the command line.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, ScenePreset};
use drevo_renderer::{estimate_render_time, render, scenes, stream_rng, Camera, Scene};
use std::time::Instant;

/// Stream index for scene generation, clear of the render streams.
const SCENE_STREAM: u64 = 0x5343_454e_4500;

fn build_scene(cli: &Cli) -> Result<(Scene, Camera)> {
    let mut rng = stream_rng(cli.seed, SCENE_STREAM);

    let scene = match cli.scene {
        ScenePreset::Random => scenes::random_scene(false, &mut rng)?,
        ScenePreset::Floating => scenes::random_scene(true, &mut rng)?,
        ScenePreset::Single => scenes::single_sphere()?,
    };
    let camera = match cli.scene {
        ScenePreset::Single => scenes::single_sphere_camera(cli.width, cli.height)?,
        _ => scenes::default_camera(cli.width, cli.height)?,
    };

    Ok((scene, camera))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.render_config();
    config.validate()?;

    log::info!(
        "Rendering '{}' [{} threads]: height={}, width={}, maxdepth={}, sampling={}",
        cli.output.display(),
        config.workers,
        config.height,
        config.width,
        config.max_depth,
        config.samples_per_pixel
    );

    let start = Instant::now();
    let (scene, camera) = build_scene(&cli).context("Failed to build scene")?;
    log::info!("Scene built in {:?}", start.elapsed());

    if let Some(fraction) = cli.estimate {
        let estimate = estimate_render_time(&scene, &camera, &config, fraction)
            .context("Failed to estimate render time")?;
        log::info!("Estimated per pixel cost {:?}", estimate.per_pixel());
    }

    let start = Instant::now();
    let image = render(&scene, &camera, &config)?;
    let render_ms = start.elapsed().as_secs_f64() * 1000.0;

    let total_pixels = config.pixel_count();
    log::info!("Rendering took {render_ms:.3} ms");
    log::info!(
        "Per pixel render ms ({total_pixels}): {:.5} ms",
        render_ms / total_pixels as f64
    );

    image
        .save(&cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    Ok(())
}
