use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use glint_core::Settings;
use glint_renderer::{demo_base_objects, output, render, Camera, RenderConfig, Scene};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let mut settings = Settings::load_or_default(&args.config);
    args.apply(&mut settings);
    settings
        .validate()
        .context("invalid command line override")?;

    if args.dump_config {
        println!("{}", settings.to_json()?);
        return Ok(());
    }

    let seed = settings.render.seed.unwrap_or_else(rand::random);
    settings.render.seed = Some(seed);
    info!("Using seed {}", seed);

    let config = RenderConfig::from_settings(&settings);
    let camera = Camera::from_settings(&settings.camera, settings.image.aspect_ratio)
        .context("failed to set up camera")?;

    let start = Instant::now();
    let mut rng = StdRng::seed_from_u64(seed);
    let base_objects = demo_base_objects().context("failed to create base objects")?;
    let scene = Scene::from_settings(&settings.scene, base_objects, &mut rng)
        .context("failed to build scene")?;
    info!(
        "Scene built in {:.2?}: {} of {} spheres placed",
        start.elapsed(),
        scene.placed(),
        scene.requested()
    );

    let start = Instant::now();
    let image = render(&scene, &camera, &config).context("render failed")?;
    info!("Render finished in {:.2?}", start.elapsed());

    output::save(&image, &args.output)
        .with_context(|| format!("failed to save {}", args.output.display()))?;

    Ok(())
}
