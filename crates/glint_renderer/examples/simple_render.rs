//! Simple path tracer example.
//!
//! Renders the demonstration scene with a few dozen random spheres at low
//! quality and saves it as PPM.

use glint_renderer::{
    build_random_scene, demo_base_objects, output, render, Camera, Interval, RenderConfig, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut rng = StdRng::seed_from_u64(2024);
    let scene = build_random_scene(
        demo_base_objects()?,
        40,
        Interval::new(-8.0, 8.0),
        Interval::new(0.15, 0.35),
        &mut rng,
    )?;

    let camera = Camera::builder()
        .with_position(Vec3::new(8.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_aspect_ratio(16.0 / 9.0)
        .with_lens(40.0, 0.1, 8.8)
        .build()?;

    let config = RenderConfig {
        width: 320,
        height: 180,
        samples_per_pixel: 16,
        max_depth: 10,
        workers: 0,
        seed: Some(7),
    };

    let image = render(&scene, &camera, &config)?;
    output::save(&image, "simple_render.ppm")?;

    Ok(())
}
