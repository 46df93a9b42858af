//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with configurable depth
//! - Sky gradient background
//! - Anti-aliasing via jittered multi-sampling

use crate::{Camera, Color, HitRecord, Hittable, Ray, RenderError};
use glint_core::Settings;
use glint_math::{gen_f32, Interval};
use rand::RngCore;

/// Closest hit distance accepted when tracing secondary rays.
///
/// Keeps rays leaving a surface from hitting that same surface again
/// due to floating-point error ("shadow acne").
pub const RAY_T_MIN: f32 = 0.001;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Worker threads (0 = one per logical CPU)
    pub workers: usize,
    /// Base seed for the per-scanline random streams (random when None)
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 225,
            samples_per_pixel: 100,
            max_depth: 50,
            workers: 0,
            seed: None,
        }
    }
}

impl RenderConfig {
    /// Build a render configuration from loaded settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            width: settings.image.width,
            height: settings.image.height(),
            samples_per_pixel: settings.render.samples_per_pixel,
            max_depth: settings.render.max_depth,
            workers: settings.render.workers,
            seed: settings.render.seed,
        }
    }

    /// Reject configurations that cannot produce an image.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "image must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidConfig(
                "samples per pixel must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It traces the ray through
/// the scene, bouncing off surfaces and multiplying in each surface's
/// attenuation until the ray escapes to the sky, is absorbed, or runs
/// out of depth.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    // Out of bounces: all remaining energy is treated as absorbed
    if depth == 0 {
        return Color::ZERO;
    }

    let mut rec = HitRecord::default();

    if !world.hit(ray, Interval::from_min(RAY_T_MIN), &mut rec) {
        return sky_gradient(ray);
    }

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, world, depth - 1, rng),
        None => Color::ZERO,
    }
}

/// Background color: white at the horizon blending to sky blue overhead.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Render a single pixel with multi-sampling.
///
/// `x` is the column and `y` the row, with row 0 at the top of the image.
/// Returns the average linear color of all samples.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let ray = jittered_ray(camera, x, y, config, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f32
}

/// Camera ray through a random point inside pixel (x, y).
pub(crate) fn jittered_ray(
    camera: &Camera,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Ray {
    let u_scale = 1.0 / (config.width.max(2) - 1) as f32;
    let v_scale = 1.0 / (config.height.max(2) - 1) as f32;
    // Viewport coordinates grow upwards
    let flipped_y = config.height - 1 - y;

    let s = (x as f32 + gen_f32(rng)) * u_scale;
    let t = (flipped_y as f32 + gen_f32(rng)) * v_scale;
    camera.get_ray(s, t, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HittableList, Lambertian, Metal, Sphere, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn single_sphere(center: Vec3, radius: f32) -> HittableList {
        let mut world = HittableList::new();
        let material = Arc::new(Lambertian::new(Color::ONE));
        world.add(Box::new(Sphere::new(center, radius, material).unwrap()));
        world
    }

    #[test]
    fn test_sky_gradient() {
        let up = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::Y));
        assert!((up - Color::new(0.5, 0.7, 1.0)).length() < 1e-6);

        let down = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::NEG_Y));
        assert!((down - Color::ONE).length() < 1e-6);

        let horizon = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::X * 5.0));
        assert!((horizon - Color::new(0.75, 0.85, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_zero_depth_is_black() {
        let world = single_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let mut rng = StdRng::seed_from_u64(0);

        for direction in [Vec3::NEG_Z, Vec3::Y, Vec3::new(1.0, -1.0, 0.3)] {
            let ray = Ray::new(Vec3::ZERO, direction);
            assert_eq!(ray_color(&ray, &world, 0, &mut rng), Color::ZERO);
        }
    }

    #[test]
    fn test_miss_returns_sky() {
        let world = single_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let mut rng = StdRng::seed_from_u64(0);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.3, 0.8, 0.1));
        assert_eq!(ray_color(&ray, &world, 10, &mut rng), sky_gradient(&ray));
    }

    #[test]
    fn test_single_bounce_hit_is_black() {
        // One bounce of budget: the scattered ray has none left
        let world = single_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let mut rng = StdRng::seed_from_u64(0);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert_eq!(ray_color(&ray, &world, 1, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_attenuation_tints_reflection() {
        // A perfect mirror facing the ray: one bounce then sky
        let mut world = HittableList::new();
        let mirror = Arc::new(Metal::new(Color::new(1.0, 0.5, 0.25), 0.0));
        world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 1.0, mirror).unwrap()));
        let mut rng = StdRng::seed_from_u64(0);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let color = ray_color(&ray, &world, 5, &mut rng);
        // Reflected straight back along +Z: horizon sky times albedo
        let expected = Color::new(0.75, 0.85, 1.0) * Color::new(1.0, 0.5, 0.25);
        assert!((color - expected).length() < 1e-5);
    }

    #[test]
    fn test_closed_mirror_cavity_terminates() {
        // Ray trapped inside a mirrored sphere never escapes
        let mut world = HittableList::new();
        let mirror = Arc::new(Metal::new(Color::ONE, 0.0));
        world.add(Box::new(Sphere::new(Vec3::ZERO, 10.0, mirror).unwrap()));
        let mut rng = StdRng::seed_from_u64(0);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.2, 0.9, -0.4));
        assert_eq!(ray_color(&ray, &world, 50, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_render_pixel_averages_samples() {
        let world = single_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let camera = Camera::builder()
            .with_aspect_ratio(1.0)
            .with_lens(90.0, 0.0, 1.0)
            .build()
            .unwrap();
        let config = RenderConfig {
            width: 11,
            height: 11,
            samples_per_pixel: 16,
            max_depth: 5,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(42);

        // Center pixel hits the sphere; a white diffuse surface bounces sky
        let center = render_pixel(&camera, &world, 5, 5, &config, &mut rng);
        assert!(center.length() > 0.0);
        assert!(center.max_element() <= 1.0);

        // Top rows look up into the blue part of the sky
        let top = render_pixel(&camera, &world, 5, 0, &config, &mut rng);
        let bottom = render_pixel(&camera, &world, 0, 10, &config, &mut rng);
        assert!(top.x < bottom.x);
    }

    #[test]
    fn test_config_from_settings_and_validate() {
        let mut settings = Settings::default();
        settings.image.width = 320;
        settings.render.seed = Some(9);

        let config = RenderConfig::from_settings(&settings);
        assert_eq!(config.width, 320);
        assert_eq!(config.height, 180);
        assert_eq!(config.seed, Some(9));
        assert!(config.validate().is_ok());

        let empty = RenderConfig {
            width: 0,
            ..config.clone()
        };
        assert!(matches!(empty.validate(), Err(RenderError::InvalidConfig(_))));

        let no_samples = RenderConfig {
            samples_per_pixel: 0,
            ..config
        };
        assert!(matches!(no_samples.validate(), Err(RenderError::InvalidConfig(_))));
    }
}
