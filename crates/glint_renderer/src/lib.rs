//! Glint Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for scenes made of spheres:
//! - Thin-lens camera with depth of field
//! - Diffuse, metal and glass materials
//! - Procedural scene population with rejection sampling
//! - Scanline-parallel rendering on a fixed worker pool

mod camera;
mod error;
mod hittable;
mod material;
pub mod output;
mod renderer;
mod scanline;
mod scene;
mod sphere;

pub use camera::{Camera, CameraBuilder};
pub use error::RenderError;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Color, Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use output::{color_to_rgb8, ImageBuffer, OutputError};
pub use renderer::{ray_color, render_pixel, sky_gradient, RenderConfig, RAY_T_MIN};
pub use scanline::{render, render_scanline, Scanline};
pub use scene::{build_random_scene, demo_base_objects, Scene, MAX_PLACEMENT_ATTEMPTS};
pub use sphere::{Footprint, Sphere};

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Interval, Ray, Vec3};
