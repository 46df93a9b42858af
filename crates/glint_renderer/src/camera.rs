//! Thin-lens camera for ray generation.

use crate::{Ray, RenderError};
use glint_core::CameraSettings;
use glint_math::{random_in_unit_disk, Vec3};
use rand::RngCore;

/// Builder for [`Camera`].
///
/// Every setting has a default, so only what differs needs to be set.
/// `build()` computes the viewport and rejects degenerate setups.
#[derive(Debug, Clone)]
pub struct CameraBuilder {
    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    // Viewport
    aspect_ratio: f32,
    focal_length: f32,

    // Lens settings
    vfov: f32,       // Vertical field of view in degrees
    aperture: f32,   // Lens diameter
    focus_dist: f32, // Distance from camera to plane of perfect focus
}

impl Default for CameraBuilder {
    fn default() -> Self {
        Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            aspect_ratio: 16.0 / 9.0,
            focal_length: 1.0,
            vfov: 60.0,
            aperture: 0.0,
            focus_dist: 1.0,
        }
    }
}

impl CameraBuilder {
    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set the viewport aspect ratio (width / height).
    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set the distance from the eye to the viewport.
    pub fn with_focal_length(mut self, focal_length: f32) -> Self {
        self.focal_length = focal_length;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    /// Compute the camera basis and viewport.
    pub fn build(self) -> Result<Camera, RenderError> {
        let invalid = |msg: &str| Err(RenderError::InvalidCamera(msg.to_string()));

        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return invalid("aspect ratio must be positive");
        }
        if !(self.focal_length.is_finite() && self.focal_length > 0.0) {
            return invalid("focal length must be positive");
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return invalid("vertical field of view must be between 0 and 180 degrees");
        }
        if self.aperture.is_nan() || self.aperture < 0.0 {
            return invalid("aperture must not be negative");
        }
        if !(self.focus_dist.is_finite() && self.focus_dist > 0.0) {
            return invalid("focus distance must be positive");
        }

        let view = self.look_from - self.look_at;
        if view.length_squared() < 1e-12 {
            return invalid("look-at point coincides with the camera position");
        }

        // Orthonormal basis: w points away from the scene
        let w = view.normalize();
        let right = self.vup.cross(w);
        if right.length_squared() < 1e-12 {
            return invalid("up vector is parallel to the view direction");
        }
        let u = right.normalize();
        let v = w.cross(u).normalize();

        // Viewport dimensions
        let theta = self.vfov.to_radians();
        let h = self.focal_length * (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = self.aspect_ratio * viewport_height;

        // Image plane lies on the plane of perfect focus
        let horizontal = u * viewport_width * self.focus_dist;
        let vertical = v * viewport_height * self.focus_dist;
        let lower_left_corner = self.look_from
            - horizontal / 2.0
            - vertical / 2.0
            - w * self.focal_length * self.focus_dist;

        Ok(Camera {
            origin: self.look_from,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: self.aperture / 2.0,
        })
    }
}

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Start building a camera with default settings.
    pub fn builder() -> CameraBuilder {
        CameraBuilder::default()
    }

    /// Build a camera from config-file settings.
    pub fn from_settings(
        settings: &CameraSettings,
        aspect_ratio: f32,
    ) -> Result<Self, RenderError> {
        Self::builder()
            .with_position(
                Vec3::from_array(settings.position),
                Vec3::from_array(settings.look_at),
                Vec3::from_array(settings.up),
            )
            .with_aspect_ratio(aspect_ratio)
            .with_focal_length(settings.focal_length)
            .with_lens(
                settings.vertical_fov,
                settings.aperture,
                settings.resolved_focus_distance(),
            )
            .build()
    }

    /// Generate a ray through normalized viewport coordinates (s, t).
    ///
    /// (0, 0) is the lower-left corner and (1, 1) the upper-right. The ray
    /// starts from a random point on the lens, consuming one disk sample.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let rd = self.lens_radius * random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;
        let origin = self.origin + offset;

        Ray::new(
            origin,
            self.lower_left_corner + s * self.horizontal + t * self.vertical - origin,
        )
    }
}
