//! Render settings and config file loading.
//!
//! Settings are read from a JSON file. Every field has a default, so a
//! file only needs the keys it wants to change. Loading is all-or-nothing:
//! a file that fails to parse or validate is rejected as a whole and the
//! defaults are used instead.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value for `{field}`: {message}")]
    Invalid { field: &'static str, message: String },
}

/// Result type for settings operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

fn is_positive(x: f32) -> bool {
    x.is_finite() && x > 0.0
}

fn invalid(field: &'static str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        message: message.into(),
    }
}

/// Output image dimensions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageSettings {
    /// Width divided by height
    pub aspect_ratio: f32,

    /// Image width in pixels
    pub width: u32,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            width: 400,
        }
    }
}

impl ImageSettings {
    /// Image height in pixels, derived from width and aspect ratio.
    pub fn height(&self) -> u32 {
        ((self.width as f32 / self.aspect_ratio) as u32).max(1)
    }
}

/// Camera placement and lens.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraSettings {
    /// Eye position
    pub position: [f32; 3],

    /// Point the camera looks at
    pub look_at: [f32; 3],

    /// Approximate "up" direction
    pub up: [f32; 3],

    /// Distance from the eye to the viewport
    pub focal_length: f32,

    /// Vertical field of view in degrees
    pub vertical_fov: f32,

    /// Lens diameter; 0 disables depth of field
    pub aperture: f32,

    /// Distance to the plane of perfect focus (defaults to the look-at distance)
    pub focus_distance: Option<f32>,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: [8.0, 2.0, 3.0],
            look_at: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            focal_length: 1.0,
            vertical_fov: 60.0,
            aperture: 0.1,
            focus_distance: None,
        }
    }
}

impl CameraSettings {
    /// Focus distance, falling back to the distance between eye and look-at.
    pub fn resolved_focus_distance(&self) -> f32 {
        self.focus_distance.unwrap_or_else(|| {
            let [px, py, pz] = self.position;
            let [lx, ly, lz] = self.look_at;
            ((lx - px).powi(2) + (ly - py).powi(2) + (lz - pz).powi(2)).sqrt()
        })
    }
}

/// Procedural scene population.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneSettings {
    /// Number of random spheres to try to place
    pub sphere_count: usize,

    /// Half-extent of the square region spheres are placed in
    pub bounds: f32,

    /// Smallest random sphere radius
    pub radius_min: f32,

    /// Largest random sphere radius
    pub radius_max: f32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            sphere_count: 250,
            bounds: 10.0,
            radius_min: 0.1,
            radius_max: 0.4,
        }
    }
}

/// Sampling and scheduling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    /// Antialiasing samples per pixel
    pub samples_per_pixel: u32,

    /// Maximum number of bounces before a path is treated as absorbed
    pub max_depth: u32,

    /// Worker threads; 0 uses one per logical CPU
    pub workers: usize,

    /// Base seed for scene generation and rendering (random when unset)
    pub seed: Option<u64>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            samples_per_pixel: 100,
            max_depth: 50,
            workers: 0,
            seed: None,
        }
    }
}

/// Complete settings for one render.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub image: ImageSettings,
    pub camera: CameraSettings,
    pub scene: SceneSettings,
    pub render: RenderSettings,
}

impl Settings {
    /// Parse settings from a JSON string and validate them.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Load settings from a JSON file, using defaults if anything goes wrong.
    ///
    /// Either every value comes from the file or none does.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Error reading {}: {}", path.display(), e);
                log::warn!("Using default settings");
                Self::default()
            }
        }
    }

    /// Serialize the settings as pretty-printed JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every value is usable for rendering.
    pub fn validate(&self) -> ConfigResult<()> {
        let image = &self.image;
        if !is_positive(image.aspect_ratio) {
            return Err(invalid("image.aspect_ratio", "must be positive"));
        }
        if image.width == 0 {
            return Err(invalid("image.width", "must be at least 1"));
        }

        let camera = &self.camera;
        if !is_positive(camera.focal_length) {
            return Err(invalid("camera.focal_length", "must be positive"));
        }
        if !is_positive(camera.vertical_fov) || camera.vertical_fov >= 180.0 {
            return Err(invalid("camera.vertical_fov", "must be between 0 and 180 degrees"));
        }
        if camera.aperture.is_nan() || camera.aperture < 0.0 {
            return Err(invalid("camera.aperture", "must not be negative"));
        }
        if let Some(focus) = camera.focus_distance {
            if !is_positive(focus) {
                return Err(invalid("camera.focus_distance", "must be positive"));
            }
        }
        if camera.position == camera.look_at {
            return Err(invalid("camera.look_at", "must differ from camera.position"));
        }

        let scene = &self.scene;
        if !is_positive(scene.bounds) {
            return Err(invalid("scene.bounds", "must be positive"));
        }
        if !is_positive(scene.radius_min) || scene.radius_min > scene.radius_max {
            return Err(invalid(
                "scene.radius_min",
                format!(
                    "radius range [{}, {}] is empty or not positive",
                    scene.radius_min, scene.radius_max
                ),
            ));
        }

        if self.render.samples_per_pixel == 0 {
            return Err(invalid("render.samples_per_pixel", "must be at least 1"));
        }

        Ok(())
    }
}
