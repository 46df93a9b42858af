//! Glint Core - render settings and configuration loading.
//!
//! This crate provides:
//!
//! - **Settings types**: `Settings`, `ImageSettings`, `CameraSettings`,
//!   `SceneSettings`, `RenderSettings`
//! - **Config loading**: JSON files with all-or-nothing fallback to defaults
//!
//! # Example
//!
//! ```no_run
//! use glint_core::Settings;
//!
//! let settings = Settings::load_or_default("config.json");
//! println!("Rendering {}x{} @ {} spp",
//!     settings.image.width,
//!     settings.image.height(),
//!     settings.render.samples_per_pixel);
//! ```

pub mod settings;

// Re-export commonly used types
pub use settings::{
    CameraSettings, ConfigError, ConfigResult, ImageSettings, RenderSettings, SceneSettings,
    Settings,
};
