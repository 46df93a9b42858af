//! Construction-time errors.
//!
//! Geometric outcomes such as a miss or an absorbed ray are not errors;
//! only inputs that would produce NaN geometry or an unusable render setup
//! are rejected here.

use thiserror::Error;

/// Errors raised while building scene objects or starting a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),

    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
