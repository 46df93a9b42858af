//! Scanline-parallel rendering.
//!
//! Divides the image into rows that are rendered independently on a
//! fixed-size rayon worker pool. Each row writes into its own slice of
//! the pixel buffer and draws from its own random stream, so the
//! output for a given seed does not depend on scheduling.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

use crate::renderer::render_pixel;
use crate::{Camera, Color, Hittable, ImageBuffer, RenderConfig, RenderError};

/// One row of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scanline {
    /// Row index, 0 at the top of the image
    pub row: u32,
    /// Number of pixels in the row
    pub width: u32,
}

impl Scanline {
    /// Create a new scanline.
    pub fn new(row: u32, width: u32) -> Self {
        Self { row, width }
    }

    /// Independent random stream for this row.
    ///
    /// The row seed is a SplitMix64 scramble of the base seed and row
    /// index, so neighbouring rows get uncorrelated streams.
    pub fn rng(&self, base_seed: u64) -> StdRng {
        let mut z = base_seed ^ (self.row as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        StdRng::seed_from_u64(z ^ (z >> 31))
    }
}

/// Render a single scanline into `pixels`.
///
/// `pixels` must hold exactly one row (`scanline.width` colors).
pub fn render_scanline(
    scanline: &Scanline,
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
    pixels: &mut [Color],
) {
    debug_assert_eq!(pixels.len(), scanline.width as usize);

    for (x, pixel) in pixels.iter_mut().enumerate() {
        *pixel = render_pixel(camera, world, x as u32, scanline.row, config, rng);
    }
}

/// Render the entire scene to an image buffer.
///
/// Builds a worker pool of `config.workers` threads, renders every row
/// on it and blocks until all rows are done. Returned colors are the
/// averaged linear-space samples; gamma correction happens on output.
pub fn render(
    world: &dyn Hittable,
    camera: &Camera,
    config: &RenderConfig,
) -> Result<ImageBuffer, RenderError> {
    config.validate()?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .thread_name(|i| format!("glint-worker-{i}"))
        .build()?;

    let base_seed = config.seed.unwrap_or_else(rand::random);
    let width = config.width;
    let height = config.height;
    let mut image = ImageBuffer::new(width, height);

    log::info!(
        "Rendering {}x{} @ {} spp, depth {}, on {} workers (seed {})",
        width,
        height,
        config.samples_per_pixel,
        config.max_depth,
        pool.current_num_threads(),
        base_seed
    );

    let start = Instant::now();
    let completed = AtomicUsize::new(0);

    pool.install(|| {
        image
            .pixels
            .par_chunks_mut(width as usize)
            .enumerate()
            .for_each(|(row, pixels)| {
                let scanline = Scanline::new(row as u32, width);
                let mut rng = scanline.rng(base_seed);
                render_scanline(&scanline, camera, world, config, &mut rng, pixels);

                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                log::debug!("Scanlines remaining: {}", height as usize - done);
            });
    });

    log::info!("Rendered in {:.2?}", start.elapsed());

    Ok(image)
}
