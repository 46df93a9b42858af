//! Image buffer and file output.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::Color;
use glint_math::Interval;
use thiserror::Error;

/// Errors that can occur while writing an image.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write image: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),
}

/// Range channels are clamped to before quantization.
const INTENSITY: Interval = Interval::new(0.0, 0.999);

/// Rendered image in linear color, row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let quantize = |c: f32| (256.0 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Write the image as plain-text PPM (`P3`).
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for color in &image.pixels {
        let [r, g, b] = color_to_rgb8(*color);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    Ok(())
}

/// Save the image to `path`.
///
/// `.ppm` files are written as plain-text PPM; any other extension is
/// encoded by the `image` crate according to the extension.
pub fn save(buffer: &ImageBuffer, path: impl AsRef<Path>) -> Result<(), OutputError> {
    let path = path.as_ref();
    let is_ppm = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        let mut writer = BufWriter::new(File::create(path)?);
        write_ppm(buffer, &mut writer)?;
        writer.flush()?;
    } else {
        let rgb = image::RgbImage::from_fn(buffer.width, buffer.height, |x, y| {
            image::Rgb(color_to_rgb8(buffer.get(x, y)))
        });
        rgb.save(path)?;
    }

    log::info!(
        "Saved {}x{} image to {}",
        buffer.width,
        buffer.height,
        path.display()
    );
    Ok(())
}
