use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glint_core::Settings;
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "Render a randomly populated sphere scene with a CPU path tracer")]
pub struct Args {
    /// JSON settings file; missing or invalid files fall back to defaults
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// Output image (.ppm is written as plain text, other extensions via the image encoder)
    #[arg(short, long, default_value = "outputImage.ppm")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Samples per pixel
    #[arg(short, long)]
    pub samples: Option<u32>,

    /// Maximum bounce depth
    #[arg(short, long)]
    pub depth: Option<u32>,

    /// Worker threads (0 = one per logical CPU)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Seed for scene generation and sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Print the effective settings as JSON and exit
    #[arg(long)]
    pub dump_config: bool,
}

impl Args {
    /// Overlay command line values on loaded settings.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(width) = self.width {
            settings.image.width = width;
        }
        if let Some(samples) = self.samples {
            settings.render.samples_per_pixel = samples;
        }
        if let Some(depth) = self.depth {
            settings.render.max_depth = depth;
        }
        if let Some(threads) = self.threads {
            settings.render.workers = threads;
        }
        if self.seed.is_some() {
            settings.render.seed = self.seed;
        }
    }
}
