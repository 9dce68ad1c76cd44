use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumen_renderer::{IntegratorConfig, RenderSettings, SceneKind, SettingsError};
use std::path::PathBuf;

/// Log levels accepted by `--log-level`.
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

/// Command line arguments. Flags override values from `--config`.
#[derive(Debug, Parser)]
#[command(name = "lumen")]
#[command(about = "Physically based light-transport renderer")]
pub struct Args {
    /// JSON render settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Built-in scene: cornell_box, cornell_glass or spheres
    #[arg(long)]
    pub scene: Option<String>,

    /// Integrator name, used with its default parameters
    #[arg(short, long)]
    pub integrator: Option<String>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of samples per pixel
    #[arg(long, short = 's')]
    pub spp: Option<u32>,

    /// Base random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file path (.png for 8-bit with gamma correction, .exr for HDR linear)
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value = "info", help = "Set the logging level")]
    pub log_level: LogLevel,
}

impl Args {
    /// Overlay the flags that were given on `settings`.
    pub fn apply(&self, settings: &mut RenderSettings) -> Result<(), SettingsError> {
        if let Some(scene) = &self.scene {
            settings.scene = scene.parse::<SceneKind>()?;
        }
        if let Some(integrator) = &self.integrator {
            settings.integrator = integrator.parse::<IntegratorConfig>()?;
        }
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(spp) = self.spp {
            settings.samples_per_pixel = spp;
        }
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        Ok(())
    }
}
