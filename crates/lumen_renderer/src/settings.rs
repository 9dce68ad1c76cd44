//! Render settings loaded from JSON.
//!
//! ```json
//! {
//!   "width": 360,
//!   "height": 256,
//!   "samples_per_pixel": 64,
//!   "scene": "cornell_glass",
//!   "integrator": { "type": "next_event", "max_depth": 5, "ao_samples": 16 }
//! }
//! ```
//!
//! Every field is optional and falls back to [`RenderSettings::default`].

use crate::{
    AmbientOcclusionIntegrator, AreaDirectIntegrator, ConstantAmbientIntegrator, DepthShader,
    HemisphericalDirectIntegrator, Integrator, IntersectionShader, NextEventIntegrator,
    NormalShader, PathTracingIntegrator, RenderConfig, SceneKind, WhittedIntegrator,
    DEFAULT_BUCKET_SIZE,
};
use lumen_core::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while loading or validating settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("samples_per_pixel must be at least 1")]
    InvalidSampleCount,

    #[error("bucket_size must be at least 1")]
    InvalidBucketSize,

    #[error("Unknown scene: {0}")]
    UnknownScene(String),

    #[error("Unknown integrator: {0}")]
    UnknownIntegrator(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

fn red() -> Color {
    Color::new(1.0, 0.0, 0.0)
}

fn default_depth_distance() -> f32 {
    7.5
}

fn default_ambient() -> Color {
    Color::splat(0.15)
}

fn default_max_depth() -> u32 {
    5
}

fn default_direct_samples() -> u32 {
    256
}

fn default_ao_samples() -> u32 {
    64
}

fn default_ao_distance() -> f32 {
    1.0
}

/// Integrator selection with its parameters.
///
/// Tagged by `"type"`; omitted parameters take the defaults below, and a
/// missing `background` is black.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IntegratorConfig {
    Intersection {
        #[serde(default)]
        background: Color,
        #[serde(default = "red")]
        hit_color: Color,
    },
    Depth {
        #[serde(default)]
        background: Color,
        #[serde(default = "red")]
        hit_color: Color,
        #[serde(default = "default_depth_distance")]
        max_distance: f32,
    },
    Normal {
        #[serde(default)]
        background: Color,
    },
    ConstantAmbient {
        #[serde(default)]
        background: Color,
        #[serde(default = "default_ambient")]
        ambient: Color,
    },
    AmbientOcclusion {
        #[serde(default)]
        background: Color,
        #[serde(default = "default_ao_samples")]
        samples: u32,
        #[serde(default = "default_ao_distance")]
        max_distance: f32,
    },
    Whitted {
        #[serde(default)]
        background: Color,
        #[serde(default = "default_max_depth")]
        max_depth: u32,
        #[serde(default = "default_ambient")]
        ambient: Color,
    },
    HemisphericalDirect {
        #[serde(default)]
        background: Color,
        #[serde(default = "default_direct_samples")]
        samples: u32,
    },
    AreaDirect {
        #[serde(default)]
        background: Color,
        #[serde(default = "default_direct_samples")]
        samples: u32,
    },
    PathTracing {
        #[serde(default)]
        background: Color,
        #[serde(default = "default_max_depth")]
        max_depth: u32,
    },
    NextEvent {
        #[serde(default)]
        background: Color,
        #[serde(default = "default_max_depth")]
        max_depth: u32,
        #[serde(default)]
        ao_samples: u32,
        #[serde(default = "default_ao_distance")]
        ao_max_distance: f32,
    },
}

impl IntegratorConfig {
    /// Names accepted by [`IntegratorConfig::from_str`].
    pub const NAMES: [&'static str; 10] = [
        "intersection",
        "depth",
        "normal",
        "constant_ambient",
        "ambient_occlusion",
        "whitted",
        "hemispherical_direct",
        "area_direct",
        "path_tracing",
        "next_event",
    ];

    /// Construct the configured integrator.
    pub fn build(&self) -> Box<dyn Integrator> {
        match *self {
            Self::Intersection {
                background,
                hit_color,
            } => Box::new(IntersectionShader::new(background, hit_color)),
            Self::Depth {
                background,
                hit_color,
                max_distance,
            } => Box::new(DepthShader::new(background, hit_color, max_distance)),
            Self::Normal { background } => Box::new(NormalShader::new(background)),
            Self::ConstantAmbient {
                background,
                ambient,
            } => Box::new(ConstantAmbientIntegrator::new(background, ambient)),
            Self::AmbientOcclusion {
                background,
                samples,
                max_distance,
            } => Box::new(AmbientOcclusionIntegrator::new(background, samples, max_distance)),
            Self::Whitted {
                background,
                max_depth,
                ambient,
            } => Box::new(WhittedIntegrator::new(background, max_depth, ambient)),
            Self::HemisphericalDirect {
                background,
                samples,
            } => Box::new(HemisphericalDirectIntegrator::new(background, samples)),
            Self::AreaDirect {
                background,
                samples,
            } => Box::new(AreaDirectIntegrator::new(background, samples)),
            Self::PathTracing {
                background,
                max_depth,
            } => Box::new(PathTracingIntegrator::new(background, max_depth)),
            Self::NextEvent {
                background,
                max_depth,
                ao_samples,
                ao_max_distance,
            } => Box::new(
                NextEventIntegrator::new(background, max_depth)
                    .with_ambient_occlusion(ao_samples, ao_max_distance),
            ),
        }
    }

    /// Short name, as used in the `"type"` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Intersection { .. } => "intersection",
            Self::Depth { .. } => "depth",
            Self::Normal { .. } => "normal",
            Self::ConstantAmbient { .. } => "constant_ambient",
            Self::AmbientOcclusion { .. } => "ambient_occlusion",
            Self::Whitted { .. } => "whitted",
            Self::HemisphericalDirect { .. } => "hemispherical_direct",
            Self::AreaDirect { .. } => "area_direct",
            Self::PathTracing { .. } => "path_tracing",
            Self::NextEvent { .. } => "next_event",
        }
    }
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self::NextEvent {
            background: Color::ZERO,
            max_depth: default_max_depth(),
            ao_samples: 0,
            ao_max_distance: default_ao_distance(),
        }
    }
}

impl FromStr for IntegratorConfig {
    type Err = SettingsError;

    /// The named integrator with default parameters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !Self::NAMES.contains(&s) {
            return Err(SettingsError::UnknownIntegrator(s.to_string()));
        }
        Ok(serde_json::from_value(serde_json::json!({ "type": s }))?)
    }
}

/// Everything needed to produce one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: u32,
    pub bucket_size: u32,
    pub seed: u64,
    pub scene: SceneKind,
    pub integrator: IntegratorConfig,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 720,
            height: 512,
            samples_per_pixel: 16,
            bucket_size: DEFAULT_BUCKET_SIZE,
            seed: 0,
            scene: SceneKind::default(),
            integrator: IntegratorConfig::default(),
        }
    }
}

impl RenderSettings {
    /// Load settings from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parse settings from JSON text.
    pub fn from_json_str(text: &str) -> SettingsResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reject settings that cannot produce an image.
    pub fn validate(&self) -> SettingsResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SettingsError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(SettingsError::InvalidSampleCount);
        }
        if self.bucket_size == 0 {
            return Err(SettingsError::InvalidBucketSize);
        }
        Ok(())
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            samples_per_pixel: self.samples_per_pixel,
            bucket_size: self.bucket_size,
            seed: self.seed,
        }
    }
}
