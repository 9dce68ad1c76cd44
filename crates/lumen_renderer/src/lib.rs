//! Lumen Renderer - Light-transport integrators on the CPU
//!
//! Estimates the radiance reaching a pinhole camera through each pixel with
//! one of several integrators:
//! - Whitted recursive ray tracing
//! - Hemispherical and area-light Monte Carlo direct lighting
//! - Pure path tracing
//! - Path tracing with next-event estimation and optional ambient occlusion
//!
//! Pixels are rendered in buckets spread across threads with rayon.

mod bucket;
mod camera;
pub mod integrator;
mod output;
mod renderer;
mod scenes;
mod settings;
pub mod visibility;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use integrator::{
    AmbientOcclusionIntegrator, AreaDirectIntegrator, ConstantAmbientIntegrator, DepthShader,
    HemisphericalDirectIntegrator, Integrator, IntersectionShader, NextEventIntegrator,
    NormalShader, PathTracingIntegrator, WhittedIntegrator, DEPTH_LIMIT,
};
pub use output::{save_exr, save_image, save_png, OutputError};
pub use renderer::{color_to_rgba, render, render_pixel, ImageBuffer, RenderConfig};
pub use scenes::{BuiltScene, SceneKind};
pub use settings::{IntegratorConfig, RenderSettings, SettingsError};

/// Re-export the scene description and math types
pub use lumen_core::{Color, LightSource, Material, Ray, Scene, Shape, Vec3};
