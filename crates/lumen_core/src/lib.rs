//! Lumen Core - Scene description for the light-transport integrators.
//!
//! This crate provides:
//!
//! - **Materials**: a closed set of BRDF variants (Phong, mirror,
//!   transmissive, emissive) queried through capability flags
//! - **Light sources**: point lights and area lights derived from emissive
//!   squares
//! - **Shapes**: the closest-hit / any-hit query contract plus sphere,
//!   infinite plane and square primitives
//! - **Scene**: object and light storage with explicit emitter registration
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::{Material, Scene, Square};
//!
//! let mut scene = Scene::new();
//! let light = Material::emissive(Color::splat(25.0), Color::splat(0.5));
//! let registered = scene.add_object(Square::new(corner, v1, v2, normal, Arc::new(light)));
//! assert!(registered.light.is_some());
//! ```

pub mod light;
pub mod material;
pub mod sampling;
pub mod scene;
pub mod shape;

// Re-export commonly used types
pub use light::{AreaLight, LightSource, PointLight};
pub use material::{Capability, Material, NOT_TRANSMISSIVE};
pub use scene::{Registered, Scene};
pub use shape::{
    closest_intersection, has_intersection, InfinitePlane, Intersection, Shape, Sphere, Square,
};

/// Re-export math types from lumen_math
pub use lumen_math::{Color, Interval, Ray, Vec3, EPSILON};
