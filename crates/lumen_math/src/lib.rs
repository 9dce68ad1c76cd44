// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::{Ray, EPSILON};

/// RGB radiance triple. Components are linear and unbounded.
pub type Color = Vec3;
