use crate::{Interval, Vec3};

/// Offset used to keep secondary rays from re-hitting the surface they leave.
pub const EPSILON: f32 = 1e-3;

/// A ray in 3D space with origin, direction, a valid parametric range and
/// the number of bounces that produced it.
///
/// The direction is not required to be unit length. Closest-hit queries
/// shrink `range.max` to the distance of every accepted hit, so later tests
/// against the same ray only accept closer candidates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub range: Interval,
    pub depth: u32,
}

impl Ray {
    /// Create a camera ray (depth 0) valid over `[EPSILON, inf]`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self::with_depth(origin, direction, 0)
    }

    /// Create a ray with an explicit recursion depth.
    pub fn with_depth(origin: Vec3, direction: Vec3, depth: u32) -> Self {
        Self {
            origin,
            direction,
            range: Interval::new(EPSILON, f32::INFINITY),
            depth,
        }
    }

    /// Restrict the parametric range.
    pub fn with_range(mut self, min_t: f32, max_t: f32) -> Self {
        self.range = Interval::new(min_t, max_t);
        self
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
