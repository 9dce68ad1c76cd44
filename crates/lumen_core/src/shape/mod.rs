//! Ray/shape query contract.
//!
//! Integrators see geometry only through [`closest_intersection`] and
//! [`has_intersection`], both linear scans over the scene's objects.

mod plane;
mod sphere;
mod square;

pub use plane::InfinitePlane;
pub use sphere::Sphere;
pub use square::Square;

use crate::{AreaLight, Material};
use lumen_math::{Ray, Vec3};
use std::sync::Arc;

/// Record of a ray-shape intersection.
#[derive(Clone, Copy)]
pub struct Intersection<'a> {
    /// Point of intersection
    pub point: Vec3,
    /// Geometric normal as stored by the shape (outward, not necessarily
    /// unit length, never flipped towards the ray)
    pub normal: Vec3,
    /// Ray parameter of the hit
    pub t: f32,
    /// The surface that was hit
    pub shape: &'a dyn Shape,
}

impl<'a> Intersection<'a> {
    /// Material of the hit surface.
    #[inline]
    pub fn material(&self) -> &'a Material {
        self.shape.material()
    }
}

impl std::fmt::Debug for Intersection<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Intersection")
            .field("point", &self.point)
            .field("normal", &self.normal)
            .field("t", &self.t)
            .finish_non_exhaustive()
    }
}

/// Trait for surfaces that can be hit by rays.
pub trait Shape: Send + Sync {
    /// Intersect the ray within its current range.
    ///
    /// On a hit, shrinks `ray.range.max` to the hit distance.
    fn intersect<'a>(&'a self, ray: &mut Ray) -> Option<Intersection<'a>>;

    /// Whether the ray hits this shape anywhere within its range.
    fn intersects(&self, ray: &Ray) -> bool;

    /// Material of the surface.
    fn material(&self) -> &Material;

    /// Build the area light sampling this shape, if the shape can be sampled
    /// uniformly by area.
    fn area_light(self: Arc<Self>) -> Option<AreaLight> {
        None
    }
}

/// Find the closest hit along `ray` among `objects`.
///
/// `ray.range.max` ends up at the distance of the returned hit.
pub fn closest_intersection<'a>(
    ray: &mut Ray,
    objects: &'a [Arc<dyn Shape>],
) -> Option<Intersection<'a>> {
    let mut closest = None;

    for object in objects {
        // Each accepted hit narrows the range for the remaining objects
        if let Some(its) = object.intersect(ray) {
            closest = Some(its);
        }
    }

    closest
}

/// Whether anything in `objects` blocks `ray` within its range.
pub fn has_intersection(ray: &Ray, objects: &[Arc<dyn Shape>]) -> bool {
    objects.iter().any(|object| object.intersects(ray))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::Color;

    fn grey() -> Arc<Material> {
        Arc::new(Material::phong(Color::splat(0.5), Color::ZERO, 1.0))
    }

    #[test]
    fn test_closest_intersection_ignores_insertion_order() {
        let near: Arc<dyn Shape> = Arc::new(Sphere::new(Vec3::new(0.0, 0.0, 3.0), 0.5, grey()));
        let far: Arc<dyn Shape> = Arc::new(Sphere::new(Vec3::new(0.0, 0.0, 10.0), 0.5, grey()));

        for objects in [vec![near.clone(), far.clone()], vec![far.clone(), near.clone()]] {
            let mut ray = Ray::new(Vec3::ZERO, Vec3::Z);
            let its = closest_intersection(&mut ray, &objects).expect("should hit");

            assert!((its.t - 2.5).abs() < 1e-4);
            assert!((its.point.z - 2.5).abs() < 1e-4);
            assert_eq!(ray.range.max, its.t);
        }
    }

    #[test]
    fn test_closest_intersection_miss_keeps_range() {
        let objects: Vec<Arc<dyn Shape>> =
            vec![Arc::new(Sphere::new(Vec3::new(0.0, 5.0, 0.0), 1.0, grey()))];
        let mut ray = Ray::new(Vec3::ZERO, Vec3::Z);

        assert!(closest_intersection(&mut ray, &objects).is_none());
        assert_eq!(ray.range.max, f32::INFINITY);
    }

    #[test]
    fn test_has_intersection_respects_range() {
        let objects: Vec<Arc<dyn Shape>> =
            vec![Arc::new(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, grey()))];

        let long = Ray::new(Vec3::ZERO, Vec3::Z);
        let short = Ray::new(Vec3::ZERO, Vec3::Z).with_range(1e-3, 3.0);

        assert!(has_intersection(&long, &objects));
        assert!(!has_intersection(&short, &objects));
    }

    #[test]
    fn test_intersection_exposes_material() {
        let mirror = Arc::new(Material::mirror(Color::ONE));
        let objects: Vec<Arc<dyn Shape>> =
            vec![Arc::new(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, mirror))];
        let mut ray = Ray::new(Vec3::ZERO, Vec3::Z);

        let its = closest_intersection(&mut ray, &objects).expect("should hit");
        assert!(its.material().has_specular());
    }
}
