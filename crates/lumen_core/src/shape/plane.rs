//! Infinite plane primitive.

use super::{Intersection, Shape};
use crate::Material;
use lumen_math::{Ray, Vec3, EPSILON};
use std::sync::Arc;

/// An infinite plane through `point` with normal `normal`.
pub struct InfinitePlane {
    point: Vec3,
    normal: Vec3,
    material: Arc<Material>,
}

impl InfinitePlane {
    pub fn new(point: Vec3, normal: Vec3, material: Arc<Material>) -> Self {
        Self {
            point,
            normal: normal.normalize(),
            material,
        }
    }

    fn hit_distance(&self, ray: &Ray) -> Option<f32> {
        let denominator = ray.direction.dot(self.normal);

        // Parallel ray
        if denominator.abs() < EPSILON * EPSILON {
            return None;
        }

        let t = (self.point - ray.origin).dot(self.normal) / denominator;
        ray.range.contains(t).then_some(t)
    }
}

impl Shape for InfinitePlane {
    fn intersect<'a>(&'a self, ray: &mut Ray) -> Option<Intersection<'a>> {
        let t = self.hit_distance(ray)?;
        ray.range.max = t;

        Some(Intersection {
            point: ray.at(t),
            normal: self.normal,
            t,
            shape: self,
        })
    }

    fn intersects(&self, ray: &Ray) -> bool {
        self.hit_distance(ray).is_some()
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
