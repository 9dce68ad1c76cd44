//! Sphere primitive.

use super::{Intersection, Shape};
use crate::Material;
use lumen_math::{Ray, Vec3};
use std::sync::Arc;

/// A sphere primitive.
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    /// Smallest root of the ray/sphere quadratic inside the ray's range.
    fn nearest_root(&self, ray: &Ray) -> Option<f32> {
        let oc = self.center - ray.origin;
        let a = ray.direction.length_squared();
        let h = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let root = (h - sqrtd) / a;
        if ray.range.contains(root) {
            return Some(root);
        }
        let root = (h + sqrtd) / a;
        ray.range.contains(root).then_some(root)
    }
}

impl Shape for Sphere {
    fn intersect<'a>(&'a self, ray: &mut Ray) -> Option<Intersection<'a>> {
        let t = self.nearest_root(ray)?;
        let point = ray.at(t);
        ray.range.max = t;

        Some(Intersection {
            point,
            normal: (point - self.center) / self.radius,
            t,
            shape: self,
        })
    }

    fn intersects(&self, ray: &Ray) -> bool {
        self.nearest_root(ray).is_some()
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
