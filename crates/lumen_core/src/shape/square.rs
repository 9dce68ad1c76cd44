//! Parallelogram primitive, also the emitter geometry behind area lights.

use super::{Intersection, Shape};
use crate::{AreaLight, Material};
use lumen_math::{Ray, Vec3, EPSILON};
use rand::RngCore;
use std::sync::Arc;

/// A parallelogram spanned by `edge_u` and `edge_v` from `corner`.
///
/// The stored `normal` is the shading/emission normal supplied by the scene;
/// it decides which side an area light faces.
pub struct Square {
    corner: Vec3,
    edge_u: Vec3,
    edge_v: Vec3,
    normal: Vec3,
    material: Arc<Material>,
    /// cross(u, v) / |cross(u, v)|², constant for a given parallelogram
    w: Vec3,
}

impl Square {
    pub fn new(
        corner: Vec3,
        edge_u: Vec3,
        edge_v: Vec3,
        normal: Vec3,
        material: Arc<Material>,
    ) -> Self {
        let n = edge_u.cross(edge_v);
        Self {
            corner,
            edge_u,
            edge_v,
            normal: normal.normalize(),
            material,
            w: n / n.dot(n),
        }
    }

    #[inline]
    pub fn corner(&self) -> Vec3 {
        self.corner
    }

    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Surface area, |u × v|.
    pub fn area(&self) -> f32 {
        self.edge_u.cross(self.edge_v).length()
    }

    /// Point at parametric coordinates (s, t) in [0, 1]².
    #[inline]
    pub fn point_at(&self, s: f32, t: f32) -> Vec3 {
        self.corner + s * self.edge_u + t * self.edge_v
    }

    /// Uniformly distributed point on the surface.
    pub fn sample_point(&self, rng: &mut dyn RngCore) -> Vec3 {
        let s = crate::sampling::gen_f32(rng);
        let t = crate::sampling::gen_f32(rng);
        self.point_at(s, t)
    }

    fn hit_distance(&self, ray: &Ray) -> Option<f32> {
        let denominator = ray.direction.dot(self.normal);

        // Parallel ray
        if denominator.abs() < EPSILON * EPSILON {
            return None;
        }

        let t = (self.corner - ray.origin).dot(self.normal) / denominator;
        if !ray.range.contains(t) {
            return None;
        }

        // Planar coordinates of the hit along each edge
        let planar = ray.at(t) - self.corner;
        let alpha = self.w.dot(planar.cross(self.edge_v));
        let beta = self.w.dot(self.edge_u.cross(planar));

        let inside = |x: f32| x > 0.0 && x < 1.0;
        (inside(alpha) && inside(beta)).then_some(t)
    }
}

impl Shape for Square {
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

    fn area_light(self: Arc<Self>) -> Option<AreaLight> {
        Some(AreaLight::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::Color;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ceiling_panel() -> Square {
        Square::new(
            Vec3::new(-1.0, 3.0, 3.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(0.0, -1.0, 0.0),
            Arc::new(Material::emissive(Color::splat(25.0), Color::splat(0.5))),
        )
    }

    #[test]
    fn test_square_hit_inside() {
        let square = ceiling_panel();
        let mut ray = Ray::new(Vec3::new(0.0, 0.0, 4.0), Vec3::Y);

        let its = square.intersect(&mut ray).expect("should hit");
        assert!((its.t - 3.0).abs() < 1e-5);
        assert_eq!(its.normal, Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_square_miss_outside_edges() {
        let square = ceiling_panel();

        assert!(!square.intersects(&Ray::new(Vec3::new(1.5, 0.0, 4.0), Vec3::Y)));
        assert!(!square.intersects(&Ray::new(Vec3::new(0.0, 0.0, 5.5), Vec3::Y)));
    }

    #[test]
    fn test_square_area() {
        assert!((ceiling_panel().area() - 4.0).abs() < 1e-6);

        let skewed = Square::new(
            Vec3::ZERO,
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(0.0, 0.5, 0.0),
            Vec3::Z,
            Arc::new(Material::mirror(Color::ONE)),
        );
        assert!((skewed.area() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_square_samples_stay_on_surface() {
        let square = ceiling_panel();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..500 {
            let p = square.sample_point(&mut rng);
            assert!((p.y - 3.0).abs() < 1e-6);
            assert!((-1.0..=1.0).contains(&p.x));
            assert!((3.0..=5.0).contains(&p.z));
        }
    }
}
