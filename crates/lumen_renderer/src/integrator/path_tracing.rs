use super::{clamp_depth, specular_continuation, spawn_ray, Integrator, SurfacePoint};
use lumen_core::{closest_intersection, sampling, Color, LightSource, Shape};
use lumen_math::Ray;
use rand::RngCore;
use std::sync::Arc;

/// Path tracing without light sampling.
///
/// Every diffuse or glossy hit continues along one uniformly sampled
/// hemisphere direction; light is only picked up when a path happens to hit
/// an emitter. Point lights are never hit and so contribute nothing.
#[derive(Debug, Clone)]
pub struct PathTracingIntegrator {
    pub background: Color,
    pub max_depth: u32,
}

impl PathTracingIntegrator {
    pub fn new(background: Color, max_depth: u32) -> Self {
        Self {
            background,
            max_depth: clamp_depth(max_depth),
        }
    }
}

impl Integrator for PathTracingIntegrator {
    fn compute_color(
        &self,
        ray: &Ray,
        objects: &[Arc<dyn Shape>],
        lights: &[LightSource],
        rng: &mut dyn RngCore,
    ) -> Color {
        let mut ray = *ray;
        let Some(its) = closest_intersection(&mut ray, objects) else {
            return self.background;
        };
        let sp = SurfacePoint::new(&its, ray.direction);

        let mut lo = sp.material.emissive_radiance();
        if ray.depth >= self.max_depth {
            return lo;
        }

        if sp.material.is_delta() {
            lo += specular_continuation(&sp, ray.depth, |next| {
                self.compute_color(&next, objects, lights, rng)
            });
        } else if sp.material.has_diffuse_or_glossy() {
            let wi = sampling::uniform_hemisphere(sp.n, rng);
            let li = self.compute_color(&spawn_ray(sp.x, sp.n, wi, ray.depth + 1), objects, lights, rng);

            let cos_theta = sp.n.dot(wi).max(0.0);
            lo += li * sp.material.reflectance(sp.n, sp.wo, wi) * cos_theta
                / sampling::UNIFORM_HEMISPHERE_PDF;
        }

        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrator::test_scenes;
    use lumen_core::{InfinitePlane, Material, Scene};
    use lumen_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_miss_returns_background() {
        let scene = test_scenes::lit_floor(1.0);
        let background = Color::new(0.5, 0.6, 0.7);
        let integrator = PathTracingIntegrator::new(background, 5);
        let mut rng = StdRng::seed_from_u64(0);

        let ray = Ray::new(Vec3::new(0.0, 0.5, 0.0), Vec3::X);
        let color = integrator.compute_color(&ray, scene.objects(), scene.lights(), &mut rng);
        assert_eq!(color, background);
    }

    #[test]
    fn test_emitter_hit_includes_emission() {
        let scene = test_scenes::lit_floor(0.5);
        let integrator = PathTracingIntegrator::new(Color::ZERO, 5);
        let mut rng = StdRng::seed_from_u64(0);

        let ray = Ray::new(Vec3::new(0.0, 0.5, 0.0), Vec3::Y);
        let color = integrator.compute_color(&ray, scene.objects(), scene.lights(), &mut rng);
        assert!(color.x >= test_scenes::LIGHT_RADIANCE);
    }

    #[test]
    fn test_depth_limit_stops_at_emission() {
        let scene = test_scenes::lit_floor(2.0);
        let integrator = PathTracingIntegrator::new(Color::ONE, 3);
        let mut rng = StdRng::seed_from_u64(0);

        // Floor hit at the limit: no bounce, not emissive
        let ray = Ray::with_depth(Vec3::new(0.0, 0.5, 0.0), Vec3::NEG_Y, 3);
        let color = integrator.compute_color(&ray, scene.objects(), scene.lights(), &mut rng);
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_white_furnace_converges() {
        // Between two glowing slabs, one bounce gives Le·(1 + ρ)
        let mut scene = Scene::new();
        let glow = Arc::new(Material::emissive(Color::ONE, Color::splat(0.5)));
        scene.add_object(InfinitePlane::new(Vec3::ZERO, Vec3::Y, glow.clone()));
        scene.add_object(InfinitePlane::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y, glow));

        let integrator = PathTracingIntegrator::new(Color::ONE, 1);
        let mut rng = StdRng::seed_from_u64(42);
        let ray = Ray::new(Vec3::new(0.0, 0.5, 0.0), Vec3::NEG_Y);

        let n = 20_000;
        let mean = (0..n)
            .map(|_| integrator.compute_color(&ray, scene.objects(), scene.lights(), &mut rng).x)
            .sum::<f32>()
            / n as f32;

        assert!((mean - 1.5).abs() < 0.03, "mean {}", mean);
    }

    #[test]
    fn test_mirror_at_max_depth_stops() {
        let mut scene = Scene::new();
        scene.add_object(InfinitePlane::new(
            Vec3::ZERO,
            Vec3::Y,
            Arc::new(Material::mirror(Color::ONE)),
        ));
        let integrator = PathTracingIntegrator::new(Color::ONE, 2);
        let mut rng = StdRng::seed_from_u64(0);

        let ray = Ray::with_depth(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y, 2);
        let color = integrator.compute_color(&ray, scene.objects(), scene.lights(), &mut rng);
        assert_eq!(color, Color::ZERO);

        // One level below the limit the reflection escapes to the background
        let ray = Ray::with_depth(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y, 1);
        let color = integrator.compute_color(&ray, scene.objects(), scene.lights(), &mut rng);
        assert_eq!(color, Color::ONE);
    }
}
