use super::{specular_continuation, Integrator, SurfacePoint, DEPTH_LIMIT};
use lumen_core::{closest_intersection, sampling, Color, LightSource, Shape};
use lumen_math::Ray;
use rand::RngCore;
use std::sync::Arc;

/// Direct lighting estimated by sampling the hemisphere uniformly.
///
/// Each sample direction is traced once; only the emission of whatever it
/// hits is counted. Lights are never sampled explicitly, so point lights
/// contribute nothing.
#[derive(Debug, Clone)]
pub struct HemisphericalDirectIntegrator {
    pub background: Color,
    pub samples: u32,
}

impl HemisphericalDirectIntegrator {
    pub fn new(background: Color, samples: u32) -> Self {
        Self {
            background,
            samples,
        }
    }

    fn direct_light(
        &self,
        sp: &SurfacePoint,
        objects: &[Arc<dyn Shape>],
        rng: &mut dyn RngCore,
    ) -> Color {
        if self.samples == 0 {
            return Color::ZERO;
        }

        let mut sum = Color::ZERO;
        for _ in 0..self.samples {
            let wi = sampling::uniform_hemisphere(sp.n, rng);
            let mut probe = Ray::new(sp.x, wi);

            if let Some(its) = closest_intersection(&mut probe, objects) {
                let emitted = its.material().emissive_radiance();
                if emitted != Color::ZERO {
                    let cos_theta = sp.n.dot(wi).max(0.0);
                    sum += emitted * sp.material.reflectance(sp.n, sp.wo, wi) * cos_theta
                        / sampling::UNIFORM_HEMISPHERE_PDF;
                }
            }
        }

        sum / self.samples as f32
    }
}

impl Integrator for HemisphericalDirectIntegrator {
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

        if sp.material.has_diffuse_or_glossy() {
            lo += self.direct_light(&sp, objects, rng);
        }

        if ray.depth < DEPTH_LIMIT {
            lo += specular_continuation(&sp, ray.depth, |next| {
                self.compute_color(&next, objects, lights, rng)
            });
        }

        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrator::test_scenes;
    use lumen_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_miss_returns_background() {
        let scene = test_scenes::lit_floor(0.5);
        let background = Color::new(0.3, 0.2, 0.1);
        let integrator = HemisphericalDirectIntegrator::new(background, 16);
        let mut rng = StdRng::seed_from_u64(0);

        let ray = Ray::new(Vec3::new(0.0, 0.5, 0.0), Vec3::X);
        let color = integrator.compute_color(&ray, scene.objects(), scene.lights(), &mut rng);
        assert_eq!(color, background);
    }

    #[test]
    fn test_emitter_hit_includes_emission() {
        let scene = test_scenes::lit_floor(0.5);
        let integrator = HemisphericalDirectIntegrator::new(Color::ZERO, 16);
        let mut rng = StdRng::seed_from_u64(0);

        let ray = Ray::new(Vec3::new(0.0, 0.5, 0.0), Vec3::Y);
        let color = integrator.compute_color(&ray, scene.objects(), scene.lights(), &mut rng);
        assert!(color.x >= test_scenes::LIGHT_RADIANCE);
    }

    #[test]
    fn test_floor_under_large_light_converges() {
        // A 2x2 panel one unit above: solid angle large enough for
        // uniform hemisphere sampling to find it often
        let scene = test_scenes::lit_floor(2.0);
        let integrator = HemisphericalDirectIntegrator::new(Color::ZERO, 20_000);
        let mut rng = StdRng::seed_from_u64(3);

        let ray = Ray::new(Vec3::new(0.0, 0.5, 0.0), Vec3::NEG_Y);
        let color = integrator.compute_color(&ray, scene.objects(), scene.lights(), &mut rng);

        // Lo = ρd · Le · F, with F ≈ 0.5541 the point-to-square form factor
        // for a centred square of half-width 1 at height 1
        let expected = 0.5 * test_scenes::LIGHT_RADIANCE * 0.5541;
        assert!((color.x - expected).abs() / expected < 0.05, "{} vs {}", color.x, expected);
    }

    #[test]
    fn test_zero_samples_gives_emission_only() {
        let scene = test_scenes::lit_floor(2.0);
        let integrator = HemisphericalDirectIntegrator::new(Color::ZERO, 0);
        let mut rng = StdRng::seed_from_u64(0);

        let ray = Ray::new(Vec3::new(0.0, 0.5, 0.0), Vec3::NEG_Y);
        let color = integrator.compute_color(&ray, scene.objects(), scene.lights(), &mut rng);
        assert_eq!(color, Color::ZERO);
    }
}
