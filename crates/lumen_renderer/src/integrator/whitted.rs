use super::{clamp_depth, specular_continuation, Integrator, SurfacePoint};
use crate::visibility::compute_visibility;
use lumen_core::{closest_intersection, Color, LightSource, Shape};
use lumen_math::Ray;
use rand::RngCore;
use std::sync::Arc;

/// Classic recursive ray tracer.
///
/// Direct light is a deterministic sum over the lights, one position per
/// light, with inverse-square falloff and a hard shadow test. Mirrors and
/// refractive surfaces recurse until `max_depth`.
#[derive(Debug, Clone)]
pub struct WhittedIntegrator {
    pub background: Color,
    pub max_depth: u32,
    /// Ambient coefficient ka; diffuse surfaces get ρd·ka regardless of lights
    pub ambient: Color,
}

impl WhittedIntegrator {
    pub fn new(background: Color, max_depth: u32, ambient: Color) -> Self {
        Self {
            background,
            max_depth: clamp_depth(max_depth),
            ambient,
        }
    }

    fn direct_light(
        &self,
        sp: &SurfacePoint,
        objects: &[Arc<dyn Shape>],
        lights: &[LightSource],
        rng: &mut dyn RngCore,
    ) -> Color {
        let mut lo = Color::ZERO;

        for light in lights {
            let y = light.sample_position(rng);
            let to_light = y - sp.x;
            let distance2 = to_light.length_squared();
            if distance2 <= 0.0 {
                continue;
            }
            let wi = to_light / distance2.sqrt();

            let cos_theta = sp.n.dot(wi).max(0.0);
            if cos_theta <= 0.0 || !compute_visibility(sp.x, y, objects) {
                continue;
            }

            lo += light.intensity() / distance2 * sp.material.reflectance(sp.n, sp.wo, wi) * cos_theta;
        }

        lo
    }
}

impl Integrator for WhittedIntegrator {
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
            lo += sp.material.diffuse_reflectance() * self.ambient;
            lo += self.direct_light(&sp, objects, lights, rng);
        }

        if ray.depth < self.max_depth {
            lo += specular_continuation(&sp, ray.depth, |next| {
                self.compute_color(&next, objects, lights, rng)
            });
        }

        lo
    }
}
