use super::{specular_continuation, Integrator, SurfacePoint, DEPTH_LIMIT};
use crate::visibility::sample_direct_light;
use lumen_core::{closest_intersection, Color, LightSource, Shape};
use lumen_math::Ray;
use rand::RngCore;
use std::sync::Arc;

/// Direct lighting estimated by sampling positions on each light.
#[derive(Debug, Clone)]
pub struct AreaDirectIntegrator {
    pub background: Color,
    /// Light samples per light per shading point
    pub samples: u32,
}

impl AreaDirectIntegrator {
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
        lights: &[LightSource],
        rng: &mut dyn RngCore,
    ) -> Color {
        if self.samples == 0 {
            return Color::ZERO;
        }

        lights
            .iter()
            .map(|light| {
                let sum = (0..self.samples).fold(Color::ZERO, |acc, _| {
                    acc + sample_direct_light(sp, light, objects, rng)
                });
                sum / self.samples as f32
            })
            .sum()
    }
}

impl Integrator for AreaDirectIntegrator {
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
            lo += self.direct_light(&sp, objects, lights, rng);
        }

        if ray.depth < DEPTH_LIMIT {
            lo += specular_continuation(&sp, ray.depth, |next| {
                self.compute_color(&next, objects, lights, rng)
            });
        }

        lo
    }
}
