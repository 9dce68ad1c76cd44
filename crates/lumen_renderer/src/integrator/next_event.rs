use super::{clamp_depth, mirror_direction, refraction, spawn_ray, Integrator, SurfacePoint};
use crate::visibility::{ambient_occlusion, sample_direct_light};
use lumen_core::{closest_intersection, sampling, Color, LightSource, Shape};
use lumen_math::Ray;
use rand::RngCore;
use std::sync::Arc;

/// Path tracing with next-event estimation.
///
/// At every diffuse or glossy vertex the reflected radiance is split into a
/// direct part, one light sample per light, and an indirect part, one
/// hemisphere bounce that recurses into the same split. Emission is only
/// counted at the camera hit and at the end of mirror or refraction chains,
/// so light reached by light sampling is never counted twice.
///
/// With `ao_samples > 0`, primary hits on non-emissive surfaces are further
/// scaled by an ambient-occlusion factor.
#[derive(Debug, Clone)]
pub struct NextEventIntegrator {
    pub background: Color,
    pub max_depth: u32,
    /// Hemisphere probes per primary hit, 0 disables ambient occlusion
    pub ao_samples: u32,
    pub ao_max_distance: f32,
}

impl NextEventIntegrator {
    pub fn new(background: Color, max_depth: u32) -> Self {
        Self {
            background,
            max_depth: clamp_depth(max_depth),
            ao_samples: 0,
            ao_max_distance: 1.0,
        }
    }

    pub fn with_ambient_occlusion(mut self, samples: u32, max_distance: f32) -> Self {
        self.ao_samples = samples;
        self.ao_max_distance = max_distance;
        self
    }

    /// Radiance arriving along a secondary ray. Misses contribute nothing.
    fn trace(
        &self,
        mut ray: Ray,
        arrived_from_delta: bool,
        objects: &[Arc<dyn Shape>],
        lights: &[LightSource],
        rng: &mut dyn RngCore,
    ) -> Color {
        match closest_intersection(&mut ray, objects) {
            Some(its) => {
                let sp = SurfacePoint::new(&its, ray.direction);
                self.reflected(&sp, ray.depth, arrived_from_delta, objects, lights, rng)
            }
            None => Color::ZERO,
        }
    }

    fn reflected(
        &self,
        sp: &SurfacePoint,
        depth: u32,
        arrived_from_delta: bool,
        objects: &[Arc<dyn Shape>],
        lights: &[LightSource],
        rng: &mut dyn RngCore,
    ) -> Color {
        if depth >= self.max_depth {
            return Color::ZERO;
        }

        // Light sampling never sees the emitter at the end of a delta chain
        let mut lo = if arrived_from_delta {
            sp.material.emissive_radiance()
        } else {
            Color::ZERO
        };

        if sp.material.has_specular() {
            let wr = mirror_direction(sp.n, sp.wo);
            let li = self.trace(spawn_ray(sp.x, sp.n, wr, depth + 1), true, objects, lights, rng);
            lo += li * sp.material.diffuse_reflectance();
        } else if sp.material.has_transmission() {
            // Total internal reflection turns into a mirror bounce
            let wi = match refraction(sp.n, sp.wo, sp.material.index_of_refraction()) {
                Some(wt) => wt,
                None => mirror_direction(sp.n, sp.wo),
            };
            lo += self.trace(spawn_ray(sp.x, sp.n, wi, depth + 1), true, objects, lights, rng);
        } else {
            lo += self.direct(sp, objects, lights, rng);
            lo += self.indirect(sp, depth, objects, lights, rng);
        }

        lo
    }

    fn direct(
        &self,
        sp: &SurfacePoint,
        objects: &[Arc<dyn Shape>],
        lights: &[LightSource],
        rng: &mut dyn RngCore,
    ) -> Color {
        lights
            .iter()
            .map(|light| sample_direct_light(sp, light, objects, rng))
            .sum()
    }

    fn indirect(
        &self,
        sp: &SurfacePoint,
        depth: u32,
        objects: &[Arc<dyn Shape>],
        lights: &[LightSource],
        rng: &mut dyn RngCore,
    ) -> Color {
        let wi = sampling::uniform_hemisphere(sp.n, rng);
        let li = self.trace(spawn_ray(sp.x, sp.n, wi, depth + 1), false, objects, lights, rng);
        if li == Color::ZERO {
            return li;
        }

        let cos_theta = sp.n.dot(wi).max(0.0);
        li * sp.material.reflectance(sp.n, sp.wo, wi) * cos_theta / sampling::UNIFORM_HEMISPHERE_PDF
    }
}

impl Integrator for NextEventIntegrator {
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
        lo += self.reflected(&sp, ray.depth, false, objects, lights, rng);

        if self.ao_samples > 0 && ray.depth == 0 && !sp.material.is_emissive() {
            lo *= ambient_occlusion(sp.x, sp.n, self.ao_samples, self.ao_max_distance, objects, rng);
        }

        lo
    }
}
