//! Shadow rays and light-coupling terms shared by the integrators.

use crate::integrator::SurfacePoint;
use lumen_core::{has_intersection, sampling, Color, LightSource, Shape};
use lumen_math::{Ray, Vec3, EPSILON};
use rand::RngCore;
use std::sync::Arc;

/// Whether `y` can be seen from `x`.
///
/// Tests a segment stopping `EPSILON` short of both ends with an any-hit
/// query.
pub fn compute_visibility(x: Vec3, y: Vec3, objects: &[Arc<dyn Shape>]) -> bool {
    let to_y = y - x;
    let distance = to_y.length();
    if distance <= 2.0 * EPSILON {
        return true;
    }

    let shadow_ray = Ray::new(x, to_y / distance).with_range(EPSILON, distance - EPSILON);
    !has_intersection(&shadow_ray, objects)
}

/// Area-to-solid-angle coupling between `x` and `y`:
/// (nx·wi)(ny·−wi) / ‖y − x‖², with `wi` the unit direction from x to y.
///
/// Signed; callers clamp when back-facing configurations must not count.
pub fn compute_geometric_term(x: Vec3, y: Vec3, nx: Vec3, ny: Vec3) -> f32 {
    let to_y = y - x;
    let distance2 = to_y.length_squared();
    if distance2 <= 0.0 {
        return 0.0;
    }

    let wi = to_y / distance2.sqrt();
    nx.dot(wi) * ny.dot(-wi) / distance2
}

/// Single-sample estimate of the radiance `light` reflects at `sp` towards `sp.wo`.
///
/// Area lights are sampled uniformly by area (pdf 1/A), giving
/// Le·fr·G·A. Point lights are deltas and contribute I·fr·cosθ/d².
/// Occluded samples contribute zero.
pub(crate) fn sample_direct_light(
    sp: &SurfacePoint,
    light: &LightSource,
    objects: &[Arc<dyn Shape>],
    rng: &mut dyn RngCore,
) -> Color {
    let y = light.sample_position(rng);
    let to_light = y - sp.x;
    let distance2 = to_light.length_squared();
    if distance2 <= 0.0 {
        return Color::ZERO;
    }
    let wi = to_light / distance2.sqrt();

    let coupling = match light {
        LightSource::Point(_) => sp.n.dot(wi).max(0.0) / distance2,
        LightSource::Area(_) => {
            compute_geometric_term(sp.x, y, sp.n, light.normal()).max(0.0) * light.area()
        }
    };
    if coupling <= 0.0 || !compute_visibility(sp.x, y, objects) {
        return Color::ZERO;
    }

    light.intensity() * sp.material.reflectance(sp.n, sp.wo, wi) * coupling
}

/// Fraction of `samples` hemisphere rays around `n` that escape within
/// `max_distance`: 1 − blocked/total. Returns 1 for zero samples.
pub fn ambient_occlusion(
    x: Vec3,
    n: Vec3,
    samples: u32,
    max_distance: f32,
    objects: &[Arc<dyn Shape>],
    rng: &mut dyn RngCore,
) -> f32 {
    if samples == 0 {
        return 1.0;
    }

    let blocked = (0..samples)
        .filter(|_| {
            let wi = sampling::uniform_hemisphere(n, rng);
            let probe = Ray::new(x, wi).with_range(EPSILON, max_distance);
            has_intersection(&probe, objects)
        })
        .count();

    1.0 - blocked as f32 / samples as f32
}
