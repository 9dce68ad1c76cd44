//! Light-transport integrators.
//!
//! Every integrator answers one question: how much radiance arrives along a
//! ray, given the scene's objects and lights. They share the same skeleton
//! (closest hit, local frame, emission, reflected light) and differ in how
//! they estimate the reflected part.

mod area_direct;
mod hemispherical;
mod next_event;
mod path_tracing;
mod preview;
mod whitted;

pub use area_direct::AreaDirectIntegrator;
pub use hemispherical::HemisphericalDirectIntegrator;
pub use next_event::NextEventIntegrator;
pub use path_tracing::PathTracingIntegrator;
pub use preview::{
    AmbientOcclusionIntegrator, ConstantAmbientIntegrator, DepthShader, IntersectionShader,
    NormalShader,
};
pub use whitted::WhittedIntegrator;

use lumen_core::{Color, Intersection, LightSource, Material, Shape};
use lumen_math::{Ray, Vec3, EPSILON};
use rand::RngCore;
use std::sync::Arc;

/// Hard cap on recursion depth, applied whatever depth an integrator is
/// configured with. Integrators without a depth setting use it to bound
/// chains of mirror and refractive bounces.
pub const DEPTH_LIMIT: u32 = 64;

/// Radiance estimator called once per camera sample.
pub trait Integrator: Send + Sync {
    /// Estimate the radiance arriving at `ray.origin` along `ray`.
    ///
    /// Camera rays have depth 0. Always terminates.
    fn compute_color(
        &self,
        ray: &Ray,
        objects: &[Arc<dyn Shape>],
        lights: &[LightSource],
        rng: &mut dyn RngCore,
    ) -> Color;
}

/// Clamp a configured depth to [`DEPTH_LIMIT`].
pub(crate) fn clamp_depth(max_depth: u32) -> u32 {
    if max_depth > DEPTH_LIMIT {
        log::warn!(
            "max_depth {} exceeds the recursion limit, clamping to {}",
            max_depth,
            DEPTH_LIMIT
        );
    }
    max_depth.min(DEPTH_LIMIT)
}

/// Local shading frame at a hit.
pub(crate) struct SurfacePoint<'a> {
    /// Hit position
    pub x: Vec3,
    /// Unit surface normal (outward, as stored by the shape)
    pub n: Vec3,
    /// Unit direction back towards the ray origin
    pub wo: Vec3,
    pub material: &'a Material,
}

impl<'a> SurfacePoint<'a> {
    pub fn new(its: &Intersection<'a>, ray_direction: Vec3) -> Self {
        Self {
            x: its.point,
            n: its.normal.normalize(),
            wo: (-ray_direction).normalize(),
            material: its.material(),
        }
    }
}

/// Ideal reflection of `wo` about `n`: 2(n·wo)n − wo.
#[inline]
pub fn mirror_direction(n: Vec3, wo: Vec3) -> Vec3 {
    (2.0 * n.dot(wo) * n - wo).normalize()
}

/// Radicand of the refraction formula, 1 − μ²(1 − cos²θ).
///
/// Negative means total internal reflection.
#[inline]
pub fn refraction_radicand(cos_theta: f32, mu: f32) -> f32 {
    1.0 - mu * mu * (1.0 - cos_theta * cos_theta)
}

/// Refract `wo` through a surface with normal `n` and relative index
/// `ior_ratio` = η₁/η₂.
///
/// `n·wo < 0` means the ray is leaving the medium: the normal is flipped and
/// the ratio inverted. Returns the unit transmitted direction, or `None` on
/// total internal reflection.
pub fn refraction(n: Vec3, wo: Vec3, ior_ratio: f32) -> Option<Vec3> {
    let n_dot_wo = n.dot(wo);
    let entering = n_dot_wo > 0.0;

    let normal = if entering { n } else { -n };
    let mu = if entering { ior_ratio } else { 1.0 / ior_ratio };
    let cos_theta = n_dot_wo.abs();

    let radicand = refraction_radicand(cos_theta, mu);
    if radicand < 0.0 {
        return None;
    }

    Some((-mu * wo + normal * (mu * cos_theta - radicand.sqrt())).normalize())
}

/// Secondary ray leaving `x` along `direction`, pushed off the surface on the
/// side the direction points to.
pub(crate) fn spawn_ray(x: Vec3, n: Vec3, direction: Vec3, depth: u32) -> Ray {
    let side = n.dot(direction).signum();
    Ray::with_depth(x + n * (EPSILON * side), direction, depth)
}

/// Mirror and refraction continuations of the recursive integrators.
///
/// `trace` evaluates the spawned ray (already at `depth + 1`). Mirror
/// radiance is tinted by the mirror's reflectance; transmitted radiance is
/// not filtered. Total internal reflection contributes nothing.
pub(crate) fn specular_continuation(
    sp: &SurfacePoint,
    depth: u32,
    mut trace: impl FnMut(Ray) -> Color,
) -> Color {
    let mut lo = Color::ZERO;

    if sp.material.has_specular() {
        let wr = mirror_direction(sp.n, sp.wo);
        lo += trace(spawn_ray(sp.x, sp.n, wr, depth + 1)) * sp.material.diffuse_reflectance();
    }

    if sp.material.has_transmission() {
        if let Some(wt) = refraction(sp.n, sp.wo, sp.material.index_of_refraction()) {
            lo += trace(spawn_ray(sp.x, sp.n, wt, depth + 1));
        }
    }

    lo
}

#[cfg(test)]
pub(crate) mod test_scenes {
    //! Small scenes shared by the integrator tests.

    use lumen_core::{InfinitePlane, Material, PointLight, Scene, Sphere, Square};
    use lumen_math::{Color, Vec3};
    use std::sync::Arc;

    pub const LIGHT_RADIANCE: f32 = 10.0;

    pub fn grey() -> Arc<Material> {
        Arc::new(Material::phong(Color::splat(0.5), Color::ZERO, 1.0))
    }

    pub fn emitter() -> Arc<Material> {
        Arc::new(Material::emissive(Color::splat(LIGHT_RADIANCE), Color::splat(0.5)))
    }

    /// Small square light 1 unit above a diffuse floor at y = 0.
    pub fn lit_floor(light_size: f32) -> Scene {
        let mut scene = Scene::new();
        scene.add_object(InfinitePlane::new(Vec3::ZERO, Vec3::Y, grey()));
        let h = light_size / 2.0;
        scene.add_object(Square::new(
            Vec3::new(-h, 1.0, -h),
            Vec3::new(light_size, 0.0, 0.0),
            Vec3::new(0.0, 0.0, light_size),
            Vec3::NEG_Y,
            emitter(),
        ));
        scene
    }

    /// A sphere lit by a point light.
    pub fn point_lit_sphere() -> Scene {
        let mut scene = Scene::new();
        scene.add_object(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, grey()));
        scene.add_point_light(PointLight::new(Vec3::new(0.0, 3.0, 2.0), Color::splat(20.0)));
        scene
    }
}
