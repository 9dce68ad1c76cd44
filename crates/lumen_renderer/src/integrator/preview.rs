//! Cheap shaders for checking geometry and materials before a full render.
//!
//! None of these follow light paths; each looks at the closest hit only.

use super::Integrator;
use crate::visibility::ambient_occlusion;
use lumen_core::{closest_intersection, Color, LightSource, Shape};
use lumen_math::Ray;
use rand::RngCore;
use std::sync::Arc;

/// Flat color wherever something is hit.
#[derive(Debug, Clone)]
pub struct IntersectionShader {
    pub background: Color,
    pub hit_color: Color,
}

impl IntersectionShader {
    pub fn new(background: Color, hit_color: Color) -> Self {
        Self {
            background,
            hit_color,
        }
    }
}

impl Integrator for IntersectionShader {
    fn compute_color(
        &self,
        ray: &Ray,
        objects: &[Arc<dyn Shape>],
        _lights: &[LightSource],
        _rng: &mut dyn RngCore,
    ) -> Color {
        let mut ray = *ray;
        match closest_intersection(&mut ray, objects) {
            Some(_) => self.hit_color,
            None => self.background,
        }
    }
}

/// Hit color fading linearly to black at `max_distance`.
#[derive(Debug, Clone)]
pub struct DepthShader {
    pub background: Color,
    pub hit_color: Color,
    pub max_distance: f32,
}

impl DepthShader {
    pub fn new(background: Color, hit_color: Color, max_distance: f32) -> Self {
        Self {
            background,
            hit_color,
            max_distance,
        }
    }
}

impl Integrator for DepthShader {
    fn compute_color(
        &self,
        ray: &Ray,
        objects: &[Arc<dyn Shape>],
        _lights: &[LightSource],
        _rng: &mut dyn RngCore,
    ) -> Color {
        let mut ray = *ray;
        let Some(its) = closest_intersection(&mut ray, objects) else {
            return self.background;
        };

        let distance = its.point.distance(ray.origin);
        self.hit_color * (1.0 - (distance / self.max_distance).min(1.0)).max(0.0)
    }
}

/// Maps the unit normal from [-1, 1] to [0, 1] per channel.
#[derive(Debug, Clone)]
pub struct NormalShader {
    pub background: Color,
}

impl NormalShader {
    pub fn new(background: Color) -> Self {
        Self { background }
    }
}

impl Integrator for NormalShader {
    fn compute_color(
        &self,
        ray: &Ray,
        objects: &[Arc<dyn Shape>],
        _lights: &[LightSource],
        _rng: &mut dyn RngCore,
    ) -> Color {
        let mut ray = *ray;
        match closest_intersection(&mut ray, objects) {
            Some(its) => (its.normal.normalize() + Color::ONE) * 0.5,
            None => self.background,
        }
    }
}

/// Diffuse albedo times a constant ambient term. Emitters render white.
#[derive(Debug, Clone)]
pub struct ConstantAmbientIntegrator {
    pub background: Color,
    pub ambient: Color,
}

impl ConstantAmbientIntegrator {
    pub fn new(background: Color, ambient: Color) -> Self {
        Self {
            background,
            ambient,
        }
    }
}

impl Integrator for ConstantAmbientIntegrator {
    fn compute_color(
        &self,
        ray: &Ray,
        objects: &[Arc<dyn Shape>],
        _lights: &[LightSource],
        _rng: &mut dyn RngCore,
    ) -> Color {
        let mut ray = *ray;
        let Some(its) = closest_intersection(&mut ray, objects) else {
            return self.background;
        };

        let material = its.material();
        if material.is_emissive() {
            return Color::ONE;
        }
        material.diffuse_reflectance() * self.ambient
    }
}

/// Diffuse albedo scaled by the unoccluded fraction of the hemisphere.
/// Emitters render white.
#[derive(Debug, Clone)]
pub struct AmbientOcclusionIntegrator {
    pub background: Color,
    pub samples: u32,
    pub max_distance: f32,
}

impl AmbientOcclusionIntegrator {
    pub fn new(background: Color, samples: u32, max_distance: f32) -> Self {
        Self {
            background,
            samples,
            max_distance,
        }
    }
}

impl Integrator for AmbientOcclusionIntegrator {
    fn compute_color(
        &self,
        ray: &Ray,
        objects: &[Arc<dyn Shape>],
        _lights: &[LightSource],
        rng: &mut dyn RngCore,
    ) -> Color {
        let mut ray = *ray;
        let Some(its) = closest_intersection(&mut ray, objects) else {
            return self.background;
        };

        let material = its.material();
        if material.is_emissive() {
            return Color::ONE;
        }

        let n = its.normal.normalize();
        let visible = ambient_occlusion(its.point, n, self.samples, self.max_distance, objects, rng);
        material.diffuse_reflectance() * visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrator::test_scenes;
    use lumen_core::{InfinitePlane, Scene};
    use lumen_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn shade(integrator: &dyn Integrator, scene: &Scene, ray: Ray) -> Color {
        let mut rng = StdRng::seed_from_u64(0);
        integrator.compute_color(&ray, scene.objects(), scene.lights(), &mut rng)
    }

    fn down() -> Ray {
        Ray::new(Vec3::new(0.0, 0.5, 0.0), Vec3::NEG_Y)
    }

    fn sideways() -> Ray {
        Ray::new(Vec3::new(0.0, 0.5, 0.0), Vec3::X)
    }

    #[test]
    fn test_every_preview_returns_background_on_miss() {
        let scene = test_scenes::lit_floor(0.5);
        let bg = Color::new(0.2, 0.4, 0.6);
        let shaders: Vec<Box<dyn Integrator>> = vec![
            Box::new(IntersectionShader::new(bg, Color::X)),
            Box::new(DepthShader::new(bg, Color::X, 10.0)),
            Box::new(NormalShader::new(bg)),
            Box::new(ConstantAmbientIntegrator::new(bg, Color::ONE)),
            Box::new(AmbientOcclusionIntegrator::new(bg, 8, 1.0)),
        ];

        for shader in &shaders {
            assert_eq!(shade(shader.as_ref(), &scene, sideways()), bg);
        }
    }

    #[test]
    fn test_intersection_and_depth() {
        let scene = test_scenes::lit_floor(0.5);

        let hit = IntersectionShader::new(Color::ZERO, Color::new(1.0, 0.0, 0.0));
        assert_eq!(shade(&hit, &scene, down()), Color::new(1.0, 0.0, 0.0));

        // Floor is 0.5 away: half of max distance 1
        let depth = DepthShader::new(Color::ZERO, Color::ONE, 1.0);
        let color = shade(&depth, &scene, down());
        assert!((color.x - 0.5).abs() < 1e-5);

        // Beyond max distance fades to black
        let depth = DepthShader::new(Color::ZERO, Color::ONE, 0.25);
        assert_eq!(shade(&depth, &scene, down()), Color::ZERO);
    }

    #[test]
    fn test_normal_shader_maps_to_unit_cube() {
        let scene = test_scenes::lit_floor(0.5);
        let color = shade(&NormalShader::new(Color::ZERO), &scene, down());
        assert_eq!(color, Color::new(0.5, 1.0, 0.5));
    }

    #[test]
    fn test_ambient_shaders_use_albedo_and_whiten_emitters() {
        let scene = test_scenes::lit_floor(0.5);
        let up = Ray::new(Vec3::new(0.0, 0.5, 0.0), Vec3::Y);

        let constant = ConstantAmbientIntegrator::new(Color::ZERO, Color::splat(0.2));
        assert_eq!(shade(&constant, &scene, up), Color::ONE);
        assert!((shade(&constant, &scene, down()).x - 0.1).abs() < 1e-6);

        // Probes shorter than the light's height never hit anything
        let ao = AmbientOcclusionIntegrator::new(Color::ZERO, 32, 0.5);
        assert_eq!(shade(&ao, &scene, up), Color::ONE);
        assert_eq!(shade(&ao, &scene, down()), Color::splat(0.5));
    }

    #[test]
    fn test_ambient_occlusion_darkens_under_ceiling() {
        let mut scene = Scene::new();
        scene.add_object(InfinitePlane::new(Vec3::ZERO, Vec3::Y, test_scenes::grey()));
        scene.add_object(InfinitePlane::new(
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::NEG_Y,
            test_scenes::grey(),
        ));

        let ao = AmbientOcclusionIntegrator::new(Color::ZERO, 128, 2.0);
        let color = shade(&ao, &scene, down());

        // Probes with cos θ > 0.5 reach the ceiling: half of them
        assert!(color.x > 0.15 && color.x < 0.35, "color {}", color);
    }
}
