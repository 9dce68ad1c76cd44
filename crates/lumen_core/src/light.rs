//! Light sources.
//!
//! Point lights are placed explicitly. Area lights are never built by hand:
//! the scene derives one from every emissive square it is given.

use crate::{Color, Shape, Square};
use lumen_math::Vec3;
use rand::RngCore;
use std::sync::Arc;

/// Omnidirectional point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    /// Radiant intensity (W/sr)
    pub intensity: Color,
}

impl PointLight {
    pub fn new(position: Vec3, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

/// Light emitted by an emissive square, sampled uniformly by area.
///
/// Shares the square with the scene's object list.
#[derive(Clone)]
pub struct AreaLight {
    emitter: Arc<Square>,
}

impl AreaLight {
    pub fn new(emitter: Arc<Square>) -> Self {
        Self { emitter }
    }
}

impl std::fmt::Debug for AreaLight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AreaLight")
            .field("corner", &self.emitter.corner())
            .field("normal", &self.emitter.normal())
            .field("area", &self.emitter.area())
            .finish()
    }
}

/// A light source in the scene.
#[derive(Debug, Clone)]
pub enum LightSource {
    Point(PointLight),
    Area(AreaLight),
}

impl LightSource {
    /// Sample a position on the light.
    ///
    /// Point lights always return their position. Area lights return a point
    /// uniformly distributed over the emitter, i.e. with density 1/area.
    pub fn sample_position(&self, rng: &mut dyn RngCore) -> Vec3 {
        match self {
            Self::Point(light) => light.position,
            Self::Area(light) => light.emitter.sample_point(rng),
        }
    }

    /// Emitted quantity: intensity for point lights, the emitter material's
    /// radiance for area lights.
    pub fn intensity(&self) -> Color {
        match self {
            Self::Point(light) => light.intensity,
            Self::Area(light) => light.emitter.material().emissive_radiance(),
        }
    }

    /// Emitting area. Zero for point lights.
    pub fn area(&self) -> f32 {
        match self {
            Self::Point(_) => 0.0,
            Self::Area(light) => light.emitter.area(),
        }
    }

    /// Unit normal of the emitter. Zero for point lights.
    pub fn normal(&self) -> Vec3 {
        match self {
            Self::Point(_) => Vec3::ZERO,
            Self::Area(light) => light.emitter.normal(),
        }
    }

    /// True for lights with no extent (sampled with a delta distribution).
    #[inline]
    pub fn is_delta(&self) -> bool {
        matches!(self, Self::Point(_))
    }
}

impl From<PointLight> for LightSource {
    fn from(light: PointLight) -> Self {
        Self::Point(light)
    }
}

impl From<AreaLight> for LightSource {
    fn from(light: AreaLight) -> Self {
        Self::Area(light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Material;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn panel_light() -> LightSource {
        let square = Square::new(
            Vec3::new(-0.5, 2.0, -0.5),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(0.0, -1.0, 0.0),
            Arc::new(Material::emissive(Color::splat(10.0), Color::splat(0.5))),
        );
        LightSource::Area(AreaLight::new(Arc::new(square)))
    }

    #[test]
    fn test_point_light_accessors() {
        let light: LightSource = PointLight::new(Vec3::new(1.0, 2.0, 3.0), Color::splat(5.0)).into();
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(light.sample_position(&mut rng), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(light.intensity(), Color::splat(5.0));
        assert_eq!(light.area(), 0.0);
        assert_eq!(light.normal(), Vec3::ZERO);
        assert!(light.is_delta());
    }

    #[test]
    fn test_area_light_accessors() {
        let light = panel_light();

        assert_eq!(light.intensity(), Color::splat(10.0));
        assert!((light.area() - 2.0).abs() < 1e-6);
        assert_eq!(light.normal(), Vec3::new(0.0, -1.0, 0.0));
        assert!(!light.is_delta());
    }

    #[test]
    fn test_area_light_samples_are_uniform() {
        let light = panel_light();
        let mut rng = StdRng::seed_from_u64(9);
        let n = 20_000;

        let mean = (0..n)
            .map(|_| light.sample_position(&mut rng))
            .fold(Vec3::ZERO, |acc, p| acc + p)
            / n as f32;

        // Uniform samples average to the centre of the panel
        assert!((mean - Vec3::new(0.0, 2.0, 0.5)).length() < 0.02, "mean {}", mean);
    }
}
