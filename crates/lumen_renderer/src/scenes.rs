//! Built-in test scenes.

use crate::{Camera, SettingsError};
use lumen_core::{Color, InfinitePlane, Material, PointLight, Scene, Sphere, Square};
use lumen_math::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Which built-in scene to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// Closed box with a ceiling panel light, two glossy spheres and a mirror
    #[default]
    CornellBox,
    /// The Cornell box with a glass sphere in place of the upper glossy one
    CornellGlass,
    /// Three glossy spheres lit by two point lights
    Spheres,
}

impl SceneKind {
    pub const ALL: [SceneKind; 3] = [Self::CornellBox, Self::CornellGlass, Self::Spheres];

    pub fn name(&self) -> &'static str {
        match self {
            Self::CornellBox => "cornell_box",
            Self::CornellGlass => "cornell_glass",
            Self::Spheres => "spheres",
        }
    }

    /// Build the scene and a camera for a `width`×`height` image.
    pub fn build(&self, width: u32, height: u32) -> BuiltScene {
        let (scene, look_from) = match self {
            Self::CornellBox => (cornell_box(false), Vec3::new(0.0, 0.0, -3.0)),
            Self::CornellGlass => (cornell_box(true), Vec3::new(0.0, 0.0, -3.0)),
            Self::Spheres => (spheres(), Vec3::ZERO),
        };

        let mut camera = Camera::new()
            .with_resolution(width, height)
            .with_position(look_from, look_from + Vec3::Z, Vec3::Y)
            .with_fov(60.0);
        camera.initialize();

        log::debug!(
            "Built scene {} with {} objects and {} lights",
            self.name(),
            scene.object_count(),
            scene.light_count()
        );
        BuiltScene { scene, camera }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SceneKind {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| SettingsError::UnknownScene(s.to_string()))
    }
}

/// A scene ready to render together with its camera.
pub struct BuiltScene {
    pub scene: Scene,
    pub camera: Camera,
}

fn phong(diffuse: Color, specular: Color, shininess: f32) -> Arc<Material> {
    Arc::new(Material::phong(diffuse, specular, shininess))
}

/// Walls at x = ±4, y = ±3 and z = 9, seen from z = -3.
///
/// Image left is +x for a camera looking down +z with y up.
fn cornell_box(glass: bool) -> Scene {
    let red = phong(Color::new(0.7, 0.2, 0.3), Color::ZERO, 100.0);
    let green = phong(Color::new(0.2, 0.7, 0.3), Color::ZERO, 100.0);
    let grey = phong(Color::splat(0.8), Color::ZERO, 100.0);
    let blue_glossy_20 = phong(Color::new(0.2, 0.3, 0.8), Color::splat(0.2), 20.0);
    let blue_glossy_80 = phong(Color::new(0.2, 0.3, 0.8), Color::splat(0.2), 80.0);
    let light = Arc::new(Material::emissive(Color::splat(25.0), Color::splat(0.5)));
    let mirror = Arc::new(Material::mirror(Color::ONE));

    let offset = 3.0;
    let radius = 1.0;
    let mut scene = Scene::new();

    scene.add_object(InfinitePlane::new(Vec3::new(offset + 1.0, 0.0, 0.0), Vec3::NEG_X, red));
    scene.add_object(InfinitePlane::new(Vec3::new(-offset - 1.0, 0.0, 0.0), Vec3::X, green));
    scene.add_object(InfinitePlane::new(Vec3::new(0.0, offset, 0.0), Vec3::NEG_Y, grey.clone()));
    scene.add_object(InfinitePlane::new(Vec3::new(0.0, -offset, 0.0), Vec3::Y, grey.clone()));
    scene.add_object(InfinitePlane::new(Vec3::new(0.0, 0.0, 3.0 * offset), Vec3::NEG_Z, grey));

    // Just below the ceiling so the two never coincide
    scene.add_object(Square::new(
        Vec3::new(-1.0, offset - 0.001, 3.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 2.0),
        Vec3::NEG_Y,
        light,
    ));

    scene.add_object(Sphere::new(
        Vec3::new(-1.5, -offset + radius, 6.0),
        radius,
        blue_glossy_20,
    ));
    let upper = if glass {
        Arc::new(Material::transmissive(0.7))
    } else {
        blue_glossy_80
    };
    scene.add_object(Sphere::new(Vec3::new(1.5, -offset + 3.0 * radius, 4.0), radius, upper));

    // Mirror panel standing in front of the right-hand wall
    scene.add_object(Square::new(
        Vec3::new(-offset - 0.999, -offset - 0.2, 3.0),
        Vec3::new(0.0, 4.0, 0.0),
        Vec3::new(0.0, 0.0, 2.0),
        Vec3::X,
        mirror,
    ));

    scene
}

fn spheres() -> Scene {
    let green = phong(Color::new(0.2, 0.7, 0.3), Color::new(0.2, 0.6, 0.2), 50.0);
    let mut scene = Scene::new();

    scene.add_object(Sphere::new(Vec3::new(1.25, 0.5, 4.0), 1.0, green.clone()));
    scene.add_object(Sphere::new(Vec3::new(-1.25, 0.0, 6.0), 1.25, green.clone()));
    scene.add_object(Sphere::new(Vec3::new(-1.0, -0.75, 3.5), 0.25, green));

    scene.add_point_light(PointLight::new(Vec3::new(2.0, 3.0, 1.0), Color::splat(15.0)));
    scene.add_point_light(PointLight::new(Vec3::new(-3.0, 2.0, 2.0), Color::splat(8.0)));
    scene
}
