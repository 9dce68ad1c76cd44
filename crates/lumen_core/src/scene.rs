//! Scene storage.
//!
//! The scene owns its shapes and the lights derived from them. Adding an
//! emissive shape registers the matching area light in the same call and
//! reports both indices back to the caller.

use std::sync::Arc;

use crate::{LightSource, PointLight, Shape};

/// Indices assigned by [`Scene::add_object`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registered {
    /// Index in [`Scene::objects`]
    pub object: usize,
    /// Index in [`Scene::lights`] when the shape was registered as an emitter
    pub light: Option<usize>,
}

/// Objects and light sources of a render.
#[derive(Default)]
pub struct Scene {
    objects: Vec<Arc<dyn Shape>>,
    lights: Vec<LightSource>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape.
    ///
    /// Emissive shapes that can be sampled by area also become area lights.
    /// An emissive shape that cannot is kept as geometry only (it is still
    /// visible and still found by hemisphere sampling).
    pub fn add_object<S: Shape + 'static>(&mut self, shape: S) -> Registered {
        let shape = Arc::new(shape);
        let object = self.objects.len();

        let light = if shape.material().is_emissive() {
            match Arc::clone(&shape).area_light() {
                Some(area) => {
                    self.lights.push(LightSource::Area(area));
                    log::debug!("Object {} registered as area light {}", object, self.lights.len() - 1);
                    Some(self.lights.len() - 1)
                }
                None => {
                    log::warn!(
                        "Emissive object {} cannot be sampled as an area light; added as geometry only",
                        object
                    );
                    None
                }
            }
        } else {
            None
        };

        self.objects.push(shape);
        Registered { object, light }
    }

    /// Add a point light, returning its index in [`Scene::lights`].
    pub fn add_point_light(&mut self, light: PointLight) -> usize {
        self.lights.push(LightSource::Point(light));
        self.lights.len() - 1
    }

    pub fn objects(&self) -> &[Arc<dyn Shape>] {
        &self.objects
    }

    pub fn lights(&self) -> &[LightSource] {
        &self.lights
    }

    /// Get the number of objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Get the number of light sources.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}
