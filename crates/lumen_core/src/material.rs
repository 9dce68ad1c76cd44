//! Surface materials.
//!
//! Materials are a closed set of variants. Integrators dispatch on the
//! capability flags rather than on the variant itself, so a variant may
//! report more than one capability (an emitter also reflects diffusely).

use lumen_math::{Color, Vec3};
use std::f32::consts::FRAC_1_PI;

/// Value returned by [`Material::index_of_refraction`] for materials that
/// do not transmit light. No physical ratio is negative.
pub const NOT_TRANSMISSIVE: f32 = -1.0;

/// Shading behaviour a material can take part in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Has a diffuse and/or glossy lobe evaluated by `reflectance()`
    DiffuseOrGlossy,
    /// Ideal mirror reflection, realised by the integrator
    Specular,
    /// Ideal refraction, realised by the integrator
    Transmission,
    /// Emits constant radiance
    Emissive,
}

/// A surface's shading behaviour.
///
/// One instance is usually shared (`Arc<Material>`) by every shape that uses it.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    /// Lambertian diffuse lobe plus a Phong specular lobe.
    Phong {
        diffuse: Color,
        specular: Color,
        shininess: f32,
    },
    /// Perfect mirror. `reflectance` tints the reflected radiance.
    Mirror { reflectance: Color },
    /// Perfect refraction with relative index `ior_ratio` = η₁/η₂.
    Transmissive { ior_ratio: f32 },
    /// Constant emitter that also reflects diffusely.
    Emissive { radiance: Color, diffuse: Color },
}

impl Material {
    /// Create a Phong material.
    ///
    /// - `diffuse`: diffuse albedo ρd
    /// - `specular`: specular coefficient ks
    /// - `shininess`: Phong exponent α
    pub fn phong(diffuse: Color, specular: Color, shininess: f32) -> Self {
        Self::Phong {
            diffuse,
            specular,
            shininess,
        }
    }

    /// Create a mirror with the given tint.
    pub fn mirror(reflectance: Color) -> Self {
        Self::Mirror { reflectance }
    }

    /// Create a transmissive material with relative index η₁/η₂.
    pub fn transmissive(ior_ratio: f32) -> Self {
        Self::Transmissive { ior_ratio }
    }

    /// Create an emitter with radiance `radiance` and diffuse albedo `diffuse`.
    pub fn emissive(radiance: Color, diffuse: Color) -> Self {
        Self::Emissive { radiance, diffuse }
    }

    /// Check whether the material takes part in the given kind of shading.
    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::DiffuseOrGlossy => {
                matches!(self, Self::Phong { .. } | Self::Emissive { .. })
            }
            Capability::Specular => matches!(self, Self::Mirror { .. }),
            Capability::Transmission => matches!(self, Self::Transmissive { .. }),
            Capability::Emissive => matches!(self, Self::Emissive { .. }),
        }
    }

    #[inline]
    pub fn has_diffuse_or_glossy(&self) -> bool {
        self.has(Capability::DiffuseOrGlossy)
    }

    #[inline]
    pub fn has_specular(&self) -> bool {
        self.has(Capability::Specular)
    }

    #[inline]
    pub fn has_transmission(&self) -> bool {
        self.has(Capability::Transmission)
    }

    #[inline]
    pub fn is_emissive(&self) -> bool {
        self.has(Capability::Emissive)
    }

    /// True for materials whose scattering is a single ideal direction.
    #[inline]
    pub fn is_delta(&self) -> bool {
        self.has_specular() || self.has_transmission()
    }

    /// Evaluate the BRDF for light arriving along `wi` and leaving along `wo`.
    ///
    /// `n`, `wo` and `wi` all point away from the surface and need not be
    /// normalized. Mirror and transmissive materials return zero; their
    /// scattering is traced by the integrator.
    pub fn reflectance(&self, n: Vec3, wo: Vec3, wi: Vec3) -> Color {
        match self {
            Self::Phong {
                diffuse,
                specular,
                shininess,
            } => {
                let n = n.normalize();
                let wo = wo.normalize();
                let wi = wi.normalize();

                // Mirror of the incident direction about the normal
                let wr = (2.0 * n.dot(wi) * n - wi).normalize();
                let lobe = wo.dot(wr).max(0.0).powf(*shininess);

                *diffuse * FRAC_1_PI + *specular * lobe
            }
            Self::Emissive { diffuse, .. } => *diffuse * FRAC_1_PI,
            Self::Mirror { .. } | Self::Transmissive { .. } => Color::ZERO,
        }
    }

    /// Radiance emitted by the surface. Zero for non-emitters.
    pub fn emissive_radiance(&self) -> Color {
        match self {
            Self::Emissive { radiance, .. } => *radiance,
            _ => Color::ZERO,
        }
    }

    /// Diffuse albedo for Phong and emissive materials, the tint for mirrors,
    /// zero for transmissive materials.
    pub fn diffuse_reflectance(&self) -> Color {
        match self {
            Self::Phong { diffuse, .. } | Self::Emissive { diffuse, .. } => *diffuse,
            Self::Mirror { reflectance } => *reflectance,
            Self::Transmissive { .. } => Color::ZERO,
        }
    }

    /// Relative refractive index η₁/η₂.
    ///
    /// Only meaningful for transmissive materials; any other variant logs a
    /// warning and returns [`NOT_TRANSMISSIVE`].
    pub fn index_of_refraction(&self) -> f32 {
        match self {
            Self::Transmissive { ior_ratio } => *ior_ratio,
            other => {
                log::warn!(
                    "index_of_refraction() called on non-transmissive material {:?}",
                    other
                );
                NOT_TRANSMISSIVE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey_lambert() -> Material {
        Material::phong(Color::splat(0.5), Color::ZERO, 10.0)
    }

    #[test]
    fn test_capabilities_are_exclusive_except_emitters() {
        let phong = grey_lambert();
        assert!(phong.has_diffuse_or_glossy());
        assert!(!phong.has_specular() && !phong.has_transmission() && !phong.is_emissive());

        let mirror = Material::mirror(Color::ONE);
        assert!(mirror.has_specular() && mirror.is_delta());
        assert!(!mirror.has_diffuse_or_glossy());

        let glass = Material::transmissive(1.5);
        assert!(glass.has_transmission() && glass.is_delta());

        let light = Material::emissive(Color::splat(4.0), Color::splat(0.5));
        assert!(light.is_emissive());
        assert!(light.has_diffuse_or_glossy());
        assert!(!light.is_delta());
    }

    #[test]
    fn test_lambert_term_is_albedo_over_pi() {
        let n = Vec3::Y;
        let f = grey_lambert().reflectance(n, Vec3::new(0.3, 1.0, 0.0), Vec3::new(-0.7, 0.2, 0.1));
        assert!((f - Color::splat(0.5 * FRAC_1_PI)).length() < 1e-6);
    }

    #[test]
    fn test_phong_lobe_peaks_in_mirror_direction() {
        let m = Material::phong(Color::ZERO, Color::ONE, 20.0);
        let n = Vec3::Y;
        let wi = Vec3::new(1.0, 1.0, 0.0);

        // Inputs are not normalized on purpose
        let at_mirror = m.reflectance(n * 3.0, Vec3::new(-2.0, 2.0, 0.0), wi);
        let off_mirror = m.reflectance(n, Vec3::new(-0.2, 1.0, 0.0), wi);

        assert!((at_mirror.x - 1.0).abs() < 1e-5);
        assert!(off_mirror.x < at_mirror.x);
        assert!(off_mirror.x >= 0.0);
    }

    #[test]
    fn test_phong_lobe_is_zero_behind_mirror_direction() {
        let m = Material::phong(Color::ZERO, Color::ONE, 5.0);
        let f = m.reflectance(Vec3::Y, Vec3::new(1.0, 0.2, 0.0), Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(f, Color::ZERO);
    }

    #[test]
    fn test_delta_materials_have_no_local_reflectance() {
        let n = Vec3::Z;
        assert_eq!(Material::mirror(Color::ONE).reflectance(n, n, n), Color::ZERO);
        assert_eq!(Material::transmissive(1.5).reflectance(n, n, n), Color::ZERO);
    }

    #[test]
    fn test_emissive_accessors() {
        let light = Material::emissive(Color::new(25.0, 20.0, 15.0), Color::splat(0.5));
        assert_eq!(light.emissive_radiance(), Color::new(25.0, 20.0, 15.0));
        assert_eq!(light.diffuse_reflectance(), Color::splat(0.5));
        assert!((light.reflectance(Vec3::Y, Vec3::Y, Vec3::Y).x - 0.5 * FRAC_1_PI).abs() < 1e-6);

        assert_eq!(grey_lambert().emissive_radiance(), Color::ZERO);
    }

    #[test]
    fn test_mirror_reuses_diffuse_reflectance_as_tint() {
        let mirror = Material::mirror(Color::new(0.9, 0.8, 0.7));
        assert_eq!(mirror.diffuse_reflectance(), Color::new(0.9, 0.8, 0.7));
    }

    #[test]
    fn test_index_of_refraction_sentinel() {
        assert_eq!(Material::transmissive(0.7).index_of_refraction(), 0.7);
        assert_eq!(grey_lambert().index_of_refraction(), NOT_TRANSMISSIVE);
        assert_eq!(Material::mirror(Color::ONE).index_of_refraction(), NOT_TRANSMISSIVE);
        assert!(NOT_TRANSMISSIVE < 0.0);
    }
}
