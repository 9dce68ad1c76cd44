//! Random sampling helpers shared by lights and integrators.

use lumen_math::Vec3;
use rand::{Rng, RngCore};
use std::f32::consts::{FRAC_1_PI, TAU};

/// Density of [`uniform_hemisphere`] with respect to solid angle, 1/2π.
pub const UNIFORM_HEMISPHERE_PDF: f32 = 0.5 * FRAC_1_PI;

/// Uniform f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Sample a unit direction uniformly over the hemisphere around `normal`.
///
/// The normal does not need to be unit length.
pub fn uniform_hemisphere(normal: Vec3, rng: &mut dyn RngCore) -> Vec3 {
    let n = normal.normalize();
    let cos_theta = gen_f32(rng);
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let phi = TAU * gen_f32(rng);

    let (tangent, bitangent) = n.any_orthonormal_pair();
    (tangent * (sin_theta * phi.cos()) + bitangent * (sin_theta * phi.sin()) + n * cos_theta)
        .normalize()
}
