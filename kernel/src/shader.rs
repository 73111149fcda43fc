//! Shader

use crate::geometry::*;
use crate::reflection::*;
use crate::sample::*;
use crate::sampler::*;
use crate::scene::*;
use crate::spectrum::*;
use std::sync::Arc;

/// Surface material. Produces the BSDF and emission at a surface point.
pub trait Shader: Send + Sync {
    /// Returns the BSDF at a surface point, or `None` if the surface does
    /// not scatter light.
    ///
    /// * `sample`  - The sample.
    /// * `context` - Local geometry at the surface point; the shading normal
    ///               faces the viewer.
    fn bsdf(&self, sample: &Sample, context: &IntersectionContext) -> Option<Box<dyn Bsdf>>;

    /// Returns the radiance emitted by the surface towards `omega_out`.
    ///
    /// * `_sample`    - The sample.
    /// * `_context`   - Local geometry at the surface point.
    /// * `_omega_out` - World direction towards the viewer.
    fn emission(
        &self,
        _sample: &Sample,
        _context: &IntersectionContext,
        _omega_out: &Vector3f,
    ) -> Spectral {
        Spectral::ZERO
    }

    /// Register the sub-sequences the shader needs.
    ///
    /// * `_sampler` - The sampler.
    fn request_samples(&self, _sampler: &mut dyn Sampler) {}
}

/// Atomic reference counted `Shader`.
pub type ArcShader = Arc<dyn Shader>;
