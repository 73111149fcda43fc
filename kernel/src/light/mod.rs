//! Light

mod light_context;
mod light_contexts;

use crate::common::*;
use crate::geometry::*;
use crate::sample::*;
use crate::spectrum::*;
use std::sync::Arc;

// Re-export
pub use light_context::*;
pub use light_contexts::*;

/// Radiance arriving at a point from a light, together with the ray to test
/// for occlusion. Returned by `SceneLight::sample_emission()` and
/// `SceneLight::emission()`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightSample {
    /// Incident radiance.
    pub radiance: Spectral,

    /// Probability density with respect to solid angle of sampling the
    /// direction with `sample_emission()`.
    pub pdf: Float,

    /// Ray from the receiving point towards the light, bounded to the
    /// unoccluded extent.
    pub shadow_ray: Ray,
}

impl LightSample {
    /// Create a new `LightSample`.
    ///
    /// * `radiance`   - Incident radiance.
    /// * `pdf`        - Probability density.
    /// * `shadow_ray` - Occlusion test ray.
    pub fn new(radiance: Spectral, pdf: Float, shadow_ray: Ray) -> Self {
        Self {
            radiance,
            pdf,
            shadow_ray,
        }
    }
}

/// Light source interface. All geometry is expressed in the light's local
/// space; `LightContext` takes care of the transformations.
pub trait SceneLight: Send + Sync {
    /// Sample the radiance arriving at a target point.
    ///
    /// * `sample`        - The sample.
    /// * `light_sample`  - Sample to pick a point or direction on the light.
    /// * `target`        - Receiving point.
    /// * `target_normal` - Surface normal at the receiving point.
    fn sample_emission(
        &self,
        sample: &Sample,
        light_sample: &Point2f,
        target: &Point3f,
        target_normal: &Vector3f,
    ) -> Option<LightSample>;

    /// Returns the radiance arriving along a ray if it hits the light, with
    /// the density `sample_emission()` would have sampled it with. Singular
    /// lights cannot be hit.
    ///
    /// * `sample` - The sample.
    /// * `ray`    - The ray.
    fn emission(&self, sample: &Sample, ray: &Ray) -> Option<LightSample>;

    /// Returns the total emitted power, given a sphere enclosing the scene.
    ///
    /// * `scene_bound` - Sphere enclosing the scene.
    fn total_power(&self, scene_bound: &BoundingSphere) -> Spectral;

    /// Returns true for lights that cannot be hit by chance, like point or
    /// directional lights.
    fn is_singular(&self) -> bool;

    /// Returns the preferred number of emission samples per evaluation.
    fn number_of_emission_samples(&self) -> usize {
        1
    }
}

/// Atomic reference counted `SceneLight`.
pub type ArcSceneLight = Arc<dyn SceneLight>;
