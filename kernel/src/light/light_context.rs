//! Light Context

use super::*;
use crate::sampler::*;
use crate::scene::*;

/// Cached light to world transformation, tagged with the time it is valid
/// for. `time` is `None` until the first computation.
#[derive(Copy, Clone, Debug, Default)]
struct TransformCache {
    time: Option<Float>,
    local_to_world: Transform,
}

/// A light bound to its path in the scene graph, with the resolved world
/// transformation and the sub-sequences used to sample it.
#[derive(Clone)]
pub struct LightContext {
    /// The light.
    light: ArcSceneLight,

    /// Scene graph nodes from the root down to the node holding the light.
    path: Vec<ArcSceneObject>,

    /// True if any node of `path` moves over time.
    has_motion: bool,

    /// World transformation cache.
    cache: TransformCache,

    /// 2-D sub-sequence for sampling the light.
    id_light: Option<SubSequenceId>,

    /// 2-D sub-sequence for sampling the BSDF.
    id_bsdf: Option<SubSequenceId>,

    /// 1-D sub-sequence for selecting a BSDF component.
    id_bsdf_component: Option<SubSequenceId>,
}

impl LightContext {
    /// Create a new `LightContext`.
    ///
    /// * `light` - The light.
    /// * `path`  - Scene graph nodes from the root down to the light's node.
    pub fn new(light: ArcSceneLight, path: Vec<ArcSceneObject>) -> Self {
        let has_motion = path.iter().any(|node| node.has_motion());
        Self {
            light,
            path,
            has_motion,
            cache: TransformCache::default(),
            id_light: None,
            id_bsdf: None,
            id_bsdf_component: None,
        }
    }

    /// Returns the light.
    pub fn light(&self) -> &ArcSceneLight {
        &self.light
    }

    /// Returns true if the light cannot be hit by chance.
    pub fn is_singular(&self) -> bool {
        self.light.is_singular()
    }

    /// Returns true if the light moves over time.
    pub fn has_motion(&self) -> bool {
        self.has_motion
    }

    /// Register the light, BSDF and BSDF component sub-sequences, sized to
    /// the light's number of emission samples. The component sub-sequence
    /// gets the size the sampler granted the BSDF sub-sequence.
    ///
    /// * `sampler` - The sampler.
    pub fn request_samples(&mut self, sampler: &mut dyn Sampler) {
        let n = self.light.number_of_emission_samples();
        self.id_light = sampler.request_sub_sequence_2d(n);
        self.id_bsdf = sampler.request_sub_sequence_2d(n);
        let n_bsdf = self
            .id_bsdf
            .map_or(0, |id| sampler.data().layout().range_2d(id).len());
        self.id_bsdf_component = sampler.request_sub_sequence_1d(n_bsdf);
    }

    /// Returns the 2-D sub-sequence for sampling the light.
    pub fn id_light(&self) -> Option<SubSequenceId> {
        self.id_light
    }

    /// Returns the 2-D sub-sequence for sampling the BSDF.
    pub fn id_bsdf(&self) -> Option<SubSequenceId> {
        self.id_bsdf
    }

    /// Returns the 1-D sub-sequence for selecting a BSDF component.
    pub fn id_bsdf_component(&self) -> Option<SubSequenceId> {
        self.id_bsdf_component
    }

    /// Update the world transformation for a time. It is only recomputed if
    /// it never was, or if the path moves and the time differs from the
    /// cached one. Not thread-safe; every tracer owns its own contexts.
    ///
    /// * `time` - The time.
    pub fn set_time(&mut self, time: Float) {
        let is_valid = match self.cache.time {
            None => false,
            Some(cached) => !self.has_motion || cached == time,
        };
        if !is_valid {
            let local_to_world = self
                .path
                .iter()
                .fold(Transform::identity(), |parent, node| node.local_space(time, &parent));
            self.cache = TransformCache {
                time: Some(time),
                local_to_world,
            };
        }
    }

    /// Returns the light to world transformation for the last time set.
    pub fn local_to_world(&self) -> &Transform {
        &self.cache.local_to_world
    }

    /// Sample the radiance arriving at a world space target point.
    ///
    /// * `sample`        - The sample.
    /// * `light_sample`  - Sample to pick a point or direction on the light.
    /// * `target`        - Receiving point.
    /// * `target_normal` - Surface normal at the receiving point.
    pub fn sample_emission(
        &self,
        sample: &Sample,
        light_sample: &Point2f,
        target: &Point3f,
        target_normal: &Vector3f,
    ) -> Option<LightSample> {
        let world_to_local = self.cache.local_to_world.inverse();
        let local_target = world_to_local.transform_point(target);
        let local_normal = world_to_local.transform_normal(target_normal).normalize();
        self.light
            .sample_emission(sample, light_sample, &local_target, &local_normal)
            .map(|ls| self.to_world(ls))
    }

    /// Returns the radiance arriving along a world space ray if it hits the
    /// light.
    ///
    /// * `sample` - The sample.
    /// * `ray`    - The ray.
    pub fn emission(&self, sample: &Sample, ray: &Ray) -> Option<LightSample> {
        let local_ray = self.cache.local_to_world.inverse().transform_ray(ray);
        self.light
            .emission(sample, &local_ray)
            .map(|ls| self.to_world(ls))
    }

    /// Returns the total emitted power.
    ///
    /// * `scene_bound` - Sphere enclosing the scene.
    pub fn total_power(&self, scene_bound: &BoundingSphere) -> Spectral {
        self.light.total_power(scene_bound)
    }

    fn to_world(&self, ls: LightSample) -> LightSample {
        LightSample {
            shadow_ray: self.cache.local_to_world.transform_ray(&ls.shadow_ray),
            ..ls
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
