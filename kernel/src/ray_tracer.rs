//! Ray Tracer

use crate::common::*;
use crate::defaults::*;
use crate::geometry::*;
use crate::light::*;
use crate::medium::*;
use crate::reflection::*;
use crate::sample::*;
use crate::sampler::*;
use crate::sampling::*;
use crate::scene::*;
use crate::spectrum::*;
use std::collections::HashSet;
use std::sync::Arc;

/// Result of tracing a ray.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CastResult {
    /// Radiance arriving along the ray.
    pub radiance: Spectral,

    /// Ray parameter of the first hit; infinite if nothing was hit.
    pub t: Float,

    /// Coverage; 0 if nothing was hit.
    pub alpha: Float,
}

impl CastResult {
    /// Create a new `CastResult`.
    ///
    /// * `radiance` - Radiance arriving along the ray.
    /// * `t`        - Ray parameter of the first hit.
    /// * `alpha`    - Coverage.
    pub fn new(radiance: Spectral, t: Float, alpha: Float) -> Self {
        Self { radiance, t, alpha }
    }

    /// Returns the result for a ray that hits nothing and carries nothing.
    pub fn empty() -> Self {
        Self::new(Spectral::ZERO, INFINITY, 0.0)
    }
}

impl Default for CastResult {
    fn default() -> Self {
        Self::empty()
    }
}

/// State shared by all ray tracers.
#[derive(Clone)]
pub struct RayTracerData {
    /// The scene.
    scene: Option<ArcSceneObject>,

    /// Lights of the scene. Owned per instance; `set_time()` mutates the
    /// transformation caches.
    lights: LightContexts,

    /// Media at the camera.
    media: MediumStack,

    /// Rays beyond this generation are not traced. Primary rays are
    /// generation 0.
    pub max_ray_generation: usize,
}

impl RayTracerData {
    /// Create a new `RayTracerData` without a scene.
    ///
    /// * `max_ray_generation` - Maximum recursion depth.
    pub fn new(max_ray_generation: usize) -> Self {
        Self {
            scene: None,
            lights: LightContexts::default(),
            media: MediumStack::default(),
            max_ray_generation,
        }
    }

    /// Returns the scene.
    pub fn scene(&self) -> Option<&ArcSceneObject> {
        self.scene.as_ref()
    }

    /// Returns the lights of the scene.
    pub fn lights(&self) -> &LightContexts {
        &self.lights
    }

    /// Returns the lights of the scene.
    pub fn lights_mut(&mut self) -> &mut LightContexts {
        &mut self.lights
    }

    /// Returns the media at the camera.
    pub fn media(&self) -> &MediumStack {
        &self.media
    }
}

impl Default for RayTracerData {
    fn default() -> Self {
        Self::new(RenderDefaults::default().max_ray_generation)
    }
}

impl From<&RenderDefaults> for RayTracerData {
    /// Create a new `RayTracerData` from render defaults.
    ///
    /// * `defaults` - The render defaults.
    fn from(defaults: &RenderDefaults) -> Self {
        Self::new(defaults.max_ray_generation)
    }
}

/// Integrator interface.
///
/// A ray tracer is configured once with `set_scene()`, `request_samples()`
/// and `pre_process()`, then forked once per worker thread. Each fork is used
/// by a single thread only.
pub trait RayTracer: Send {
    /// Returns the common ray tracer data.
    fn data(&self) -> &RayTracerData;

    /// Returns the mutable common ray tracer data.
    fn data_mut(&mut self) -> &mut RayTracerData;

    /// Returns an independent copy re-seeded with `seed`.
    ///
    /// * `seed` - The seed.
    fn fork(&self, seed: u64) -> Box<dyn RayTracer>;

    /// Re-seed any random state the tracer keeps.
    ///
    /// * `_seed` - The seed.
    fn seed(&mut self, _seed: u64) {}

    /// Register the integrator's own sub-sequences.
    ///
    /// * `_sampler` - The sampler.
    fn do_request_samples(&mut self, _sampler: &mut dyn Sampler) {}

    /// Compute per scene state ahead of rendering.
    fn do_pre_process(&mut self) {}

    /// Trace a ray that is within the generation limit.
    ///
    /// * `sample`     - The sample.
    /// * `ray`        - The ray.
    /// * `generation` - Recursion depth of the ray.
    /// * `media`      - Media the ray travels through.
    fn do_cast_ray(
        &self,
        sample: &Sample,
        ray: &DifferentialRay,
        generation: usize,
        media: &MediumStack,
    ) -> CastResult;

    /// Attach a scene. Gathers its lights and resets the medium stack to the
    /// scene's interior.
    ///
    /// * `scene` - The scene.
    fn set_scene(&mut self, scene: ArcSceneObject) {
        let data = self.data_mut();
        data.lights = LightContexts::gather(&scene);
        data.media = MediumStack::new(scene.interior());
        data.scene = Some(scene);
    }

    /// Register every sub-sequence needed to render the scene: those of the
    /// lights, of every distinct shader and medium, and of the integrator.
    ///
    /// * `sampler` - The sampler.
    fn request_samples(&mut self, sampler: &mut dyn Sampler) {
        sampler.clear_sub_sequence_requests();
        self.data_mut().lights.request_samples(sampler);
        if let Some(scene) = self.data().scene.clone() {
            let mut visited = HashSet::new();
            request_scene_samples(&scene, sampler, &mut visited);
        }
        self.do_request_samples(sampler);
    }

    /// Compute per scene state ahead of rendering.
    fn pre_process(&mut self) {
        if let Some(scene) = self.data().scene.clone() {
            self.data_mut()
                .lights
                .set_scene_bound(&scene.bounding_sphere());
        }
        self.do_pre_process();
    }

    /// Trace a primary ray.
    ///
    /// * `sample` - The sample.
    /// * `ray`    - The primary ray.
    fn cast_ray(&mut self, sample: &Sample, ray: &DifferentialRay) -> CastResult {
        self.data_mut().lights.set_time(sample.time);
        let media = self.data().media.clone();
        self.trace(sample, ray, 0, &media)
    }

    /// Trace a ray of a given generation. Rays beyond the generation limit
    /// return an empty result.
    ///
    /// * `sample`     - The sample.
    /// * `ray`        - The ray.
    /// * `generation` - Recursion depth of the ray.
    /// * `media`      - Media the ray travels through.
    fn trace(
        &self,
        sample: &Sample,
        ray: &DifferentialRay,
        generation: usize,
        media: &MediumStack,
    ) -> CastResult {
        if generation > self.data().max_ray_generation {
            return CastResult::empty();
        }
        self.do_cast_ray(sample, ray, generation, media)
    }

    /// Estimate the radiance a light reflects towards the viewer at a
    /// surface point, combining light and BSDF sampling with the power
    /// heuristic. BSDF sampling is skipped for singular lights.
    ///
    /// * `sample`            - The sample.
    /// * `bsdf`              - BSDF at the surface point.
    /// * `light`             - The light.
    /// * `light_samples`     - Samples for light sampling.
    /// * `bsdf_samples`      - Samples for BSDF sampling.
    /// * `component_samples` - Samples to select BSDF components.
    /// * `target`            - The surface point.
    /// * `target_normal`     - Shading normal at the surface point.
    /// * `omega_in`          - Direction towards the viewer, local to `bsdf`.
    /// * `media`             - Media around the surface point.
    #[allow(clippy::too_many_arguments)]
    fn estimate_light_contribution(
        &self,
        sample: &Sample,
        bsdf: &dyn Bsdf,
        light: &LightContext,
        light_samples: &[Point2f],
        bsdf_samples: &[Point2f],
        component_samples: &[Float],
        target: &Point3f,
        target_normal: &Vector3f,
        omega_in: &Vector3f,
        media: &MediumStack,
    ) -> Spectral {
        debug_assert_eq!(bsdf_samples.len(), component_samples.len());

        let scene = match self.data().scene.as_ref() {
            Some(scene) => scene,
            None => return Spectral::ZERO,
        };

        let nl = light_samples.len() as Float;
        let nb = if light.is_singular() {
            0.0
        } else {
            bsdf_samples.len() as Float
        };

        let mut caps = BsdfCaps::ALL_DIFFUSE | BsdfCaps::GLOSSY;
        if !light.is_singular() {
            caps |= BsdfCaps::SPECULAR;
        }

        let frame = bsdf.frame();
        let start = *target + *target_normal * (10.0 * TOLERANCE);
        let mut result = Spectral::ZERO;

        for u in light_samples {
            let ls = match light.sample_emission(sample, u, &start, target_normal) {
                Some(ls) if ls.pdf > 0.0 && !ls.radiance.is_black() => ls,
                _ => continue,
            };
            let omega_out = frame.to_local(&ls.shadow_ray.direction.normalize());
            let out = bsdf.evaluate(omega_in, &omega_out, caps);
            if out.is_empty() || scene.is_intersecting(sample, &ls.shadow_ray) {
                continue;
            }
            let trans = media.transmittance(sample, &ls.shadow_ray);
            let weight = power_heuristic(nl * ls.pdf, nb * out.pdf);
            let scale = weight * abs(omega_out.z) / (nl * ls.pdf);
            result += out.value * trans * ls.radiance * scale;
        }

        if nb > 0.0 {
            for (u, &component) in bsdf_samples.iter().zip(component_samples) {
                let out = bsdf.sample(omega_in, u, component, caps);
                if out.is_empty() {
                    continue;
                }
                let ray = Ray::new(start, frame.to_world(&out.omega_out));
                let ls = match light.emission(sample, &ray) {
                    Some(ls) if ls.pdf > 0.0 && !ls.radiance.is_black() => ls,
                    _ => continue,
                };
                if scene.is_intersecting(sample, &ls.shadow_ray) {
                    continue;
                }
                let trans = media.transmittance(sample, &ls.shadow_ray);
                let weight = if out.used_caps.contains(BsdfCaps::SPECULAR) {
                    1.0
                } else {
                    power_heuristic(nb * out.pdf, nl * ls.pdf)
                };
                let scale = weight * abs(out.omega_out.z) / (nb * out.pdf);
                result += out.value * trans * ls.radiance * scale;
            }
        }

        result
    }
}

/// Request the sub-sequences of every shader and medium in a scene graph,
/// once per distinct object.
///
/// * `node`    - Scene graph node.
/// * `sampler` - The sampler.
/// * `visited` - Addresses of shaders and media already handled.
fn request_scene_samples(
    node: &ArcSceneObject,
    sampler: &mut dyn Sampler,
    visited: &mut HashSet<*const ()>,
) {
    if let Some(shader) = node.shader() {
        if visited.insert(Arc::as_ptr(&shader) as *const ()) {
            shader.request_samples(sampler);
        }
    }
    if let Some(medium) = node.interior() {
        if visited.insert(Arc::as_ptr(&medium) as *const ()) {
            medium.request_samples(sampler);
        }
    }
    for child in node.children() {
        request_scene_samples(child, sampler, visited);
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    /// Adds one unit of radiance per generation it recurses through.
    #[derive(Clone)]
    struct Counting {
        data: RayTracerData,
    }

    impl RayTracer for Counting {
        fn data(&self) -> &RayTracerData {
            &self.data
        }

        fn data_mut(&mut self) -> &mut RayTracerData {
            &mut self.data
        }

        fn fork(&self, _seed: u64) -> Box<dyn RayTracer> {
            Box::new(self.clone())
        }

        fn do_cast_ray(
            &self,
            sample: &Sample,
            ray: &DifferentialRay,
            generation: usize,
            media: &MediumStack,
        ) -> CastResult {
            let next = self.trace(sample, ray, generation + 1, media);
            CastResult::new(next.radiance + Spectral::ONE, 1.0, 1.0)
        }
    }

    fn primary() -> DifferentialRay {
        DifferentialRay::new(Ray::new(Point3f::zero(), Vector3f::new(0.0, 0.0, 1.0)))
    }

    #[test]
    fn recursion_stops_at_max_generation() {
        let mut tracer = Counting {
            data: RayTracerData::new(3),
        };
        let sample = Sample::new();
        let result = tracer.cast_ray(&sample, &primary());
        assert_eq!(result.radiance, Spectral::new(4.0));

        let media = MediumStack::default();
        let cut = tracer.trace(&sample, &primary(), 4, &media);
        assert_eq!(cut, CastResult::empty());
        assert_eq!(cut.alpha, 0.0);
    }

    struct Empty;

    impl SceneObject for Empty {
        fn intersect(&self, _sample: &Sample, _ray: &Ray) -> Option<Intersection> {
            None
        }

        fn bounding_box(&self) -> Bounds3f {
            Bounds3f::new(Point3f::new(-1.0, -1.0, -1.0), Point3f::new(1.0, 1.0, 1.0))
        }
    }

    /// Light straight above the origin at unit distance.
    struct Above;

    impl SceneLight for Above {
        fn sample_emission(
            &self,
            _sample: &Sample,
            _light_sample: &Point2f,
            target: &Point3f,
            _target_normal: &Vector3f,
        ) -> Option<LightSample> {
            let to_light = Point3f::new(0.0, 0.0, 1.0) - *target;
            let distance = to_light.length();
            let ray = Ray::bounded(*target, to_light / distance, 0.0, distance);
            Some(LightSample::new(Spectral::new(2.0), 1.0, ray))
        }

        fn emission(&self, _sample: &Sample, _ray: &Ray) -> Option<LightSample> {
            None
        }

        fn total_power(&self, _scene_bound: &BoundingSphere) -> Spectral {
            Spectral::new(2.0)
        }

        fn is_singular(&self) -> bool {
            true
        }
    }

    struct Constant(Frame);

    impl Bsdf for Constant {
        fn frame(&self) -> &Frame {
            &self.0
        }

        fn caps(&self) -> BsdfCaps {
            BsdfCaps::REFLECTION | BsdfCaps::DIFFUSE
        }

        fn evaluate(
            &self,
            _omega_in: &Vector3f,
            omega_out: &Vector3f,
            _allowed_caps: BsdfCaps,
        ) -> BsdfOut {
            if omega_out.z > 0.0 {
                BsdfOut::new(Spectral::new(0.25), 1.0)
            } else {
                BsdfOut::default()
            }
        }

        fn sample(
            &self,
            _omega_in: &Vector3f,
            _sample: &Point2f,
            _component_sample: Float,
            _allowed_caps: BsdfCaps,
        ) -> SampleBsdfOut {
            SampleBsdfOut::default()
        }
    }

    #[test]
    fn singular_light_uses_light_samples_only() {
        let mut tracer = Counting {
            data: RayTracerData::new(3),
        };
        let scene: ArcSceneObject = Arc::new(Empty);
        tracer.set_scene(scene);
        let light = LightContext::new(Arc::new(Above), vec![]);
        let bsdf = Constant(Frame::from_normal(&Vector3f::new(0.0, 0.0, 1.0)));
        let light_samples = [Point2f::new(0.5, 0.5), Point2f::new(0.1, 0.9)];
        let bsdf_samples = [Point2f::new(0.5, 0.5)];

        let result = tracer.estimate_light_contribution(
            &Sample::new(),
            &bsdf,
            &light,
            &light_samples,
            &bsdf_samples,
            &[0.5],
            &Point3f::zero(),
            &Vector3f::new(0.0, 0.0, 1.0),
            &Vector3f::new(0.0, 0.0, 1.0),
            &MediumStack::default(),
        );
        assert!(approx_eq!(Float, result[0], 0.5, epsilon = 1e-5));
        assert!(approx_eq!(Float, result[2], 0.5, epsilon = 1e-5));
    }

    #[test]
    fn no_scene_estimates_nothing() {
        let tracer = Counting {
            data: RayTracerData::default(),
        };
        let light = LightContext::new(Arc::new(Above), vec![]);
        let bsdf = Constant(Frame::from_normal(&Vector3f::new(0.0, 0.0, 1.0)));
        let result = tracer.estimate_light_contribution(
            &Sample::new(),
            &bsdf,
            &light,
            &[Point2f::new(0.5, 0.5)],
            &[],
            &[],
            &Point3f::zero(),
            &Vector3f::new(0.0, 0.0, 1.0),
            &Vector3f::new(0.0, 0.0, 1.0),
            &MediumStack::default(),
        );
        assert!(result.is_black());
    }
}
