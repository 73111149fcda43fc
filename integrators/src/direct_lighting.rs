//! Direct Lighting Integrator

use kernel::common::*;
use kernel::defaults::*;
use kernel::geometry::*;
use kernel::light::*;
use kernel::medium::*;
use kernel::ray_tracer::*;
use kernel::reflection::*;
use kernel::sample::*;
use kernel::sampler::*;
use kernel::scene::*;
use kernel::spectrum::*;

/// Generation from which Russian roulette may terminate specular paths.
const ROULETTE_START_GENERATION: usize = 2;

/// Direct light sampling strategy.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LightStrategy {
    /// Loops over all of the lights and takes the number of samples each of
    /// them asks for, summing the result.
    All,

    /// Takes the samples of a single light, chosen in proportion to its
    /// power, and divides by the probability of choosing it.
    One,
}

impl From<&str> for LightStrategy {
    /// Parse a strategy name; unknown names fall back to `All`.
    ///
    /// * `name` - "all" or "one".
    fn from(name: &str) -> Self {
        match name {
            "one" => Self::One,
            "all" => Self::All,
            _ => {
                warn!("Strategy '{}' for direct lighting unknown. Using 'all'.", name);
                Self::All
            }
        }
    }
}

/// Implements the direct lighting integrator. Lights are sampled with
/// multiple importance sampling at every surface hit; perfectly specular
/// surfaces are followed recursively.
#[derive(Clone)]
pub struct DirectLighting {
    /// Common ray tracer data.
    data: RayTracerData,

    /// Direct light sampling strategy.
    strategy: LightStrategy,

    /// Light selection values, one per generation.
    id_select: Option<SubSequenceId>,

    /// Specular direction samples, one per generation.
    id_specular: Option<SubSequenceId>,

    /// Specular component samples, one per generation.
    id_specular_component: Option<SubSequenceId>,

    /// Russian roulette values, one per generation.
    id_roulette: Option<SubSequenceId>,
}

/// Returns the smallest perfect square holding `n` values.
///
/// * `n` - Number of values needed.
fn specular_request_size(n: usize) -> usize {
    let mut m = round_sqrt(n);
    while m * m < n {
        m += 1;
    }
    m * m
}

impl DirectLighting {
    /// Create a new `DirectLighting` integrator.
    ///
    /// * `strategy`           - Light sampling strategy.
    /// * `max_ray_generation` - Maximum recursion depth.
    pub fn new(strategy: LightStrategy, max_ray_generation: usize) -> Self {
        Self {
            data: RayTracerData::new(max_ray_generation),
            strategy,
            id_select: None,
            id_specular: None,
            id_specular_component: None,
            id_roulette: None,
        }
    }

    /// Returns the light sampling strategy.
    pub fn strategy(&self) -> LightStrategy {
        self.strategy
    }

    /// Returns the value of a per generation 1-D sub-sequence, or 0.5 if it
    /// was not registered.
    ///
    /// * `sample`     - The sample.
    /// * `id`         - The sub-sequence.
    /// * `generation` - Recursion depth of the ray.
    fn generation_value(sample: &Sample, id: Option<SubSequenceId>, generation: usize) -> Float {
        sample
            .sub_sequence_1d(id)
            .get(generation)
            .copied()
            .unwrap_or(0.5)
    }

    /// Returns the radiance of the non-singular lights along a ray that
    /// escaped the scene.
    ///
    /// * `sample` - The sample.
    /// * `ray`    - The ray.
    fn background(&self, sample: &Sample, ray: &Ray) -> Spectral {
        self.data()
            .lights()
            .iter()
            .filter(|light| !light.is_singular())
            .filter_map(|light| light.emission(sample, ray))
            .fold(Spectral::ZERO, |acc, ls| acc + ls.radiance)
    }

    /// Estimate the radiance one light reflects towards the viewer.
    ///
    /// * `sample`   - The sample.
    /// * `bsdf`     - BSDF at the surface point.
    /// * `light`    - The light.
    /// * `context`  - Local geometry at the surface point.
    /// * `omega_in` - Direction towards the viewer, local to `bsdf`.
    /// * `media`    - Media around the surface point.
    fn light_contribution(
        &self,
        sample: &Sample,
        bsdf: &dyn Bsdf,
        light: &LightContext,
        context: &IntersectionContext,
        omega_in: &Vector3f,
        media: &MediumStack,
    ) -> Spectral {
        let light_samples = sample.sub_sequence_2d(light.id_light());
        let bsdf_samples = sample.sub_sequence_2d(light.id_bsdf());
        let component_samples = sample.sub_sequence_1d(light.id_bsdf_component());

        // Both are registered at the same granted size.
        let n = min(bsdf_samples.len(), component_samples.len());

        self.estimate_light_contribution(
            sample,
            bsdf,
            light,
            light_samples,
            &bsdf_samples[..n],
            &component_samples[..n],
            &context.point,
            &context.normal,
            omega_in,
            media,
        )
    }

    /// Returns the direct illumination at a surface point.
    ///
    /// * `sample`     - The sample.
    /// * `bsdf`       - BSDF at the surface point.
    /// * `context`    - Local geometry at the surface point.
    /// * `omega_in`   - Direction towards the viewer, local to `bsdf`.
    /// * `media`      - Media around the surface point.
    /// * `generation` - Recursion depth of the ray.
    fn direct_light(
        &self,
        sample: &Sample,
        bsdf: &dyn Bsdf,
        context: &IntersectionContext,
        omega_in: &Vector3f,
        media: &MediumStack,
        generation: usize,
    ) -> Spectral {
        let lights = self.data().lights();
        match self.strategy {
            LightStrategy::All => lights.iter().fold(Spectral::ZERO, |acc, light| {
                acc + self.light_contribution(sample, bsdf, light, context, omega_in, media)
            }),
            LightStrategy::One => {
                let u = Self::generation_value(sample, self.id_select, generation);
                match lights.sample(u) {
                    Some((light, pdf)) => {
                        self.light_contribution(sample, bsdf, light, context, omega_in, media) / pdf
                    }
                    None => Spectral::ZERO,
                }
            }
        }
    }

    /// Follow the specular components of a BSDF. From
    /// `ROULETTE_START_GENERATION` on, paths are terminated with a
    /// probability depending on their throughput.
    ///
    /// * `sample`     - The sample.
    /// * `bsdf`       - BSDF at the surface point.
    /// * `context`    - Local geometry at the surface point.
    /// * `omega_in`   - Direction towards the viewer, local to `bsdf`.
    /// * `media`      - Media around the surface point.
    /// * `generation` - Recursion depth of the ray.
    fn specular(
        &self,
        sample: &Sample,
        bsdf: &dyn Bsdf,
        context: &IntersectionContext,
        omega_in: &Vector3f,
        media: &MediumStack,
        generation: usize,
    ) -> Spectral {
        if !bsdf.caps().intersects(BsdfCaps::SPECULAR)
            || generation >= self.data().max_ray_generation
        {
            return Spectral::ZERO;
        }

        let u = sample
            .sub_sequence_2d(self.id_specular)
            .get(generation)
            .copied()
            .unwrap_or_else(|| Point2f::new(0.5, 0.5));
        let component = Self::generation_value(sample, self.id_specular_component, generation);
        let out = bsdf.sample(omega_in, &u, component, BsdfCaps::ALL_SPECULAR);
        if out.is_empty() {
            return Spectral::ZERO;
        }

        let mut throughput = out.value * (abs(out.omega_out.z) / out.pdf);
        if generation >= ROULETTE_START_GENERATION {
            let survival = min(throughput.max_component(), 1.0);
            if Self::generation_value(sample, self.id_roulette, generation) >= survival {
                return Spectral::ZERO;
            }
            throughput = throughput / survival;
        }

        let direction = bsdf.frame().to_world(&out.omega_out);
        let is_transmitted = direction.dot(&context.normal) < 0.0;
        let offset = if is_transmitted {
            -context.normal
        } else {
            context.normal
        };
        let start = context.point + offset * (10.0 * TOLERANCE);

        let next_media = match (&context.interior, is_transmitted) {
            (Some(interior), true) => match context.solid_event {
                SolidEvent::Entering => media.entering(interior),
                SolidEvent::Leaving => media.leaving(interior),
            },
            _ => media.clone(),
        };

        let ray = DifferentialRay::new(Ray::new(start, direction));
        let result = self.trace(sample, &ray, generation + 1, &next_media);
        throughput * result.radiance
    }
}

impl RayTracer for DirectLighting {
    /// Returns the common ray tracer data.
    fn data(&self) -> &RayTracerData {
        &self.data
    }

    /// Returns the mutable common ray tracer data.
    fn data_mut(&mut self) -> &mut RayTracerData {
        &mut self.data
    }

    /// Returns an independent copy. The integrator keeps no random state.
    ///
    /// * `seed` - The seed.
    fn fork(&self, seed: u64) -> Box<dyn RayTracer> {
        let mut tracer = self.clone();
        tracer.seed(seed);
        Box::new(tracer)
    }

    /// Request one light selection, specular and roulette value per
    /// generation. The specular directions are requested as a perfect square
    /// of at least one value per generation, so samplers that round 2-D
    /// sizes keep them all.
    ///
    /// * `sampler` - The sampler.
    fn do_request_samples(&mut self, sampler: &mut dyn Sampler) {
        let n = self.data.max_ray_generation + 1;
        self.id_select = match self.strategy {
            LightStrategy::One => sampler.request_sub_sequence_1d(n),
            LightStrategy::All => None,
        };
        self.id_specular = sampler.request_sub_sequence_2d(specular_request_size(n));
        self.id_specular_component = sampler.request_sub_sequence_1d(n);
        self.id_roulette = sampler.request_sub_sequence_1d(n);
    }

    fn do_pre_process(&mut self) {
        debug!(
            "Direct lighting with {} lights, strategy {:?}",
            self.data.lights().len(),
            self.strategy
        );
    }

    fn do_cast_ray(
        &self,
        sample: &Sample,
        ray: &DifferentialRay,
        generation: usize,
        media: &MediumStack,
    ) -> CastResult {
        let scene = match self.data().scene() {
            Some(scene) => scene,
            None => return CastResult::empty(),
        };
        let r = &ray.ray;

        // Escaping rays only see the background directly from the camera;
        // deeper generations get it through BSDF sampling of the lights.
        let intersection = match scene.intersect(sample, r) {
            Some(intersection) => intersection,
            None if generation == 0 => {
                let radiance = self.background(sample, r) * media.transmittance(sample, r);
                return CastResult::new(radiance, INFINITY, 0.0);
            }
            None => return CastResult::empty(),
        };

        let context = scene.local_context(sample, r, &intersection);
        let omega_world_in = -r.direction.normalize();
        let mut radiance = Spectral::ZERO;

        if let Some(shader) = context.shader.as_ref() {
            radiance += shader.emission(sample, &context, &omega_world_in);
            if let Some(bsdf) = shader.bsdf(sample, &context) {
                let omega_in = bsdf.frame().to_local(&omega_world_in);
                let bsdf = bsdf.as_ref();
                radiance += self.direct_light(sample, bsdf, &context, &omega_in, media, generation);
                radiance += self.specular(sample, bsdf, &context, &omega_in, media, generation);
            }
        }

        radiance *= media.transmittance(sample, &r.with_far(intersection.t));

        if radiance.has_nans() {
            error!(
                "Non-finite radiance {:?} at generation {}, using black",
                radiance, generation
            );
            radiance = Spectral::ZERO;
        }

        CastResult::new(radiance, intersection.t, 1.0)
    }
}

impl From<&RenderDefaults> for DirectLighting {
    /// Create a `DirectLighting` integrator sampling all lights.
    ///
    /// * `defaults` - The render defaults.
    fn from(defaults: &RenderDefaults) -> Self {
        Self::new(LightStrategy::All, defaults.max_ray_generation)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_names() {
        assert_eq!(LightStrategy::from("one"), LightStrategy::One);
        assert_eq!(LightStrategy::from("all"), LightStrategy::All);
        assert_eq!(LightStrategy::from("bogus"), LightStrategy::All);
    }

    #[test]
    fn tracer_without_scene_is_empty() {
        let tracer = DirectLighting::new(LightStrategy::All, 4);
        let ray = DifferentialRay::new(Ray::new(Point3f::zero(), Vector3f::new(0.0, 0.0, 1.0)));
        let result = tracer.do_cast_ray(&Sample::new(), &ray, 0, &MediumStack::default());
        assert_eq!(result, CastResult::empty());
    }

    #[test]
    fn specular_requests_are_squares_of_at_least_one_per_generation() {
        assert_eq!(specular_request_size(1), 1);
        assert_eq!(specular_request_size(4), 4);
        assert_eq!(specular_request_size(5), 9);
        assert_eq!(specular_request_size(6), 9);
        assert_eq!(specular_request_size(10), 16);
    }

    #[test]
    fn rounding_samplers_keep_every_specular_generation() {
        let mut sampler = samplers::Stratifier::new(1, Point2i::new(4, 4), 0);
        let mut tracer = DirectLighting::new(LightStrategy::One, 5);
        tracer.do_request_samples(&mut sampler);

        let layout = sampler.data().layout();
        let specular = tracer.id_specular.map_or(0, |id| layout.range_2d(id).len());
        let component = tracer
            .id_specular_component
            .map_or(0, |id| layout.range_1d(id).len());
        assert!(specular >= 6, "{specular} specular samples");
        assert_eq!(component, 6);
    }

    #[test]
    fn missing_sub_sequences_use_the_midpoint() {
        let sample = Sample::new();
        assert_eq!(DirectLighting::generation_value(&sample, None, 3), 0.5);
    }
}
