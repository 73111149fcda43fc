//! Sky Light Source

use kernel::common::*;
use kernel::geometry::*;
use kernel::light::*;
use kernel::sample::*;
use kernel::sampling::*;
use kernel::spectrum::*;

/// Implements a uniform sky surrounding the whole scene. Rays that escape the
/// scene see its radiance.
#[derive(Clone, Debug)]
pub struct SkyLight {
    /// Radiance of the sky.
    pub radiance: Spectral,

    /// Number of emission samples per evaluation.
    pub number_of_samples: usize,
}

impl SkyLight {
    /// Returns a new `SkyLight`.
    ///
    /// * `radiance`          - Radiance of the sky.
    /// * `number_of_samples` - Number of emission samples per evaluation.
    pub fn new(radiance: Spectral, number_of_samples: usize) -> Self {
        Self {
            radiance,
            number_of_samples: number_of_samples.max(1),
        }
    }
}

impl SceneLight for SkyLight {
    /// Sample a direction uniformly over the sphere.
    ///
    /// * `_sample`        - The sample.
    /// * `light_sample`   - Sample to pick the direction.
    /// * `target`         - Receiving point.
    /// * `_target_normal` - Surface normal at the receiving point.
    fn sample_emission(
        &self,
        _sample: &Sample,
        light_sample: &Point2f,
        target: &Point3f,
        _target_normal: &Vector3f,
    ) -> Option<LightSample> {
        let direction = uniform_sample_sphere(light_sample);
        let shadow_ray = Ray::bounded(*target, direction, TOLERANCE, INFINITY);
        Some(LightSample::new(self.radiance, uniform_sphere_pdf(), shadow_ray))
    }

    /// Every ray eventually hits the sky.
    ///
    /// * `_sample` - The sample.
    /// * `ray`     - The ray.
    fn emission(&self, _sample: &Sample, ray: &Ray) -> Option<LightSample> {
        let direction = ray.direction.normalize();
        let shadow_ray = Ray::bounded(ray.origin, direction, TOLERANCE, INFINITY);
        Some(LightSample::new(self.radiance, uniform_sphere_pdf(), shadow_ray))
    }

    /// Returns the power falling onto the scene's cross section.
    ///
    /// * `scene_bound` - Sphere enclosing the scene.
    fn total_power(&self, scene_bound: &BoundingSphere) -> Spectral {
        self.radiance * scene_bound.cross_section()
    }

    fn is_singular(&self) -> bool {
        false
    }

    fn number_of_emission_samples(&self) -> usize {
        self.number_of_samples
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn emission_and_sampling_share_the_density() {
        let sky = SkyLight::new(Spectral::new(3.0), 4);
        let up = Vector3f::new(0.0, 0.0, 1.0);
        let ls = sky
            .sample_emission(&Sample::new(), &Point2f::new(0.3, 0.6), &Point3f::zero(), &up)
            .expect("light sample");
        let hit = sky
            .emission(&Sample::new(), &Ray::new(Point3f::zero(), ls.shadow_ray.direction * 2.0))
            .expect("sky hit");
        assert!(approx_eq!(Float, ls.pdf, hit.pdf));
        assert!(approx_eq!(Float, hit.shadow_ray.direction.length(), 1.0, epsilon = 1e-5));
        assert_eq!(hit.radiance, Spectral::new(3.0));
        assert!(!sky.is_singular());
        assert_eq!(sky.number_of_emission_samples(), 4);
    }
}
