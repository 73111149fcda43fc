//! Point Light Source

use kernel::common::*;
use kernel::geometry::*;
use kernel::light::*;
use kernel::sample::*;
use kernel::spectrum::*;

/// Implements an isotropic point light source that emits the same amount of
/// light in all directions.
#[derive(Clone, Debug)]
pub struct PointLight {
    /// Position in light space.
    pub position: Point3f,

    /// Intensity.
    pub intensity: Spectral,
}

impl PointLight {
    /// Returns a new `PointLight`.
    ///
    /// * `position`  - Position in light space.
    /// * `intensity` - Intensity.
    pub fn new(position: Point3f, intensity: Spectral) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

impl SceneLight for PointLight {
    /// Return the radiance arriving at a target point.
    ///
    /// * `_sample`        - The sample.
    /// * `_light_sample`  - Unused; a point has nothing to sample.
    /// * `target`         - Receiving point.
    /// * `_target_normal` - Surface normal at the receiving point.
    fn sample_emission(
        &self,
        _sample: &Sample,
        _light_sample: &Point2f,
        target: &Point3f,
        _target_normal: &Vector3f,
    ) -> Option<LightSample> {
        let to_light = self.position - *target;
        let distance_squared = to_light.length_squared();
        if distance_squared <= 0.0 {
            return None;
        }
        let distance = distance_squared.sqrt();
        let shadow_ray = Ray::bounded(*target, to_light / distance, TOLERANCE, distance);
        Some(LightSample::new(self.intensity / distance_squared, 1.0, shadow_ray))
    }

    /// A point cannot be hit by a ray.
    fn emission(&self, _sample: &Sample, _ray: &Ray) -> Option<LightSample> {
        None
    }

    /// Returns the total emitted power.
    fn total_power(&self, _scene_bound: &BoundingSphere) -> Spectral {
        self.intensity * FOUR_PI
    }

    fn is_singular(&self) -> bool {
        true
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
    fn inverse_square_falloff() {
        let light = PointLight::new(Point3f::new(0.0, 0.0, 2.0), Spectral::new(8.0));
        let ls = light
            .sample_emission(
                &Sample::new(),
                &Point2f::zero(),
                &Point3f::zero(),
                &Vector3f::new(0.0, 0.0, 1.0),
            )
            .expect("light sample");
        assert!(approx_eq!(Float, ls.radiance[0], 2.0));
        assert_eq!(ls.pdf, 1.0);
        assert_eq!(ls.shadow_ray.direction, Vector3f::new(0.0, 0.0, 1.0));
        assert!(approx_eq!(Float, ls.shadow_ray.t_max, 2.0));
        assert!(light.is_singular());
    }

    #[test]
    fn target_at_light_receives_nothing() {
        let light = PointLight::new(Point3f::zero(), Spectral::ONE);
        assert!(light
            .sample_emission(
                &Sample::new(),
                &Point2f::zero(),
                &Point3f::zero(),
                &Vector3f::new(0.0, 0.0, 1.0),
            )
            .is_none());
    }
}
