//! Directional Light Source

use kernel::common::*;
use kernel::geometry::*;
use kernel::light::*;
use kernel::sample::*;
use kernel::spectrum::*;

/// Implements a light source infinitely far away that illuminates the scene
/// from a single direction.
#[derive(Clone, Debug)]
pub struct DirectionalLight {
    /// Unit direction the light travels in, in light space.
    pub direction: Vector3f,

    /// Irradiance on a surface facing the light.
    pub irradiance: Spectral,
}

impl DirectionalLight {
    /// Returns a new `DirectionalLight`.
    ///
    /// * `direction`  - Direction the light travels in.
    /// * `irradiance` - Irradiance on a surface facing the light.
    pub fn new(direction: Vector3f, irradiance: Spectral) -> Self {
        if direction.length_squared() == 0.0 {
            warn!("Directional light has a zero direction and will not illuminate anything");
        }
        Self {
            direction: direction.normalize(),
            irradiance,
        }
    }
}

impl SceneLight for DirectionalLight {
    fn sample_emission(
        &self,
        _sample: &Sample,
        _light_sample: &Point2f,
        target: &Point3f,
        _target_normal: &Vector3f,
    ) -> Option<LightSample> {
        let shadow_ray = Ray::bounded(*target, -self.direction, TOLERANCE, INFINITY);
        Some(LightSample::new(self.irradiance, 1.0, shadow_ray))
    }

    fn emission(&self, _sample: &Sample, _ray: &Ray) -> Option<LightSample> {
        None
    }

    /// Returns the power falling onto the scene's cross section.
    ///
    /// * `scene_bound` - Sphere enclosing the scene.
    fn total_power(&self, scene_bound: &BoundingSphere) -> Spectral {
        self.irradiance * scene_bound.cross_section()
    }

    fn is_singular(&self) -> bool {
        true
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
