//! Planes

use kernel::common::*;
use kernel::geometry::*;
use kernel::sample::*;
use kernel::scene::*;
use kernel::shader::*;

/// A circular patch of a plane. The normal points to the front side.
#[derive(Clone)]
pub struct Plane {
    /// Center of the patch.
    pub center: Point3f,

    /// Unit normal.
    pub normal: Vector3f,

    /// Radius of the patch.
    pub radius: Float,

    /// Material of the surface.
    shader: Option<ArcShader>,
}

impl Plane {
    /// Create a new `Plane` patch without material.
    ///
    /// * `center` - Center of the patch.
    /// * `normal` - Normal of the front side.
    /// * `radius` - Radius of the patch.
    pub fn new(center: Point3f, normal: Vector3f, radius: Float) -> Self {
        Self {
            center,
            normal: normal.normalize(),
            radius: abs(radius),
            shader: None,
        }
    }

    /// Set the material of the surface.
    ///
    /// * `shader` - The material.
    pub fn with_shader(mut self, shader: ArcShader) -> Self {
        self.shader = Some(shader);
        self
    }

    fn hit(&self, ray: &Ray) -> Option<Float> {
        let denominator = self.normal.dot(&ray.direction);
        if denominator == 0.0 {
            return None;
        }
        let t = (self.center - ray.origin).dot(&self.normal) / denominator;
        if !(t > ray.t_min && t < ray.t_max) {
            return None;
        }
        (ray.at(t).distance(&self.center) <= self.radius).then_some(t)
    }
}

impl SceneObject for Plane {
    fn intersect(&self, _sample: &Sample, ray: &Ray) -> Option<Intersection> {
        let t = self.hit(ray)?;
        Some(Intersection {
            t,
            point: ray.at(t),
            normal: self.normal,
            shader: self.shader.clone(),
            interior: None,
            solid_event: SolidEvent::from_direction(&ray.direction, &self.normal),
        })
    }

    fn is_intersecting(&self, _sample: &Sample, ray: &Ray) -> bool {
        self.hit(ray).is_some()
    }

    fn bounding_box(&self) -> Bounds3f {
        let r = Vector3f::new(self.radius, self.radius, self.radius);
        Bounds3f::new(self.center - r, self.center + r)
    }

    fn shader(&self) -> Option<ArcShader> {
        self.shader.clone()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
