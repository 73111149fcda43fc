//! Spheres

use kernel::common::*;
use kernel::geometry::*;
use kernel::medium::*;
use kernel::sample::*;
use kernel::scene::*;
use kernel::shader::*;

/// A solid sphere.
#[derive(Clone)]
pub struct Sphere {
    /// Center.
    pub center: Point3f,

    /// Radius.
    pub radius: Float,

    /// Material of the surface.
    shader: Option<ArcShader>,

    /// Medium filling the sphere.
    interior: Option<ArcMedium>,
}

impl Sphere {
    /// Create a new sphere without material.
    ///
    /// * `center` - Center.
    /// * `radius` - Radius.
    pub fn new(center: Point3f, radius: Float) -> Self {
        if radius < 0.0 {
            warn!("Sphere radius {radius} is negative, using its absolute value");
        }
        Self {
            center,
            radius: abs(radius),
            shader: None,
            interior: None,
        }
    }

    /// Set the material of the surface.
    ///
    /// * `shader` - The material.
    pub fn with_shader(mut self, shader: ArcShader) -> Self {
        self.shader = Some(shader);
        self
    }

    /// Fill the sphere with a medium.
    ///
    /// * `interior` - The medium.
    pub fn with_interior(mut self, interior: ArcMedium) -> Self {
        self.interior = Some(interior);
        self
    }

    /// Returns the ray parameter of the nearest hit within the ray's extent.
    fn hit(&self, ray: &Ray) -> Option<Float> {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        if a == 0.0 {
            return None;
        }
        let half_b = oc.dot(&ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;
        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        [(-half_b - root) / a, (-half_b + root) / a]
            .into_iter()
            .find(|&t| t > ray.t_min && t < ray.t_max)
    }
}

impl SceneObject for Sphere {
    fn intersect(&self, _sample: &Sample, ray: &Ray) -> Option<Intersection> {
        let t = self.hit(ray)?;
        let point = ray.at(t);
        let normal = (point - self.center) / self.radius;
        Some(Intersection {
            t,
            point,
            normal,
            shader: self.shader.clone(),
            interior: self.interior.clone(),
            solid_event: SolidEvent::from_direction(&ray.direction, &normal),
        })
    }

    fn is_intersecting(&self, _sample: &Sample, ray: &Ray) -> bool {
        self.hit(ray).is_some()
    }

    fn bounding_box(&self) -> Bounds3f {
        let r = Vector3f::new(self.radius, self.radius, self.radius);
        Bounds3f::new(self.center - r, self.center + r)
    }

    fn interior(&self) -> Option<ArcMedium> {
        self.interior.clone()
    }

    fn shader(&self) -> Option<ArcShader> {
        self.shader.clone()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
