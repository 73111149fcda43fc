//! Rays

#![allow(dead_code)]
use super::*;
use crate::common::*;

/// A ray bounded to the parametric interval `[t_min, t_max]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    /// Origin.
    pub origin: Point3f,

    /// Direction.
    pub direction: Vector3f,

    /// Near extent of the ray.
    pub t_min: Float,

    /// Far extent of the ray.
    pub t_max: Float,
}

impl Ray {
    /// Returns a ray extending from the origin to infinity.
    ///
    /// * `origin`    - Origin.
    /// * `direction` - Direction.
    pub fn new(origin: Point3f, direction: Vector3f) -> Self {
        Self::bounded(origin, direction, 0.0, INFINITY)
    }

    /// Returns a ray restricted to `[t_min, t_max]`.
    ///
    /// * `origin`    - Origin.
    /// * `direction` - Direction.
    /// * `t_min`     - Near extent of the ray.
    /// * `t_max`     - Far extent of the ray.
    pub fn bounded(origin: Point3f, direction: Vector3f, t_min: Float, t_max: Float) -> Self {
        Self {
            origin,
            direction,
            t_min,
            t_max,
        }
    }

    /// Returns the point at a given parameter along the ray.
    ///
    /// * `t` - The parameter.
    pub fn at(&self, t: Float) -> Point3f {
        self.origin + self.direction * t
    }

    /// Returns a copy of this ray with a new far extent.
    ///
    /// * `t_max` - The far extent.
    pub fn with_far(&self, t_max: Float) -> Self {
        Self { t_max, ..*self }
    }

    /// Returns the length of the bounded interval in world units.
    pub fn length(&self) -> Float {
        (self.t_max - self.t_min) * self.direction.length()
    }
}

/// Auxilliary rays offset by one pixel in x and y direction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayDifferential {
    /// Origin of the ray offset in x.
    pub rx_origin: Point3f,

    /// Direction of the ray offset in x.
    pub rx_direction: Vector3f,

    /// Origin of the ray offset in y.
    pub ry_origin: Point3f,

    /// Direction of the ray offset in y.
    pub ry_direction: Vector3f,
}

/// A primary or secondary ray with optional differentials.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DifferentialRay {
    /// The central ray.
    pub ray: Ray,

    /// Auxilliary rays offset by one pixel.
    pub differentials: Option<RayDifferential>,
}

impl DifferentialRay {
    /// Returns a ray without differentials.
    ///
    /// * `ray` - The central ray.
    pub fn new(ray: Ray) -> Self {
        Self {
            ray,
            differentials: None,
        }
    }

    /// Returns a ray with differentials.
    ///
    /// * `ray`           - The central ray.
    /// * `differentials` - Auxilliary rays.
    pub fn with_differentials(ray: Ray, differentials: RayDifferential) -> Self {
        Self {
            ray,
            differentials: Some(differentials),
        }
    }
}
