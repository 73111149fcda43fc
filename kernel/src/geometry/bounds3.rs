//! 3-D Axis Aligned Bounding Boxes and Bounding Spheres.

#![allow(dead_code)]
use super::*;
use crate::common::*;

/// 3-D Axis Aligned Bounding Box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds3f {
    /// Minimum bounds.
    pub p_min: Point3f,

    /// Maximum bounds.
    pub p_max: Point3f,
}

impl Default for Bounds3f {
    /// Returns an empty bounding box.
    fn default() -> Self {
        Self::empty()
    }
}

impl Bounds3f {
    /// Creates a new 3-D bounding box from 2 points.
    ///
    /// * `p1` - First point.
    /// * `p2` - Second point.
    pub fn new(p1: Point3f, p2: Point3f) -> Self {
        Self {
            p_min: p1.min(&p2),
            p_max: p1.max(&p2),
        }
    }

    /// Returns a box that contains nothing; any union with it yields the
    /// other operand.
    pub fn empty() -> Self {
        Self {
            p_min: Point3f::new(INFINITY, INFINITY, INFINITY),
            p_max: Point3f::new(-INFINITY, -INFINITY, -INFINITY),
        }
    }

    /// Returns true if the box contains no points.
    pub fn is_empty(&self) -> bool {
        self.p_max.x < self.p_min.x || self.p_max.y < self.p_min.y || self.p_max.z < self.p_min.z
    }

    /// Returns the union with a point.
    ///
    /// * `p` - The point.
    pub fn union_point(&self, p: &Point3f) -> Self {
        Self {
            p_min: self.p_min.min(p),
            p_max: self.p_max.max(p),
        }
    }

    /// Returns the union with another box.
    ///
    /// * `other` - The other box.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            p_min: self.p_min.min(&other.p_min),
            p_max: self.p_max.max(&other.p_max),
        }
    }

    /// Returns the coordinates of one of the eight corners.
    ///
    /// * `corner` - Corner index in `[0, 7]`.
    pub fn corner(&self, corner: usize) -> Point3f {
        Point3f::new(
            if corner & 1 == 0 { self.p_min.x } else { self.p_max.x },
            if corner & 2 == 0 { self.p_min.y } else { self.p_max.y },
            if corner & 4 == 0 { self.p_min.z } else { self.p_max.z },
        )
    }

    /// Returns the sphere enclosing this box.
    pub fn bounding_sphere(&self) -> BoundingSphere {
        if self.is_empty() {
            BoundingSphere::default()
        } else {
            let center = 0.5 * (self.p_min + self.p_max);
            BoundingSphere::new(center, center.distance(&self.p_max))
        }
    }
}

/// A sphere enclosing the scene, used to compute the power of lights that
/// span the whole world.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoundingSphere {
    /// Centre.
    pub center: Point3f,

    /// Radius.
    pub radius: Float,
}

impl BoundingSphere {
    /// Creates a new bounding sphere.
    ///
    /// * `center` - Centre.
    /// * `radius` - Radius.
    pub fn new(center: Point3f, radius: Float) -> Self {
        Self { center, radius }
    }

    /// Returns the area of the sphere's cross section.
    pub fn cross_section(&self) -> Float {
        PI * self.radius * self.radius
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
