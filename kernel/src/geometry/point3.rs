//! 3-D Points

#![allow(dead_code)]
use super::*;
use crate::common::*;
use std::ops::{Add, AddAssign, Index, Mul, Sub};

/// A 3-D point containing `Float` values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point3f {
    /// X-coordinate.
    pub x: Float,

    /// Y-coordinate.
    pub y: Float,

    /// Z-coordinate.
    pub z: Float,
}

impl Point3f {
    /// Creates a new 3-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    /// * `z` - Z-coordinate.
    pub fn new(x: Float, y: Float, z: Float) -> Self {
        Self { x, y, z }
    }

    /// Returns the origin.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Returns true if any coordinate is NaN.
    pub fn has_nans(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Returns the distance to another point.
    ///
    /// * `other` - The other point.
    pub fn distance(&self, other: &Self) -> Float {
        (*self - *other).length()
    }

    /// Return the component-wise minimum coordinate values with another point.
    ///
    /// * `other` - The other point.
    pub fn min(&self, other: &Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Return the component-wise maximum coordinate values with another point.
    ///
    /// * `other` - The other point.
    pub fn max(&self, other: &Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }
}

impl Add<Vector3f> for Point3f {
    type Output = Point3f;

    /// Offsets the point by the given vector.
    ///
    /// * `v` - The vector.
    fn add(self, v: Vector3f) -> Self::Output {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl Add<Point3f> for Point3f {
    type Output = Point3f;

    /// Adds the coordinates of two points. Only meaningful for weighted sums.
    ///
    /// * `p` - The other point.
    fn add(self, p: Point3f) -> Self::Output {
        Self::new(self.x + p.x, self.y + p.y, self.z + p.z)
    }
}

impl AddAssign<Vector3f> for Point3f {
    /// Offsets the point in place.
    ///
    /// * `v` - The vector.
    fn add_assign(&mut self, v: Vector3f) {
        *self = *self + v;
    }
}

impl Sub<Point3f> for Point3f {
    type Output = Vector3f;

    /// Returns the vector from `p` to this point.
    ///
    /// * `p` - The other point.
    fn sub(self, p: Point3f) -> Self::Output {
        Vector3f::new(self.x - p.x, self.y - p.y, self.z - p.z)
    }
}

impl Sub<Vector3f> for Point3f {
    type Output = Point3f;

    /// Offsets the point by the negated vector.
    ///
    /// * `v` - The vector.
    fn sub(self, v: Vector3f) -> Self::Output {
        Self::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

impl Mul<Point3f> for Float {
    type Output = Point3f;

    /// Scale the point coordinates.
    ///
    /// * `p` - The point.
    fn mul(self, p: Point3f) -> Self::Output {
        Point3f::new(self * p.x, self * p.y, self * p.z)
    }
}

impl Index<usize> for Point3f {
    type Output = Float;

    /// Index the point by an axis to get the immutable coordinate axis value.
    ///
    /// * `axis` - A 3-D coordinate axis.
    fn index(&self, axis: usize) -> &Self::Output {
        match axis {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Invalid axis for Point3f"),
        }
    }
}

impl From<Vector3f> for Point3f {
    /// Convert a 3-D vector to a 3-D point.
    ///
    /// * `v` - The vector.
    fn from(v: Vector3f) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Point3f> for Vector3f {
    /// Convert a 3-D point to a 3-D vector.
    ///
    /// * `p` - The point.
    fn from(p: Point3f) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}
