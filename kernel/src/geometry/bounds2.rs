//! 2-D Axis Aligned Bounding Boxes.

#![allow(dead_code)]
use super::*;
use crate::common::*;
use num_traits::Num;
use std::fmt;

/// 2-D Axis Aligned Bounding Box.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bounds2<T> {
    /// Minimum bounds.
    pub p_min: Point2<T>,

    /// Maximum bounds.
    pub p_max: Point2<T>,
}

/// 2-D bounding box containing `Float` points.
pub type Bounds2f = Bounds2<Float>;

/// 2-D bounding box containing `Int` points.
pub type Bounds2i = Bounds2<Int>;

impl<T: Num + PartialOrd + Copy> Bounds2<T> {
    /// Creates a new 2-D bounding box from 2 points. The minimum and maximum
    /// bounds are used for each coordinate axis.
    ///
    /// * `p1` - First point.
    /// * `p2` - Second point.
    pub fn new(p1: Point2<T>, p2: Point2<T>) -> Self {
        Self {
            p_min: p1.min(&p2),
            p_max: p1.max(&p2),
        }
    }

    /// Returns the vector along the box diagonal from the minimum point to
    /// the maximum point.
    pub fn diagonal(&self) -> Point2<T> {
        self.p_max - self.p_min
    }

    /// Returns the area of the bounding box.
    pub fn area(&self) -> T {
        let d = self.diagonal();
        d.x * d.y
    }

    /// Returns true if the box has no interior.
    pub fn is_empty(&self) -> bool {
        self.p_max.x <= self.p_min.x || self.p_max.y <= self.p_min.y
    }

    /// Returns true if `other` lies entirely within this bounding box.
    ///
    /// * `other` - The other bounding box.
    pub fn contains_bounds(&self, other: &Self) -> bool {
        other.p_min.x >= self.p_min.x
            && other.p_min.y >= self.p_min.y
            && other.p_max.x <= self.p_max.x
            && other.p_max.y <= self.p_max.y
    }
}

impl Bounds2f {
    /// Returns the unit square `[0, 1] x [0, 1]`.
    pub fn unit() -> Self {
        Self::new(Point2f::new(0.0, 0.0), Point2f::new(1.0, 1.0))
    }

    /// Linearly interpolate between the corners of the box.
    ///
    /// * `t` - The interpolation parameter per axis.
    pub fn lerp(&self, t: &Point2f) -> Point2f {
        Point2f::new(
            lerp(t.x, self.p_min.x, self.p_max.x),
            lerp(t.y, self.p_min.y, self.p_max.y),
        )
    }

    /// Returns the pixels of a raster of the given resolution assigned to
    /// this normalized box. Both edges are floored so that adjacent boxes
    /// share no pixels.
    ///
    /// * `resolution` - Raster resolution.
    pub fn raster_bounds(&self, resolution: &Point2i) -> Bounds2i {
        let rx = resolution.x as Float;
        let ry = resolution.y as Float;
        let p_min = Point2i::new(
            clamp((self.p_min.x * rx).floor() as Int, 0, resolution.x),
            clamp((self.p_min.y * ry).floor() as Int, 0, resolution.y),
        );
        let p_max = Point2i::new(
            clamp((self.p_max.x * rx).floor() as Int, 0, resolution.x),
            clamp((self.p_max.y * ry).floor() as Int, 0, resolution.y),
        );
        Bounds2i { p_min, p_max }
    }
}

impl<T: fmt::Display> fmt::Display for Bounds2<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[({}, {}) - ({}, {})]",
            self.p_min.x, self.p_min.y, self.p_max.x, self.p_max.y
        )
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_contains_sub_rectangle() {
        let bucket = Bounds2f::new(Point2f::new(0.25, 0.5), Point2f::new(0.75, 1.0));
        assert!(Bounds2f::unit().contains_bounds(&bucket));
        assert!(Bounds2f::unit().contains_bounds(&Bounds2f::unit()));
    }

    #[test]
    fn unit_rejects_overhang() {
        let bucket = Bounds2f::new(Point2f::new(-0.1, 0.0), Point2f::new(0.5, 0.5));
        assert!(!Bounds2f::unit().contains_bounds(&bucket));
        let bucket = Bounds2f::new(Point2f::new(0.5, 0.5), Point2f::new(0.5, 1.5));
        assert!(!Bounds2f::unit().contains_bounds(&bucket));
    }

    #[test]
    fn raster_bounds_floor_both_edges() {
        let bucket = Bounds2f::new(Point2f::new(0.1, 0.5), Point2f::new(0.55, 1.0));
        let pixels = bucket.raster_bounds(&Point2i::new(10, 4));
        assert_eq!(pixels.p_min, Point2i::new(1, 2));
        assert_eq!(pixels.p_max, Point2i::new(5, 4));
        assert_eq!(pixels.area(), 8);

        let right = Bounds2f::new(Point2f::new(0.55, 0.0), Point2f::new(1.0, 1.0));
        let pixels = right.raster_bounds(&Point2i::new(10, 4));
        assert_eq!(pixels.p_min, Point2i::new(5, 0));
        assert_eq!(pixels.p_max, Point2i::new(10, 4));
    }
}
