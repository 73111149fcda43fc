//! Orthonormal Frames

use super::*;

/// An orthonormal basis whose z-axis is a surface normal. Shading code works
/// in this local frame so that `cos(theta)` is simply the z-coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frame {
    /// First tangent.
    pub x: Vector3f,

    /// Second tangent.
    pub y: Vector3f,

    /// Normal.
    pub z: Vector3f,
}

impl Frame {
    /// Build a frame around a unit normal.
    ///
    /// * `normal` - The unit normal.
    pub fn from_normal(normal: &Vector3f) -> Self {
        let sign = 1.0_f32.copysign(normal.z);
        let a = -1.0 / (sign + normal.z);
        let b = normal.x * normal.y * a;
        Self {
            x: Vector3f::new(1.0 + sign * normal.x * normal.x * a, sign * b, -sign * normal.x),
            y: Vector3f::new(b, sign + normal.y * normal.y * a, -normal.y),
            z: *normal,
        }
    }

    /// Express a world direction in this frame.
    ///
    /// * `v` - The world direction.
    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.x), v.dot(&self.y), v.dot(&self.z))
    }

    /// Express a local direction in world space.
    ///
    /// * `v` - The local direction.
    pub fn to_world(&self, v: &Vector3f) -> Vector3f {
        self.x * v.x + self.y * v.y + self.z * v.z
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
