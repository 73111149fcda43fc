//! Transformations

#![allow(dead_code)]
use super::*;
use crate::common::*;
use std::ops::Mul;

/// A 4x4 matrix containing Float values.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix4x4 {
    /// Stores a 2-D array of Float
    pub m: [[Float; 4]; 4],
}

/// Identity matrix.
pub const IDENTITY_MATRIX: Matrix4x4 = Matrix4x4 {
    m: [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ],
};

impl Default for Matrix4x4 {
    /// Returns the default as identity matrix.
    fn default() -> Self {
        IDENTITY_MATRIX
    }
}

impl Matrix4x4 {
    /// Returns the transpose of the matrix.
    pub fn transpose(&self) -> Matrix4x4 {
        let mut t = IDENTITY_MATRIX;
        for i in 0..4 {
            for j in 0..4 {
                t.m[i][j] = self.m[j][i];
            }
        }
        t
    }
}

impl Mul<Matrix4x4> for Matrix4x4 {
    type Output = Matrix4x4;

    /// Post-multiply the given matrix.
    ///
    /// * `other` - The other matrix
    fn mul(self, other: Matrix4x4) -> Self::Output {
        let mut m = IDENTITY_MATRIX;
        for i in 0..4 {
            for j in 0..4 {
                m.m[i][j] = (0..4).map(|k| self.m[i][k] * other.m[k][j]).sum();
            }
        }
        m
    }
}

/// An affine transformation storing both the matrix and its inverse so that
/// neither direction requires a matrix inversion.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Transform {
    /// The transformation matrix.
    pub m: Matrix4x4,

    /// The inverse of the transformation matrix.
    pub m_inv: Matrix4x4,
}

impl Transform {
    /// Returns the identity transformation.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Returns a translation.
    ///
    /// * `delta` - Translation offset.
    pub fn translate(delta: &Vector3f) -> Self {
        let mut m = IDENTITY_MATRIX;
        let mut m_inv = IDENTITY_MATRIX;
        for (axis, d) in [delta.x, delta.y, delta.z].into_iter().enumerate() {
            m.m[axis][3] = d;
            m_inv.m[axis][3] = -d;
        }
        Self { m, m_inv }
    }

    /// Returns a non-uniform scale. All factors must be non-zero.
    ///
    /// * `x` - Scale factor along x.
    /// * `y` - Scale factor along y.
    /// * `z` - Scale factor along z.
    pub fn scale(x: Float, y: Float, z: Float) -> Self {
        debug_assert!(x != 0.0 && y != 0.0 && z != 0.0);
        let mut m = IDENTITY_MATRIX;
        let mut m_inv = IDENTITY_MATRIX;
        for (axis, s) in [x, y, z].into_iter().enumerate() {
            m.m[axis][axis] = s;
            m_inv.m[axis][axis] = 1.0 / s;
        }
        Self { m, m_inv }
    }

    /// Returns a rotation about an arbitrary axis.
    ///
    /// * `theta` - Rotation angle in degrees.
    /// * `axis`  - Axis of rotation.
    pub fn rotate(theta: Float, axis: &Vector3f) -> Self {
        let a = axis.normalize();
        let (sin_theta, cos_theta) = theta.to_radians().sin_cos();

        let mut m = IDENTITY_MATRIX;
        m.m[0][0] = a.x * a.x + (1.0 - a.x * a.x) * cos_theta;
        m.m[0][1] = a.x * a.y * (1.0 - cos_theta) - a.z * sin_theta;
        m.m[0][2] = a.x * a.z * (1.0 - cos_theta) + a.y * sin_theta;
        m.m[1][0] = a.x * a.y * (1.0 - cos_theta) + a.z * sin_theta;
        m.m[1][1] = a.y * a.y + (1.0 - a.y * a.y) * cos_theta;
        m.m[1][2] = a.y * a.z * (1.0 - cos_theta) - a.x * sin_theta;
        m.m[2][0] = a.x * a.z * (1.0 - cos_theta) - a.y * sin_theta;
        m.m[2][1] = a.y * a.z * (1.0 - cos_theta) + a.x * sin_theta;
        m.m[2][2] = a.z * a.z + (1.0 - a.z * a.z) * cos_theta;

        // Rotations are orthogonal.
        Self { m, m_inv: m.transpose() }
    }

    /// Returns the inverse transformation.
    pub fn inverse(&self) -> Self {
        Self {
            m: self.m_inv,
            m_inv: self.m,
        }
    }

    /// Apply the transformation to a point.
    ///
    /// * `p` - The point.
    pub fn transform_point(&self, p: &Point3f) -> Point3f {
        let m = &self.m.m;
        let x = m[0][0] * p.x + m[0][1] * p.y + m[0][2] * p.z + m[0][3];
        let y = m[1][0] * p.x + m[1][1] * p.y + m[1][2] * p.z + m[1][3];
        let z = m[2][0] * p.x + m[2][1] * p.y + m[2][2] * p.z + m[2][3];
        let w = m[3][0] * p.x + m[3][1] * p.y + m[3][2] * p.z + m[3][3];
        if w == 1.0 {
            Point3f::new(x, y, z)
        } else {
            Point3f::new(x / w, y / w, z / w)
        }
    }

    /// Apply the transformation to a vector.
    ///
    /// * `v` - The vector.
    pub fn transform_vector(&self, v: &Vector3f) -> Vector3f {
        let m = &self.m.m;
        Vector3f::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }

    /// Apply the transformation to a surface normal using the inverse
    /// transpose. The result is not normalized.
    ///
    /// * `n` - The normal.
    pub fn transform_normal(&self, n: &Vector3f) -> Vector3f {
        let m_inv = &self.m_inv.m;
        Vector3f::new(
            m_inv[0][0] * n.x + m_inv[1][0] * n.y + m_inv[2][0] * n.z,
            m_inv[0][1] * n.x + m_inv[1][1] * n.y + m_inv[2][1] * n.z,
            m_inv[0][2] * n.x + m_inv[1][2] * n.y + m_inv[2][2] * n.z,
        )
    }

    /// Apply the transformation to a ray. The direction is not normalized so
    /// the parametric extents keep their meaning.
    ///
    /// * `r` - The ray.
    pub fn transform_ray(&self, r: &Ray) -> Ray {
        Ray::bounded(
            self.transform_point(&r.origin),
            self.transform_vector(&r.direction),
            r.t_min,
            r.t_max,
        )
    }

    /// Apply the transformation to a bounding box.
    ///
    /// * `b` - The bounding box.
    pub fn transform_bounds(&self, b: &Bounds3f) -> Bounds3f {
        if b.is_empty() {
            return *b;
        }
        (0..8).fold(Bounds3f::empty(), |acc, corner| {
            acc.union_point(&self.transform_point(&b.corner(corner)))
        })
    }
}

impl Mul<&Transform> for &Transform {
    type Output = Transform;

    /// Compose with another transformation; `other` is applied first.
    ///
    /// * `other` - The other transformation.
    fn mul(self, other: &Transform) -> Self::Output {
        Transform {
            m: self.m * other.m,
            m_inv: other.m_inv * self.m_inv,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    fn assert_close(a: &Point3f, b: &Point3f) {
        assert!(approx_eq!(Float, a.x, b.x, epsilon = 1e-4), "{a:?} != {b:?}");
        assert!(approx_eq!(Float, a.y, b.y, epsilon = 1e-4), "{a:?} != {b:?}");
        assert!(approx_eq!(Float, a.z, b.z, epsilon = 1e-4), "{a:?} != {b:?}");
    }

    #[test]
    fn translate_moves_points_not_vectors() {
        let t = Transform::translate(&Vector3f::new(1.0, 2.0, 3.0));
        assert_eq!(t.transform_point(&Point3f::zero()), Point3f::new(1.0, 2.0, 3.0));
        assert_eq!(
            t.transform_vector(&Vector3f::new(0.0, 0.0, 1.0)),
            Vector3f::new(0.0, 0.0, 1.0)
        );
    }

    #[test]
    fn rotate_quarter_turn() {
        let t = Transform::rotate(90.0, &Vector3f::new(0.0, 0.0, 1.0));
        assert_close(
            &t.transform_point(&Point3f::new(1.0, 0.0, 0.0)),
            &Point3f::new(0.0, 1.0, 0.0),
        );
    }

    proptest! {
        #[test]
        fn composition_round_trips(
            x in -10.0..10.0f32,
            y in -10.0..10.0f32,
            z in -10.0..10.0f32,
            theta in -180.0..180.0f32,
            s in 0.5..2.0f32,
        ) {
            let t = &(&Transform::translate(&Vector3f::new(x, y, z))
                * &Transform::rotate(theta, &Vector3f::new(1.0, 1.0, 0.0)))
                * &Transform::scale(s, s, s);
            let p = Point3f::new(0.5, -1.5, 2.0);
            let q = t.inverse().transform_point(&t.transform_point(&p));
            assert_close(&p, &q);
        }
    }
}
