//! Transformations

use kernel::common::*;
use kernel::geometry::*;
use kernel::sample::*;
use kernel::scene::*;

/// Places a child object with a fixed transformation.
#[derive(Clone)]
pub struct Transformation {
    /// The child, as a single element slice for `children()`.
    child: [ArcSceneObject; 1],

    /// Transformation from the child's space to the parent's.
    local_to_world: Transform,
}

impl Transformation {
    /// Create a new `Transformation`.
    ///
    /// * `child`          - The child object.
    /// * `local_to_world` - Transformation from the child's space to the
    ///                      parent's.
    pub fn new(child: ArcSceneObject, local_to_world: Transform) -> Self {
        Self {
            child: [child],
            local_to_world,
        }
    }
}

/// Bring an intersection found in a child's space back to the parent's.
///
/// * `hit`            - The intersection in the child's space.
/// * `local_to_world` - Transformation of the child.
pub(crate) fn intersection_to_world(hit: Intersection, local_to_world: &Transform) -> Intersection {
    Intersection {
        point: local_to_world.transform_point(&hit.point),
        normal: local_to_world.transform_normal(&hit.normal).normalize(),
        ..hit
    }
}

impl SceneObject for Transformation {
    fn intersect(&self, sample: &Sample, ray: &Ray) -> Option<Intersection> {
        let local_ray = self.local_to_world.inverse().transform_ray(ray);
        self.child[0]
            .intersect(sample, &local_ray)
            .map(|hit| intersection_to_world(hit, &self.local_to_world))
    }

    fn is_intersecting(&self, sample: &Sample, ray: &Ray) -> bool {
        let local_ray = self.local_to_world.inverse().transform_ray(ray);
        self.child[0].is_intersecting(sample, &local_ray)
    }

    fn bounding_box(&self) -> Bounds3f {
        self.local_to_world
            .transform_bounds(&self.child[0].bounding_box())
    }

    fn children(&self) -> &[ArcSceneObject] {
        &self.child
    }

    fn local_space(&self, _time: Float, parent: &Transform) -> Transform {
        parent * &self.local_to_world
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sphere::*;
    use float_cmp::*;
    use std::sync::Arc;

    #[test]
    fn scaled_sphere() {
        let unit: ArcSceneObject = Arc::new(Sphere::new(Point3f::zero(), 1.0));
        let transform = &Transform::translate(&Vector3f::new(0.0, 0.0, 10.0))
            * &Transform::scale(2.0, 2.0, 2.0);
        let big = Transformation::new(unit, transform);
        let ray = Ray::new(Point3f::zero(), Vector3f::new(0.0, 0.0, 1.0));
        let hit = big.intersect(&Sample::new(), &ray).expect("hit");
        assert!(approx_eq!(Float, hit.t, 8.0, epsilon = 1e-4));
        assert!(approx_eq!(Float, hit.point.z, 8.0, epsilon = 1e-4));
        assert!(approx_eq!(Float, hit.normal.z, -1.0, epsilon = 1e-5));

        let bounds = big.bounding_box();
        assert!(approx_eq!(Float, bounds.p_min.z, 8.0, epsilon = 1e-5));
        assert!(approx_eq!(Float, bounds.p_max.z, 12.0, epsilon = 1e-5));
    }
}
