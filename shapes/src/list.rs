//! Object Lists

use kernel::geometry::*;
use kernel::medium::*;
use kernel::sample::*;
use kernel::scene::*;

/// A group of scene objects, intersected by brute force.
#[derive(Clone, Default)]
pub struct List {
    /// The objects.
    children: Vec<ArcSceneObject>,

    /// Medium filling the space of the group.
    interior: Option<ArcMedium>,
}

impl List {
    /// Create a new `List`.
    ///
    /// * `children` - The objects.
    pub fn new(children: Vec<ArcSceneObject>) -> Self {
        Self {
            children,
            interior: None,
        }
    }

    /// Fill the space of the group with a medium. On the scene root this is
    /// the medium the camera sits in.
    ///
    /// * `interior` - The medium.
    pub fn with_interior(mut self, interior: ArcMedium) -> Self {
        self.interior = Some(interior);
        self
    }

    /// Add an object.
    ///
    /// * `child` - The object.
    pub fn add(&mut self, child: ArcSceneObject) {
        self.children.push(child);
    }
}

impl SceneObject for List {
    fn intersect(&self, sample: &Sample, ray: &Ray) -> Option<Intersection> {
        let mut ray = *ray;
        let mut nearest = None;
        for child in self.children.iter() {
            if let Some(hit) = child.intersect(sample, &ray) {
                ray = ray.with_far(hit.t);
                nearest = Some(hit);
            }
        }
        nearest
    }

    fn is_intersecting(&self, sample: &Sample, ray: &Ray) -> bool {
        self.children
            .iter()
            .any(|child| child.is_intersecting(sample, ray))
    }

    fn bounding_box(&self) -> Bounds3f {
        self.children
            .iter()
            .fold(Bounds3f::empty(), |acc, child| acc.union(&child.bounding_box()))
    }

    fn interior(&self) -> Option<ArcMedium> {
        self.interior.clone()
    }

    fn children(&self) -> &[ArcSceneObject] {
        &self.children
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
    use kernel::common::*;
    use std::sync::Arc;

    #[test]
    fn nearest_child_wins() {
        let far: ArcSceneObject = Arc::new(Sphere::new(Point3f::new(0.0, 0.0, 10.0), 1.0));
        let near: ArcSceneObject = Arc::new(Sphere::new(Point3f::new(0.0, 0.0, 5.0), 1.0));
        let list = List::new(vec![far, near]);
        let ray = Ray::new(Point3f::zero(), Vector3f::new(0.0, 0.0, 1.0));
        let hit = list.intersect(&Sample::new(), &ray).expect("hit");
        assert!(approx_eq!(Float, hit.t, 4.0, epsilon = 1e-5));
        assert!(list.is_intersecting(&Sample::new(), &ray));

        let bounds = list.bounding_box();
        assert_eq!(bounds.p_min, Point3f::new(-1.0, -1.0, 4.0));
        assert_eq!(bounds.p_max, Point3f::new(1.0, 1.0, 11.0));
    }
}
