//! Motion Translations

use crate::transformation::intersection_to_world;
use kernel::common::*;
use kernel::geometry::*;
use kernel::sample::*;
use kernel::scene::*;
use kernel::time_period::*;

/// Moves a child object in a straight line from `start` to `end` over a
/// period of time. Outside the period it rests at either end.
#[derive(Clone)]
pub struct MotionTranslation {
    /// The child, as a single element slice for `children()`.
    child: [ArcSceneObject; 1],

    /// Offset at the beginning of the period.
    start: Vector3f,

    /// Offset at the end of the period.
    end: Vector3f,

    /// Period of the motion.
    period: TimePeriod,
}

impl MotionTranslation {
    /// Create a new `MotionTranslation`.
    ///
    /// * `child`  - The child object.
    /// * `start`  - Offset at the beginning of the period.
    /// * `end`    - Offset at the end of the period.
    /// * `period` - Period of the motion.
    pub fn new(child: ArcSceneObject, start: Vector3f, end: Vector3f, period: TimePeriod) -> Self {
        Self {
            child: [child],
            start,
            end,
            period,
        }
    }

    /// Returns the offset at a time.
    ///
    /// * `time` - The time.
    pub fn offset(&self, time: Float) -> Vector3f {
        let duration = self.period.duration();
        let tau = if duration > 0.0 {
            clamp((time - self.period.begin) / duration, 0.0, 1.0)
        } else {
            0.0
        };
        self.start + (self.end - self.start) * tau
    }
}

impl SceneObject for MotionTranslation {
    fn intersect(&self, sample: &Sample, ray: &Ray) -> Option<Intersection> {
        let local_to_world = Transform::translate(&self.offset(sample.time));
        let local_ray = local_to_world.inverse().transform_ray(ray);
        self.child[0]
            .intersect(sample, &local_ray)
            .map(|hit| intersection_to_world(hit, &local_to_world))
    }

    fn is_intersecting(&self, sample: &Sample, ray: &Ray) -> bool {
        let offset = self.offset(sample.time);
        let local_ray = Ray::bounded(ray.origin - offset, ray.direction, ray.t_min, ray.t_max);
        self.child[0].is_intersecting(sample, &local_ray)
    }

    fn bounding_box(&self) -> Bounds3f {
        let bounds = self.child[0].bounding_box();
        Transform::translate(&self.start)
            .transform_bounds(&bounds)
            .union(&Transform::translate(&self.end).transform_bounds(&bounds))
    }

    fn children(&self) -> &[ArcSceneObject] {
        &self.child
    }

    fn has_motion(&self) -> bool {
        self.start != self.end
    }

    fn local_space(&self, time: Float, parent: &Transform) -> Transform {
        parent * &Transform::translate(&self.offset(time))
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

    fn moving() -> MotionTranslation {
        let ball: ArcSceneObject = Arc::new(Sphere::new(Point3f::zero(), 1.0));
        MotionTranslation::new(
            ball,
            Vector3f::new(0.0, 0.0, 0.0),
            Vector3f::new(4.0, 0.0, 0.0),
            TimePeriod::new(0.0, 1.0),
        )
    }

    #[test]
    fn position_follows_time() {
        let motion = moving();
        assert!(motion.has_motion());
        assert_eq!(motion.offset(0.5), Vector3f::new(2.0, 0.0, 0.0));
        assert_eq!(motion.offset(7.0), Vector3f::new(4.0, 0.0, 0.0));

        let ray = Ray::new(Point3f::new(4.0, 0.0, -5.0), Vector3f::new(0.0, 0.0, 1.0));
        let mut sample = Sample::new();
        sample.time = 0.0;
        assert!(!motion.is_intersecting(&sample, &ray));
        sample.time = 1.0;
        let hit = motion.intersect(&sample, &ray).expect("hit");
        assert!(approx_eq!(Float, hit.point.z, -1.0, epsilon = 1e-5));
    }

    #[test]
    fn bounds_cover_the_whole_path() {
        let bounds = moving().bounding_box();
        assert_eq!(bounds.p_min, Point3f::new(-1.0, -1.0, -1.0));
        assert_eq!(bounds.p_max, Point3f::new(5.0, 1.0, 1.0));
    }
}
