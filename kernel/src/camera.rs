//! Camera

use crate::common::*;
use crate::geometry::*;
use crate::sample::*;
use crate::time_period::*;
use std::sync::Arc;

/// Camera interface. Generates primary rays from the screen and lens
/// coordinates of a sample.
pub trait Camera: Send + Sync {
    /// Returns the primary ray for a sample.
    ///
    /// * `sample`             - The sample; uses the screen and lens samples.
    /// * `screen_space_delta` - Screen space size of one pixel, for the ray
    ///                          differentials.
    fn primary_ray(&self, sample: &Sample, screen_space_delta: &Point2f) -> DifferentialRay;

    /// Returns the importance weight of a primary ray.
    ///
    /// * `_ray` - The primary ray.
    fn weight(&self, _ray: &Ray) -> Float {
        1.0
    }

    /// Returns the depth stored with a sample whose primary ray hit at `t`.
    ///
    /// * `ray` - The primary ray.
    /// * `t`   - Ray parameter of the hit.
    fn as_depth(&self, ray: &DifferentialRay, t: Float) -> Float;

    /// Returns the period the shutter is open, relative to the frame time.
    fn shutter_delta(&self) -> TimePeriod {
        TimePeriod::default()
    }
}

/// Atomic reference counted `Camera`.
pub type ArcCamera = Arc<dyn Camera>;
