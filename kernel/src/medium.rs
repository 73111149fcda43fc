//! Medium

use crate::geometry::*;
use crate::sample::*;
use crate::sampler::*;
use crate::spectrum::*;
use std::sync::Arc;

/// Participating medium.
pub trait Medium: Send + Sync {
    /// Returns the priority; where media overlap the highest priority wins.
    fn priority(&self) -> i32 {
        0
    }

    /// Returns the fraction of light transmitted along the bounded extent of
    /// a ray.
    ///
    /// * `sample` - The sample.
    /// * `ray`    - The ray.
    fn transmittance(&self, sample: &Sample, ray: &Ray) -> Spectral;

    /// Register the sub-sequences the medium needs.
    ///
    /// * `_sampler` - The sampler.
    fn request_samples(&self, _sampler: &mut dyn Sampler) {}
}

/// Atomic reference counted `Medium`.
pub type ArcMedium = Arc<dyn Medium>;

/// The media a ray travels through, nested by priority. Entering and leaving
/// solids returns a new stack so that each recursion level owns its own.
#[derive(Clone, Default)]
pub struct MediumStack {
    /// Medium used when no solid was entered.
    default_medium: Option<ArcMedium>,

    /// Entered media in ascending priority; the last one is active.
    stack: Vec<ArcMedium>,
}

impl MediumStack {
    /// Create a new `MediumStack`.
    ///
    /// * `default_medium` - Medium used when no solid was entered.
    pub fn new(default_medium: Option<ArcMedium>) -> Self {
        Self {
            default_medium,
            stack: vec![],
        }
    }

    /// Returns the active medium.
    pub fn top(&self) -> Option<&ArcMedium> {
        self.stack.last().or(self.default_medium.as_ref())
    }

    /// Returns the number of entered media.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns the stack after entering a solid filled with `medium`.
    ///
    /// * `medium` - Interior medium of the solid.
    pub fn entering(&self, medium: &ArcMedium) -> Self {
        let mut next = self.clone();
        let priority = medium.priority();
        let index = next.stack.partition_point(|m| m.priority() <= priority);
        next.stack.insert(index, Arc::clone(medium));
        next
    }

    /// Returns the stack after leaving a solid filled with `medium`. Leaving
    /// a medium that was never entered is a no-op.
    ///
    /// * `medium` - Interior medium of the solid.
    pub fn leaving(&self, medium: &ArcMedium) -> Self {
        let mut next = self.clone();
        if let Some(index) = next.stack.iter().rposition(|m| Arc::ptr_eq(m, medium)) {
            next.stack.remove(index);
        }
        next
    }

    /// Returns the transmittance of the active medium along a ray; vacuum
    /// transmits everything.
    ///
    /// * `sample` - The sample.
    /// * `ray`    - The ray.
    pub fn transmittance(&self, sample: &Sample, ray: &Ray) -> Spectral {
        self.top()
            .map_or(Spectral::ONE, |m| m.transmittance(sample, ray))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(i32, f32);

    impl Medium for Constant {
        fn priority(&self) -> i32 {
            self.0
        }

        fn transmittance(&self, _sample: &Sample, _ray: &Ray) -> Spectral {
            Spectral::new(self.1)
        }
    }

    fn ray() -> Ray {
        Ray::new(Point3f::zero(), Vector3f::new(0.0, 0.0, 1.0))
    }

    #[test]
    fn vacuum_transmits_everything() {
        let stack = MediumStack::default();
        assert_eq!(stack.transmittance(&Sample::new(), &ray()), Spectral::ONE);
    }

    #[test]
    fn highest_priority_wins() {
        let air: ArcMedium = Arc::new(Constant(0, 0.9));
        let water: ArcMedium = Arc::new(Constant(2, 0.5));
        let glass: ArcMedium = Arc::new(Constant(1, 0.7));
        let sample = Sample::new();

        let stack = MediumStack::new(Some(Arc::clone(&air)));
        assert_eq!(stack.transmittance(&sample, &ray()), Spectral::new(0.9));

        let stack = stack.entering(&water).entering(&glass);
        assert_eq!(stack.transmittance(&sample, &ray()), Spectral::new(0.5));

        let stack = stack.leaving(&water);
        assert_eq!(stack.transmittance(&sample, &ray()), Spectral::new(0.7));

        let stack = stack.leaving(&glass).leaving(&glass);
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.transmittance(&sample, &ray()), Spectral::new(0.9));
    }
}
