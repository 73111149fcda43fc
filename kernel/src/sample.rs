//! Sample

use crate::common::*;
use crate::geometry::*;
use crate::sampler::*;
use std::sync::Arc;

/// A flat bag of random numbers for one radiance evaluation. A single
/// instance is reused for every draw of a task; its sub-sequence buffers are
/// sized by the layout of the sampler that last filled it.
#[derive(Clone, Debug)]
pub struct Sample {
    /// Normalized screen coordinate in `[0, 1] x [0, 1]`.
    pub screen_sample: Point2f,

    /// Lens coordinate in `[0, 1] x [0, 1]`.
    pub lens_sample: Point2f,

    /// Simulated time.
    pub time: Float,

    /// Wavelength in nanometres.
    pub wavelength: Float,

    /// Probability density of the wavelength.
    pub wavelength_pdf: Float,

    /// Integration weight.
    pub weight: Float,

    /// 1-D sub-sequence storage.
    pub(crate) values_1d: Vec<Float>,

    /// 2-D sub-sequence storage.
    pub(crate) values_2d: Vec<Point2f>,

    /// Layout the buffers are sized for.
    layout: Option<Arc<SubSequenceLayout>>,
}

impl Default for Sample {
    fn default() -> Self {
        Self {
            screen_sample: Point2f::default(),
            lens_sample: Point2f::default(),
            time: 0.0,
            wavelength: 0.0,
            wavelength_pdf: 0.0,
            weight: 1.0,
            values_1d: vec![],
            values_2d: vec![],
            layout: None,
        }
    }
}

impl Sample {
    /// Create a new unbound `Sample`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resize the sub-sequence buffers for a layout unless they already are.
    ///
    /// * `layout` - The sampler's sub-sequence layout.
    pub fn bind(&mut self, layout: &Arc<SubSequenceLayout>) {
        let is_bound = self.layout.as_ref().map_or(false, |l| Arc::ptr_eq(l, layout));
        if !is_bound {
            self.values_1d.clear();
            self.values_1d.resize(layout.total_size_1d(), 0.0);
            self.values_2d.clear();
            self.values_2d.resize(layout.total_size_2d(), Point2f::default());
            self.layout = Some(Arc::clone(layout));
        }
    }

    /// Returns the values of a 1-D sub-sequence. A `None` id yields an empty
    /// slice.
    ///
    /// * `id` - Handle returned by `Sampler::request_sub_sequence_1d()`.
    pub fn sub_sequence_1d(&self, id: Option<SubSequenceId>) -> &[Float] {
        match (id, &self.layout) {
            (Some(id), Some(layout)) => &self.values_1d[layout.range_1d(id)],
            _ => &[],
        }
    }

    /// Returns the values of a 2-D sub-sequence. A `None` id yields an empty
    /// slice.
    ///
    /// * `id` - Handle returned by `Sampler::request_sub_sequence_2d()`.
    pub fn sub_sequence_2d(&self, id: Option<SubSequenceId>) -> &[Point2f] {
        match (id, &self.layout) {
            (Some(id), Some(layout)) => &self.values_2d[layout.range_2d(id)],
            _ => &[],
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_sample_has_empty_sub_sequences() {
        let sample = Sample::new();
        assert!(sample.sub_sequence_1d(None).is_empty());
        assert!(sample.sub_sequence_2d(Some(SubSequenceId(0))).is_empty());
    }

    #[test]
    fn bind_resizes_once_per_layout() {
        let mut layout = SubSequenceLayout::default();
        let a = layout.add_1d(3);
        let b = layout.add_2d(4);
        let layout = Arc::new(layout);

        let mut sample = Sample::new();
        sample.bind(&layout);
        assert_eq!(sample.sub_sequence_1d(Some(a)).len(), 3);
        assert_eq!(sample.sub_sequence_2d(Some(b)).len(), 4);

        sample.values_1d[1] = 0.5;
        sample.bind(&layout);
        assert_eq!(sample.sub_sequence_1d(Some(a))[1], 0.5);

        let other = Arc::new((*layout).clone());
        sample.bind(&other);
        assert_eq!(sample.sub_sequence_1d(Some(a))[1], 0.0);
    }
}
