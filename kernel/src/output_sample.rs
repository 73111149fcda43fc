//! Output Sample

use crate::common::*;
use crate::geometry::*;
use crate::spectrum::*;

/// The result of tracing one sample, delivered to a `RenderTarget`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct OutputSample {
    /// Screen position in `[0, 1]^2`.
    pub screen_coordinate: Point2f,

    /// Estimated radiance.
    pub radiance: Spectral,

    /// Camera depth of the first hit; infinite if nothing was hit.
    pub depth: Float,

    /// Coverage; 0 if the primary ray escaped or was cut off.
    pub alpha: Float,

    /// Filter weight; product of the camera and sample weights.
    pub weight: Float,
}

impl OutputSample {
    /// Create a new `OutputSample`.
    ///
    /// * `screen_coordinate` - Screen position.
    /// * `radiance`          - Estimated radiance.
    /// * `depth`             - Camera depth.
    /// * `alpha`             - Coverage.
    /// * `weight`            - Filter weight.
    pub fn new(
        screen_coordinate: Point2f,
        radiance: Spectral,
        depth: Float,
        alpha: Float,
        weight: Float,
    ) -> Self {
        Self {
            screen_coordinate,
            radiance,
            depth,
            alpha,
            weight,
        }
    }
}
