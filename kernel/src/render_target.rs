//! Render Target

use crate::geometry::*;
use crate::output_sample::*;
use std::sync::Arc;

/// Receives the output samples of a render.
///
/// All methods take `&self`; implementations serialize concurrent
/// `write_render()` calls internally and apply each batch as a whole.
pub trait RenderTarget: Send + Sync {
    /// Returns the resolution in pixels.
    fn resolution(&self) -> Point2i;

    /// Called once before any sample is written.
    fn begin_render(&self) {}

    /// Accumulate a batch of samples. Called concurrently from worker
    /// threads.
    ///
    /// * `samples` - The batch.
    fn write_render(&self, samples: &[OutputSample]);

    /// Called once after the last sample is written, also when canceled.
    fn end_render(&self) {}

    /// Returns true if the render should stop early. Polled between tasks.
    fn is_canceling(&self) -> bool {
        false
    }
}

/// Atomic reference counted `RenderTarget`.
pub type ArcRenderTarget = Arc<dyn RenderTarget>;
