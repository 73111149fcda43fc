//! Cancel After

use kernel::geometry::*;
use kernel::output_sample::*;
use kernel::render_target::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Forwards output to another render target and asks the engine to cancel
/// once a number of batches was written.
pub struct CancelAfter {
    /// The wrapped render target.
    inner: ArcRenderTarget,

    /// Number of batches after which the render is canceled.
    limit: usize,

    /// Number of batches written.
    writes: AtomicUsize,
}

impl CancelAfter {
    /// Create a new `CancelAfter`.
    ///
    /// * `inner` - The wrapped render target.
    /// * `limit` - Number of batches after which the render is canceled.
    pub fn new(inner: ArcRenderTarget, limit: usize) -> Self {
        Self {
            inner,
            limit,
            writes: AtomicUsize::new(0),
        }
    }

    /// Returns the number of batches written.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl RenderTarget for CancelAfter {
    fn resolution(&self) -> Point2i {
        self.inner.resolution()
    }

    fn begin_render(&self) {
        self.writes.store(0, Ordering::SeqCst);
        self.inner.begin_render();
    }

    fn write_render(&self, samples: &[OutputSample]) {
        let n = self.writes.fetch_add(1, Ordering::SeqCst) + 1;
        if n == self.limit {
            info!("Canceling render after {n} batches");
        }
        self.inner.write_render(samples);
    }

    fn end_render(&self) {
        self.inner.end_render();
    }

    fn is_canceling(&self) -> bool {
        self.writes() >= self.limit || self.inner.is_canceling()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
