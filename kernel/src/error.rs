//! Render Errors

use crate::geometry::*;
use thiserror::Error;

/// Configuration errors reported by `RenderEngine::render()` before any
/// work starts.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum RenderError {
    #[error("no camera set")]
    NoCamera,

    #[error("no ray tracer set")]
    NoTracer,

    #[error("no scene set")]
    NoScene,

    #[error("no sampler set")]
    NoSampler,

    #[error("no render target set")]
    NoTarget,

    #[error("bucket {bucket} is not inside the unit square")]
    InvalidBucket { bucket: Bounds2f },
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(RenderError::NoScene.to_string(), "no scene set");
        let bucket = Bounds2f::new(Point2f::new(0.5, 0.5), Point2f::new(1.5, 1.0));
        assert!(RenderError::InvalidBucket { bucket }
            .to_string()
            .starts_with("bucket "));
    }
}
