//! Render Defaults

use crate::geometry::*;

/// Default render settings, built once at start-up and handed to whatever
/// needs them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderDefaults {
    /// Output resolution in pixels.
    pub resolution: Point2i,

    /// Samples per pixel.
    pub samples_per_pixel: usize,

    /// Maximum recursion depth of traced rays.
    pub max_ray_generation: usize,

    /// Number of worker threads; 0 uses one per logical CPU.
    pub number_of_threads: usize,

    /// Seed of the engine's seed generator.
    pub seed: u64,

    /// Number of samples per task for progressive samplers.
    pub samples_per_task: u64,
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            resolution: Point2i::new(320, 240),
            samples_per_pixel: 16,
            max_ray_generation: 8,
            number_of_threads: 0,
            seed: 0,
            samples_per_task: 1024,
        }
    }
}
