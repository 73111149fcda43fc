//! Tasks

use super::*;

/// A partition of the sampling work. Tasks are created by a sampler and
/// driven by a worker until they report exhaustion.
pub trait Task: Send {
    /// Returns the id of the task, unique per enumeration.
    fn id(&self) -> usize;

    /// Draw the next sample. Returns `false` once the task is exhausted.
    ///
    /// * `sampler` - The sampler used to fill the sample; must share the
    ///               configuration of the sampler that created the task.
    /// * `period`  - Time period to sample.
    /// * `sample`  - The sample to fill.
    fn draw_sample(
        &mut self,
        sampler: &mut dyn Sampler,
        period: &TimePeriod,
        sample: &mut Sample,
    ) -> bool;
}

/// Iterates over the sub-pixels of a tile of pixels, row by row.
#[derive(Clone, Debug)]
pub struct TileTask {
    /// Task id.
    id: usize,

    /// Pixels of the tile.
    pixels: Bounds2i,

    /// Samples to draw per pixel.
    samples_per_pixel: usize,

    /// Current pixel.
    pixel: Point2i,

    /// Current sub-pixel.
    sub_pixel: usize,
}

impl TileTask {
    /// Create a new `TileTask`.
    ///
    /// * `id`                - Task id.
    /// * `pixels`            - Pixels of the tile.
    /// * `samples_per_pixel` - Samples to draw per pixel.
    pub fn new(id: usize, pixels: Bounds2i, samples_per_pixel: usize) -> Self {
        Self {
            id,
            pixels,
            samples_per_pixel,
            pixel: pixels.p_min,
            sub_pixel: 0,
        }
    }

    /// Returns the pixels of the tile.
    pub fn pixels(&self) -> &Bounds2i {
        &self.pixels
    }
}

impl Task for TileTask {
    fn id(&self) -> usize {
        self.id
    }

    fn draw_sample(
        &mut self,
        sampler: &mut dyn Sampler,
        period: &TimePeriod,
        sample: &mut Sample,
    ) -> bool {
        if self.pixels.is_empty()
            || self.samples_per_pixel == 0
            || self.pixel.y >= self.pixels.p_max.y
        {
            return false;
        }

        let position = SamplePosition::Pixel {
            pixel: self.pixel,
            sub_pixel: self.sub_pixel,
        };
        sampler.draw(&position, period, sample);

        self.sub_pixel += 1;
        if self.sub_pixel == self.samples_per_pixel {
            self.sub_pixel = 0;
            self.pixel.x += 1;
            if self.pixel.x >= self.pixels.p_max.x {
                self.pixel.x = self.pixels.p_min.x;
                self.pixel.y += 1;
            }
        }
        true
    }
}

/// Iterates over a contiguous range of a progressive sample sequence.
#[derive(Clone, Debug)]
pub struct ProgressiveTask {
    /// Task id.
    id: usize,

    /// Next sequence index.
    next: u64,

    /// One past the last sequence index.
    end: u64,
}

impl ProgressiveTask {
    /// Create a new `ProgressiveTask`.
    ///
    /// * `id`    - Task id.
    /// * `begin` - First sequence index.
    /// * `end`   - One past the last sequence index.
    pub fn new(id: usize, begin: u64, end: u64) -> Self {
        Self { id, next: begin, end }
    }
}

impl Task for ProgressiveTask {
    fn id(&self) -> usize {
        self.id
    }

    fn draw_sample(
        &mut self,
        sampler: &mut dyn Sampler,
        period: &TimePeriod,
        sample: &mut Sample,
    ) -> bool {
        if self.next >= self.end {
            return false;
        }
        sampler.draw(&SamplePosition::Sequence { index: self.next }, period, sample);
        self.next += 1;
        true
    }
}
