//! Sampler

mod sub_sequence;
mod task;

use crate::common::*;
use crate::geometry::*;
use crate::sample::*;
use crate::time_period::*;
use std::sync::Arc;

// Re-export
pub use sub_sequence::*;
pub use task::*;

/// Width and height in pixels of the tiles handed out by tile based
/// samplers.
pub const TILE_SIZE: Int = 16;

/// Where in the iteration domain a sample is drawn.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SamplePosition {
    /// A sub-pixel of a pixel of a tile.
    Pixel {
        /// The pixel.
        pixel: Point2i,

        /// Index of the sample within the pixel.
        sub_pixel: usize,
    },

    /// An index into a progressive sequence.
    Sequence {
        /// Index of the sample in the sequence.
        index: u64,
    },
}

impl SamplePosition {
    /// Returns the pixel if the position is pixel based.
    pub fn pixel(&self) -> Option<Point2i> {
        match self {
            Self::Pixel { pixel, .. } => Some(*pixel),
            Self::Sequence { .. } => None,
        }
    }

    /// Returns the sub-pixel index, or the sequence index.
    pub fn sub_index(&self) -> u64 {
        match self {
            Self::Pixel { sub_pixel, .. } => *sub_pixel as u64,
            Self::Sequence { index } => *index,
        }
    }
}

/// Common data for samplers.
#[derive(Clone, Debug)]
pub struct SamplerData {
    /// Registered sub-sequences.
    layout: Arc<SubSequenceLayout>,

    /// Set once the first task was handed out; registration is closed until
    /// the requests are cleared.
    locked: bool,

    /// Number of samples per pixel.
    pub samples_per_pixel: usize,

    /// Raster resolution.
    pub resolution: Point2i,

    /// Normalized region of the frame to sample.
    pub bucket: Bounds2f,

    /// Id of the next task to hand out.
    next_task_id: usize,
}

impl SamplerData {
    /// Create a new `SamplerData`.
    ///
    /// * `samples_per_pixel` - Number of samples per pixel.
    /// * `resolution`        - Raster resolution.
    pub fn new(samples_per_pixel: usize, resolution: Point2i) -> Self {
        Self {
            layout: Arc::new(SubSequenceLayout::default()),
            locked: false,
            samples_per_pixel,
            resolution,
            bucket: Bounds2f::unit(),
            next_task_id: 0,
        }
    }

    /// Returns the registered sub-sequences.
    pub fn layout(&self) -> &Arc<SubSequenceLayout> {
        &self.layout
    }

    /// Returns true once tasks were handed out.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Returns the pixels covered by the bucket.
    pub fn pixel_bounds(&self) -> Bounds2i {
        self.bucket.raster_bounds(&self.resolution)
    }

    /// Map a pixel and an offset within it to normalized screen space.
    ///
    /// * `pixel`  - The pixel.
    /// * `offset` - Offset within the pixel in `[0, 1) x [0, 1)`.
    pub fn screen_from_pixel(&self, pixel: &Point2i, offset: &Point2f) -> Point2f {
        Point2f::new(
            (pixel.x as Float + offset.x) / self.resolution.x as Float,
            (pixel.y as Float + offset.y) / self.resolution.y as Float,
        )
    }

    /// Returns the next tile of the bucket, or `None` when all tiles were
    /// handed out.
    pub fn next_tile_task(&mut self) -> Option<TileTask> {
        let pixels = self.pixel_bounds();
        if pixels.is_empty() || self.samples_per_pixel == 0 {
            return None;
        }

        let extent = pixels.diagonal();
        let n_tiles = Point2i::new(
            (extent.x + TILE_SIZE - 1) / TILE_SIZE,
            (extent.y + TILE_SIZE - 1) / TILE_SIZE,
        );

        let id = self.next_task_id;
        if id >= (n_tiles.x * n_tiles.y) as usize {
            return None;
        }
        self.next_task_id += 1;

        let tile = Point2i::new(id as Int % n_tiles.x, id as Int / n_tiles.x);
        let p_min = pixels.p_min + Point2i::new(tile.x * TILE_SIZE, tile.y * TILE_SIZE);
        let p_max = (p_min + Point2i::new(TILE_SIZE, TILE_SIZE)).min(&pixels.p_max);
        Some(TileTask::new(id, Bounds2i { p_min, p_max }, self.samples_per_pixel))
    }

    /// Returns the next batch of a progressive sample budget, or `None` when
    /// the budget is spent.
    ///
    /// * `samples_per_task` - Number of samples in one task.
    /// * `total_samples`    - Total sample budget.
    pub fn next_progressive_task(
        &mut self,
        samples_per_task: u64,
        total_samples: u64,
    ) -> Option<ProgressiveTask> {
        let id = self.next_task_id;
        let begin = id as u64 * samples_per_task;
        if samples_per_task == 0 || begin >= total_samples {
            return None;
        }
        self.next_task_id += 1;

        let end = min(begin + samples_per_task, total_samples);
        Some(ProgressiveTask::new(id, begin, end))
    }
}

/// Sampler interface.
///
/// Collaborators first register the sub-sequences they need, then the
/// sampler partitions the work into tasks. A task draws every sample through
/// `draw()`, which fills a `Sample` using the per component hooks.
pub trait Sampler: Send {
    /// Returns a shared reference underlying `SamplerData`.
    fn data(&self) -> &SamplerData;

    /// Returns a mutable reference to underlying `SamplerData`.
    fn data_mut(&mut self) -> &mut SamplerData;

    /// Returns an independent copy with its random state seeded.
    ///
    /// * `seed` - The seed.
    fn fork(&self, seed: u64) -> Box<dyn Sampler>;

    /// Re-seed the random state. Identically seeded samplers driven
    /// identically produce identical samples.
    ///
    /// * `seed` - The seed.
    fn seed(&mut self, seed: u64);

    /// Returns the next partition of the work.
    fn do_get_task(&mut self) -> Option<Box<dyn Task>>;

    /// Called before the components of a sample are drawn.
    ///
    /// * `_position` - Position of the sample.
    fn prepare(&mut self, _position: &SamplePosition) {}

    /// Returns the screen sample within the current pixel or bucket.
    ///
    /// * `position` - Position of the sample.
    fn sample_screen(&mut self, position: &SamplePosition) -> Point2f;

    /// Returns a lens sample in `[0, 1) x [0, 1)`.
    ///
    /// * `position` - Position of the sample.
    fn sample_lens(&mut self, position: &SamplePosition) -> Point2f;

    /// Returns a time parameter in `[0, 1)`.
    ///
    /// * `position` - Position of the sample.
    fn sample_time(&mut self, position: &SamplePosition) -> Float;

    /// Returns a wavelength parameter in `[0, 1)`.
    ///
    /// * `position` - Position of the sample.
    fn sample_wavelength(&mut self, position: &SamplePosition) -> Float;

    /// Fill a 1-D sub-sequence.
    ///
    /// * `position` - Position of the sample.
    /// * `id`       - The sub-sequence.
    /// * `values`   - Storage to fill.
    fn sample_sub_sequence_1d(
        &mut self,
        position: &SamplePosition,
        id: SubSequenceId,
        values: &mut [Float],
    );

    /// Fill a 2-D sub-sequence.
    ///
    /// * `position` - Position of the sample.
    /// * `id`       - The sub-sequence.
    /// * `values`   - Storage to fill.
    fn sample_sub_sequence_2d(
        &mut self,
        position: &SamplePosition,
        id: SubSequenceId,
        values: &mut [Point2f],
    );

    /// Returns the size actually allocated for a 1-D request of `n` values.
    ///
    /// * `n` - Requested size.
    fn round_size_1d(&self, n: usize) -> usize {
        n
    }

    /// Returns the size actually allocated for a 2-D request of `n` values.
    ///
    /// * `n` - Requested size.
    fn round_size_2d(&self, n: usize) -> usize {
        n
    }

    /// Returns the total number of samples the tasks will draw.
    fn number_of_samples(&self) -> u64 {
        let data = self.data();
        data.pixel_bounds().area().max(0) as u64 * data.samples_per_pixel as u64
    }

    /// Register a 1-D sub-sequence. Returns `None` for a zero size request.
    /// Callers must use the size of the returned sub-sequence, which may
    /// differ from `size`.
    ///
    /// * `size` - Requested number of values.
    fn request_sub_sequence_1d(&mut self, size: usize) -> Option<SubSequenceId> {
        assert!(
            !self.data().is_locked(),
            "sub-sequence requested after tasks were handed out"
        );
        if size == 0 {
            return None;
        }
        let size = self.round_size_1d(size).max(1);
        let data = self.data_mut();
        Some(Arc::make_mut(&mut data.layout).add_1d(size))
    }

    /// Register a 2-D sub-sequence. Returns `None` for a zero size request.
    /// Callers must use the size of the returned sub-sequence, which may
    /// differ from `size`.
    ///
    /// * `size` - Requested number of values.
    fn request_sub_sequence_2d(&mut self, size: usize) -> Option<SubSequenceId> {
        assert!(
            !self.data().is_locked(),
            "sub-sequence requested after tasks were handed out"
        );
        if size == 0 {
            return None;
        }
        let size = self.round_size_2d(size).max(1);
        let data = self.data_mut();
        Some(Arc::make_mut(&mut data.layout).add_2d(size))
    }

    /// Drop all registered sub-sequences and reopen registration.
    fn clear_sub_sequence_requests(&mut self) {
        let data = self.data_mut();
        data.layout = Arc::new(SubSequenceLayout::default());
        data.locked = false;
        data.next_task_id = 0;
    }

    /// Set the raster resolution and restart task enumeration.
    ///
    /// * `resolution` - The resolution.
    fn set_resolution(&mut self, resolution: Point2i) {
        let data = self.data_mut();
        data.resolution = resolution;
        data.next_task_id = 0;
    }

    /// Restrict sampling to a normalized region of the frame and restart
    /// task enumeration.
    ///
    /// * `bucket` - The region.
    fn set_bucket(&mut self, bucket: Bounds2f) {
        let data = self.data_mut();
        data.bucket = bucket;
        data.next_task_id = 0;
    }

    /// Returns the next partition of the work, or `None` once all work was
    /// handed out. Closes sub-sequence registration.
    fn get_task(&mut self) -> Option<Box<dyn Task>> {
        self.data_mut().locked = true;
        self.do_get_task()
    }

    /// Fill every field and registered sub-sequence of a sample.
    ///
    /// * `position` - Position of the sample.
    /// * `period`   - Time period to sample.
    /// * `sample`   - The sample to fill.
    fn draw(&mut self, position: &SamplePosition, period: &TimePeriod, sample: &mut Sample) {
        let layout = Arc::clone(self.data().layout());
        sample.bind(&layout);

        self.prepare(position);
        sample.screen_sample = self.sample_screen(position);
        sample.lens_sample = self.sample_lens(position);
        sample.time = period.interpolate(self.sample_time(position));
        sample.wavelength = lerp(
            self.sample_wavelength(position),
            WAVELENGTH_MIN,
            WAVELENGTH_MAX,
        );
        sample.wavelength_pdf = 1.0 / (WAVELENGTH_MAX - WAVELENGTH_MIN);
        sample.weight = 1.0;

        for (index, sequence) in layout.sequences_1d().iter().enumerate() {
            let values = &mut sample.values_1d[sequence.range()];
            self.sample_sub_sequence_1d(position, SubSequenceId(index), values);
        }
        for (index, sequence) in layout.sequences_2d().iter().enumerate() {
            let values = &mut sample.values_2d[sequence.range()];
            self.sample_sub_sequence_2d(position, SubSequenceId(index), values);
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
