//! Stratified Sampler.

use kernel::common::*;
use kernel::defaults::*;
use kernel::geometry::*;
use kernel::rng::*;
use kernel::sampler::*;
use kernel::sampling::*;

/// Implements a tiled sampler that jitters samples within strata. All strata
/// tables of a pixel are generated when its first sub-pixel is drawn and are
/// shared out over its remaining sub-pixels.
#[derive(Clone)]
pub struct Stratifier {
    /// The common sampler data.
    data: SamplerData,

    /// The random number generator.
    rng: RNG,

    /// Number of strata along each screen and lens axis; the square of it is
    /// the number of samples per pixel.
    strata_per_axis: usize,

    /// Screen offsets within the current pixel, one per sub-pixel.
    screen: Vec<Point2f>,

    /// Lens samples of the current pixel.
    lens: Vec<Point2f>,

    /// Time samples of the current pixel.
    time: Vec<Float>,

    /// Wavelength samples of the current pixel.
    wavelength: Vec<Float>,

    /// 1-D sub-sequence tables of the current pixel, one per sub-sequence.
    tables_1d: Vec<Vec<Float>>,

    /// 2-D sub-sequence tables of the current pixel, one per sub-sequence.
    tables_2d: Vec<Vec<Point2f>>,
}

impl Stratifier {
    /// Create a new `Stratifier`. The number of samples per pixel is rounded
    /// to the nearest perfect square.
    ///
    /// * `samples_per_pixel` - Number of samples per pixel.
    /// * `resolution`        - Resolution in pixels.
    /// * `seed`              - Seed for the random number generator.
    pub fn new(samples_per_pixel: usize, resolution: Point2i, seed: u64) -> Self {
        let strata_per_axis = round_sqrt(samples_per_pixel).max(1);
        let rounded = strata_per_axis * strata_per_axis;
        if rounded != samples_per_pixel {
            warn!("Rounding {samples_per_pixel} samples per pixel to {rounded}");
        }

        Self {
            data: SamplerData::new(rounded, resolution),
            rng: RNG::new(seed),
            strata_per_axis,
            screen: vec![],
            lens: vec![],
            time: vec![],
            wavelength: vec![],
            tables_1d: vec![],
            tables_2d: vec![],
        }
    }

    /// Returns the number of strata along each axis.
    pub fn strata_per_axis(&self) -> usize {
        self.strata_per_axis
    }

    /// Regenerate every strata table for a new pixel.
    fn generate_tables(&mut self) {
        let n = self.strata_per_axis;
        let spp = n * n;

        self.screen = stratified_sample_2d(&mut self.rng, n, n);
        self.rng.shuffle(&mut self.screen);
        self.lens = stratified_sample_2d(&mut self.rng, n, n);
        self.rng.shuffle(&mut self.lens);
        self.time = stratified_sample_1d(&mut self.rng, spp);
        self.rng.shuffle(&mut self.time);
        self.wavelength = stratified_sample_1d(&mut self.rng, spp);
        self.rng.shuffle(&mut self.wavelength);

        let layout = std::sync::Arc::clone(self.data.layout());

        self.tables_1d = layout
            .sequences_1d()
            .iter()
            .map(|seq| {
                let mut table = stratified_sample_1d(&mut self.rng, spp * seq.size);
                self.rng.shuffle(&mut table);
                table
            })
            .collect();

        // 2-D sizes are perfect squares; see `round_size_2d()`.
        self.tables_2d = layout
            .sequences_2d()
            .iter()
            .map(|seq| {
                let m = n * round_sqrt(seq.size);
                let mut table = stratified_sample_2d(&mut self.rng, m, m);
                self.rng.shuffle(&mut table);
                table
            })
            .collect();
    }

    fn uniform_2d(&mut self) -> Point2f {
        Point2f::new(self.rng.uniform_float(), self.rng.uniform_float())
    }

    /// Returns the slice of `table` assigned to a sub-pixel.
    ///
    /// * `table`     - Strata table of the current pixel.
    /// * `sub_pixel` - The sub-pixel.
    /// * `n`         - Number of values per sub-pixel.
    fn slice<T>(table: &[T], sub_pixel: usize, n: usize) -> Option<&[T]> {
        table.get(sub_pixel * n..(sub_pixel + 1) * n)
    }
}

impl Sampler for Stratifier {
    /// Returns a shared reference underlying `SamplerData`.
    fn data(&self) -> &SamplerData {
        &self.data
    }

    /// Returns a mutable reference to underlying `SamplerData`.
    fn data_mut(&mut self) -> &mut SamplerData {
        &mut self.data
    }

    /// Returns an independent copy for use by a rendering thread.
    ///
    /// * `seed` - The seed for the random number generator.
    fn fork(&self, seed: u64) -> Box<dyn Sampler> {
        let mut sampler = self.clone();
        sampler.seed(seed);
        Box::new(sampler)
    }

    fn seed(&mut self, seed: u64) {
        self.rng.seed(seed);
    }

    fn do_get_task(&mut self) -> Option<Box<dyn Task>> {
        self.data
            .next_tile_task()
            .map(|task| Box::new(task) as Box<dyn Task>)
    }

    /// Regenerate the strata tables when the first sub-pixel of a pixel is
    /// drawn.
    ///
    /// * `position` - The sample position.
    fn prepare(&mut self, position: &SamplePosition) {
        if let SamplePosition::Pixel { sub_pixel: 0, .. } = position {
            self.generate_tables();
        }
    }

    fn sample_screen(&mut self, position: &SamplePosition) -> Point2f {
        match position {
            SamplePosition::Pixel { pixel, sub_pixel } => {
                let offset = self
                    .screen
                    .get(*sub_pixel)
                    .copied()
                    .unwrap_or_else(|| self.uniform_2d());
                self.data.screen_from_pixel(pixel, &offset)
            }
            SamplePosition::Sequence { .. } => {
                let u = Point2f::new(self.rng.uniform_float(), self.rng.uniform_float());
                self.data.bucket.lerp(&u)
            }
        }
    }

    fn sample_lens(&mut self, position: &SamplePosition) -> Point2f {
        match self.lens.get(position.sub_index() as usize) {
            Some(p) if position.pixel().is_some() => *p,
            _ => Point2f::new(self.rng.uniform_float(), self.rng.uniform_float()),
        }
    }

    fn sample_time(&mut self, position: &SamplePosition) -> Float {
        match self.time.get(position.sub_index() as usize) {
            Some(t) if position.pixel().is_some() => *t,
            _ => self.rng.uniform_float(),
        }
    }

    fn sample_wavelength(&mut self, position: &SamplePosition) -> Float {
        match self.wavelength.get(position.sub_index() as usize) {
            Some(w) if position.pixel().is_some() => *w,
            _ => self.rng.uniform_float(),
        }
    }

    fn sample_sub_sequence_1d(
        &mut self,
        position: &SamplePosition,
        id: SubSequenceId,
        values: &mut [Float],
    ) {
        let strata = match position {
            SamplePosition::Pixel { sub_pixel, .. } => self
                .tables_1d
                .get(id.index())
                .and_then(|table| Self::slice(table, *sub_pixel, values.len())),
            SamplePosition::Sequence { .. } => None,
        };
        match strata {
            Some(strata) => values.copy_from_slice(strata),
            None => values.iter_mut().for_each(|v| *v = self.rng.uniform_float()),
        }
        self.rng.shuffle(values);
    }

    fn sample_sub_sequence_2d(
        &mut self,
        position: &SamplePosition,
        id: SubSequenceId,
        values: &mut [Point2f],
    ) {
        let strata = match position {
            SamplePosition::Pixel { sub_pixel, .. } => self
                .tables_2d
                .get(id.index())
                .and_then(|table| Self::slice(table, *sub_pixel, values.len())),
            SamplePosition::Sequence { .. } => None,
        };
        match strata {
            Some(strata) => values.copy_from_slice(strata),
            None => values.iter_mut().for_each(|v| *v = self.uniform_2d()),
        }
        self.rng.shuffle(values);
    }

    /// Round a 2-D sub-sequence size to the nearest perfect square so that it
    /// can be stratified on a square grid.
    ///
    /// * `n` - Requested size.
    fn round_size_2d(&self, n: usize) -> usize {
        let m = round_sqrt(n).max(1);
        m * m
    }
}

impl From<&RenderDefaults> for Stratifier {
    /// Create a `Stratifier` from render defaults.
    ///
    /// * `defaults` - The render defaults.
    fn from(defaults: &RenderDefaults) -> Self {
        Self::new(defaults.samples_per_pixel, defaults.resolution, defaults.seed)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
