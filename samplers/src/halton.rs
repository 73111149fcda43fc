//! Halton Sampler.

use kernel::common::*;
use kernel::defaults::*;
use kernel::geometry::*;
use kernel::rng::*;
use kernel::sampler::*;
use std::sync::LazyLock;

/// Number of dimensions with a prime base.
const PRIME_TABLE_SIZE: usize = 256;

/// Dimensions used for the screen, lens, time and wavelength samples.
const DIM_SCREEN: usize = 0;
const DIM_LENS: usize = 2;
const DIM_TIME: usize = 4;
const DIM_WAVELENGTH: usize = 5;
const DIM_SUB_SEQUENCES: usize = 6;

/// The first `PRIME_TABLE_SIZE` primes.
static PRIMES: LazyLock<Vec<u64>> = LazyLock::new(|| {
    let mut primes = Vec::with_capacity(PRIME_TABLE_SIZE);
    let mut candidate = 2_u64;
    while primes.len() < PRIME_TABLE_SIZE {
        if primes
            .iter()
            .take_while(|&&p| p * p <= candidate)
            .all(|&p| candidate % p != 0)
        {
            primes.push(candidate);
        }
        candidate += 1;
    }
    primes
});

/// Precomputed digit permutations, one per prime base.
static RADICAL_INVERSE_PERMUTATIONS: LazyLock<Vec<Vec<u16>>> = LazyLock::new(|| {
    let mut rng = RNG::default();
    PRIMES
        .iter()
        .map(|&base| {
            let mut perm: Vec<u16> = (0..base as u16).collect();
            rng.shuffle(&mut perm);
            perm
        })
        .collect()
});

/// Returns the radical inverse of `a` in a prime base with its digits
/// permuted.
///
/// * `base` - The prime base.
/// * `perm` - Permutation of the digits `0..base`.
/// * `a`    - The index.
pub fn scrambled_radical_inverse(base: u64, perm: &[u16], mut a: u64) -> Float {
    let inv_base = 1.0 / base as f64;
    let mut reversed_digits = 0_u64;
    let mut inv_base_n = 1.0_f64;
    while a > 0 {
        let next = a / base;
        let digit = a - next * base;
        reversed_digits = reversed_digits
            .wrapping_mul(base)
            .wrapping_add(perm[digit as usize] as u64);
        inv_base_n *= inv_base;
        a = next;
    }
    let tail = inv_base * perm[0] as f64 / (1.0 - inv_base);
    min(
        (inv_base_n * (reversed_digits as f64 + tail)) as Float,
        ONE_MINUS_EPSILON,
    )
}

/// Implements a progressive low-discrepancy sampler using scrambled Halton
/// sequences. Every sample index maps to a point of the whole bucket; tasks
/// hand out consecutive ranges of indices.
#[derive(Clone)]
pub struct Halton {
    /// The common sampler data.
    data: SamplerData,

    /// Number of samples per task.
    samples_per_task: u64,

    /// Generates the dimensions beyond the prime table.
    rng: RNG,
}

impl Halton {
    /// Create a new `Halton` sampler.
    ///
    /// * `samples_per_pixel` - Average number of samples per pixel.
    /// * `resolution`        - Resolution in pixels.
    /// * `samples_per_task`  - Number of samples per task.
    pub fn new(samples_per_pixel: usize, resolution: Point2i, samples_per_task: u64) -> Self {
        Self {
            data: SamplerData::new(samples_per_pixel, resolution),
            samples_per_task: samples_per_task.max(1),
            rng: RNG::default(),
        }
    }

    /// Returns the sample value of one dimension.
    ///
    /// * `dimension` - The dimension.
    /// * `index`     - Index of the value within the dimension.
    fn sample_dimension(&mut self, dimension: usize, index: u64) -> Float {
        match PRIMES.get(dimension) {
            Some(&base) => {
                scrambled_radical_inverse(base, &RADICAL_INVERSE_PERMUTATIONS[dimension], index)
            }
            None => self.rng.uniform_float(),
        }
    }

    /// Returns the first dimension of a 1-D sub-sequence.
    fn dimension_1d(&self, id: SubSequenceId) -> usize {
        DIM_SUB_SEQUENCES + id.index()
    }

    /// Returns the first of the two dimensions of a 2-D sub-sequence.
    fn dimension_2d(&self, id: SubSequenceId) -> usize {
        let n_1d = self.data.layout().sequences_1d().len();
        DIM_SUB_SEQUENCES + n_1d + 2 * id.index()
    }
}

impl Sampler for Halton {
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
    /// * `seed` - The seed for the dimensions beyond the prime table.
    fn fork(&self, seed: u64) -> Box<dyn Sampler> {
        let mut sampler = self.clone();
        sampler.seed(seed);
        Box::new(sampler)
    }

    /// Reseed the generator of the dimensions beyond the prime table; the
    /// Halton dimensions themselves only depend on the sample index.
    ///
    /// * `seed` - The seed.
    fn seed(&mut self, seed: u64) {
        self.rng.seed(seed);
    }

    fn do_get_task(&mut self) -> Option<Box<dyn Task>> {
        let total = self.number_of_samples();
        self.data
            .next_progressive_task(self.samples_per_task, total)
            .map(|task| Box::new(task) as Box<dyn Task>)
    }

    /// Returns the sample budget: `samples_per_pixel` samples for every
    /// pixel of the frame, spread over the bucket.
    fn number_of_samples(&self) -> u64 {
        let data = self.data();
        let pixels = data.resolution.x.max(0) as u64 * data.resolution.y.max(0) as u64;
        if data.bucket.is_empty() {
            0
        } else {
            pixels * data.samples_per_pixel as u64
        }
    }

    fn sample_screen(&mut self, position: &SamplePosition) -> Point2f {
        let i = position.sub_index();
        let u = Point2f::new(
            self.sample_dimension(DIM_SCREEN, i),
            self.sample_dimension(DIM_SCREEN + 1, i),
        );
        match position.pixel() {
            Some(pixel) => self.data.screen_from_pixel(&pixel, &u),
            None => self.data.bucket.lerp(&u),
        }
    }

    fn sample_lens(&mut self, position: &SamplePosition) -> Point2f {
        let i = position.sub_index();
        Point2f::new(
            self.sample_dimension(DIM_LENS, i),
            self.sample_dimension(DIM_LENS + 1, i),
        )
    }

    fn sample_time(&mut self, position: &SamplePosition) -> Float {
        self.sample_dimension(DIM_TIME, position.sub_index())
    }

    fn sample_wavelength(&mut self, position: &SamplePosition) -> Float {
        self.sample_dimension(DIM_WAVELENGTH, position.sub_index())
    }

    fn sample_sub_sequence_1d(
        &mut self,
        position: &SamplePosition,
        id: SubSequenceId,
        values: &mut [Float],
    ) {
        let dimension = self.dimension_1d(id);
        let first = position.sub_index() * values.len() as u64;
        for (k, v) in values.iter_mut().enumerate() {
            *v = self.sample_dimension(dimension, first + k as u64);
        }
    }

    fn sample_sub_sequence_2d(
        &mut self,
        position: &SamplePosition,
        id: SubSequenceId,
        values: &mut [Point2f],
    ) {
        let dimension = self.dimension_2d(id);
        let first = position.sub_index() * values.len() as u64;
        for (k, v) in values.iter_mut().enumerate() {
            let index = first + k as u64;
            *v = Point2f::new(
                self.sample_dimension(dimension, index),
                self.sample_dimension(dimension + 1, index),
            );
        }
    }
}

impl From<&RenderDefaults> for Halton {
    /// Create a `Halton` sampler from render defaults.
    ///
    /// * `defaults` - The render defaults.
    fn from(defaults: &RenderDefaults) -> Self {
        Self::new(
            defaults.samples_per_pixel,
            defaults.resolution,
            defaults.samples_per_task,
        )
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
