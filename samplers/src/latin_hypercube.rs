//! Latin Hypercube Sampler.

use kernel::common::*;
use kernel::defaults::*;
use kernel::geometry::*;
use kernel::rng::*;
use kernel::sampler::*;

/// Implements a tiled sampler that stratifies every dimension independently.
/// The `samples_per_pixel` strata of each screen, lens, time and wavelength
/// axis are permuted when the first sub-pixel of a pixel is drawn, so the
/// number of samples per pixel need not be a perfect square.
#[derive(Clone)]
pub struct LatinHypercube {
    /// The common sampler data.
    data: SamplerData,

    /// The random number generator.
    rng: RNG,

    /// Jitter samples within their stratum; otherwise use stratum centres.
    jittered: bool,

    /// Permuted strata of the current pixel: screen x, screen y, lens x,
    /// lens y, time and wavelength.
    strata: [Vec<usize>; 6],
}

const SCREEN_X: usize = 0;
const SCREEN_Y: usize = 1;
const LENS_X: usize = 2;
const LENS_Y: usize = 3;
const TIME: usize = 4;
const WAVELENGTH: usize = 5;

impl LatinHypercube {
    /// Create a new `LatinHypercube` sampler.
    ///
    /// * `samples_per_pixel` - Number of samples per pixel.
    /// * `resolution`        - Resolution in pixels.
    /// * `seed`              - Seed for the random number generator.
    pub fn new(samples_per_pixel: usize, resolution: Point2i, seed: u64) -> Self {
        let spp = samples_per_pixel.max(1);
        Self {
            data: SamplerData::new(spp, resolution),
            rng: RNG::new(seed),
            jittered: true,
            strata: std::array::from_fn(|_| (0..spp).collect()),
        }
    }

    /// Returns true if samples are jittered within their stratum.
    pub fn jittered(&self) -> bool {
        self.jittered
    }

    /// Enable or disable jittering. Disabled, every sample sits in the
    /// centre of its stratum.
    ///
    /// * `jittered` - Jitter samples.
    pub fn set_jittered(&mut self, jittered: bool) {
        self.jittered = jittered;
    }

    fn jitter(&mut self) -> Float {
        if self.jittered {
            self.rng.uniform_float()
        } else {
            0.5
        }
    }

    /// Returns the sample of one stratified axis.
    ///
    /// * `axis`     - The axis.
    /// * `position` - The sample position.
    fn sample_stratum(&mut self, axis: usize, position: &SamplePosition) -> Float {
        let n = self.strata[axis].len();
        let stratum = self.strata[axis][position.sub_index() as usize % n];
        let u = (stratum as Float + self.jitter()) / n as Float;
        min(u, ONE_MINUS_EPSILON)
    }

    /// Fill `values` with one jittered value per stratum of `[0, 1)`.
    fn stratify(&mut self, values: &mut [Float]) {
        let scale = 1.0 / values.len() as Float;
        for (k, v) in values.iter_mut().enumerate() {
            *v = min((k as Float + self.jitter()) * scale, ONE_MINUS_EPSILON);
        }
    }
}

impl Sampler for LatinHypercube {
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

    /// Permute the strata of every axis when the first sub-pixel of a pixel
    /// is drawn.
    ///
    /// * `position` - The sample position.
    fn prepare(&mut self, position: &SamplePosition) {
        if position.sub_index() == 0 {
            let spp = self.data.samples_per_pixel.max(1);
            for strata in self.strata.iter_mut() {
                if strata.len() != spp {
                    *strata = (0..spp).collect();
                }
                self.rng.shuffle(strata);
            }
        }
    }

    fn sample_screen(&mut self, position: &SamplePosition) -> Point2f {
        let u = Point2f::new(
            self.sample_stratum(SCREEN_X, position),
            self.sample_stratum(SCREEN_Y, position),
        );
        match position.pixel() {
            Some(pixel) => self.data.screen_from_pixel(&pixel, &u),
            None => self.data.bucket.lerp(&u),
        }
    }

    fn sample_lens(&mut self, position: &SamplePosition) -> Point2f {
        Point2f::new(
            self.sample_stratum(LENS_X, position),
            self.sample_stratum(LENS_Y, position),
        )
    }

    fn sample_time(&mut self, position: &SamplePosition) -> Float {
        self.sample_stratum(TIME, position)
    }

    fn sample_wavelength(&mut self, position: &SamplePosition) -> Float {
        self.sample_stratum(WAVELENGTH, position)
    }

    fn sample_sub_sequence_1d(
        &mut self,
        _position: &SamplePosition,
        _id: SubSequenceId,
        values: &mut [Float],
    ) {
        self.stratify(values);
    }

    /// Stratify both axes of a 2-D sub-sequence and pair them up through a
    /// random permutation.
    fn sample_sub_sequence_2d(
        &mut self,
        _position: &SamplePosition,
        _id: SubSequenceId,
        values: &mut [Point2f],
    ) {
        let mut xs = vec![0.0; values.len()];
        let mut ys = vec![0.0; values.len()];
        self.stratify(&mut xs);
        self.stratify(&mut ys);
        self.rng.shuffle(&mut ys);
        for (v, (x, y)) in values.iter_mut().zip(xs.into_iter().zip(ys)) {
            *v = Point2f::new(x, y);
        }
    }
}

impl From<&RenderDefaults> for LatinHypercube {
    /// Create a `LatinHypercube` sampler from render defaults.
    ///
    /// * `defaults` - The render defaults.
    fn from(defaults: &RenderDefaults) -> Self {
        Self::new(defaults.samples_per_pixel, defaults.resolution, defaults.seed)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use kernel::sample::*;
    use kernel::time_period::*;

    fn draw_pixel(sampler: &mut dyn Sampler, pixel: Point2i) -> Vec<Sample> {
        let spp = sampler.data().samples_per_pixel;
        let period = TimePeriod::new(0.0, 1.0);
        (0..spp)
            .map(|sub_pixel| {
                let mut sample = Sample::new();
                sampler.draw(&SamplePosition::Pixel { pixel, sub_pixel }, &period, &mut sample);
                sample
            })
            .collect()
    }

    /// Returns true if `values` hits every stratum of `[0, 1)` exactly once.
    fn is_latin(values: impl Iterator<Item = Float>, n: usize) -> bool {
        let mut seen = vec![0; n];
        for v in values {
            seen[(v * n as Float) as usize] += 1;
        }
        seen.iter().all(|&s| s == 1)
    }

    #[test]
    fn every_axis_is_stratified_over_the_pixel() {
        let mut sampler = LatinHypercube::new(5, Point2i::new(8, 8), 3);
        assert_eq!(sampler.data().samples_per_pixel, 5);

        let samples = draw_pixel(&mut sampler, Point2i::new(2, 6));
        let x = samples.iter().map(|s| s.screen_sample.x * 8.0 - 2.0);
        let y = samples.iter().map(|s| s.screen_sample.y * 8.0 - 6.0);
        assert!(is_latin(x, 5));
        assert!(is_latin(y, 5));
        assert!(is_latin(samples.iter().map(|s| s.lens_sample.x), 5));
        assert!(is_latin(samples.iter().map(|s| s.lens_sample.y), 5));
        assert!(is_latin(samples.iter().map(|s| s.time), 5));
    }

    #[test]
    fn sub_sequences_keep_their_requested_size() {
        let mut sampler = LatinHypercube::new(2, Point2i::new(4, 4), 0);
        assert_eq!(sampler.round_size_2d(6), 6);
        let id_1d = sampler.request_sub_sequence_1d(3);
        let id_2d = sampler.request_sub_sequence_2d(6);

        for sample in draw_pixel(&mut sampler, Point2i::new(0, 0)) {
            let values_1d = sample.sub_sequence_1d(id_1d);
            assert_eq!(values_1d.len(), 3);
            assert!(is_latin(values_1d.iter().copied(), 3));

            let values_2d = sample.sub_sequence_2d(id_2d);
            assert_eq!(values_2d.len(), 6);
            assert!(is_latin(values_2d.iter().map(|p| p.x), 6));
            assert!(is_latin(values_2d.iter().map(|p| p.y), 6));
        }
    }

    #[test]
    fn unjittered_samples_sit_in_stratum_centres() {
        let mut sampler = LatinHypercube::new(4, Point2i::new(4, 4), 9);
        sampler.set_jittered(false);
        assert!(!sampler.jittered());

        let mut times: Vec<Float> = draw_pixel(&mut sampler, Point2i::new(1, 1))
            .iter()
            .map(|s| s.time)
            .collect();
        times.sort_by(|a, b| a.total_cmp(b));
        for (k, t) in times.iter().enumerate() {
            assert!(approx_eq!(Float, *t, (k as Float + 0.5) / 4.0, epsilon = 1e-6));
        }
    }

    #[test]
    fn tasks_visit_every_pixel_of_the_bucket() {
        let mut sampler = LatinHypercube::new(3, Point2i::new(20, 10), 1);
        sampler.set_bucket(Bounds2f::new(Point2f::new(0.5, 0.0), Point2f::new(1.0, 1.0)));
        let period = TimePeriod::new(1.0, 2.0);

        let mut count = 0;
        let mut sample = Sample::new();
        while let Some(mut task) = sampler.get_task() {
            while task.draw_sample(&mut sampler, &period, &mut sample) {
                assert!(sample.screen_sample.x >= 0.5 && sample.screen_sample.x <= 1.0);
                assert!((1.0..=2.0).contains(&sample.time));
                assert!((WAVELENGTH_MIN..=WAVELENGTH_MAX).contains(&sample.wavelength));
                count += 1;
            }
        }
        assert_eq!(count, 10 * 10 * 3);
        assert_eq!(sampler.number_of_samples(), 300);
    }

    #[test]
    fn forks_with_the_same_seed_agree() {
        let sampler = LatinHypercube::new(4, Point2i::new(8, 8), 0);
        let mut a = sampler.fork(42);
        let mut b = sampler.fork(42);
        let sa = draw_pixel(a.as_mut(), Point2i::new(1, 1));
        let sb = draw_pixel(b.as_mut(), Point2i::new(1, 1));
        for (x, y) in sa.iter().zip(sb.iter()) {
            assert_eq!(x.screen_sample, y.screen_sample);
            assert_eq!(x.wavelength, y.wavelength);
        }
    }
}
