//! Command line options

use clap::{Parser, ValueEnum};
use kernel::common::*;
use kernel::defaults::*;
use kernel::geometry::*;
use kernel::sampler::*;
use samplers::*;

/// Available samplers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SamplerKind {
    /// Jittered strata per pixel.
    Stratified,

    /// Latin hypercube strata per pixel.
    LatinHypercube,

    /// Progressive scrambled Halton sequence.
    Halton,
}

/// Render options.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Options {
    /// Number of threads to use for rendering.
    #[arg(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 0,
        help = "Use specified number of threads for rendering; 0 uses all logical CPUs."
    )]
    n_threads: usize,

    /// Samples per pixel.
    #[arg(
        long = "pixelsamples",
        short = 's',
        value_name = "NUM",
        default_value_t = 16,
        help = "Number of samples per pixel."
    )]
    pub pixel_samples: usize,

    /// Output resolution.
    #[arg(
        long,
        num_args = 2,
        value_names = ["WIDTH", "HEIGHT"],
        default_values_t = [320, 240],
        help = "Resolution of the output image in pixels."
    )]
    pub resolution: Vec<Int>,

    /// Seed for the render.
    #[arg(long, default_value_t = 0, help = "Seed; equal seeds give equal renders.")]
    pub seed: u64,

    /// Sampler.
    #[arg(long, value_enum, default_value_t = SamplerKind::Stratified, help = "Sample generator.")]
    pub sampler: SamplerKind,

    /// Direct lighting strategy.
    #[arg(
        long,
        default_value = "all",
        help = "Light sampling strategy: 'all' samples every light, 'one' a single light."
    )]
    pub strategy: String,

    /// Maximum ray generation.
    #[arg(
        long = "maxgeneration",
        value_name = "NUM",
        default_value_t = 8,
        help = "Maximum recursion depth of reflected rays."
    )]
    pub max_generation: usize,

    /// Bucket of the frame to render.
    #[arg(
        long,
        num_args = 4,
        value_names = ["X0", "Y0", "X1", "Y1"],
        default_values_t = [0.0, 0.0, 1.0, 1.0],
        allow_negative_numbers = true,
        help = "Render only a normalized sub-rectangle of the frame."
    )]
    pub bucket: Vec<Float>,

    /// Frame time.
    #[arg(long, default_value_t = 0.0, help = "Time of the frame.")]
    pub time: Float,

    /// Path to the image file.
    #[arg(
        long = "outfile",
        short = 'o',
        value_name = "FILE",
        default_value = "lumen.png",
        help = "Write the final image to the given filename."
    )]
    pub image_file: String,

    /// Suppress all text output other than error messages.
    #[arg(long, help = "Suppress all text output other than error messages.")]
    pub quiet: bool,
}

impl Options {
    /// Returns the number of threads to use; 0 lets the engine use all
    /// logical CPUs.
    pub fn threads(&self) -> usize {
        let max_threads = num_cpus::get();
        match self.n_threads {
            n if n > max_threads => {
                warn!("Num threads > max logical CPUs {}", max_threads);
                max_threads
            }
            n => n,
        }
    }

    /// Returns the render defaults selected by the options.
    pub fn render_defaults(&self) -> RenderDefaults {
        let defaults = RenderDefaults::default();
        let resolution = match self.resolution.as_slice() {
            &[x, y] if x > 0 && y > 0 => Point2i::new(x, y),
            _ => {
                warn!("Invalid resolution {:?}, using default", self.resolution);
                defaults.resolution
            }
        };
        RenderDefaults {
            resolution,
            samples_per_pixel: self.pixel_samples.max(1),
            max_ray_generation: self.max_generation,
            number_of_threads: self.threads(),
            seed: self.seed,
            ..defaults
        }
    }

    /// Returns the bucket to render.
    pub fn bucket(&self) -> Bounds2f {
        match self.bucket.as_slice() {
            &[x0, y0, x1, y1] => Bounds2f::new(Point2f::new(x0, y0), Point2f::new(x1, y1)),
            _ => Bounds2f::unit(),
        }
    }

    /// Returns the selected sampler.
    ///
    /// * `defaults` - The render defaults.
    pub fn sampler(&self, defaults: &RenderDefaults) -> Box<dyn Sampler> {
        match self.sampler {
            SamplerKind::Stratified => Box::new(Stratifier::from(defaults)),
            SamplerKind::LatinHypercube => Box::new(LatinHypercube::from(defaults)),
            SamplerKind::Halton => Box::new(Halton::from(defaults)),
        }
    }
}
