//! Render Engine

use crate::camera::*;
use crate::common::*;
use crate::defaults::*;
use crate::error::*;
use crate::geometry::*;
use crate::output_sample::*;
use crate::ray_tracer::*;
use crate::render_target::*;
use crate::rng::*;
use crate::sample::*;
use crate::sampler::*;
use crate::scene::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;

/// Number of output samples a worker collects before writing them to the
/// render target.
const BATCH_SIZE: usize = 1024;

/// Progress shared by the worker threads.
struct Progress {
    /// Number of samples written.
    samples: u64,

    /// Progress bar; hidden if progress is not shown.
    bar: ProgressBar,
}

/// Drives a render: hands out the sampler's tasks to a pool of worker
/// threads, each with its own fork of the sampler and ray tracer, and
/// delivers the results to the render target in batches.
pub struct RenderEngine {
    camera: Option<ArcCamera>,
    sampler: Option<Box<dyn Sampler>>,
    scene: Option<ArcSceneObject>,
    target: Option<ArcRenderTarget>,
    tracer: Option<Box<dyn RayTracer>>,

    /// Number of worker threads; 0 uses one per logical CPU.
    number_of_threads: usize,

    /// Source of the per-worker and per-task seeds.
    seed_generator: RNG,

    /// True if the tracer must be set up again before the next render.
    is_dirty: bool,

    /// Show a progress bar while rendering.
    show_progress: bool,
}

impl RenderEngine {
    /// Create a new `RenderEngine` without collaborators.
    pub fn new() -> Self {
        Self::from(&RenderDefaults::default())
    }

    /// Set the camera.
    ///
    /// * `camera` - The camera.
    pub fn set_camera(&mut self, camera: ArcCamera) {
        self.camera = Some(camera);
    }

    /// Set the sampler. Its sub-sequences are registered again on the next
    /// render.
    ///
    /// * `sampler` - The sampler.
    pub fn set_sampler(&mut self, sampler: Box<dyn Sampler>) {
        self.sampler = Some(sampler);
        self.is_dirty = true;
    }

    /// Set the scene.
    ///
    /// * `scene` - Root of the scene graph.
    pub fn set_scene(&mut self, scene: ArcSceneObject) {
        self.scene = Some(scene);
        self.is_dirty = true;
    }

    /// Set the render target.
    ///
    /// * `target` - The render target.
    pub fn set_target(&mut self, target: ArcRenderTarget) {
        self.target = Some(target);
    }

    /// Set the ray tracer.
    ///
    /// * `tracer` - The ray tracer.
    pub fn set_tracer(&mut self, tracer: Box<dyn RayTracer>) {
        self.tracer = Some(tracer);
        self.is_dirty = true;
    }

    /// Set the number of worker threads.
    ///
    /// * `number_of_threads` - Number of threads; 0 uses one per logical CPU.
    pub fn set_number_of_threads(&mut self, number_of_threads: usize) {
        self.number_of_threads = number_of_threads;
    }

    /// Returns the number of worker threads a render uses.
    pub fn number_of_threads(&self) -> usize {
        if self.number_of_threads == 0 {
            num_cpus::get().max(1)
        } else {
            self.number_of_threads
        }
    }

    /// Reset the seed generator. Renders of the same configuration following
    /// the same seed produce the same output samples.
    ///
    /// * `seed` - The seed.
    pub fn seed(&mut self, seed: u64) {
        self.seed_generator.seed(seed);
    }

    /// Show or hide the progress bar.
    ///
    /// * `show_progress` - True to show progress.
    pub fn set_show_progress(&mut self, show_progress: bool) {
        self.show_progress = show_progress;
    }

    /// Render a bucket of the frame.
    ///
    /// * `time`   - Frame time; the camera shutter period is relative to it.
    /// * `bucket` - Region of the frame in `[0, 1]^2` to render.
    pub fn render(&mut self, time: Float, bucket: &Bounds2f) -> Result<(), RenderError> {
        let n_threads = self.number_of_threads();
        let camera = self.camera.clone().ok_or(RenderError::NoCamera)?;
        let tracer = self.tracer.as_deref_mut().ok_or(RenderError::NoTracer)?;
        let scene = self.scene.clone().ok_or(RenderError::NoScene)?;
        let sampler = self.sampler.as_deref_mut().ok_or(RenderError::NoSampler)?;
        let target = self.target.clone().ok_or(RenderError::NoTarget)?;
        if !Bounds2f::unit().contains_bounds(bucket) {
            return Err(RenderError::InvalidBucket { bucket: *bucket });
        }

        let period = camera.shutter_delta().offset(time);

        if self.is_dirty {
            tracer.set_scene(scene);
            tracer.request_samples(sampler);
            tracer.pre_process();
            self.is_dirty = false;
        }

        let resolution = target.resolution();
        sampler.set_resolution(resolution);
        sampler.set_bucket(*bucket);

        info!(
            "Rendering bucket {} of {}x{} with {} threads",
            bucket, resolution.x, resolution.y, n_threads
        );

        let bar = if self.show_progress {
            let bar = ProgressBar::new(sampler.number_of_samples());
            bar.set_style(
                ProgressStyle::with_template(
                    "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} samples ({eta})",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            bar
        } else {
            ProgressBar::hidden()
        };
        let progress = Mutex::new(Progress { samples: 0, bar });
        let canceled = AtomicBool::new(false);
        let screen_space_delta = Point2f::new(
            1.0 / resolution.x.max(1) as Float,
            1.0 / resolution.y.max(1) as Float,
        );

        // Fork the workers up front so that the seeds they get do not depend
        // on thread scheduling.
        let seed_generator = &mut self.seed_generator;
        let workers: Vec<(Box<dyn Sampler>, Box<dyn RayTracer>)> = (0..n_threads)
            .map(|_| {
                let seed = seed_generator.uniform_u64();
                (sampler.fork(seed), tracer.fork(seed))
            })
            .collect();

        target.begin_render();

        thread::scope(|scope| {
            let (tx, rx) = crossbeam_channel::bounded::<(Box<dyn Task>, u64)>(2 * n_threads);

            // Spawn worker threads.
            for (mut worker_sampler, mut worker_tracer) in workers {
                let rxc = rx.clone();
                let camera = &camera;
                let target = &target;
                let progress = &progress;
                let canceled = &canceled;
                let period = &period;
                let screen_space_delta = &screen_space_delta;
                scope.spawn(move || {
                    let mut sample = Sample::new();
                    let mut batch = Vec::with_capacity(BATCH_SIZE);
                    for (mut task, seed) in rxc.iter() {
                        if canceled.load(Ordering::Relaxed) || target.is_canceling() {
                            continue;
                        }

                        debug!("Starting task {}", task.id());
                        worker_sampler.seed(seed);
                        worker_tracer.seed(seed);

                        while task.draw_sample(worker_sampler.as_mut(), period, &mut sample) {
                            let ray = camera.primary_ray(&sample, screen_space_delta);
                            let result = worker_tracer.cast_ray(&sample, &ray);
                            let depth = if result.t.is_finite() {
                                camera.as_depth(&ray, result.t)
                            } else {
                                INFINITY
                            };
                            batch.push(OutputSample::new(
                                sample.screen_sample,
                                result.radiance,
                                depth,
                                result.alpha,
                                camera.weight(&ray.ray) * sample.weight,
                            ));
                            if batch.len() == BATCH_SIZE {
                                flush(&**target, progress, &mut batch);
                            }
                        }
                        flush(&**target, progress, &mut batch);

                        debug!("Finished task {}", task.id());
                    }
                });
            }
            drop(rx); // Drop extra rx since we've cloned one for each worker.

            // Send work.
            while let Some(task) = sampler.get_task() {
                if target.is_canceling() {
                    warn!("Render canceled, dropping remaining tasks");
                    canceled.store(true, Ordering::Relaxed);
                    break;
                }
                let seed = seed_generator.uniform_u64();
                if tx.send((task, seed)).is_err() {
                    break;
                }
            }
            drop(tx);
        });

        let progress = progress.into_inner().unwrap_or_else(PoisonError::into_inner);
        progress.bar.finish();
        target.end_render();
        info!("Render finished after {} samples", progress.samples);

        Ok(())
    }
}

impl Default for RenderEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&RenderDefaults> for RenderEngine {
    /// Create a new `RenderEngine` from render defaults.
    ///
    /// * `defaults` - The render defaults.
    fn from(defaults: &RenderDefaults) -> Self {
        Self {
            camera: None,
            sampler: None,
            scene: None,
            target: None,
            tracer: None,
            number_of_threads: defaults.number_of_threads,
            seed_generator: RNG::new(defaults.seed),
            is_dirty: true,
            show_progress: true,
        }
    }
}

/// Write a batch of output samples to the render target and update progress.
///
/// * `target`   - The render target.
/// * `progress` - Shared progress.
/// * `batch`    - The batch; emptied afterwards.
fn flush(target: &dyn RenderTarget, progress: &Mutex<Progress>, batch: &mut Vec<OutputSample>) {
    if batch.is_empty() {
        return;
    }
    let mut progress = progress.lock().unwrap_or_else(PoisonError::into_inner);
    target.write_render(batch);
    progress.samples += batch.len() as u64;
    progress.bar.set_position(progress.samples);
    batch.clear();
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_camera_is_reported_first() {
        let mut engine = RenderEngine::new();
        assert_eq!(
            engine.render(0.0, &Bounds2f::unit()),
            Err(RenderError::NoCamera)
        );
    }

    #[test]
    fn explicit_thread_count_is_kept() {
        let mut engine = RenderEngine::new();
        engine.set_number_of_threads(3);
        assert_eq!(engine.number_of_threads(), 3);
        engine.set_number_of_threads(0);
        assert!(engine.number_of_threads() >= 1);
    }
}
