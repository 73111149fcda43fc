//! Kernel

extern crate bitflags;
#[macro_use]
extern crate hexf;
#[macro_use]
extern crate log;

// Re-export.
pub mod camera;
pub mod common;
pub mod defaults;
pub mod error;
pub mod geometry;
pub mod light;
pub mod medium;
pub mod output_sample;
pub mod ray_tracer;
pub mod reflection;
pub mod render_engine;
pub mod render_target;
pub mod rng;
pub mod sample;
pub mod sampler;
pub mod sampling;
pub mod scene;
pub mod shader;
pub mod spectrum;
pub mod time_period;
