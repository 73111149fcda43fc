//! Samplers

#[macro_use]
extern crate log;

mod halton;
mod latin_hypercube;
mod stratifier;

// Re-export.
pub use halton::*;
pub use latin_hypercube::*;
pub use stratifier::*;
