//! Materials

#[macro_use]
extern crate log;

mod lambertian;
mod mirror;

// Re-export.
pub use lambertian::*;
pub use mirror::*;
