//! Lights

#[macro_use]
extern crate log;

mod area;
mod directional;
mod point;
mod sky;

// Re-export.
pub use area::*;
pub use directional::*;
pub use point::*;
pub use sky::*;
