//! Integrators

#[macro_use]
extern crate log;

mod direct_lighting;

// Re-export.
pub use direct_lighting::*;
