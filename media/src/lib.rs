//! Media

#[macro_use]
extern crate log;

mod fog;

// Re-export.
pub use fog::*;
