//! Output

#[macro_use]
extern crate log;

mod cancel_after;
mod image;

// Re-export.
pub use self::cancel_after::*;
pub use self::image::*;
