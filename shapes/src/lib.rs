//! Shapes

#[macro_use]
extern crate log;

mod light_node;
mod list;
mod motion_translation;
mod plane;
mod sphere;
mod transformation;

// Re-export.
pub use light_node::*;
pub use list::*;
pub use motion_translation::*;
pub use plane::*;
pub use sphere::*;
pub use transformation::*;
