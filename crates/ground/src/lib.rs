//! Procedural ground: a radial ripple height field and its wireframe grid.
//!
//! # Invariants
//! - `height` is pure in `(time, x, z)`; nothing is cached between frames.
//! - The origin returns the vertical scale instead of the singular limit.
//! - The grid spans `num_tiles` tiles on each side of the origin on both axes.

mod field;
mod mesh;

pub use field::GroundField;
pub use mesh::{LineVertex, WireGrid};
