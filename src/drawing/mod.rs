//! Renderable geometry
//!
//! Converts text laid out against a packed font into vertex and
//! texture-coordinate streams ready for upload to a GPU buffer.

pub mod geometry;

pub use geometry::{text_to_geometry, TextGeometry};
