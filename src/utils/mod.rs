//! Utility types shared across fontpack
//!
//! Containers that don't belong to a specific pipeline stage.

pub mod int_map;

pub use int_map::IntegerMap;
