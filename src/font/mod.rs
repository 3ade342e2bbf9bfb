//! Font packing
//!
//! Handles:
//! - Glyph metrics and rasterization (fontdue behind `GlyphProvider`)
//! - Bin packing glyph footprints into one atlas texture
//! - Texture coordinates and the final bottom-up atlas
//! - Sparse kerning table
//! - System font discovery

pub mod atlas;
pub mod compositor;
pub mod glyph;
pub mod packer;
pub mod rasterizer;
pub mod system;

pub use atlas::{AtlasBitmap, AtlasSettings, Font, RowOrder};
pub use glyph::{code_point_pair_key, Glyph, Vec2, Vec3};
pub use rasterizer::{FontdueProvider, GlyphProvider};
