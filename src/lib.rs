//! fontpack - glyph atlas packing for 3D graphics APIs
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │     GlyphProvider (fontdue metrics)      │
//! ├──────────────────────────────────────────┤
//! │  measure → sort by height → GlyphTree    │
//! │                          ↓               │
//! │  rasterize into atlas → UVs → flip       │
//! │                          ↓               │
//! │  Font (glyphs + IntegerMap kerning)      │
//! │                          ↓               │
//! │  text_to_geometry → vertices + UVs       │
//! └──────────────────────────────────────────┘
//! ```
//!
//! The atlas is a single 8-bit grayscale texture handed back bottom-up
//! (row 0 is the bottom), matching texture coordinates with v = 0 at
//! the bottom edge.

pub mod config;
pub mod constants;
pub mod drawing;
pub mod error;
pub mod font;
pub mod utils;

pub use drawing::{text_to_geometry, TextGeometry};
pub use error::{FontPackError, Result};
pub use font::{
    AtlasBitmap, AtlasSettings, Font, FontdueProvider, Glyph, GlyphProvider, RowOrder, Vec2,
    Vec3,
};
pub use utils::IntegerMap;
