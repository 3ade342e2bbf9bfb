//! Error types for atlas building and text geometry

use thiserror::Error;

/// Errors reported by the packing and geometry core
#[derive(Debug, Error)]
pub enum FontPackError {
    /// A glyph footprint found no free rectangle; rebuild with a larger atlas
    #[error(
        "Glyph U+{codepoint:04X} ({width}x{height}) does not fit in {atlas_width}x{atlas_height} atlas"
    )]
    FitFailure {
        codepoint: i32,
        width: i32,
        height: i32,
        atlas_width: u32,
        atlas_height: u32,
    },

    /// Text contains a character outside the font's loaded range
    #[error("Codepoint U+{codepoint:04X} outside font range [U+{start:04X}, U+{end:04X})")]
    OutOfRangeCodepoint { codepoint: i32, start: i32, end: i32 },

    /// Empty range, or one that would collide with the kerning key sentinel
    #[error("Invalid codepoint range [{start}, {end})")]
    InvalidCodepointRange { start: i32, end: i32 },

    /// Zero-sized atlas
    #[error("Invalid atlas size {width}x{height}")]
    InvalidAtlasSize { width: u32, height: u32 },

    /// Font height must be a positive, finite pixel count
    #[error("Invalid font height {height} (must be finite and > 0)")]
    InvalidFontHeight { height: f32 },

    /// Apron must be zero or positive
    #[error("Invalid apron {apron} (must be >= 0)")]
    InvalidApron { apron: i32 },

    /// Font's ascent - descent gives no usable scale
    #[error("Font metrics give no usable scale (ascent={ascent}, descent={descent})")]
    DegenerateFontMetrics { ascent: i32, descent: i32 },

    /// Pixel buffer length disagrees with the atlas dimensions
    #[error("Atlas buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Font data could not be parsed by the provider
    #[error("Failed to load font: {0}")]
    FontLoad(String),
}

pub type Result<T> = std::result::Result<T, FontPackError>;
