//! Global constants for fontpack
//!
//! Defaults for atlas building and limits shared by the font,
//! kerning and geometry modules.

// ============================================================================
// Atlas Defaults
// ============================================================================

/// Default atlas width in pixels
pub const DEFAULT_ATLAS_WIDTH: u32 = 256;

/// Default atlas height in pixels
pub const DEFAULT_ATLAS_HEIGHT: u32 = 256;

/// Default empty border around each glyph (pixels per side)
pub const DEFAULT_APRON: i32 = 1;

/// Default rasterized font height in pixels
pub const DEFAULT_HEIGHT_PIXELS: f32 = 32.0;

// ============================================================================
// Codepoint Range
// ============================================================================

/// First printable ASCII character
pub const DEFAULT_START_CODE_POINT: i32 = 0x20;

/// One past the last printable ASCII character ('~' + 1)
pub const DEFAULT_END_CODE_POINT: i32 = 0x7F;

/// Largest usable codepoint
///
/// Kerning keys pack two codepoints as `(a << 16) | b`; keeping both
/// below i16::MAX keeps every key clear of the map's EMPTY marker.
pub const MAX_CODE_POINT: i32 = i16::MAX as i32 - 1;

// ============================================================================
// Kerning
// ============================================================================

/// Initial slot count for the kerning map
pub const KERNING_TABLE_CAPACITY: usize = 512;

// ============================================================================
// Geometry
// ============================================================================

/// Vertices emitted per rendered character (two triangles)
pub const VERTICES_PER_GLYPH: usize = 6;

/// Check that a codepoint can be packed into a kerning key
#[inline]
pub const fn is_packable_code_point(cp: i32) -> bool {
    cp >= 0 && cp <= MAX_CODE_POINT
}
