//! Glyph data model
//!
//! Per-codepoint metrics, packed footprint and texture coordinates.

/// 2D vector (texture coordinates)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 3D vector (vertex positions, z is always 0 for text)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Metrics and atlas placement for one codepoint
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Glyph {
    pub code_point: i32,
    /// Unscaled horizontal advance
    pub advance_width: i32,
    /// Unscaled left side bearing
    pub left_side_bearing: i32,

    /// Scaled footprint width including the apron on both sides.
    /// Used for tree placement only.
    pub width: i32,
    /// Scaled footprint height including the apron on both sides
    pub height: i32,

    /// Unscaled bounding box (y increases upward)
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,

    /// Two counter-clockwise triangles: [c0, c1, c2, c0, c2, c3]
    pub uv: [Vec2; 6],

    /// Footprint origin in the atlas (bottom-left corner)
    pub bitmap_x: i32,
    pub bitmap_y: i32,
}

impl Glyph {
    /// Footprint width without the apron
    #[inline]
    pub fn content_width(&self, apron: i32) -> i32 {
        (self.width - 2 * apron).max(0)
    }

    /// Footprint height without the apron
    #[inline]
    pub fn content_height(&self, apron: i32) -> i32 {
        (self.height - 2 * apron).max(0)
    }
}

/// Kerning lookup key for the ordered pair (a, b)
#[inline]
pub fn code_point_pair_key(a: i32, b: i32) -> i32 {
    (a << 16) | (b & 0xffff)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_key_is_ordered() {
        assert_eq!(code_point_pair_key(0x41, 0x56), 0x0041_0056);
        assert_ne!(code_point_pair_key(0x41, 0x56), code_point_pair_key(0x56, 0x41));
    }

    #[test]
    fn test_content_size_strips_apron() {
        let g = Glyph {
            width: 10,
            height: 6,
            ..Default::default()
        };
        assert_eq!(g.content_width(2), 6);
        assert_eq!(g.content_height(2), 2);
        assert_eq!(g.content_height(4), 0);
    }
}
