//! Text geometry
//!
//! Turns a string into textured quads against a packed `Font`: two
//! counter-clockwise triangles per character, positioned by advance and
//! kerning along a baseline that starts at (0, 0) and steps down on '\n'.
//! No wrapping, alignment or color; positions and UVs only.

use crate::constants::VERTICES_PER_GLYPH;
use crate::error::Result;
use crate::font::atlas::Font;
use crate::font::glyph::{Vec2, Vec3};

/// Vertex and UV streams for one string
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextGeometry {
    pub vertices: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
}

impl TextGeometry {
    /// Number of vertices produced (6 per rendered character)
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Lay out `text` and emit its quads
///
/// Fails with `OutOfRangeCodepoint` on the first character the font
/// doesn't cover; nothing is skipped silently.
pub fn text_to_geometry(font: &Font, text: &str) -> Result<TextGeometry> {
    let rendered = text.chars().filter(|&c| c != '\n').count();
    let mut out = TextGeometry {
        vertices: Vec::with_capacity(rendered * VERTICES_PER_GLYPH),
        uvs: Vec::with_capacity(rendered * VERTICES_PER_GLYPH),
    };

    let (sx, sy) = (font.scale_x, font.scale_y);
    let mut start_x = 0.0f32;
    let mut start_y = 0.0f32;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\n' {
            start_y -= font.line_advance();
            start_x = 0.0;
            continue;
        }

        let code_point = c as i32;
        let glyph = font.glyph(code_point)?;

        let x0 = start_x;
        let x1 = x0 + sx * (glyph.x1 - glyph.x0) as f32;
        let y0 = start_y + (glyph.y0 + font.ascent) as f32 * sy;
        let y1 = y0 + (glyph.y1 - glyph.y0) as f32 * sy;

        let bl = Vec3::new(x0, y0, 0.0);
        let br = Vec3::new(x1, y0, 0.0);
        let tr = Vec3::new(x1, y1, 0.0);
        let tl = Vec3::new(x0, y1, 0.0);
        out.vertices.extend_from_slice(&[bl, br, tr, bl, tr, tl]);
        out.uvs.extend_from_slice(&glyph.uv);

        start_x += sx * (glyph.advance_width - glyph.left_side_bearing) as f32;
        if let Some(&next) = chars.peek() {
            start_x += sx * font.kerning(code_point, next as i32) as f32;
        }
    }

    Ok(out)
}
