//! End-to-end atlas build against a synthetic glyph provider
//!
//! No font file needed: glyph boxes are derived from the codepoint and the
//! rasterizer fills each glyph window with the codepoint's low byte, so
//! pixel contents can be traced back to the glyph that owns them.

use fontpack::font::packer::Rect;
use fontpack::{text_to_geometry, AtlasSettings, Font, FontPackError, GlyphProvider, RowOrder};

/// Boxes of (2 + cp % 4) x (3 + cp % 6) font units, scale 1.0 at 12px
struct Synthetic;

impl GlyphProvider for Synthetic {
    fn vertical_metrics(&self) -> (i32, i32, i32) {
        (10, -2, 1)
    }

    fn codepoint_box(&self, cp: i32) -> (i32, i32, i32, i32) {
        (0, -1, 2 + cp % 4, -1 + 3 + cp % 6)
    }

    fn horizontal_metrics(&self, cp: i32) -> (i32, i32) {
        (4 + cp % 4, 1)
    }

    fn kerning_advance(&self, a: i32, b: i32) -> i32 {
        if (a + b) % 7 == 0 {
            -1
        } else {
            0
        }
    }

    fn rasterize_codepoint(
        &self,
        dest: &mut [u8],
        width: usize,
        height: usize,
        stride: usize,
        _scale_x: f32,
        _scale_y: f32,
        cp: i32,
    ) {
        for y in 0..height {
            dest[y * stride..y * stride + width].fill(cp as u8);
        }
    }
}

fn settings(width: u32, height: u32) -> AtlasSettings {
    AtlasSettings {
        width,
        height,
        height_pixels: 12.0,
        start_code_point: 0x21,
        end_code_point: 0x7F,
        apron: 1,
    }
}

fn build(width: u32, height: u32) -> (Font, fontpack::AtlasBitmap) {
    let settings = settings(width, height);
    let mut atlas = settings.new_atlas().unwrap();
    let font = Font::build(&Synthetic, &settings, &mut atlas).unwrap();
    (font, atlas)
}

// ========== Packing ==========

#[test]
fn test_glyph_set_preserved_in_codepoint_order() {
    let (font, _) = build(128, 128);
    let codes: Vec<i32> = font.glyphs.iter().map(|g| g.code_point).collect();
    let expected: Vec<i32> = (0x21..0x7F).collect();
    assert_eq!(codes, expected);
    assert_eq!(font.glyph_count(), 94);
}

#[test]
fn test_footprints_disjoint_and_in_bounds() {
    let (font, atlas) = build(128, 128);
    let bounds = Rect::new(0, 0, atlas.width() as i32, atlas.height() as i32);
    let rects: Vec<Rect> = font
        .glyphs
        .iter()
        .map(|g| Rect::new(g.bitmap_x, g.bitmap_y, g.width, g.height))
        .collect();

    for (i, r) in rects.iter().enumerate() {
        assert!(bounds.contains(r), "{:?} out of bounds", r);
        for other in &rects[i + 1..] {
            assert!(!r.overlaps(other), "{:?} overlaps {:?}", r, other);
        }
    }
}

#[test]
fn test_footprint_includes_apron() {
    let (font, _) = build(128, 128);
    let g = font.glyph('A' as i32).unwrap();
    assert_eq!(g.width, 2 + 65 % 4 + 2);
    assert_eq!(g.height, 3 + 65 % 6 + 2);
}

#[test]
fn test_uvs_point_at_glyph_pixels() {
    let (font, atlas) = build(128, 128);
    assert_eq!(atlas.row_order(), RowOrder::BottomUp);
    let (w, h) = (atlas.width() as f32, atlas.height() as f32);

    for g in &font.glyphs {
        let x = (g.uv[0].x * w).round() as u32;
        let y = (g.uv[0].y * h).round() as u32;
        assert_eq!(x as i32, g.bitmap_x + 1);
        assert_eq!(y as i32, g.bitmap_y + 1);

        // Inside the content region, bottom-up addressing
        let px = atlas.pixels()[(y * atlas.width() + x) as usize];
        assert_eq!(px, g.code_point as u8, "glyph U+{:04X}", g.code_point);

        // Apron corner stays empty
        let corner = g.bitmap_y as u32 * atlas.width() + g.bitmap_x as u32;
        assert_eq!(atlas.pixels()[corner as usize], 0);
    }
}

#[test]
fn test_build_is_deterministic() {
    let (a_font, a_atlas) = build(128, 128);
    let (b_font, b_atlas) = build(128, 128);
    assert_eq!(a_font.glyphs, b_font.glyphs);
    assert_eq!(a_atlas, b_atlas);
}

#[test]
fn test_rebuild_into_used_atlas() {
    let settings = settings(128, 128);
    let mut atlas = settings.new_atlas().unwrap();
    let first = Font::build(&Synthetic, &settings, &mut atlas).unwrap();
    let snapshot = atlas.clone();
    let second = Font::build(&Synthetic, &settings, &mut atlas).unwrap();
    assert_eq!(first.glyphs, second.glyphs);
    assert_eq!(atlas, snapshot);
}

#[test]
fn test_small_atlas_fails_whole_build() {
    let settings = settings(64, 64);
    let mut atlas = settings.new_atlas().unwrap();
    let err = Font::build(&Synthetic, &settings, &mut atlas).unwrap_err();
    assert!(matches!(
        err,
        FontPackError::FitFailure {
            atlas_width: 64,
            atlas_height: 64,
            ..
        }
    ));
}

// ========== Kerning ==========

#[test]
fn test_kerning_stored_sparsely() {
    let (font, _) = build(128, 128);
    let expected = (0x21..0x7F)
        .flat_map(|a| (0x21..0x7F).map(move |b| (a, b)))
        .filter(|(a, b)| (a + b) % 7 == 0)
        .count();
    assert_eq!(font.kerning.len(), expected);
    assert_eq!(font.kerning('#' as i32, '#' as i32), -1); // 35 + 35 = 70
    assert_eq!(font.kerning('!' as i32, '!' as i32), 0);
}

// ========== Geometry ==========

#[test]
fn test_text_geometry_two_lines() {
    let (font, _) = build(128, 128);
    let geom = text_to_geometry(&font, "A\nB").unwrap();
    assert_eq!(geom.vertex_count(), 12);

    let a = font.glyph('A' as i32).unwrap();
    let b = font.glyph('B' as i32).unwrap();
    let line = -font.scale_y * (font.ascent - font.descent + font.line_gap) as f32;

    let a_base = geom.vertices[0].y - (a.y0 + font.ascent) as f32 * font.scale_y;
    let b_base = geom.vertices[6].y - (b.y0 + font.ascent) as f32 * font.scale_y;
    assert!((b_base - a_base - line).abs() < 1e-5);
    assert_eq!(geom.vertices[6].x, 0.0);
    assert_eq!(&geom.uvs[6..], &b.uv[..]);
}

#[test]
fn test_text_outside_range() {
    let (font, _) = build(128, 128);
    let err = text_to_geometry(&font, "oké").unwrap_err();
    assert!(matches!(
        err,
        FontPackError::OutOfRangeCodepoint { codepoint: 0xE9, .. }
    ));
    // Space (0x20) is below the packed range too
    assert!(text_to_geometry(&font, "a b").is_err());
}
