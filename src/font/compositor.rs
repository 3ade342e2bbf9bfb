//! Texture compositor
//!
//! Packs the glyph set into the atlas tree, rasterizes each glyph into its
//! rectangle and computes texture coordinates. The packer works with a
//! bottom-left origin while rasterizers write top-left row-major bitmaps,
//! so the finished buffer is flipped once at the end.

use log::debug;

use super::atlas::AtlasBitmap;
use super::glyph::{Glyph, Vec2};
use super::packer::{GlyphTree, Rect};
use super::rasterizer::GlyphProvider;
use crate::error::{FontPackError, Result};

/// Map a pixel coordinate to a texel coordinate, clamped to 1.0
#[inline]
pub fn pixel_to_texel(pixel_x: f32, pixel_y: f32, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        (pixel_x / width as f32).min(1.0),
        (pixel_y / height as f32).min(1.0),
    )
}

/// Texture coordinates for a placed glyph, inset by the apron
///
/// Corners are taken from the bottom-left origin and wound counter-clockwise:
/// bottom-left, bottom-right, top-right, then bottom-left, top-right, top-left.
pub fn glyph_uvs(glyph: &Glyph, apron: i32, width: u32, height: u32) -> [Vec2; 6] {
    let left = (glyph.bitmap_x + apron) as f32;
    let right = (glyph.bitmap_x + glyph.width - apron) as f32;
    let bottom = (glyph.bitmap_y + apron) as f32;
    let top = (glyph.bitmap_y + glyph.height - apron) as f32;

    let bl = pixel_to_texel(left, bottom, width, height);
    let br = pixel_to_texel(right, bottom, width, height);
    let tr = pixel_to_texel(right, top, width, height);
    let tl = pixel_to_texel(left, top, width, height);
    [bl, br, tr, bl, tr, tl]
}

/// Swap row i with row height-1-i across the whole buffer
pub fn flip_vertically(pixels: &mut [u8], width: usize, height: usize) {
    debug_assert!(pixels.len() >= width * height);
    for i in 0..height / 2 {
        let j = height - 1 - i;
        let (upper, lower) = pixels.split_at_mut(j * width);
        upper[i * width..(i + 1) * width].swap_with_slice(&mut lower[..width]);
    }
}

/// Sort key for packing: tallest first, ties by ascending codepoint
fn pack_order(a: &Glyph, b: &Glyph) -> std::cmp::Ordering {
    b.height
        .cmp(&a.height)
        .then_with(|| a.code_point.cmp(&b.code_point))
}

/// Drives one packing + rasterization run
pub struct TextureCompositor<'a, P: GlyphProvider + ?Sized> {
    provider: &'a P,
    scale_x: f32,
    scale_y: f32,
    apron: i32,
}

impl<'a, P: GlyphProvider + ?Sized> TextureCompositor<'a, P> {
    pub fn new(provider: &'a P, scale_x: f32, scale_y: f32, apron: i32) -> Self {
        Self {
            provider,
            scale_x,
            scale_y,
            apron,
        }
    }

    /// Pack, rasterize and flip
    ///
    /// On return `glyphs` is sorted by ascending codepoint, with bitmap
    /// origins and UVs filled in, and `atlas` is in bottom-up row order.
    /// A glyph that doesn't fit aborts the whole run: `glyphs` is still put
    /// back in codepoint order, but only the ones packed before the failure
    /// carry placements and the atlas contents are unspecified.
    pub fn compose(&self, glyphs: &mut [Glyph], atlas: &mut AtlasBitmap) -> Result<()> {
        if self.apron < 0 {
            return Err(FontPackError::InvalidApron { apron: self.apron });
        }

        glyphs.sort_by(pack_order);
        let packed = self.pack_all(glyphs, atlas);
        glyphs.sort_by_key(|g| g.code_point);
        packed?;

        atlas.flip_vertically();
        Ok(())
    }

    /// Place and rasterize `glyphs` in slice order
    fn pack_all(&self, glyphs: &mut [Glyph], atlas: &mut AtlasBitmap) -> Result<()> {
        let (width, height) = (atlas.width(), atlas.height());

        let mut tree = GlyphTree::new(width as i32, height as i32);
        for (i, glyph) in glyphs.iter_mut().enumerate() {
            let node = tree.insert(i, glyph.width, glyph.height).ok_or(
                FontPackError::FitFailure {
                    codepoint: glyph.code_point,
                    width: glyph.width,
                    height: glyph.height,
                    atlas_width: width,
                    atlas_height: height,
                },
            )?;
            let rect = tree.node(node).rect;

            glyph.bitmap_x = rect.x;
            glyph.bitmap_y = rect.y;
            self.rasterize_into(atlas, glyph, rect);
            glyph.uv = glyph_uvs(glyph, self.apron, width, height);
        }

        debug!(
            "Packed {} glyphs into {}x{} atlas ({} tree nodes)",
            glyphs.len(),
            width,
            height,
            tree.len()
        );
        Ok(())
    }

    /// Rasterize one glyph inside its footprint, leaving the apron empty
    fn rasterize_into(&self, atlas: &mut AtlasBitmap, glyph: &Glyph, rect: Rect) {
        let content_w = glyph.content_width(self.apron) as usize;
        let content_h = glyph.content_height(self.apron) as usize;
        if content_w == 0 || content_h == 0 {
            return;
        }

        let stride = atlas.width() as usize;
        // Top row of the footprint in top-left raster coordinates
        let dest_row_offset = atlas.height() as i32 - (rect.y + glyph.height);
        let row = (dest_row_offset + self.apron) as usize;
        let col = (rect.x + self.apron) as usize;

        let start = row * stride + col;
        let end = (row + content_h - 1) * stride + col + content_w;
        self.provider.rasterize_codepoint(
            &mut atlas.pixels_mut()[start..end],
            content_w,
            content_h,
            stride,
            self.scale_x,
            self.scale_y,
            glyph.code_point,
        );
    }
}
