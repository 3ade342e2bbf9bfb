//! Glyph atlas
//!
//! Builds a packed font: glyph metrics at the requested pixel height, one
//! grayscale texture holding every glyph in the codepoint range, and a
//! sparse kerning table. The texture buffer belongs to the caller and is
//! handed over bottom-up (row 0 = bottom), as OpenGL-style samplers expect.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use log::{debug, info, warn};

use super::compositor::{flip_vertically, TextureCompositor};
use super::glyph::{code_point_pair_key, Glyph};
use super::rasterizer::GlyphProvider;
use crate::constants::{
    is_packable_code_point, DEFAULT_APRON, DEFAULT_ATLAS_HEIGHT, DEFAULT_ATLAS_WIDTH,
    DEFAULT_END_CODE_POINT, DEFAULT_HEIGHT_PIXELS, DEFAULT_START_CODE_POINT,
    KERNING_TABLE_CAPACITY,
};
use crate::error::{FontPackError, Result};
use crate::utils::int_map::{IntegerMap, EMPTY};

/// Row layout of an atlas buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOrder {
    /// Row 0 is the top (rasterizer / image file convention)
    TopDown,
    /// Row 0 is the bottom (texture coordinate convention)
    BottomUp,
}

/// Single-channel 8-bit atlas texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasBitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    row_order: RowOrder,
}

impl AtlasBitmap {
    /// Zero-filled, top-down atlas
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FontPackError::InvalidAtlasSize { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize],
            row_order: RowOrder::TopDown,
        })
    }

    /// Wrap an existing buffer
    pub fn from_pixels(
        width: u32,
        height: u32,
        pixels: Vec<u8>,
        row_order: RowOrder,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FontPackError::InvalidAtlasSize { width, height });
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(FontPackError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
            row_order,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn row_order(&self) -> RowOrder {
        self.row_order
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Zero every pixel and return to top-down order
    pub fn clear(&mut self) {
        self.pixels.fill(0);
        self.row_order = RowOrder::TopDown;
    }

    /// Reverse the row order in place
    pub fn flip_vertically(&mut self) {
        flip_vertically(&mut self.pixels, self.width as usize, self.height as usize);
        self.row_order = match self.row_order {
            RowOrder::TopDown => RowOrder::BottomUp,
            RowOrder::BottomUp => RowOrder::TopDown,
        };
    }

    /// Copy of the pixels with row 0 at the top
    pub fn to_top_down(&self) -> Vec<u8> {
        match self.row_order {
            RowOrder::TopDown => self.pixels.clone(),
            RowOrder::BottomUp => self
                .pixels
                .chunks_exact(self.width as usize)
                .rev()
                .flatten()
                .copied()
                .collect(),
        }
    }

    /// Encode as an 8-bit grayscale PNG
    pub fn encode_png<W: Write>(&self, writer: W) -> anyhow::Result<()> {
        let mut encoder = png::Encoder::new(writer, self.width, self.height);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .context("Failed to write PNG header")?;
        writer
            .write_image_data(&self.to_top_down())
            .context("Failed to write PNG data")?;
        Ok(())
    }

    /// Save as a PNG file (image row 0 is the top of the atlas)
    pub fn write_png(&self, path: &Path) -> anyhow::Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        self.encode_png(BufWriter::new(file))
            .with_context(|| format!("Failed to save atlas: {}", path.display()))?;
        info!("Atlas saved: {} ({}x{})", path.display(), self.width, self.height);
        Ok(())
    }
}

/// Parameters for one atlas build
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasSettings {
    /// Texture width in pixels
    pub width: u32,
    /// Texture height in pixels
    pub height: u32,
    /// Target font height in pixels (ascent - descent)
    pub height_pixels: f32,
    /// First codepoint (inclusive)
    pub start_code_point: i32,
    /// Last codepoint (exclusive)
    pub end_code_point: i32,
    /// Empty border kept around each glyph
    pub apron: i32,
}

impl Default for AtlasSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_ATLAS_WIDTH,
            height: DEFAULT_ATLAS_HEIGHT,
            height_pixels: DEFAULT_HEIGHT_PIXELS,
            start_code_point: DEFAULT_START_CODE_POINT,
            end_code_point: DEFAULT_END_CODE_POINT,
            apron: DEFAULT_APRON,
        }
    }
}

impl AtlasSettings {
    /// Check the codepoint range, atlas size, font height and apron
    pub fn validate(&self) -> Result<()> {
        let (start, end) = (self.start_code_point, self.end_code_point);
        if start >= end || !is_packable_code_point(start) || !is_packable_code_point(end - 1) {
            return Err(FontPackError::InvalidCodepointRange { start, end });
        }
        if self.width == 0 || self.height == 0 {
            return Err(FontPackError::InvalidAtlasSize {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.height_pixels.is_finite() && self.height_pixels > 0.0) {
            return Err(FontPackError::InvalidFontHeight {
                height: self.height_pixels,
            });
        }
        if self.apron < 0 {
            return Err(FontPackError::InvalidApron { apron: self.apron });
        }
        Ok(())
    }

    /// Empty atlas matching these settings
    pub fn new_atlas(&self) -> Result<AtlasBitmap> {
        AtlasBitmap::new(self.width, self.height)
    }
}

/// Packed font: metrics, glyphs and kerning for one atlas
#[derive(Debug, Clone)]
pub struct Font {
    pub texture_width: u32,
    pub texture_height: u32,
    pub scale_x: f32,
    pub scale_y: f32,

    /// Font height in pixels
    pub height_pixels: f32,
    pub ascent: i32,
    pub descent: i32,
    pub line_gap: i32,
    pub start_code_point: i32,
    pub end_code_point: i32,
    pub apron: i32,

    /// Indexed by `code_point - start_code_point`
    pub glyphs: Vec<Glyph>,
    /// Unscaled kerning keyed by `code_point_pair_key`; absent pairs are 0
    pub kerning: IntegerMap,
}

impl Font {
    /// Measure, pack and rasterize every glyph in the range
    ///
    /// `atlas` is cleared first and left in bottom-up order. If a glyph
    /// doesn't fit the whole build fails with `FitFailure`; rebuild with a
    /// larger atlas.
    pub fn build<P: GlyphProvider + ?Sized>(
        provider: &P,
        settings: &AtlasSettings,
        atlas: &mut AtlasBitmap,
    ) -> Result<Self> {
        settings.validate()?;
        let apron = settings.apron;

        let (ascent, descent, line_gap) = provider.vertical_metrics();
        let scale_y = provider.scale_for_pixel_height(settings.height_pixels);
        if !(scale_y.is_finite() && scale_y > 0.0) {
            return Err(FontPackError::DegenerateFontMetrics { ascent, descent });
        }
        let scale_x = scale_y;

        let mut glyphs: Vec<Glyph> = (settings.start_code_point..settings.end_code_point)
            .map(|cp| measure_glyph(provider, cp, scale_x, scale_y, apron))
            .collect();

        debug!(
            "Measured {} glyphs (U+{:04X}..U+{:04X}), scale={:.5}",
            glyphs.len(),
            settings.start_code_point,
            settings.end_code_point,
            scale_y
        );

        atlas.clear();
        TextureCompositor::new(provider, scale_x, scale_y, apron).compose(&mut glyphs, atlas)?;

        let kerning = build_kerning(provider, &glyphs);

        info!(
            "Glyph atlas generated: {}x{}, {} glyphs, {} kerning pairs",
            atlas.width(),
            atlas.height(),
            glyphs.len(),
            kerning.len()
        );

        Ok(Self {
            texture_width: atlas.width(),
            texture_height: atlas.height(),
            scale_x,
            scale_y,
            height_pixels: settings.height_pixels,
            ascent,
            descent,
            line_gap,
            start_code_point: settings.start_code_point,
            end_code_point: settings.end_code_point,
            apron,
            glyphs,
            kerning,
        })
    }

    /// Number of codepoints in the range
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Glyph for `code_point`
    pub fn glyph(&self, code_point: i32) -> Result<&Glyph> {
        let index = code_point - self.start_code_point;
        usize::try_from(index)
            .ok()
            .and_then(|i| self.glyphs.get(i))
            .ok_or(FontPackError::OutOfRangeCodepoint {
                codepoint: code_point,
                start: self.start_code_point,
                end: self.end_code_point,
            })
    }

    /// Unscaled kerning for `a` followed by `b` (0 if none)
    pub fn kerning(&self, a: i32, b: i32) -> i32 {
        self.kerning.get(code_point_pair_key(a, b)).unwrap_or(0)
    }

    /// Vertical distance between baselines in pixels
    pub fn line_advance(&self) -> f32 {
        self.scale_y * (self.ascent - self.descent + self.line_gap) as f32
    }
}

/// Unscaled metrics plus the rasterized size grown by the apron
fn measure_glyph<P: GlyphProvider + ?Sized>(
    provider: &P,
    code_point: i32,
    scale_x: f32,
    scale_y: f32,
    apron: i32,
) -> Glyph {
    let (x0, y0, x1, y1) = provider.codepoint_box(code_point);
    let (advance_width, left_side_bearing) = provider.horizontal_metrics(code_point);
    let (width, height) = provider.bitmap_size(code_point, scale_x, scale_y);

    Glyph {
        code_point,
        advance_width,
        left_side_bearing,
        width: width + 2 * apron,
        height: height + 2 * apron,
        x0,
        y0,
        x1,
        y1,
        ..Default::default()
    }
}

/// Store every non-zero ordered-pair kerning value
fn build_kerning<P: GlyphProvider + ?Sized>(provider: &P, glyphs: &[Glyph]) -> IntegerMap {
    let mut kerning = IntegerMap::with_capacity(KERNING_TABLE_CAPACITY);
    for a in glyphs {
        for b in glyphs {
            let advance = provider.kerning_advance(a.code_point, b.code_point);
            if advance == 0 {
                continue;
            }
            if advance == EMPTY {
                warn!(
                    "Kerning U+{:04X} U+{:04X} collides with map marker, skipped",
                    a.code_point, b.code_point
                );
                continue;
            }
            kerning.put(code_point_pair_key(a.code_point, b.code_point), advance);
        }
    }
    kerning
}
