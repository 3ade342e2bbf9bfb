//! Glyph metrics and rasterization provider
//!
//! The atlas builder only needs a handful of queries from a font:
//! unscaled boxes and metrics, kerning, and a coverage bitmap written into
//! a caller-owned sub-region. `GlyphProvider` is that boundary;
//! `FontdueProvider` serves it from a TTF/OTF file via fontdue.
//!
//! All unscaled values are in font units with y increasing upward.

use fontdue::{Font, FontSettings};
use log::{debug, info};

use crate::error::{FontPackError, Result};

/// Font queries used while building an atlas
pub trait GlyphProvider {
    /// (ascent, descent, line_gap) in font units; descent is negative
    fn vertical_metrics(&self) -> (i32, i32, i32);

    /// Scale that maps ascent - descent onto `height` pixels
    fn scale_for_pixel_height(&self, height: f32) -> f32 {
        let (ascent, descent, _) = self.vertical_metrics();
        let span = (ascent - descent) as f32;
        if span > 0.0 {
            height / span
        } else {
            0.0
        }
    }

    /// Unscaled bounding box (x0, y0, x1, y1)
    fn codepoint_box(&self, code_point: i32) -> (i32, i32, i32, i32);

    /// Pixel size of the coverage bitmap at (scale_x, scale_y)
    ///
    /// The atlas reserves exactly this window (plus apron) per glyph, so
    /// `rasterize_codepoint` must never produce more. Defaults to the
    /// floored scaled box.
    fn bitmap_size(&self, code_point: i32, scale_x: f32, scale_y: f32) -> (i32, i32) {
        let (x0, y0, x1, y1) = self.codepoint_box(code_point);
        (
            ((x1 - x0) as f32 * scale_x).floor() as i32,
            ((y1 - y0) as f32 * scale_y).floor() as i32,
        )
    }

    /// Unscaled (advance_width, left_side_bearing)
    fn horizontal_metrics(&self, code_point: i32) -> (i32, i32);

    /// Unscaled advance adjustment between `a` followed by `b`
    fn kerning_advance(&self, a: i32, b: i32) -> i32;

    /// Fill a `width` x `height` coverage bitmap at the start of `dest`
    ///
    /// Row `r` starts at `dest[r * stride]`. Pixels outside the
    /// `width` x `height` window must not be touched.
    #[allow(clippy::too_many_arguments)]
    fn rasterize_codepoint(
        &self,
        dest: &mut [u8],
        width: usize,
        height: usize,
        stride: usize,
        scale_x: f32,
        scale_y: f32,
        code_point: i32,
    );
}

/// `GlyphProvider` backed by fontdue
pub struct FontdueProvider {
    font: Font,
    /// Querying fontdue at this size yields values in font units
    units_per_em: f32,
}

impl FontdueProvider {
    /// Parse a TTF/OTF font
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| FontPackError::FontLoad(e.to_string()))?;
        let units_per_em = font.units_per_em();

        info!("Font loaded ({} units/em)", units_per_em);

        Ok(Self { font, units_per_em })
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    fn to_char(code_point: i32) -> Option<char> {
        u32::try_from(code_point).ok().and_then(char::from_u32)
    }

    /// fontdue scales uniformly; the vertical scale sets the em size
    #[inline]
    fn px_for_scale(&self, scale_y: f32) -> f32 {
        scale_y * self.units_per_em
    }
}

impl GlyphProvider for FontdueProvider {
    fn vertical_metrics(&self) -> (i32, i32, i32) {
        match self.font.horizontal_line_metrics(self.units_per_em) {
            Some(m) => (
                m.ascent.round() as i32,
                m.descent.round() as i32,
                m.line_gap.round() as i32,
            ),
            None => {
                debug!("Font has no horizontal line metrics");
                (0, 0, 0)
            }
        }
    }

    fn codepoint_box(&self, code_point: i32) -> (i32, i32, i32, i32) {
        let Some(ch) = Self::to_char(code_point) else {
            return (0, 0, 0, 0);
        };
        let b = self.font.metrics(ch, self.units_per_em).bounds;
        (
            b.xmin.floor() as i32,
            b.ymin.floor() as i32,
            (b.xmin + b.width).ceil() as i32,
            (b.ymin + b.height).ceil() as i32,
        )
    }

    fn bitmap_size(&self, code_point: i32, _scale_x: f32, scale_y: f32) -> (i32, i32) {
        let Some(ch) = Self::to_char(code_point) else {
            return (0, 0);
        };
        // Same rounding as rasterize() at this size
        let m = self.font.metrics(ch, self.px_for_scale(scale_y));
        (m.width as i32, m.height as i32)
    }

    fn horizontal_metrics(&self, code_point: i32) -> (i32, i32) {
        let Some(ch) = Self::to_char(code_point) else {
            return (0, 0);
        };
        let m = self.font.metrics(ch, self.units_per_em);
        (m.advance_width.round() as i32, m.bounds.xmin.round() as i32)
    }

    fn kerning_advance(&self, a: i32, b: i32) -> i32 {
        match (Self::to_char(a), Self::to_char(b)) {
            (Some(left), Some(right)) => self
                .font
                .horizontal_kern(left, right, self.units_per_em)
                .map(|k| k.round() as i32)
                .unwrap_or(0),
            _ => 0,
        }
    }

    fn rasterize_codepoint(
        &self,
        dest: &mut [u8],
        width: usize,
        height: usize,
        stride: usize,
        _scale_x: f32,
        scale_y: f32,
        code_point: i32,
    ) {
        let Some(ch) = Self::to_char(code_point) else {
            return;
        };
        let (metrics, bitmap) = self.font.rasterize(ch, self.px_for_scale(scale_y));
        if metrics.width > width || metrics.height > height {
            debug!(
                "U+{:04X} bitmap {}x{} clipped to {}x{}",
                code_point, metrics.width, metrics.height, width, height
            );
        }

        let copy_w = metrics.width.min(width);
        let copy_h = metrics.height.min(height);
        for y in 0..copy_h {
            let src = &bitmap[y * metrics.width..y * metrics.width + copy_w];
            let start = y * stride;
            if start + copy_w > dest.len() {
                break;
            }
            dest[start..start + copy_w].copy_from_slice(src);
        }
    }
}
