//! Glyph metrics and coverage for the software surface.

use crate::{SurfaceError, SurfaceResult};
use fontdue::{Font, FontSettings};

/// Share of the font size used as the advance width when no font is loaded.
const APPROXIMATE_ADVANCE: f64 = 0.55;

/// Coverage bitmap of one glyph, positioned relative to the pen.
pub(crate) struct GlyphBitmap {
    /// Offset from the pen x to the bitmap's left edge.
    pub left: i64,
    /// Offset from the baseline to the bitmap's top edge (negative is up).
    pub top: i64,
    pub width: usize,
    pub height: usize,
    /// Row-major coverage, 0..=255.
    pub coverage: Vec<u8>,
}

/// Where glyph shapes and advances come from.
pub enum GlyphSource {
    /// A parsed TrueType/OpenType font.
    Font(Box<Font>),
    /// Fixed advances with solid block glyphs, for when no font is at hand.
    Approximate,
}

impl GlyphSource {
    /// Parse font file bytes.
    pub fn from_font_bytes(bytes: &[u8]) -> SurfaceResult<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| SurfaceError::Font(e.to_string()))?;
        Ok(Self::Font(Box::new(font)))
    }

    /// Horizontal advance of `c` at `size` pixels.
    pub fn advance(&self, c: char, size: f64) -> f64 {
        match self {
            GlyphSource::Font(font) => font.metrics(c, size as f32).advance_width as f64,
            GlyphSource::Approximate => size * APPROXIMATE_ADVANCE,
        }
    }

    /// Width of a run of text.
    pub fn measure(&self, text: &str, size: f64) -> f64 {
        text.chars().map(|c| self.advance(c, size)).sum()
    }

    /// Coverage bitmap for `c`, `None` for blank glyphs.
    pub(crate) fn rasterize(&self, c: char, size: f64) -> Option<GlyphBitmap> {
        if c.is_whitespace() {
            return None;
        }
        match self {
            GlyphSource::Font(font) => {
                let (metrics, coverage) = font.rasterize(c, size as f32);
                if metrics.width == 0 || metrics.height == 0 {
                    return None;
                }
                Some(GlyphBitmap {
                    left: metrics.xmin as i64,
                    top: -(metrics.height as i64 + metrics.ymin as i64),
                    width: metrics.width,
                    height: metrics.height,
                    coverage,
                })
            }
            GlyphSource::Approximate => {
                let advance = size * APPROXIMATE_ADVANCE;
                let width = (advance * 0.8).round().max(1.0) as usize;
                let height = (size * 0.7).round().max(1.0) as usize;
                Some(GlyphBitmap {
                    left: (advance * 0.1).round() as i64,
                    top: -(height as i64),
                    width,
                    height,
                    coverage: vec![255; width * height],
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approximate_measure() {
        let glyphs = GlyphSource::Approximate;
        assert!((glyphs.measure("abcd", 20.0) - 44.0).abs() < 1e-9);
        assert_eq!(glyphs.measure("", 20.0), 0.0);
    }

    #[test]
    fn test_approximate_glyph_sits_on_baseline() {
        let glyph = GlyphSource::Approximate.rasterize('x', 20.0).unwrap();
        assert_eq!(glyph.height, 14);
        assert_eq!(glyph.top, -14);
        assert_eq!(glyph.coverage.len(), glyph.width * glyph.height);
        assert!(GlyphSource::Approximate.rasterize(' ', 20.0).is_none());
    }

    #[test]
    fn test_invalid_font_bytes() {
        let result = GlyphSource::from_font_bytes(b"not a font");
        assert!(matches!(result, Err(SurfaceError::Font(_))));
    }
}
