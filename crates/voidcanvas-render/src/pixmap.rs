//! RGBA pixel buffer implementing the raster surface.

use crate::glyphs::GlyphSource;
use crate::SurfaceResult;
use kurbo::{Point, Size};
use peniko::Color;
use voidcanvas_core::{Font, RasterSurface, TextMeasure};

/// Largest width or height a surface is allocated with.
pub const MAX_DIMENSION: u32 = 8192;

/// Clamp a requested size to `0..=MAX_DIMENSION` per side and allocate a
/// transparent buffer for it. NaN and negative sides become zero.
fn allocate(width: f64, height: f64) -> (u32, u32, Vec<u8>) {
    if width > MAX_DIMENSION as f64 || height > MAX_DIMENSION as f64 {
        log::warn!("Surface size {}x{} clamped to {}px per side", width, height, MAX_DIMENSION);
    }
    // NaN saturates to zero in the cast.
    let clamp = |value: f64| value.round().clamp(0.0, MAX_DIMENSION as f64) as u32;
    let (width, height) = (clamp(width), clamp(height));
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|area| area.checked_mul(4));
    match len {
        Some(len) => (width, height, vec![0; len]),
        None => {
            log::warn!("Surface {}x{} is too large, using an empty surface", width, height);
            (0, 0, Vec::new())
        }
    }
}

/// Copy of a surface's pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSnapshot {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

/// Software raster surface: straight-alpha RGBA8, row-major.
pub struct PixmapSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    glyphs: GlyphSource,
}

impl PixmapSurface {
    /// Create a transparent surface using approximate glyphs.
    ///
    /// Each side is clamped to [`MAX_DIMENSION`].
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height, pixels) = allocate(width as f64, height as f64);
        Self {
            width,
            height,
            pixels,
            glyphs: GlyphSource::Approximate,
        }
    }

    /// Use a real font for measuring and drawing text.
    pub fn with_font_bytes(mut self, bytes: &[u8]) -> SurfaceResult<Self> {
        self.glyphs = GlyphSource::from_font_bytes(bytes)?;
        Ok(self)
    }

    /// Raw RGBA bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]])
    }

    /// Encode the surface as a PNG image.
    pub fn encode_png(&self) -> SurfaceResult<Vec<u8>> {
        let mut png_data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut png_data, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.pixels)?;
            writer.finish()?;
        }
        log::info!("Encoded {}x{} PNG ({} bytes)", self.width, self.height, png_data.len());
        Ok(png_data)
    }

    /// Blend `color` into the pixel at (x, y) with the given coverage.
    fn blend_pixel(&mut self, x: i64, y: i64, color: [u8; 4], coverage: f64) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let alpha = (color[3] as f64 / 255.0) * coverage.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let dst = &mut self.pixels[i..i + 4];
        let dst_alpha = dst[3] as f64 / 255.0;
        let out_alpha = alpha + dst_alpha * (1.0 - alpha);
        for channel in 0..3 {
            let src = color[channel] as f64;
            let under = dst[channel] as f64 * dst_alpha * (1.0 - alpha);
            dst[channel] = ((src * alpha + under) / out_alpha).round() as u8;
        }
        dst[3] = (out_alpha * 255.0).round() as u8;
    }
}

fn rgba(color: Color) -> [u8; 4] {
    let rgba = color.to_rgba8();
    [rgba.r, rgba.g, rgba.b, rgba.a]
}

/// Distance from `p` to the segment `a`-`b`.
fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.hypot2();
    if len_sq < f64::EPSILON {
        return (p - a).hypot();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).hypot()
}

impl TextMeasure for PixmapSurface {
    fn measure_text(&self, text: &str, font: &Font) -> f64 {
        self.glyphs.measure(text, font.size)
    }
}

impl RasterSurface for PixmapSurface {
    type Snapshot = PixelSnapshot;

    fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    fn resize(&mut self, size: Size) {
        let (width, height, pixels) = allocate(size.width, size.height);
        self.width = width;
        self.height = height;
        self.pixels = pixels;
    }

    fn fill_background(&mut self, color: Color) {
        let color = rgba(color);
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&color);
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, width: f64, color: Color) {
        let color = rgba(color);
        let half = (width / 2.0).max(0.5);
        let x0 = (from.x.min(to.x) - half - 1.0).floor() as i64;
        let x1 = (from.x.max(to.x) + half + 1.0).ceil() as i64;
        let y0 = (from.y.min(to.y) - half - 1.0).floor() as i64;
        let y1 = (from.y.max(to.y) + half + 1.0).ceil() as i64;

        for y in y0.max(0)..=y1.min(self.height as i64 - 1) {
            for x in x0.max(0)..=x1.min(self.width as i64 - 1) {
                let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                let distance = segment_distance(center, from, to);
                let coverage = half + 0.5 - distance;
                if coverage > 0.0 {
                    self.blend_pixel(x, y, color, coverage);
                }
            }
        }
    }

    fn draw_text(&mut self, line: &str, x: f64, y: f64, font: &Font, color: Color) {
        let color = rgba(color);
        let baseline = y.round() as i64;
        let mut pen_x = x;
        for c in line.chars() {
            if let Some(glyph) = self.glyphs.rasterize(c, font.size) {
                let left = pen_x.round() as i64 + glyph.left;
                let top = baseline + glyph.top;
                for row in 0..glyph.height {
                    for col in 0..glyph.width {
                        let coverage = glyph.coverage[row * glyph.width + col] as f64 / 255.0;
                        self.blend_pixel(left + col as i64, top + row as i64, color, coverage);
                    }
                }
            }
            pen_x += self.glyphs.advance(c, font.size);
        }
    }

    fn snapshot(&self) -> PixelSnapshot {
        PixelSnapshot {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }

    fn restore(&mut self, snapshot: &PixelSnapshot) {
        let columns = snapshot.width.min(self.width) as usize;
        let rows = snapshot.height.min(self.height) as usize;
        for row in 0..rows {
            let src = row * snapshot.width as usize * 4;
            let dst = row * self.width as usize * 4;
            self.pixels[dst..dst + columns * 4].copy_from_slice(&snapshot.pixels[src..src + columns * 4]);
        }
    }
}
