//! Redraws the raster surface from the stroke log and the block store.

use crate::blocks::{TextBlock, TextBlockStore};
use crate::config::{CanvasConfig, TextConfig};
use crate::layout::TextLayout;
use crate::surface::{Font, RasterSurface};
use crate::tools::Stroke;
use kurbo::Size;

/// Draw a single block, one display line per line height, wrapped the same
/// way the live overlay wraps it.
pub fn draw_block<S: RasterSurface + ?Sized>(surface: &mut S, block: &TextBlock, font: &Font, text: &TextConfig) {
    let line_height = text.line_height();
    let lines = TextLayout::new(&*surface, font, line_height).wrap_lines(&block.text, text.max_line_width);
    for (index, line) in lines.iter().enumerate() {
        let y = block.position.y + index as f64 * line_height;
        surface.draw_text(line, block.position.x, y, font, text.color.into());
    }
}

/// Draw every block in z-order, skipping `exclude`.
pub fn draw_blocks<S: RasterSurface + ?Sized>(
    surface: &mut S,
    store: &TextBlockStore,
    exclude: Option<usize>,
    text: &TextConfig,
) {
    let font = text.font();
    for (index, block) in store.iter().enumerate() {
        if Some(index) != exclude {
            draw_block(surface, block, &font, text);
        }
    }
}

/// Replay recorded freehand strokes.
pub fn draw_strokes<S: RasterSurface + ?Sized>(surface: &mut S, strokes: &[Stroke]) {
    for stroke in strokes {
        let color = stroke.preset.color.into();
        for (from, to) in stroke.segments() {
            surface.draw_line(from, to, stroke.preset.width, color);
        }
    }
}

/// Full redraw: background, strokes, then every block except `exclude`.
pub fn redraw<S: RasterSurface + ?Sized>(
    surface: &mut S,
    store: &TextBlockStore,
    strokes: &[Stroke],
    exclude: Option<usize>,
    config: &CanvasConfig,
) {
    surface.fill_background(config.background.into());
    draw_strokes(surface, strokes);
    draw_blocks(surface, store, exclude, &config.text);
}

/// Resize while keeping the pixels: snapshot, resize, fill, restore, then
/// redraw the text on top so it stays crisp.
pub fn resize<S: RasterSurface + ?Sized>(
    surface: &mut S,
    size: Size,
    store: &TextBlockStore,
    exclude: Option<usize>,
    config: &CanvasConfig,
) {
    let snapshot = surface.snapshot();
    surface.resize(size);
    surface.fill_background(config.background.into());
    surface.restore(&snapshot);
    draw_blocks(surface, store, exclude, &config.text);
}
