//! Collaborator traits: the raster surface and the live text overlay.

use kurbo::{Point, Size};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Font used to draw and measure text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// Size in pixels.
    pub size: f64,
    /// Family name (CSS-style list allowed).
    pub family: String,
}

impl Font {
    pub fn new(size: f64, family: impl Into<String>) -> Self {
        Self {
            size,
            family: family.into(),
        }
    }
}

/// Anything able to measure the advance width of a run of text.
pub trait TextMeasure {
    /// Width in pixels of `text` drawn with `font`.
    fn measure_text(&self, text: &str, font: &Font) -> f64;
}

/// A 2D pixel surface the compositor draws onto.
///
/// Text positions passed to [`draw_text`](Self::draw_text) are baseline
/// origins. The surface keeps no notion of objects: once drawn, text and
/// strokes are just pixels.
pub trait RasterSurface: TextMeasure {
    /// Opaque pixel copy used to carry content across a resize.
    type Snapshot;

    /// Current size in pixels.
    fn size(&self) -> Size;

    /// Resize the surface. Contents are unspecified afterwards.
    fn resize(&mut self, size: Size);

    /// Fill the whole surface with `color`.
    fn fill_background(&mut self, color: Color);

    /// Draw a round-capped line segment.
    fn draw_line(&mut self, from: Point, to: Point, width: f64, color: Color);

    /// Draw a single line of text with its baseline starting at `(x, y)`.
    fn draw_text(&mut self, line: &str, x: f64, y: f64, font: &Font, color: Color);

    fn snapshot(&self) -> Self::Snapshot;

    /// Paint a snapshot back at the origin, clipped to the current size.
    fn restore(&mut self, snapshot: &Self::Snapshot);
}

/// Display primitive showing the in-progress edit buffer and its caret.
pub trait TextOverlay {
    fn set_text(&mut self, text: &str);
    fn set_caret_position(&mut self, position: Point);
    fn set_visible(&mut self, visible: bool);
    fn set_caret_visible(&mut self, visible: bool);
}
