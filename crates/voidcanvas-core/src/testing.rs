//! Deterministic collaborators for unit tests.

use crate::surface::{Font, RasterSurface, TextMeasure, TextOverlay};
use kurbo::{Point, Size};
use peniko::Color;

/// Advance width of every character on the recording surface.
pub const ADVANCE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Fill,
    Line { from: Point, to: Point, width: f64 },
    Text { line: String, x: f64, y: f64 },
    Resize(Size),
    Restore(usize),
}

/// Surface that records draw calls and measures every char as [`ADVANCE`].
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub size: Size,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            calls: Vec::new(),
        }
    }

    /// Text lines drawn since the last background fill.
    pub fn visible_text(&self) -> Vec<String> {
        let start = self
            .calls
            .iter()
            .rposition(|call| *call == DrawCall::Fill)
            .map_or(0, |i| i + 1);
        self.calls[start..]
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { line, .. } => Some(line.clone()),
                _ => None,
            })
            .collect()
    }
}

impl TextMeasure for RecordingSurface {
    fn measure_text(&self, text: &str, _font: &Font) -> f64 {
        text.chars().count() as f64 * ADVANCE
    }
}

impl RasterSurface for RecordingSurface {
    type Snapshot = usize;

    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
        self.calls.push(DrawCall::Resize(size));
    }

    fn fill_background(&mut self, _color: Color) {
        self.calls.push(DrawCall::Fill);
    }

    fn draw_line(&mut self, from: Point, to: Point, width: f64, _color: Color) {
        self.calls.push(DrawCall::Line { from, to, width });
    }

    fn draw_text(&mut self, line: &str, x: f64, y: f64, _font: &Font, _color: Color) {
        self.calls.push(DrawCall::Text {
            line: line.to_string(),
            x,
            y,
        });
    }

    fn snapshot(&self) -> usize {
        self.calls.len()
    }

    fn restore(&mut self, snapshot: &usize) {
        self.calls.push(DrawCall::Restore(*snapshot));
    }
}

/// Overlay that keeps the last value pushed for each property.
#[derive(Debug, Default)]
pub struct RecordingOverlay {
    pub text: String,
    pub caret: Option<Point>,
    pub visible: bool,
    pub caret_visible: bool,
}

impl TextOverlay for RecordingOverlay {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_caret_position(&mut self, position: Point) {
        self.caret = Some(position);
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_caret_visible(&mut self, visible: bool) {
        self.caret_visible = visible;
    }
}

pub fn font() -> Font {
    Font::new(20.0, "test")
}
