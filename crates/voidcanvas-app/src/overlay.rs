//! Overlay that keeps the live edit state in memory and logs it.

use kurbo::Point;
use voidcanvas_core::TextOverlay;

/// Text overlay for running without a display.
#[derive(Debug, Default, Clone)]
pub struct HeadlessOverlay {
    text: String,
    caret: Point,
    visible: bool,
    caret_visible: bool,
}

impl HeadlessOverlay {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> Point {
        self.caret
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_caret_visible(&self) -> bool {
        self.caret_visible
    }
}

impl TextOverlay for HeadlessOverlay {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        log::debug!("Overlay text: {:?}", self.text);
    }

    fn set_caret_position(&mut self, position: Point) {
        self.caret = position;
        log::trace!("Caret at ({}, {})", position.x, position.y);
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_caret_visible(&mut self, visible: bool) {
        self.caret_visible = visible;
    }
}
