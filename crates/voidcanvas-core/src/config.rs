//! Canvas configuration.

use crate::surface::Font;
use crate::tools::ToolKind;
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Serializable RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// What the Enter key does while a text session is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnterBehavior {
    /// Enter always inserts a newline; only Escape ends the edit.
    #[default]
    InsertNewline,
    /// Enter ends the edit; Shift+Enter inserts a newline.
    CommitUnlessShift,
}

/// Width and color of a freehand tool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePreset {
    pub width: f64,
    pub color: SerializableColor,
}

impl StrokePreset {
    /// Thin black pencil line.
    pub fn pencil() -> Self {
        Self {
            width: 2.0,
            color: SerializableColor::black(),
        }
    }

    /// Wide stroke painted in the background color.
    pub fn eraser() -> Self {
        Self {
            width: 20.0,
            color: SerializableColor::white(),
        }
    }
}

/// Text placement settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Font size in pixels.
    pub font_size: f64,
    /// Font family string handed to the surface.
    pub font_family: String,
    /// Line height as a multiple of the font size.
    pub line_height_factor: f64,
    /// Wrap width for the live overlay.
    pub max_line_width: f64,
    pub color: SerializableColor,
    pub enter_behavior: EnterBehavior,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_size: 20.0,
            font_family: "\"Helvetica Neue\", Arial, sans-serif".to_string(),
            line_height_factor: 1.2,
            max_line_width: 500.0,
            color: SerializableColor::black(),
            enter_behavior: EnterBehavior::default(),
        }
    }
}

impl TextConfig {
    pub fn font(&self) -> Font {
        Font::new(self.font_size, self.font_family.clone())
    }

    pub fn line_height(&self) -> f64 {
        self.font_size * self.line_height_factor
    }
}

/// Configuration for a [`Canvas`](crate::Canvas).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub text: TextConfig,
    pub background: SerializableColor,
    pub pencil: StrokePreset,
    pub eraser: StrokePreset,
    /// Caret blink half-period in milliseconds.
    pub caret_blink_ms: u64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            text: TextConfig::default(),
            background: SerializableColor::white(),
            pencil: StrokePreset::pencil(),
            eraser: StrokePreset::eraser(),
            caret_blink_ms: 500,
        }
    }
}

impl CanvasConfig {
    /// Stroke preset for a freehand tool, `None` for the text tool.
    pub fn preset_for(&self, tool: ToolKind) -> Option<StrokePreset> {
        match tool {
            ToolKind::Pencil => Some(self.pencil),
            ToolKind::Eraser => Some(self.eraser),
            ToolKind::Text => None,
        }
    }

    pub fn caret_blink_period(&self) -> Duration {
        Duration::from_millis(self.caret_blink_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_line_height() {
        let config = TextConfig::default();
        assert!((config.line_height() - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_presets() {
        let config = CanvasConfig::default();
        assert_eq!(config.preset_for(ToolKind::Pencil), Some(StrokePreset::pencil()));
        assert_eq!(config.preset_for(ToolKind::Eraser).map(|p| p.width), Some(20.0));
        assert!(config.preset_for(ToolKind::Text).is_none());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let json = r#"{ "text": { "enter_behavior": "commit_unless_shift" }, "caret_blink_ms": 250 }"#;
        let config: CanvasConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.text.enter_behavior, EnterBehavior::CommitUnlessShift);
        assert!((config.text.font_size - 20.0).abs() < f64::EPSILON);
        assert_eq!(config.caret_blink_period(), Duration::from_millis(250));
        assert_eq!(config.background, SerializableColor::white());
    }

    #[test]
    fn test_color_conversion() {
        let color: Color = SerializableColor::new(10, 20, 30, 255).into();
        assert_eq!(SerializableColor::from(color), SerializableColor::new(10, 20, 30, 255));
    }
}
