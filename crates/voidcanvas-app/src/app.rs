//! Application state and script playback.

use crate::overlay::HeadlessOverlay;
use crate::script::{Script, ScriptEvent};
use kurbo::{Point, Size};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use voidcanvas_core::caret::Instant;
use voidcanvas_core::{Canvas, CanvasConfig, CanvasError};
use voidcanvas_render::{PixmapSurface, SurfaceError};

/// Default export file name.
pub const DEFAULT_EXPORT_NAME: &str = "voidcanvas.png";

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub width: u32,
    pub height: u32,
    pub canvas: CanvasConfig,
    /// TrueType/OpenType font used for text; approximate glyphs when unset.
    pub font_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
            canvas: CanvasConfig::default(),
            font_path: None,
        }
    }
}

impl AppConfig {
    /// Read canvas settings from a JSON file; missing fields keep defaults.
    pub fn load_canvas_config(path: &Path) -> Result<CanvasConfig, AppError> {
        let json = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        log::info!("Loaded canvas config from: {:?}", path);
        Ok(config)
    }
}

/// Main application struct.
pub struct App {
    canvas: Canvas<PixmapSurface, HeadlessOverlay>,
}

impl App {
    /// Create the surface and canvas described by `config`.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let mut surface = PixmapSurface::new(config.width, config.height);
        if let Some(path) = &config.font_path {
            let bytes = std::fs::read(path)?;
            surface = surface.with_font_bytes(&bytes)?;
            log::info!("Using font: {:?}", path);
        }
        let canvas = Canvas::new(surface, HeadlessOverlay::default(), config.canvas);
        Ok(Self { canvas })
    }

    pub fn canvas(&self) -> &Canvas<PixmapSurface, HeadlessOverlay> {
        &self.canvas
    }

    /// Apply one scripted event.
    pub fn apply(&mut self, event: &ScriptEvent) -> Result<(), AppError> {
        match event {
            ScriptEvent::Tool { tool } => self.canvas.set_tool(*tool)?,
            ScriptEvent::Press { x, y } => self.canvas.pointer_down(Point::new(*x, *y))?,
            ScriptEvent::Move { x, y } => self.canvas.pointer_move(Point::new(*x, *y)),
            ScriptEvent::Release => self.canvas.pointer_up(),
            ScriptEvent::Key { .. } | ScriptEvent::Type { .. } => {
                for key in event.key_events() {
                    self.canvas.key_down(&key)?;
                }
            }
            ScriptEvent::Wait { ms } => {
                self.canvas.tick(Instant::now() + Duration::from_millis(*ms));
            }
            ScriptEvent::Resize { width, height } => self.canvas.resize(Size::new(*width, *height)),
            ScriptEvent::Clear => self.canvas.clear()?,
            ScriptEvent::Commit => {
                self.canvas.commit()?;
            }
        }
        Ok(())
    }

    /// Replay every event of `script` in order.
    pub fn run_script(&mut self, script: &Script) -> Result<(), AppError> {
        log::info!("Replaying {} events", script.events.len());
        for event in &script.events {
            log::debug!("Event: {:?}", event);
            self.apply(event)?;
        }
        Ok(())
    }

    /// Commit any live text and encode the surface as PNG.
    pub fn export_png(&mut self) -> Result<Vec<u8>, AppError> {
        let surface = self.canvas.prepare_export()?;
        Ok(surface.encode_png()?)
    }

    /// Export PNG to a file.
    pub fn save_png(&mut self, path: &Path) -> Result<(), AppError> {
        let png_data = self.export_png()?;
        std::fs::write(path, png_data)?;
        log::info!("Exported PNG to: {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voidcanvas_core::RasterSurface;

    fn small_app() -> App {
        App::new(AppConfig {
            width: 200,
            height: 120,
            ..AppConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_script_builds_blocks_and_strokes() {
        let script = Script::from_json(
            r#"{ "events": [
                { "type": "press", "x": 10, "y": 10 },
                { "type": "move", "x": 60, "y": 10 },
                { "type": "release" },
                { "type": "tool", "tool": "text" },
                { "type": "press", "x": 20, "y": 60 },
                { "type": "type", "text": "hi\nyou" },
                { "type": "key", "key": "Escape" }
            ] }"#,
        )
        .unwrap();
        let mut app = small_app();
        app.run_script(&script).unwrap();

        let canvas = app.canvas();
        assert_eq!(canvas.store().len(), 1);
        assert_eq!(canvas.store().get(0).map(|b| b.text.as_str()), Some("hi\nyou"));
        assert_eq!(canvas.strokes().len(), 1);
        assert_eq!(canvas.surface().pixel(30, 10), Some([0, 0, 0, 255]));
        assert!(!canvas.overlay().is_visible());
    }

    #[test]
    fn test_resize_event() {
        let mut app = small_app();
        app.apply(&ScriptEvent::Resize {
            width: 300.0,
            height: 150.0,
        })
        .unwrap();
        assert_eq!(app.canvas().surface().size(), Size::new(300.0, 150.0));
        assert_eq!(app.canvas().surface().pixel(250, 140), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_save_png_commits_live_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_NAME);
        let mut app = small_app();
        app.apply(&ScriptEvent::Tool {
            tool: voidcanvas_core::ToolKind::Text,
        })
        .unwrap();
        app.apply(&ScriptEvent::Press { x: 5.0, y: 30.0 }).unwrap();
        app.apply(&ScriptEvent::Type {
            text: "draft".to_string(),
        })
        .unwrap();

        app.save_png(&path).unwrap();
        assert_eq!(app.canvas().store().len(), 1);
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn test_wait_blinks_caret() {
        let mut app = small_app();
        app.apply(&ScriptEvent::Tool {
            tool: voidcanvas_core::ToolKind::Text,
        })
        .unwrap();
        app.apply(&ScriptEvent::Press { x: 10.0, y: 40.0 }).unwrap();
        app.apply(&ScriptEvent::Type { text: "ab".to_string() }).unwrap();

        let overlay = app.canvas().overlay();
        assert_eq!(overlay.text(), "ab");
        // Approximate glyphs advance 11px at the default 20px font.
        let caret = overlay.caret();
        assert!((caret.x - 32.0).abs() < 1e-9);
        assert!((caret.y - 40.0).abs() < 1e-9);
        assert!(overlay.is_caret_visible());

        app.apply(&ScriptEvent::Wait { ms: 750 }).unwrap();
        assert!(!app.canvas().overlay().is_caret_visible());
        assert!(app.canvas().overlay().is_visible());
    }

    #[test]
    fn test_missing_font_file() {
        let result = App::new(AppConfig {
            font_path: Some(PathBuf::from("/nonexistent/font.ttf")),
            ..AppConfig::default()
        });
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn test_load_canvas_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "text": { "font_size": 32 } }"#).unwrap();
        let config = AppConfig::load_canvas_config(&path).unwrap();
        assert!((config.text.font_size - 32.0).abs() < f64::EPSILON);
        assert_eq!(config.caret_blink_ms, 500);
    }
}
