//! VoidCanvas Core Library
//!
//! Platform-agnostic core of the VoidCanvas drawing page: text layout,
//! persisted text blocks, the text edit session state machine, freehand
//! tools and the compositor that redraws everything onto a raster surface.

pub mod blocks;
pub mod canvas;
pub mod caret;
pub mod compositor;
pub mod config;
pub mod input;
pub mod layout;
pub mod session;
pub mod surface;
pub mod tools;

#[cfg(test)]
pub(crate) mod testing;

pub use blocks::{StoreError, TextBlock, TextBlockStore};
pub use canvas::{Canvas, CanvasError, CommitOutcome};
pub use caret::CaretBlink;
pub use config::{CanvasConfig, EnterBehavior, SerializableColor, StrokePreset, TextConfig};
pub use input::{KeyEvent, Modifiers, TextEditResult, TextKey};
pub use layout::{LineColumn, TextLayout, VerticalDirection, VisualLine, move_caret_vertical};
pub use session::{EditMode, EditSession, SessionEnd};
pub use surface::{Font, RasterSurface, TextMeasure, TextOverlay};
pub use tools::{Stroke, ToolKind, ToolManager};
