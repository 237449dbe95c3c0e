//! VoidCanvas Application
//!
//! Headless application shell: replays scripted pointer and key events
//! against the canvas and exports the result as PNG.

mod app;
mod overlay;
mod script;
mod shortcuts;

pub use app::{App, AppConfig, AppError, DEFAULT_EXPORT_NAME};
pub use overlay::HeadlessOverlay;
pub use script::{Script, ScriptEvent};
pub use shortcuts::{Shortcut, ShortcutRegistry};
