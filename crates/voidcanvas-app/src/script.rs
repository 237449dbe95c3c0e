//! JSON event scripts replayed by the headless app.

use serde::Deserialize;
use voidcanvas_core::{KeyEvent, Modifiers, TextKey, ToolKind};

/// One scripted input event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// Select a tool.
    Tool { tool: ToolKind },
    /// Pointer pressed.
    Press { x: f64, y: f64 },
    /// Pointer moved.
    Move { x: f64, y: f64 },
    /// Pointer released.
    Release,
    /// A single key by name ("a", "Enter", "ArrowLeft", ...).
    Key {
        key: String,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        alt: bool,
        #[serde(default)]
        meta: bool,
    },
    /// Type a string; newlines are sent as Enter.
    Type { text: String },
    /// Let the caret blink for a while.
    Wait { ms: u64 },
    /// Resize the viewport.
    Resize { width: f64, height: f64 },
    /// Clear the canvas.
    Clear,
    /// End the live text session.
    Commit,
}

impl ScriptEvent {
    /// Key events this event expands to.
    pub fn key_events(&self) -> Vec<KeyEvent> {
        match self {
            ScriptEvent::Key {
                key,
                shift,
                ctrl,
                alt,
                meta,
            } => {
                let modifiers = Modifiers {
                    shift: *shift,
                    ctrl: *ctrl,
                    alt: *alt,
                    meta: *meta,
                };
                vec![KeyEvent::named(key, modifiers)]
            }
            ScriptEvent::Type { text } => text
                .chars()
                .map(|c| match c {
                    '\n' => KeyEvent::plain(TextKey::Enter),
                    c => KeyEvent::plain(TextKey::Character(c)),
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// A sequence of events.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
