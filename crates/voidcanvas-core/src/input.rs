//! Keyboard input for text editing.

use serde::{Deserialize, Serialize};

/// Keyboard key for text editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextKey {
    Character(char),
    Enter,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Escape,
    /// Any other named key (Shift, F1, Tab, ...).
    Other(String),
}

impl TextKey {
    /// Decode a key name as reported by the input layer ("a", "Enter",
    /// "ArrowLeft", ...).
    pub fn from_name(name: &str) -> Self {
        match name {
            "Enter" => Self::Enter,
            "Backspace" => Self::Backspace,
            "Delete" => Self::Delete,
            "ArrowLeft" => Self::Left,
            "ArrowRight" => Self::Right,
            "ArrowUp" => Self::Up,
            "ArrowDown" => Self::Down,
            "Escape" => Self::Escape,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Character(c),
                    _ => Self::Other(name.to_string()),
                }
            }
        }
    }
}

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl, Alt or Meta held; such chords never insert text.
    pub fn has_command(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// A key press delivered while a text session may be live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: TextKey,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: TextKey, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn named(name: &str, modifiers: Modifiers) -> Self {
        Self::new(TextKey::from_name(name), modifiers)
    }

    /// Unmodified key press.
    pub fn plain(key: TextKey) -> Self {
        Self::new(key, Modifiers::default())
    }
}

/// Result of handling a text editing event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEditResult {
    /// Event was handled, text may have changed.
    Handled,
    /// Event was handled, user wants to exit editing.
    ExitEdit,
    /// Event was not handled (pass to other handlers).
    NotHandled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(TextKey::from_name("a"), TextKey::Character('a'));
        assert_eq!(TextKey::from_name(" "), TextKey::Character(' '));
        assert_eq!(TextKey::from_name("é"), TextKey::Character('é'));
        assert_eq!(TextKey::from_name("ArrowUp"), TextKey::Up);
        assert_eq!(TextKey::from_name("Escape"), TextKey::Escape);
        assert_eq!(TextKey::from_name("Shift"), TextKey::Other("Shift".to_string()));
        assert_eq!(TextKey::from_name(""), TextKey::Other(String::new()));
    }

    #[test]
    fn test_command_modifiers() {
        assert!(!Modifiers { shift: true, ..Default::default() }.has_command());
        assert!(Modifiers { meta: true, ..Default::default() }.has_command());
    }
}
