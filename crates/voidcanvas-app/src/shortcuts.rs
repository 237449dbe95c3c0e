//! Text editing key bindings.

use voidcanvas_core::EnterBehavior;

/// A key binding definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub shift: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, shift: bool, description: &'static str) -> Self {
        Self {
            key,
            shift,
            description,
        }
    }

    /// Format the binding for display (e.g., "Shift+Enter").
    pub fn format(&self) -> String {
        if self.shift {
            format!("Shift+{}", self.key)
        } else {
            self.key.to_string()
        }
    }
}

/// Registry of the keys understood while editing text.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Bindings for the given Enter behavior.
    pub fn all(enter: EnterBehavior) -> Vec<Shortcut> {
        let mut shortcuts = vec![Shortcut::new("Character", false, "Insert at caret")];
        match enter {
            EnterBehavior::InsertNewline => {
                shortcuts.push(Shortcut::new("Enter", false, "Insert newline"));
            }
            EnterBehavior::CommitUnlessShift => {
                shortcuts.push(Shortcut::new("Enter", false, "Finish editing"));
                shortcuts.push(Shortcut::new("Enter", true, "Insert newline"));
            }
        }
        shortcuts.extend([
            Shortcut::new("Backspace", false, "Delete character before caret"),
            Shortcut::new("Delete", false, "Delete character after caret"),
            Shortcut::new("ArrowLeft", false, "Move caret left"),
            Shortcut::new("ArrowRight", false, "Move caret right"),
            Shortcut::new("ArrowUp", false, "Move caret to previous line"),
            Shortcut::new("ArrowDown", false, "Move caret to next line"),
            Shortcut::new("Escape", false, "Finish editing"),
        ]);
        shortcuts
    }

    /// Print all bindings to stdout.
    pub fn print_all(enter: EnterBehavior) {
        println!("\n=== Text Editing Keys ===");
        for shortcut in Self::all(enter) {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}
