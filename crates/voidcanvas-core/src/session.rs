//! The text edit session state machine.

use crate::blocks::TextBlock;
use crate::config::EnterBehavior;
use crate::input::{KeyEvent, TextEditResult, TextKey};
use crate::layout::{TextLayout, VerticalDirection, byte_index, char_len, move_caret_vertical};
use crate::surface::TextMeasure;
use kurbo::Point;

/// What the session is currently editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// No edit in progress.
    #[default]
    Idle,
    /// Composing a new block that is not in the store yet.
    Composing,
    /// Editing the stored block at this index.
    Editing(usize),
}

/// How a finished session should be applied to the block store.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEnd {
    /// A new block to append.
    Insert(TextBlock),
    /// New content for the block at `index`.
    Replace { index: usize, block: TextBlock },
    /// Nothing to write: the buffer was blank.
    Discarded { index: Option<usize> },
}

/// The in-progress edit buffer.
///
/// `cursor` is a character offset in `0..=buffer.chars().count()`. The
/// anchor is fixed when the session begins.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    mode: EditMode,
    buffer: String,
    cursor: usize,
    anchor: Point,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        self.mode != EditMode::Idle
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Store index of the block being edited, if any.
    pub fn editing_index(&self) -> Option<usize> {
        match self.mode {
            EditMode::Editing(index) => Some(index),
            _ => None,
        }
    }

    /// Start composing a new block at `point`.
    ///
    /// The caller must finish any live session first.
    pub fn begin_new(&mut self, point: Point) {
        debug_assert!(!self.is_active(), "text session already live");
        self.mode = EditMode::Composing;
        self.buffer.clear();
        self.cursor = 0;
        self.anchor = point;
        log::debug!("Composing new text at ({}, {})", point.x, point.y);
    }

    /// Start editing the stored block at `index`, placing the caret at the
    /// character slot nearest to `click`.
    pub fn begin_edit<M: TextMeasure + ?Sized>(
        &mut self,
        index: usize,
        block: &TextBlock,
        click: Point,
        layout: &TextLayout<'_, M>,
    ) {
        debug_assert!(!self.is_active(), "text session already live");
        self.mode = EditMode::Editing(index);
        self.buffer.clone_from(&block.text);
        self.anchor = block.position;
        self.cursor = layout.offset_at_point(&self.buffer, self.anchor, click);
        log::debug!("Editing text block {} with caret at {}", index, self.cursor);
    }

    /// Apply a key press to the buffer.
    pub fn handle_key(&mut self, event: &KeyEvent, enter: EnterBehavior) -> TextEditResult {
        if !self.is_active() {
            return TextEditResult::NotHandled;
        }

        let len = char_len(&self.buffer);
        match &event.key {
            TextKey::Escape => return TextEditResult::ExitEdit,
            TextKey::Enter => match enter {
                EnterBehavior::CommitUnlessShift if !event.modifiers.shift => {
                    return TextEditResult::ExitEdit;
                }
                _ => self.insert('\n'),
            },
            TextKey::Character(c) => {
                if event.modifiers.has_command() {
                    return TextEditResult::NotHandled;
                }
                self.insert(*c);
            }
            TextKey::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.remove_at(self.cursor);
                }
            }
            TextKey::Delete => {
                if self.cursor < len {
                    self.remove_at(self.cursor);
                }
            }
            TextKey::Left => self.cursor = self.cursor.saturating_sub(1),
            TextKey::Right => self.cursor = (self.cursor + 1).min(len),
            TextKey::Up => {
                self.cursor = move_caret_vertical(&self.buffer, self.cursor, VerticalDirection::Up)
            }
            TextKey::Down => {
                self.cursor = move_caret_vertical(&self.buffer, self.cursor, VerticalDirection::Down)
            }
            TextKey::Other(_) => return TextEditResult::NotHandled,
        }
        TextEditResult::Handled
    }

    /// Caret pixel position, `None` while idle.
    pub fn caret_position<M: TextMeasure + ?Sized>(&self, layout: &TextLayout<'_, M>) -> Option<Point> {
        self.is_active()
            .then(|| layout.caret_position(&self.buffer, self.cursor, self.anchor))
    }

    /// End the session and return what to write back, `None` if idle.
    ///
    /// A blank buffer never writes anything, even when editing an existing
    /// block: the stored block is left as it was.
    pub fn finish(&mut self) -> Option<SessionEnd> {
        let mode = std::mem::take(&mut self.mode);
        let text = std::mem::take(&mut self.buffer);
        self.cursor = 0;

        let blank = text.trim().is_empty();
        let block = TextBlock::new(self.anchor, text);
        match mode {
            EditMode::Idle => None,
            EditMode::Composing if blank => Some(SessionEnd::Discarded { index: None }),
            EditMode::Editing(index) if blank => Some(SessionEnd::Discarded { index: Some(index) }),
            EditMode::Composing => Some(SessionEnd::Insert(block)),
            EditMode::Editing(index) => Some(SessionEnd::Replace { index, block }),
        }
    }

    fn insert(&mut self, c: char) {
        let at = byte_index(&self.buffer, self.cursor);
        self.buffer.insert(at, c);
        self.cursor += 1;
    }

    fn remove_at(&mut self, offset: usize) {
        let at = byte_index(&self.buffer, offset);
        self.buffer.remove(at);
    }
}
