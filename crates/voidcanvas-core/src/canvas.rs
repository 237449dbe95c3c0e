//! The canvas controller: routes pointer and key events between the tools,
//! the text edit session, the block store and the compositor.

use crate::blocks::{StoreError, TextBlockStore};
use crate::caret::{CaretBlink, Instant};
use crate::compositor;
use crate::config::CanvasConfig;
use crate::input::{KeyEvent, TextEditResult};
use crate::layout::TextLayout;
use crate::session::{EditSession, SessionEnd};
use crate::surface::{RasterSurface, TextOverlay};
use crate::tools::{Stroke, ToolKind, ToolManager};
use kurbo::{Point, Rect, Size};
use thiserror::Error;

/// Canvas controller errors.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Text block store is out of sync with the edit session: {0}")]
    Store(#[from] StoreError),
}

/// Effect a commit had on the block store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// No session was live.
    Idle,
    /// A new block was appended at this index.
    Inserted(usize),
    /// The block at this index was replaced.
    Replaced(usize),
    /// The buffer was blank; the store is unchanged.
    Discarded,
}

/// A drawing page: a raster surface, a live text overlay and the state that
/// ties pointer and key events to them.
pub struct Canvas<S, O> {
    surface: S,
    overlay: O,
    config: CanvasConfig,
    store: TextBlockStore,
    session: EditSession,
    tools: ToolManager,
    strokes: Vec<Stroke>,
    blink: CaretBlink,
}

impl<S: RasterSurface, O: TextOverlay> Canvas<S, O> {
    /// Create a canvas and paint its background.
    pub fn new(mut surface: S, mut overlay: O, config: CanvasConfig) -> Self {
        surface.fill_background(config.background.into());
        overlay.set_visible(false);
        overlay.set_caret_visible(false);
        let blink = CaretBlink::new(config.caret_blink_period());
        Self {
            surface,
            overlay,
            config,
            store: TextBlockStore::new(),
            session: EditSession::new(),
            tools: ToolManager::new(),
            strokes: Vec::new(),
            blink,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn store(&self) -> &TextBlockStore {
        &self.store
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn tool(&self) -> ToolKind {
        self.tools.current_tool
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn caret_blink(&self) -> &CaretBlink {
        &self.blink
    }

    /// Switch tools, committing a live text session first.
    pub fn set_tool(&mut self, tool: ToolKind) -> Result<(), CanvasError> {
        if self.session.is_active() {
            self.commit()?;
        }
        log::debug!("Tool set to {}", tool.display_name());
        self.tools.set_tool(tool);
        self.drop_empty_stroke();
        Ok(())
    }

    /// Pointer pressed at `point`.
    ///
    /// With the text tool this commits any live session, then either
    /// re-edits the topmost block under the pointer or starts a new one.
    /// Other tools start a stroke.
    pub fn pointer_down(&mut self, point: Point) -> Result<(), CanvasError> {
        if self.tools.current_tool != ToolKind::Text {
            if self.tools.begin(point) {
                if let Some(preset) = self.config.preset_for(self.tools.current_tool) {
                    self.strokes.push(Stroke::new(point, preset));
                }
            }
            return Ok(());
        }

        if self.session.is_active() {
            self.commit()?;
        }

        let font = self.config.text.font();
        let layout = TextLayout::new(&self.surface, &font, self.config.text.line_height())
            .with_max_width(self.config.text.max_line_width);
        match self.store.topmost_hit_at(&layout, point) {
            Some(index) => {
                let block = self.store.get(index).ok_or(StoreError::IndexOutOfRange {
                    index,
                    len: self.store.len(),
                })?;
                self.session.begin_edit(index, block, point, &layout);
                self.redraw();
            }
            None => self.session.begin_new(point),
        }
        self.refresh_overlay();
        Ok(())
    }

    /// Pointer moved; extends the stroke in progress.
    pub fn pointer_move(&mut self, point: Point) {
        let Some((from, to)) = self.tools.update(point) else {
            return;
        };
        let Some(preset) = self.config.preset_for(self.tools.current_tool) else {
            return;
        };
        self.surface.draw_line(from, to, preset.width, preset.color.into());
        match self.strokes.last_mut() {
            Some(stroke) if stroke.last_point() == Some(from) => stroke.points.push(to),
            _ => self.strokes.push(Stroke {
                preset,
                points: vec![from, to],
            }),
        }
    }

    /// Pointer released or left the surface.
    pub fn pointer_up(&mut self) {
        self.tools.end();
        self.drop_empty_stroke();
    }

    /// Key pressed. Ignored while no text session is live.
    pub fn key_down(&mut self, event: &KeyEvent) -> Result<TextEditResult, CanvasError> {
        if !self.session.is_active() {
            return Ok(TextEditResult::NotHandled);
        }
        let result = self.session.handle_key(event, self.config.text.enter_behavior);
        match result {
            TextEditResult::ExitEdit => {
                self.commit()?;
            }
            TextEditResult::Handled => self.refresh_overlay(),
            TextEditResult::NotHandled => {}
        }
        Ok(result)
    }

    /// End the live session, writing its buffer to the store unless blank.
    ///
    /// Always returns to idle, hides the overlay and redraws, so a block
    /// hidden for editing shows again even when nothing was written.
    pub fn commit(&mut self) -> Result<CommitOutcome, CanvasError> {
        let Some(end) = self.session.finish() else {
            return Ok(CommitOutcome::Idle);
        };
        self.blink.cancel();
        self.hide_overlay();

        let outcome = match end {
            SessionEnd::Insert(block) => Ok(CommitOutcome::Inserted(self.store.insert(block))),
            SessionEnd::Replace { index, block } => self
                .store
                .replace(index, block)
                .map(|_| CommitOutcome::Replaced(index)),
            SessionEnd::Discarded { .. } => Ok(CommitOutcome::Discarded),
        };
        self.redraw();

        match &outcome {
            Ok(outcome) => log::info!("Text session committed: {:?}", outcome),
            Err(e) => log::error!("Failed to commit text session: {}", e),
        }
        outcome.map_err(CanvasError::from)
    }

    /// Wipe everything: commit or discard the live session, drop all blocks
    /// and strokes, and repaint the background.
    pub fn clear(&mut self) -> Result<(), CanvasError> {
        self.blink.cancel();
        let committed = self.commit();
        self.store.remove_all();
        self.strokes.clear();
        self.tools.end();
        self.surface.fill_background(self.config.background.into());
        log::info!("Canvas cleared");
        committed.map(|_| ())
    }

    /// Resize the surface, keeping its pixels and redrawing text on top.
    ///
    /// The stroke log is clipped to the new surface so later redraws show
    /// the same strokes the restored pixels do.
    pub fn resize(&mut self, size: Size) {
        compositor::resize(
            &mut self.surface,
            size,
            &self.store,
            self.session.editing_index(),
            &self.config,
        );
        let bounds = Rect::from_origin_size(Point::ORIGIN, self.surface.size());
        self.strokes = self.strokes.iter().flat_map(|stroke| stroke.clip(bounds)).collect();
        log::debug!("Canvas resized to {}x{}", size.width, size.height);
    }

    /// Full redraw, leaving out the block under edit.
    pub fn redraw(&mut self) {
        compositor::redraw(
            &mut self.surface,
            &self.store,
            &self.strokes,
            self.session.editing_index(),
            &self.config,
        );
    }

    /// Advance the caret blink to `now`, pushing visibility changes to the
    /// overlay.
    pub fn tick(&mut self, now: Instant) {
        if let Some(visible) = self.blink.update(now) {
            self.overlay.set_caret_visible(visible);
        }
    }

    /// Commit any live session so typed text lands on the surface, then hand
    /// the surface out for encoding.
    pub fn prepare_export(&mut self) -> Result<&S, CanvasError> {
        self.commit()?;
        Ok(&self.surface)
    }

    fn refresh_overlay(&mut self) {
        let text = &self.config.text;
        let font = text.font();
        let layout = TextLayout::new(&self.surface, &font, text.line_height()).with_max_width(text.max_line_width);
        let wrapped = layout.wrap_lines(self.session.buffer(), layout.max_width()).join("\n");
        let caret = self.session.caret_position(&layout);

        self.overlay.set_visible(true);
        self.overlay.set_text(&wrapped);
        if let Some(caret) = caret {
            self.overlay.set_caret_position(caret);
        }
        self.blink.restart(Instant::now());
        self.overlay.set_caret_visible(true);
    }

    /// Forget a stroke that never got a second point.
    fn drop_empty_stroke(&mut self) {
        if self.strokes.last().is_some_and(|stroke| stroke.points.len() < 2) {
            self.strokes.pop();
        }
    }

    fn hide_overlay(&mut self) {
        self.overlay.set_text("");
        self.overlay.set_caret_visible(false);
        self.overlay.set_visible(false);
    }
}
