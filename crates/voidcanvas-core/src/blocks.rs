//! Persisted text blocks.

use crate::layout::TextLayout;
use crate::surface::TextMeasure;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Text block store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Text block index {index} out of range (store holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// A committed block of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Baseline origin of the first line.
    pub position: Point,
    /// Content, possibly spanning several lines.
    pub text: String,
}

impl TextBlock {
    pub fn new(position: Point, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
        }
    }
}

/// Ordered text blocks. Insertion order is z-order: later blocks draw on
/// top and win hit-tests.
#[derive(Debug, Clone, Default)]
pub struct TextBlockStore {
    blocks: Vec<TextBlock>,
}

impl TextBlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TextBlock> {
        self.blocks.get(index)
    }

    /// Blocks back to front.
    pub fn iter(&self) -> impl Iterator<Item = &TextBlock> {
        self.blocks.iter()
    }

    /// Append a block on top and return its index.
    pub fn insert(&mut self, block: TextBlock) -> usize {
        self.blocks.push(block);
        self.blocks.len() - 1
    }

    /// Replace the block at `index`, returning the previous one.
    pub fn replace(&mut self, index: usize, block: TextBlock) -> Result<TextBlock, StoreError> {
        let len = self.blocks.len();
        let slot = self
            .blocks
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, block))
    }

    /// Remove the block at `index`. Later blocks shift down by one.
    pub fn remove(&mut self, index: usize) -> Result<TextBlock, StoreError> {
        if index >= self.blocks.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.blocks.len(),
            });
        }
        Ok(self.blocks.remove(index))
    }

    pub fn remove_all(&mut self) {
        self.blocks.clear();
    }

    /// Index of the topmost block whose bounds contain `point`.
    pub fn topmost_hit_at<M: TextMeasure + ?Sized>(
        &self,
        layout: &TextLayout<'_, M>,
        point: Point,
    ) -> Option<usize> {
        self.blocks
            .iter()
            .rposition(|block| layout.hit_test(point, block))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingSurface, font};

    #[test]
    fn test_insert_returns_last_index() {
        let mut store = TextBlockStore::new();
        assert_eq!(store.insert(TextBlock::new(Point::ZERO, "a")), 0);
        assert_eq!(store.insert(TextBlock::new(Point::ZERO, "b")), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_replace() {
        let mut store = TextBlockStore::new();
        store.insert(TextBlock::new(Point::ZERO, "old"));
        let previous = store.replace(0, TextBlock::new(Point::new(1.0, 1.0), "new")).unwrap();
        assert_eq!(previous.text, "old");
        assert_eq!(store.get(0).map(|b| b.text.as_str()), Some("new"));
    }

    #[test]
    fn test_replace_out_of_range() {
        let mut store = TextBlockStore::new();
        let result = store.replace(3, TextBlock::new(Point::ZERO, "x"));
        assert_eq!(result, Err(StoreError::IndexOutOfRange { index: 3, len: 0 }));
    }

    #[test]
    fn test_remove() {
        let mut store = TextBlockStore::new();
        store.insert(TextBlock::new(Point::ZERO, "a"));
        store.insert(TextBlock::new(Point::ZERO, "b"));
        assert_eq!(store.remove(0).unwrap().text, "a");
        assert_eq!(store.get(0).map(|b| b.text.as_str()), Some("b"));
        assert!(matches!(store.remove(1), Err(StoreError::IndexOutOfRange { index: 1, len: 1 })));
    }

    #[test]
    fn test_remove_all() {
        let mut store = TextBlockStore::new();
        store.insert(TextBlock::new(Point::ZERO, "a"));
        store.remove_all();
        assert!(store.is_empty());
    }

    #[test]
    fn test_topmost_hit_prefers_latest() {
        let surface = RecordingSurface::default();
        let font = font();
        let layout = TextLayout::new(&surface, &font, 24.0);

        let mut store = TextBlockStore::new();
        store.insert(TextBlock::new(Point::new(100.0, 100.0), "underneath"));
        store.insert(TextBlock::new(Point::new(110.0, 100.0), "on top"));
        store.insert(TextBlock::new(Point::new(400.0, 400.0), "far away"));

        assert_eq!(store.topmost_hit_at(&layout, Point::new(120.0, 95.0)), Some(1));
        assert_eq!(store.topmost_hit_at(&layout, Point::new(102.0, 95.0)), Some(0));
        assert_eq!(store.topmost_hit_at(&layout, Point::new(0.0, 0.0)), None);
    }
}
