//! Text layout: word wrapping, caret geometry and block hit-testing.
//!
//! Everything here is recomputed from the raw text on every call. Offsets
//! are character offsets into the text, never byte offsets. Geometry runs on
//! display lines: hard lines split further at soft wrap points.

use crate::blocks::TextBlock;
use crate::surface::{Font, TextMeasure};
use kurbo::{Point, Rect};

/// A caret location expressed as a hard line index and a column within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineColumn {
    pub line: usize,
    pub column: usize,
}

/// A display line as a character range of the source text.
///
/// `soft` marks a line that ends at a wrap point instead of a newline or the
/// end of the text. The whitespace at a wrap point stays in the range, so
/// consecutive ranges cover the text without gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualLine {
    pub start: usize,
    pub end: usize,
    pub soft: bool,
}

/// Direction of a vertical caret move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalDirection {
    Up,
    Down,
}

/// Number of characters in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte index of the character at `offset`, or `text.len()` past the end.
pub fn byte_index(text: &str, offset: usize) -> usize {
    text.char_indices()
        .nth(offset)
        .map_or(text.len(), |(index, _)| index)
}

/// The characters of `text` in `start..end`.
pub fn char_slice(text: &str, start: usize, end: usize) -> &str {
    &text[byte_index(text, start)..byte_index(text, end)]
}

/// Index of the display line holding `offset`.
///
/// An offset on a wrap point belongs to the line that starts there.
fn line_index_at(lines: &[VisualLine], offset: usize) -> usize {
    lines.partition_point(|line| line.start <= offset).saturating_sub(1)
}

/// Locate the hard line and column holding `offset`.
///
/// Offsets past the end resolve to the end of the last line.
pub fn locate(text: &str, offset: usize) -> LineColumn {
    let mut consumed = 0;
    let mut last = LineColumn { line: 0, column: 0 };
    for (line, content) in text.split('\n').enumerate() {
        let len = char_len(content);
        if offset <= consumed + len {
            return LineColumn {
                line,
                column: offset - consumed,
            };
        }
        consumed += len + 1;
        last = LineColumn { line, column: len };
    }
    last
}

/// Absolute offset of a line/column pair, clamping the column to the line.
pub fn offset_of(text: &str, position: LineColumn) -> usize {
    let mut offset = 0;
    for (line, content) in text.split('\n').enumerate() {
        let len = char_len(content);
        if line == position.line {
            return offset + position.column.min(len);
        }
        offset += len + 1;
    }
    char_len(text)
}

/// Move the caret one hard line up or down, keeping the column when possible.
///
/// Returns `offset` unchanged when the move would leave the text.
pub fn move_caret_vertical(text: &str, offset: usize, direction: VerticalDirection) -> usize {
    let line_lengths: Vec<usize> = text.split('\n').map(char_len).collect();
    let current = locate(text, offset);
    let target = match direction {
        VerticalDirection::Up => current.line.checked_sub(1),
        VerticalDirection::Down => Some(current.line + 1).filter(|&line| line < line_lengths.len()),
    };
    let Some(target) = target else {
        return offset;
    };
    offset_of(
        text,
        LineColumn {
            line: target,
            column: current.column.min(line_lengths[target]),
        },
    )
}

/// Layout calculations bound to a measurer, a font, a line height and a
/// wrap width (unbounded unless set).
pub struct TextLayout<'a, M: TextMeasure + ?Sized> {
    measure: &'a M,
    font: &'a Font,
    line_height: f64,
    max_width: f64,
}

impl<'a, M: TextMeasure + ?Sized> TextLayout<'a, M> {
    pub fn new(measure: &'a M, font: &'a Font, line_height: f64) -> Self {
        Self {
            measure,
            font,
            line_height,
            max_width: f64::INFINITY,
        }
    }

    /// Wrap width used for caret placement, bounds and hit-testing.
    pub fn with_max_width(mut self, max_width: f64) -> Self {
        self.max_width = max_width;
        self
    }

    pub fn max_width(&self) -> f64 {
        self.max_width
    }

    pub fn font(&self) -> &Font {
        self.font
    }

    pub fn line_height(&self) -> f64 {
        self.line_height
    }

    pub fn measure(&self, text: &str) -> f64 {
        self.measure.measure_text(text, self.font)
    }

    /// Split `text` into display lines no wider than `max_width`.
    ///
    /// Hard newlines always break (empty lines are kept). Within a hard line,
    /// whitespace-separated words are packed greedily; a word that does not
    /// fit starts a new line, and a word wider than `max_width` sits alone
    /// on its line unsplit.
    pub fn visual_lines(&self, text: &str, max_width: f64) -> Vec<VisualLine> {
        let chars: Vec<char> = text.chars().collect();
        let mut lines = Vec::new();
        let mut segment_start = 0;
        for segment in text.split('\n') {
            let segment_end = segment_start + char_len(segment);
            let mut line_start = segment_start;
            let mut has_word = false;
            let mut index = segment_start;
            while index < segment_end {
                if chars[index].is_whitespace() {
                    index += 1;
                    continue;
                }
                let word_start = index;
                while index < segment_end && !chars[index].is_whitespace() {
                    index += 1;
                }
                if has_word && self.measure(char_slice(text, line_start, index)) > max_width {
                    lines.push(VisualLine {
                        start: line_start,
                        end: word_start,
                        soft: true,
                    });
                    line_start = word_start;
                }
                has_word = true;
            }
            lines.push(VisualLine {
                start: line_start,
                end: segment_end,
                soft: false,
            });
            segment_start = segment_end + 1;
        }
        lines
    }

    /// Text of each display line.
    ///
    /// Leading and inner whitespace is kept; trailing whitespace is not
    /// shown, so no line is wider than its words.
    pub fn wrap_lines(&self, text: &str, max_width: f64) -> Vec<String> {
        self.visual_lines(text, max_width)
            .into_iter()
            .map(|line| char_slice(text, line.start, line.end).trim_end().to_string())
            .collect()
    }

    /// Pixel position of the caret at `offset` for text anchored at `anchor`.
    ///
    /// Offsets past the end resolve to the end of the last line.
    pub fn caret_position(&self, text: &str, offset: usize, anchor: Point) -> Point {
        let lines = self.visual_lines(text, self.max_width);
        let index = line_index_at(&lines, offset);
        let line = lines[index];
        let width = self.measure(char_slice(text, line.start, offset.min(line.end)));
        Point::new(anchor.x + width, anchor.y + index as f64 * self.line_height)
    }

    /// Bounding box of a committed block.
    ///
    /// The block position is the baseline of its first line, so the box
    /// reaches one font size above it and stops half a font size above the
    /// last baseline.
    pub fn block_bounds(&self, block: &TextBlock) -> Rect {
        let mut line_count = 0;
        let mut width: f64 = 0.0;
        for line in self.wrap_lines(&block.text, self.max_width) {
            line_count += 1;
            width = width.max(self.measure(&line));
        }
        let Point { x, y } = block.position;
        Rect::new(
            x,
            y - self.font.size,
            x + width,
            y + line_count as f64 * self.line_height - self.font.size / 2.0,
        )
    }

    /// Whether `point` falls inside the block's bounding box (edges included).
    pub fn hit_test(&self, point: Point, block: &TextBlock) -> bool {
        let bounds = self.block_bounds(block);
        point.x >= bounds.x0 && point.x <= bounds.x1 && point.y >= bounds.y0 && point.y <= bounds.y1
    }

    /// Offset of the caret slot nearest to `point` in text anchored at `anchor`.
    ///
    /// The line is picked from the vertical distance to the anchor and
    /// clamped to the text; within it, the slot whose x is closest wins.
    pub fn offset_at_point(&self, text: &str, anchor: Point, point: Point) -> usize {
        let lines = self.visual_lines(text, self.max_width);
        let raw = ((point.y - (anchor.y - self.font.size)) / self.line_height).floor();
        let index = if raw.is_nan() || raw < 0.0 {
            0
        } else {
            (raw as usize).min(lines.len() - 1)
        };

        let line = lines[index];
        // The slot at a wrap point is drawn on the next line.
        let last = if line.soft { line.end - 1 } else { line.end };
        let mut best = line.start;
        let mut best_distance = f64::MAX;
        for offset in line.start..=last {
            let width = self.measure(char_slice(text, line.start, offset));
            let distance = (anchor.x + width - point.x).abs();
            if distance < best_distance {
                best_distance = distance;
                best = offset;
            }
        }
        best
    }
}
