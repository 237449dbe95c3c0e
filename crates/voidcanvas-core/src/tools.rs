//! Drawing tools and freehand strokes.

use crate::config::StrokePreset;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pencil,
    Text,
    Eraser,
}

impl ToolKind {
    /// Get display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            ToolKind::Pencil => "Pencil",
            ToolKind::Text => "Text",
            ToolKind::Eraser => "Eraser",
        }
    }

    /// Whether the tool draws freehand strokes.
    pub fn is_freehand(&self) -> bool {
        !matches!(self, ToolKind::Text)
    }
}

/// A freehand polyline drawn with one preset, kept so strokes survive redraws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub preset: StrokePreset,
    pub points: Vec<Point>,
}

impl Stroke {
    pub fn new(start: Point, preset: StrokePreset) -> Self {
        Self {
            preset,
            points: vec![start],
        }
    }

    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Consecutive point pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// The parts of the stroke inside `bounds`.
    ///
    /// The stroke is split wherever it leaves the bounds; pieces without a
    /// single segment are dropped.
    pub fn clip(&self, bounds: Rect) -> Vec<Stroke> {
        let mut pieces: Vec<Stroke> = Vec::new();
        let mut joined = false;
        for (from, to) in self.segments() {
            let Some((start, end)) = clip_segment(from, to, bounds) else {
                joined = false;
                continue;
            };
            match pieces.last_mut() {
                Some(piece) if joined && start == from => piece.points.push(end),
                _ => pieces.push(Stroke {
                    preset: self.preset,
                    points: vec![start, end],
                }),
            }
            joined = end == to;
        }
        pieces
    }
}

/// Liang-Barsky clipping of the segment `from..to` against `bounds`.
fn clip_segment(from: Point, to: Point, bounds: Rect) -> Option<(Point, Point)> {
    let delta = to - from;
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;
    let edges = [
        (-delta.x, from.x - bounds.x0),
        (delta.x, bounds.x1 - from.x),
        (-delta.y, from.y - bounds.y0),
        (delta.y, bounds.y1 - from.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((from + delta * t0, from + delta * t1))
}

/// Tracks the current tool and the stroke being drawn.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Last pointer position of the stroke in progress.
    last_point: Option<Point>,
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool, dropping any stroke in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.last_point = None;
    }

    /// Start a stroke at `point`. Returns false for the text tool.
    pub fn begin(&mut self, point: Point) -> bool {
        if !self.current_tool.is_freehand() {
            return false;
        }
        self.last_point = Some(point);
        true
    }

    /// Extend the stroke to `point`, returning the segment to draw.
    pub fn update(&mut self, point: Point) -> Option<(Point, Point)> {
        let from = self.last_point?;
        self.last_point = Some(point);
        Some((from, point))
    }

    pub fn end(&mut self) {
        self.last_point = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_segments() {
        let mut tools = ToolManager::new();
        assert!(tools.begin(Point::new(0.0, 0.0)));
        assert_eq!(
            tools.update(Point::new(5.0, 5.0)),
            Some((Point::new(0.0, 0.0), Point::new(5.0, 5.0)))
        );
        assert_eq!(
            tools.update(Point::new(9.0, 1.0)),
            Some((Point::new(5.0, 5.0), Point::new(9.0, 1.0)))
        );
        tools.end();
        assert!(tools.update(Point::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn test_text_tool_never_draws() {
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Text);
        assert!(!tools.begin(Point::ZERO));
        assert!(tools.update(Point::new(3.0, 3.0)).is_none());
    }

    #[test]
    fn test_switching_tool_ends_stroke() {
        let mut tools = ToolManager::new();
        tools.begin(Point::ZERO);
        tools.set_tool(ToolKind::Eraser);
        assert!(tools.update(Point::new(1.0, 1.0)).is_none());
    }

    fn pencil_stroke(points: &[(f64, f64)]) -> Stroke {
        Stroke {
            preset: StrokePreset::pencil(),
            points: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        }
    }

    #[test]
    fn test_clip_keeps_inside_stroke() {
        let stroke = pencil_stroke(&[(1.0, 1.0), (5.0, 5.0), (9.0, 2.0)]);
        let pieces = stroke.clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(pieces, vec![stroke]);
    }

    #[test]
    fn test_clip_cuts_at_boundary() {
        let stroke = pencil_stroke(&[(10.0, 10.0), (90.0, 10.0), (90.0, 90.0)]);
        let pieces = stroke.clip(Rect::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(pieces, vec![pencil_stroke(&[(10.0, 10.0), (50.0, 10.0)])]);
    }

    #[test]
    fn test_clip_splits_on_reentry() {
        let stroke = pencil_stroke(&[(10.0, 10.0), (90.0, 10.0), (90.0, 20.0), (10.0, 20.0)]);
        let pieces = stroke.clip(Rect::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(
            pieces,
            vec![
                pencil_stroke(&[(10.0, 10.0), (50.0, 10.0)]),
                pencil_stroke(&[(50.0, 20.0), (10.0, 20.0)]),
            ]
        );
    }

    #[test]
    fn test_clip_drops_outside_and_single_points() {
        let bounds = Rect::new(0.0, 0.0, 50.0, 50.0);
        assert!(pencil_stroke(&[(60.0, 60.0), (90.0, 70.0)]).clip(bounds).is_empty());
        assert!(pencil_stroke(&[(5.0, 5.0)]).clip(bounds).is_empty());
    }
}
