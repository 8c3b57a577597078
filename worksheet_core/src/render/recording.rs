//! A surface that records draw calls instead of rendering them.

use serde::{Deserialize, Serialize};

use super::{Align, FontSpec, Surface};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawOp {
    Text {
        x: f64,
        y: f64,
        text: String,
        font: FontSpec,
        align: Align,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: f64,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// All text runs in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn rect_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Rect { .. })).count()
    }

    pub fn line_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Line { .. })).count()
    }

    /// Position of the first text run equal to `needle`
    pub fn find_text(&self, needle: &str) -> Option<(f64, f64)> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::Text { x, y, text, .. } if text == needle => Some((*x, *y)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn text(&mut self, x: f64, y: f64, text: &str, font: FontSpec, align: Align) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            font,
            align,
        });
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64) {
        self.ops.push(DrawOp::Line { x1, y1, x2, y2, width });
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::Rect { x, y, width, height });
    }
}
