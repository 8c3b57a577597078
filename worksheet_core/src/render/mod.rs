//! # Rendering Surface
//!
//! The small drawing capability set the layout engine depends on: place
//! text, measure it, stroke lines and rectangle outlines. Coordinates are
//! PDF points with the origin at the bottom-left corner, y growing upward.
//!
//! - [`TypstCanvas`] compiles the placements into a one-page PDF
//! - [`RecordingSurface`] keeps the draw calls for inspection

pub mod recording;
pub mod typst_canvas;

pub use recording::{DrawOp, RecordingSurface};
pub use typst_canvas::TypstCanvas;

use serde::{Deserialize, Serialize};

/// Glyph advance of DejaVu Sans Mono in em (1233 / 2048 units)
pub const MONO_ADVANCE_EM: f64 = 1233.0 / 2048.0;

/// Font size and weight. The face is always the monospaced page font.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub size: f64,
    pub bold: bool,
}

impl FontSpec {
    pub const fn regular(size: f64) -> Self {
        FontSpec { size, bold: false }
    }

    pub const fn bold(size: f64) -> Self {
        FontSpec { size, bold: true }
    }
}

/// Horizontal anchoring of a text run relative to its `x` coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    Left,
    Center,
}

/// A 2D page-drawing target.
pub trait Surface {
    /// Draw `text` with its baseline at `y`
    fn text(&mut self, x: f64, y: f64, text: &str, font: FontSpec, align: Align);

    /// Rendered width of `text` in points
    fn text_width(&self, text: &str, font: FontSpec) -> f64 {
        monospace_width(text, font)
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64);

    /// Rectangle outline with its bottom-left corner at `(x, y)`
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);
}

/// Width of `text` set in the monospaced page font
pub fn monospace_width(text: &str, font: FontSpec) -> f64 {
    text.chars().count() as f64 * MONO_ADVANCE_EM * font.size
}
