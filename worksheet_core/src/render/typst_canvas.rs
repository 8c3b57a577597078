//! # Typst Canvas
//!
//! A [`Surface`] that collects absolutely-positioned placements into a
//! Typst source document and compiles it to a one-page PDF.
//!
//! ## Architecture
//!
//! - Every draw call becomes a `#place(top + left, ...)` on a zero-margin page
//! - Text is set with its top edge on the baseline, so `dy` lands the baseline
//! - Fonts come from `typst-assets` and are loaded once per process
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use worksheet_core::layout::PageGeometry;
//! use worksheet_core::render::{Align, FontSpec, Surface, TypstCanvas};
//!
//! let mut canvas = TypstCanvas::new(&PageGeometry::letter());
//! canvas.text(306.0, 400.0, "7 + 5 = 12", FontSpec::bold(14.0), Align::Center);
//! let pdf_bytes = canvas.finish().unwrap();
//! std::fs::write("page.pdf", pdf_bytes).unwrap();
//! ```

use std::fmt::Write as _;

use chrono::Utc;
use once_cell::sync::Lazy;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use super::{Align, FontSpec, Surface};
use crate::errors::{SheetError, SheetResult};
use crate::layout::PageGeometry;

/// Family name of the monospaced face bundled with typst-assets
pub const PAGE_FONT: &str = "DejaVu Sans Mono";

/// Bundled fonts, parsed once and shared read-only by every canvas
static FONTS: Lazy<Vec<Font>> = Lazy::new(|| {
    let mut fonts = Vec::new();
    for font_bytes in typst_assets::fonts() {
        let buffer = Bytes::new(font_bytes.to_vec());
        for font in Font::iter(buffer) {
            fonts.push(font);
        }
    }
    fonts
});

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A minimal Typst world for compiling a page without external files.
struct PdfWorld {
    main: Source,
    book: LazyHash<FontBook>,
    fonts: Vec<Font>,
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        let fonts = FONTS.clone();
        let book = FontBook::from_fonts(&fonts);

        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(
            now.format("%Y").to_string().parse().ok()?,
            now.format("%m").to_string().parse().ok()?,
            now.format("%d").to_string().parse().ok()?,
        )
    }
}

// ============================================================================
// Canvas
// ============================================================================

/// One page of placements, compiled to PDF by [`TypstCanvas::finish`].
#[derive(Debug, Clone)]
pub struct TypstCanvas {
    width: f64,
    height: f64,
    body: String,
}

impl TypstCanvas {
    pub fn new(geometry: &PageGeometry) -> Self {
        TypstCanvas {
            width: geometry.width,
            height: geometry.height,
            body: String::new(),
        }
    }

    /// Complete Typst source for the page drawn so far
    pub fn source(&self) -> String {
        format!(
            "#set page(width: {:.2}pt, height: {:.2}pt, margin: 0pt)\n\
             #set text(font: \"{}\", top-edge: \"baseline\", bottom-edge: \"baseline\")\n\
             {}",
            self.width, self.height, PAGE_FONT, self.body
        )
    }

    /// Compile the page and export it as PDF bytes.
    ///
    /// # Errors
    ///
    /// * `RenderFailed` if Typst compilation or PDF export reports errors
    pub fn finish(self) -> SheetResult<Vec<u8>> {
        let world = PdfWorld::new(self.source());
        let warned = typst::compile(&world);

        let document = warned.output.map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
            SheetError::render_failed("typst compilation", error_msgs.join("; "))
        })?;

        typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
            SheetError::render_failed("pdf export", error_msgs.join("; "))
        })
    }

    /// Page y (up from bottom) to Typst dy (down from top)
    fn flip(&self, y: f64) -> f64 {
        self.height - y
    }
}

impl Surface for TypstCanvas {
    fn text(&mut self, x: f64, y: f64, text: &str, font: FontSpec, align: Align) {
        let left = match align {
            Align::Left => x,
            Align::Center => x - self.text_width(text, font) / 2.0,
        };
        let top = self.flip(y);
        let weight = if font.bold { "bold" } else { "regular" };
        let _ = writeln!(
            self.body,
            "#place(top + left, dx: {:.2}pt, dy: {:.2}pt, text(size: {:.1}pt, weight: \"{}\", \"{}\"))",
            left,
            top,
            font.size,
            weight,
            typst_string(text)
        );
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64) {
        let (top1, top2) = (self.flip(y1), self.flip(y2));
        let _ = writeln!(
            self.body,
            "#place(top + left, line(start: ({:.2}pt, {:.2}pt), end: ({:.2}pt, {:.2}pt), stroke: {:.2}pt))",
            x1, top1, x2, top2, width
        );
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let top = self.flip(y + height);
        let _ = writeln!(
            self.body,
            "#place(top + left, dx: {:.2}pt, dy: {:.2}pt, rect(width: {:.2}pt, height: {:.2}pt, stroke: 1pt))",
            x, top, width, height
        );
    }
}

/// Escape text for a Typst string literal.
///
/// Spaces become no-break spaces so padded operands keep their columns.
fn typst_string(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\\' => "\\\\".to_string(),
            '"' => "\\\"".to_string(),
            '\n' => "\\n".to_string(),
            ' ' => '\u{a0}'.to_string(),
            _ => c.to_string(),
        })
        .collect()
}
