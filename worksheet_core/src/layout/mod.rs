//! # Layout Engine
//!
//! Places an ordered sequence of problems onto a fixed-size page in one of
//! two modes, as a worksheet (problems only) or an answer key (problems and
//! answers).
//!
//! ```text
//! Grid (fixed 4 × 5)              List (columns × rows, column-major)
//! ┌────┬────┬────┬────┐           1. 12 + 7 = ____   13. 4 + 9 = ____
//! │ 0  │ 1  │ 2  │ 3  │           2. 30 + 2 = ____   14. ...
//! ├────┼────┼────┼────┤           ...
//! │ 4  │ 5  │ 6  │ 7  │           12. 8 + 8 = ____   24. ...
//! └────┴────┴────┴────┘
//! ```
//!
//! All geometry is stateless coordinate arithmetic over [`PageGeometry`].
//! Every record is checked before anything is drawn, so a malformed record
//! fails the page instead of leaving a half-drawn one.

pub mod grid;
pub mod header;
pub mod list;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{SheetError, SheetResult};
use crate::problems::ProblemRecord;
use crate::render::Surface;

pub use grid::{GRID_CAPACITY, GRID_COLUMNS, GRID_ROWS};

pub const POINTS_PER_INCH: f64 = 72.0;

/// Allowed list-mode column counts
pub const LIST_COLUMNS_RANGE: std::ops::RangeInclusive<usize> = 1..=3;

/// Allowed list-mode rows per column
pub const LIST_ROWS_RANGE: std::ops::RangeInclusive<usize> = 10..=15;

/// Fixed page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl PageGeometry {
    /// US Letter, 8.5 × 11 in, 0.75 in margins
    pub fn letter() -> Self {
        PageGeometry {
            width: 8.5 * POINTS_PER_INCH,
            height: 11.0 * POINTS_PER_INCH,
            margin: 0.75 * POINTS_PER_INCH,
        }
    }

    /// Baseline of the first content row, below the header band
    pub fn content_top(&self) -> f64 {
        self.height - 2.5 * POINTS_PER_INCH
    }

    pub fn content_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry::letter()
    }
}

/// Page layout mode and its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum PageSpec {
    /// 4 columns × 5 rows
    Grid,
    /// Column-major list
    List { columns: usize, rows_per_column: usize },
}

impl PageSpec {
    /// Build a validated list spec
    pub fn list(columns: usize, rows_per_column: usize) -> SheetResult<Self> {
        let spec = PageSpec::List {
            columns,
            rows_per_column,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Number of problems one page holds
    pub fn capacity(&self) -> usize {
        match *self {
            PageSpec::Grid => GRID_CAPACITY,
            PageSpec::List {
                columns,
                rows_per_column,
            } => columns * rows_per_column,
        }
    }

    /// `"grid"` or `"list"`, used in document names
    pub fn mode_name(&self) -> &'static str {
        match self {
            PageSpec::Grid => "grid",
            PageSpec::List { .. } => "list",
        }
    }

    pub fn validate(&self) -> SheetResult<()> {
        if let PageSpec::List {
            columns,
            rows_per_column,
        } = *self
        {
            if !LIST_COLUMNS_RANGE.contains(&columns) {
                return Err(SheetError::invalid_input(
                    "list_columns",
                    columns.to_string(),
                    "Must be between 1 and 3",
                ));
            }
            if !LIST_ROWS_RANGE.contains(&rows_per_column) {
                return Err(SheetError::invalid_input(
                    "list_rows_per_column",
                    rows_per_column.to_string(),
                    "Must be between 10 and 15",
                ));
            }
        }
        Ok(())
    }
}

/// Worksheet (problems only) or answer key (problems and answers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageVariant {
    Worksheet,
    AnswerKey,
}

impl PageVariant {
    /// File name prefix
    pub fn prefix(&self) -> &'static str {
        match self {
            PageVariant::Worksheet => "worksheet",
            PageVariant::AnswerKey => "answers",
        }
    }
}

/// Render one page: header plus as many problems as the layout holds.
///
/// Problems beyond the page capacity are dropped; fewer problems leave the
/// remaining slots empty.
///
/// # Errors
///
/// * `InvalidInput` if a list spec is out of range
/// * `RenderContract` if any placed record is malformed
pub fn render_page<S: Surface + ?Sized>(
    surface: &mut S,
    geometry: &PageGeometry,
    spec: &PageSpec,
    variant: PageVariant,
    problems: &[ProblemRecord],
) -> SheetResult<()> {
    spec.validate()?;

    let capacity = spec.capacity();
    if problems.len() > capacity {
        warn!(
            mode = spec.mode_name(),
            supplied = problems.len(),
            capacity,
            "dropping problems beyond page capacity"
        );
    }
    let placed = &problems[..problems.len().min(capacity)];

    for (slot, problem) in placed.iter().enumerate() {
        if let Some(reason) = problem.contract_violation() {
            return Err(SheetError::render_contract(slot, reason));
        }
    }

    header::draw_header(surface, geometry);

    match *spec {
        PageSpec::Grid => grid::draw_grid(surface, geometry, variant, placed),
        PageSpec::List {
            columns,
            rows_per_column,
        } => list::draw_list(surface, geometry, variant, columns, rows_per_column, placed),
    }

    Ok(())
}
