//! List mode: numbered rows filled column-major.
//!
//! Column 0 is filled top to bottom, then column 1, and so on. Numbers run
//! across the whole page and do not restart per column.
//!
//! Rows are set at 12pt unless the widest row on the page (worksheet or
//! answer key) would run past its column; then the whole page shrinks to fit,
//! so both variants of a page share one size.

use super::{PageGeometry, PageVariant, POINTS_PER_INCH};
use crate::problems::ProblemRecord;
use crate::render::{Align, FontSpec, Surface};

const ROW_FONT: FontSpec = FontSpec::regular(12.0);
const ROW_PITCH: f64 = 0.6 * POINTS_PER_INCH;
const TEXT_INSET: f64 = 10.0;
const ANSWER_BLANK: &str = "________";

/// `(column, row)` of problem `index`, or `None` past page capacity
pub fn list_cell(index: usize, columns: usize, rows_per_column: usize) -> Option<(usize, usize)> {
    if rows_per_column == 0 || index >= columns * rows_per_column {
        return None;
    }
    Some((index / rows_per_column, index % rows_per_column))
}

fn column_width(geometry: &PageGeometry, columns: usize) -> f64 {
    geometry.content_width() / columns.max(1) as f64
}

/// Baseline origin of a list cell
pub fn cell_origin(geometry: &PageGeometry, columns: usize, column: usize, row: usize) -> (f64, f64) {
    let column_width = column_width(geometry, columns);
    (
        geometry.margin + column as f64 * column_width + TEXT_INSET,
        geometry.content_top() - row as f64 * ROW_PITCH,
    )
}

/// `"<n>. <expression> = ________"` or with the answer filled in
pub fn row_text(number: usize, problem: &ProblemRecord, variant: PageVariant) -> String {
    let tail = match variant {
        PageVariant::Worksheet => ANSWER_BLANK,
        PageVariant::AnswerKey => problem.display_answer(),
    };
    format!("{}. {} = {}", number, problem.display_expression(), tail)
}

/// Row font for a page: 12pt, or smaller if the widest row would cross
/// into the next column.
pub fn row_font<S: Surface + ?Sized>(
    surface: &S,
    geometry: &PageGeometry,
    columns: usize,
    problems: &[ProblemRecord],
) -> FontSpec {
    let available = column_width(geometry, columns) - TEXT_INSET;
    let widest = problems
        .iter()
        .enumerate()
        .flat_map(|(index, problem)| {
            [PageVariant::Worksheet, PageVariant::AnswerKey]
                .map(|variant| surface.text_width(&row_text(index + 1, problem, variant), ROW_FONT))
        })
        .fold(0.0, f64::max);

    if widest <= available {
        ROW_FONT
    } else {
        FontSpec::regular(ROW_FONT.size * available / widest)
    }
}

pub(crate) fn draw_list<S: Surface + ?Sized>(
    surface: &mut S,
    geometry: &PageGeometry,
    variant: PageVariant,
    columns: usize,
    rows_per_column: usize,
    problems: &[ProblemRecord],
) {
    let shown = &problems[..problems.len().min(columns * rows_per_column)];
    let font = row_font(surface, geometry, columns, shown);

    for (index, problem) in shown.iter().enumerate() {
        let Some((column, row)) = list_cell(index, columns, rows_per_column) else {
            break;
        };
        let (x, y) = cell_origin(geometry, columns, column, row);
        surface.text(x, y, &row_text(index + 1, problem, variant), font, Align::Left);
    }
}
