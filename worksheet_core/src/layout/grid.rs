//! Grid mode: 20 bordered slots, 4 columns × 5 rows, filled row by row.

use super::{PageGeometry, PageVariant};
use crate::problems::format::{is_separator, long_division};
use crate::problems::{Operator, ProblemRecord};
use crate::render::{Align, FontSpec, Surface};

pub const GRID_COLUMNS: usize = 4;
pub const GRID_ROWS: usize = 5;
pub const GRID_CAPACITY: usize = GRID_COLUMNS * GRID_ROWS;

const PROBLEM_FONT: FontSpec = FontSpec::regular(14.0);
const EXPRESSION_FONT: FontSpec = FontSpec::regular(12.0);
const ANSWER_FONT: FontSpec = FontSpec::bold(14.0);

const LINE_GAP: f64 = 16.0;
/// Gap before an underscore separator, so the bar hugs the numbers
const SEPARATOR_GAP: f64 = 5.0;

/// Slot rectangle; `(x, y)` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Slot {
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// `(row, col)` of slot `index`
pub fn grid_cell(index: usize) -> (usize, usize) {
    (index / GRID_COLUMNS, index % GRID_COLUMNS)
}

/// Geometry of slot `index`
pub fn slot(geometry: &PageGeometry, index: usize) -> Slot {
    let top = geometry.content_top();
    let width = geometry.content_width() / GRID_COLUMNS as f64;
    let height = (top - geometry.margin) / GRID_ROWS as f64;
    let (row, col) = grid_cell(index);

    Slot {
        x: geometry.margin + col as f64 * width,
        y: top - row as f64 * height,
        width,
        height,
    }
}

/// Draw `problems` into slots in order. Callers cap the slice at capacity.
pub(crate) fn draw_grid<S: Surface + ?Sized>(
    surface: &mut S,
    geometry: &PageGeometry,
    variant: PageVariant,
    problems: &[ProblemRecord],
) {
    for (index, problem) in problems.iter().take(GRID_CAPACITY).enumerate() {
        let slot = slot(geometry, index);
        draw_border(surface, &slot);
        match variant {
            PageVariant::Worksheet => draw_problem(surface, &slot, problem),
            PageVariant::AnswerKey => draw_answer(surface, &slot, problem),
        }
    }
}

fn draw_border<S: Surface + ?Sized>(surface: &mut S, slot: &Slot) {
    surface.rect(
        slot.x + 5.0,
        slot.y - slot.height + 10.0,
        slot.width - 10.0,
        slot.height - 20.0,
    );
}

fn draw_problem<S: Surface + ?Sized>(surface: &mut S, slot: &Slot, problem: &ProblemRecord) {
    match problem.operator() {
        Operator::Division => draw_long_division(surface, slot, problem),
        Operator::Addition | Operator::Subtraction | Operator::Multiplication => {
            draw_vertical(surface, slot, problem.vertical_layout())
        }
    }
}

/// Multi-line layout centred in the slot
fn draw_vertical<S: Surface + ?Sized>(surface: &mut S, slot: &Slot, layout: &str) {
    let lines: Vec<&str> = layout.split('\n').collect();
    let total_height = lines.len() as f64 * LINE_GAP;
    let mut y = slot.y - (slot.height - total_height) / 2.0 - 10.0;

    for (i, line) in lines.iter().enumerate() {
        surface.text(slot.center_x(), y, line, PROBLEM_FONT, Align::Center);
        let next_is_separator = lines.get(i + 1).is_some_and(|next| is_separator(next));
        y -= if next_is_separator { SEPARATOR_GAP } else { LINE_GAP };
    }
}

/// `"divisor)dividend"` with a bar over the dividend
fn draw_long_division<S: Surface + ?Sized>(surface: &mut S, slot: &Slot, problem: &ProblemRecord) {
    let dividend = problem.operand_a().to_string();
    let text = long_division(problem.operand_a(), problem.operand_b());
    let text_y = slot.y - slot.height / 2.0 + 6.0;
    surface.text(slot.center_x(), text_y, &text, PROBLEM_FONT, Align::Center);

    let full_width = surface.text_width(&text, PROBLEM_FONT);
    let bracket_width = surface.text_width(&format!("{})", problem.operand_b()), PROBLEM_FONT);
    let dividend_width = surface.text_width(&dividend, PROBLEM_FONT);

    let bar_start = slot.center_x() - full_width / 2.0 + bracket_width;
    let bar_y = slot.y - slot.height / 2.0 + 18.0;
    surface.line(bar_start - 3.0, bar_y, bar_start + dividend_width + 3.0, bar_y, 0.5);
}

fn draw_answer<S: Surface + ?Sized>(surface: &mut S, slot: &Slot, problem: &ProblemRecord) {
    surface.text(
        slot.center_x(),
        slot.y - slot.height / 3.0,
        problem.display_expression(),
        EXPRESSION_FONT,
        Align::Center,
    );
    surface.text(
        slot.center_x(),
        slot.y - 2.0 * slot.height / 3.0,
        problem.display_answer(),
        ANSWER_FONT,
        Align::Center,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{render_page, PageSpec};
    use crate::render::{DrawOp, RecordingSurface, MONO_ADVANCE_EM};

    fn additions(n: u32) -> Vec<ProblemRecord> {
        (1..=n)
            .map(|i| ProblemRecord::new(Operator::Addition, i * 3, i))
            .collect::<Result<_, _>>()
            .unwrap()
    }

    fn render(variant: PageVariant, problems: &[ProblemRecord]) -> RecordingSurface {
        let mut surface = RecordingSurface::new();
        render_page(&mut surface, &PageGeometry::letter(), &PageSpec::Grid, variant, problems).unwrap();
        surface
    }

    fn rect_origins(surface: &RecordingSurface) -> Vec<(f64, f64)> {
        surface
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rect { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_grid_cells() {
        assert_eq!(grid_cell(0), (0, 0));
        assert_eq!(grid_cell(3), (0, 3));
        assert_eq!(grid_cell(4), (1, 0));
        assert_eq!(grid_cell(19), (4, 3));
    }

    #[test]
    fn test_slot_geometry() {
        let g = PageGeometry::letter();
        let first = slot(&g, 0);
        assert_eq!(first.x, 54.0);
        assert_eq!(first.y, 612.0);
        assert_eq!(first.width, 126.0);
        assert!((first.height - 111.6).abs() < 1e-9);

        let last = slot(&g, 19);
        assert_eq!(last.x, 54.0 + 3.0 * 126.0);
        assert!((last.y - (612.0 - 4.0 * 111.6)).abs() < 1e-9);
        // Bottom row ends on the bottom margin
        assert!((last.y - last.height - g.margin).abs() < 1e-9);
    }

    #[test]
    fn test_full_grid_is_five_by_four() {
        let surface = render(PageVariant::Worksheet, &additions(20));
        let origins = rect_origins(&surface);
        assert_eq!(origins.len(), 20);

        let g = PageGeometry::letter();
        for (i, (x, y)) in origins.iter().enumerate() {
            let s = slot(&g, i);
            let (row, col) = grid_cell(i);
            assert_eq!((row, col), (i / 4, i % 4));
            assert!((x - (s.x + 5.0)).abs() < 1e-9);
            assert!((y - (s.y - s.height + 10.0)).abs() < 1e-9);
        }

        let mut xs: Vec<i64> = origins.iter().map(|(x, _)| x.round() as i64).collect();
        xs.sort();
        xs.dedup();
        let mut ys: Vec<i64> = origins.iter().map(|(_, y)| y.round() as i64).collect();
        ys.sort();
        ys.dedup();
        assert_eq!(xs.len(), 4);
        assert_eq!(ys.len(), 5);
    }

    #[test]
    fn test_partial_grid_leaves_slots_empty() {
        let surface = render(PageVariant::Worksheet, &additions(7));
        assert_eq!(surface.rect_count(), 7);
        assert_eq!(GRID_CAPACITY - surface.rect_count(), 13);
    }

    #[test]
    fn test_extra_problems_dropped() {
        let surface = render(PageVariant::AnswerKey, &additions(23));
        assert_eq!(surface.rect_count(), 20);
        assert!(surface.find_text("63 + 21").is_none());
    }

    #[test]
    fn test_vertical_spacing_tightens_before_separator() {
        let p = ProblemRecord::new(Operator::Subtraction, 85, 7).unwrap();
        let surface = render(PageVariant::Worksheet, &[p]);
        let ys: Vec<f64> = surface
            .ops
            .iter()
            .skip(4) // header texts and border
            .filter_map(|op| match op {
                DrawOp::Text { y, .. } => Some(*y),
                _ => None,
            })
            .collect();
        assert_eq!(ys.len(), 3);
        assert!((ys[0] - ys[1] - LINE_GAP).abs() < 1e-9);
        assert!((ys[1] - ys[2] - SEPARATOR_GAP).abs() < 1e-9);

        let s = slot(&PageGeometry::letter(), 0);
        assert!((ys[0] - (s.y - (s.height - 48.0) / 2.0 - 10.0)).abs() < 1e-9);
        assert_eq!(surface.texts()[3..], ["  85", "-  7", "____"]);
    }

    #[test]
    fn test_long_division_bar_spans_dividend() {
        let p = ProblemRecord::new(Operator::Division, 144, 12).unwrap();
        let surface = render(PageVariant::Worksheet, &[p]);
        assert!(surface.find_text("12)144").is_some());
        assert_eq!(surface.line_count(), 1);

        let s = slot(&PageGeometry::letter(), 0);
        let advance = MONO_ADVANCE_EM * 14.0;
        let text_left = s.center_x() - 6.0 * advance / 2.0;
        let after_bracket = text_left + 3.0 * advance;

        match surface.ops.last().unwrap() {
            DrawOp::Line { x1, y1, x2, y2, width } => {
                assert!((x1 - (after_bracket - 3.0)).abs() < 1e-9);
                assert!((x2 - (after_bracket + 3.0 * advance + 3.0)).abs() < 1e-9);
                assert_eq!(y1, y2);
                assert!((y1 - (s.y - s.height / 2.0 + 18.0)).abs() < 1e-9);
                assert_eq!(*width, 0.5);
            }
            other => panic!("expected bar, got {:?}", other),
        }
    }

    #[test]
    fn test_answer_slot_layout() {
        let p = ProblemRecord::new(Operator::Division, 23, 5).unwrap();
        let surface = render(PageVariant::AnswerKey, &[p]);
        let s = slot(&PageGeometry::letter(), 0);

        let (_, expr_y) = surface.find_text("23 ÷ 5").unwrap();
        let (_, answer_y) = surface.find_text("4 R3").unwrap();
        assert!((expr_y - (s.y - s.height / 3.0)).abs() < 1e-9);
        assert!((answer_y - (s.y - 2.0 * s.height / 3.0)).abs() < 1e-9);

        let bold = surface.ops.iter().any(|op| {
            matches!(op, DrawOp::Text { text, font, .. } if text == "4 R3" && font.bold)
        });
        assert!(bold);
        assert_eq!(surface.line_count(), 0);
    }
}
