//! Display formatting for problem records.
//!
//! Vertical layouts are generator-owned: the layout engine draws whatever
//! lines it finds here and never re-derives them.

use super::Operator;

/// Minimum vertical field width for multiplication (matches subtraction)
const MIN_PRODUCT_WIDTH: usize = 4;

/// Inline expression in generation order, e.g. `"48 - 19"`
pub fn expression(operator: Operator, a: u32, b: u32) -> String {
    format!("{} {} {}", a, operator.symbol(), b)
}

/// Answer text; division with a remainder reads `"Q R r"`
pub fn answer(answer: u32, remainder: Option<u32>) -> String {
    match remainder {
        Some(r) if r > 0 => format!("{} R{}", answer, r),
        _ => answer.to_string(),
    }
}

/// Multi-line vertical layout for grid pages.
pub fn vertical(operator: Operator, a: u32, b: u32) -> String {
    match operator {
        Operator::Addition => stacked_addition(a, b),
        // Fixed 4-character field; operands above 3 digits misalign.
        Operator::Subtraction => format!("{:>4}\n-{:>3}\n____", a, b),
        Operator::Multiplication => stacked(operator.symbol(), a, b, MIN_PRODUCT_WIDTH),
        Operator::Division => long_division(a, b),
    }
}

/// Long-division bracket form `"divisor)dividend"`
pub fn long_division(dividend: u32, divisor: u32) -> String {
    format!("{}){}", divisor, dividend)
}

/// True for a separator line made only of underscores
pub fn is_separator(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c == '_')
}

/// The operand with more digits goes on top. Only the picture is reordered.
fn stacked_addition(a: u32, b: u32) -> String {
    let (top, bottom) = if digits(b) > digits(a) { (b, a) } else { (a, b) };
    stacked("+", top, bottom, 0)
}

fn stacked(symbol: &str, top: u32, bottom: u32, min_width: usize) -> String {
    // +1 column for the operator
    let width = (digits(top).max(digits(bottom)) + 1).max(min_width);
    format!(
        "{:>w$}\n{}{:>v$}\n{}",
        top,
        symbol,
        bottom,
        "_".repeat(width),
        w = width,
        v = width - 1
    )
}

fn digits(n: u32) -> usize {
    n.to_string().len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addition_wider_operand_on_top() {
        assert_eq!(vertical(Operator::Addition, 7, 345), " 345\n+  7\n____");
        assert_eq!(vertical(Operator::Addition, 345, 7), " 345\n+  7\n____");
        assert_eq!(vertical(Operator::Addition, 5, 3), " 5\n+3\n__");
    }

    #[test]
    fn test_addition_expression_keeps_generation_order() {
        assert_eq!(expression(Operator::Addition, 7, 345), "7 + 345");
    }

    #[test]
    fn test_subtraction_fixed_width() {
        assert_eq!(vertical(Operator::Subtraction, 85, 7), "  85\n-  7\n____");
        // Known misalignment above three digits
        assert_eq!(vertical(Operator::Subtraction, 1000, 999), "1000\n-999\n____");
    }

    #[test]
    fn test_multiplication_layout() {
        assert_eq!(vertical(Operator::Multiplication, 7, 8), "   7\n×  8\n____");
        assert_eq!(vertical(Operator::Multiplication, 4321, 12), " 4321\n×  12\n_____");
    }

    #[test]
    fn test_division_answer_text() {
        assert_eq!(answer(7, Some(0)), "7");
        assert_eq!(answer(7, Some(2)), "7 R2");
        assert_eq!(answer(19, None), "19");
        assert_eq!(vertical(Operator::Division, 72, 8), "8)72");
    }

    #[test]
    fn test_separator_detection() {
        assert!(is_separator("____"));
        assert!(!is_separator("  85"));
        assert!(!is_separator(""));
    }
}
