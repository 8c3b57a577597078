//! # Problems
//!
//! Arithmetic problem records and the generator that produces them.
//!
//! A [`ProblemRecord`] is immutable once built: its answer, remainder and
//! display strings are all derived from the two operands by
//! [`ProblemRecord::new`], which refuses operand pairs that would break the
//! per-operator invariants (negative differences, divisors below 2).
//!
//! ## Example
//!
//! ```rust
//! use worksheet_core::problems::{Operator, ProblemRecord};
//!
//! let p = ProblemRecord::new(Operator::Division, 23, 5).unwrap();
//! assert_eq!(p.answer(), 4);
//! assert_eq!(p.remainder(), Some(3));
//! assert_eq!(p.display_answer(), "4 R3");
//! ```

pub mod config;
pub mod format;
pub mod generator;

pub use config::{validate, validate_json, DifficultyConfig, RemainderMode};
pub use generator::{generate, shuffle_problems};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{SheetError, SheetResult};

/// The four supported arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operator {
    /// All operators, in menu order
    pub const ALL: [Operator; 4] = [
        Operator::Addition,
        Operator::Subtraction,
        Operator::Multiplication,
        Operator::Division,
    ];

    /// Symbol used in expressions and vertical layouts
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Addition => "+",
            Operator::Subtraction => "-",
            Operator::Multiplication => "×",
            Operator::Division => "÷",
        }
    }

    /// Lowercase identifier, as used in request files
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Addition => "addition",
            Operator::Subtraction => "subtraction",
            Operator::Multiplication => "multiplication",
            Operator::Division => "division",
        }
    }

    /// Capitalized label for summaries
    pub fn display_name(&self) -> &'static str {
        match self {
            Operator::Addition => "Addition",
            Operator::Subtraction => "Subtraction",
            Operator::Multiplication => "Multiplication",
            Operator::Division => "Division",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Operator {
    type Err = SheetError;

    /// Accepts full names (any case), short names and symbols.
    /// Anything else is rejected; there is no fallback operator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "addition" | "add" | "+" => Ok(Operator::Addition),
            "subtraction" | "subtract" | "sub" | "-" => Ok(Operator::Subtraction),
            "multiplication" | "multiply" | "mul" | "x" | "*" | "×" => Ok(Operator::Multiplication),
            "division" | "divide" | "div" | "/" | "÷" => Ok(Operator::Division),
            _ => Err(SheetError::unsupported_operator(s)),
        }
    }
}

/// One generated arithmetic problem plus its answer and display formatting.
///
/// `remainder` is `Some` exactly when the operator is division.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemRecord {
    operand_a: u32,
    operand_b: u32,
    operator: Operator,
    answer: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    remainder: Option<u32>,
    display_expression: String,
    display_answer: String,
    vertical_layout: String,
}

impl ProblemRecord {
    /// Build a record from its operands.
    ///
    /// For division `operand_a` is the dividend and `operand_b` the divisor.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` if subtraction would go negative, a divisor is below 2,
    ///   an operand is zero, or the answer overflows `u32`.
    pub fn new(operator: Operator, operand_a: u32, operand_b: u32) -> SheetResult<Self> {
        if operand_a == 0 || operand_b == 0 {
            return Err(SheetError::invalid_input(
                "operands",
                format!("{} {} {}", operand_a, operator.symbol(), operand_b),
                "Operands must be at least 1",
            ));
        }

        let overflow = || {
            SheetError::invalid_input(
                "operands",
                format!("{} {} {}", operand_a, operator.symbol(), operand_b),
                "Answer does not fit in 32 bits",
            )
        };

        let (answer, remainder) = match operator {
            Operator::Addition => (operand_a.checked_add(operand_b).ok_or_else(overflow)?, None),
            Operator::Subtraction => {
                if operand_a < operand_b {
                    return Err(SheetError::invalid_input(
                        "operand_b",
                        operand_b.to_string(),
                        format!("Subtrahend may not exceed minuend {}", operand_a),
                    ));
                }
                (operand_a - operand_b, None)
            }
            Operator::Multiplication => (operand_a.checked_mul(operand_b).ok_or_else(overflow)?, None),
            Operator::Division => {
                if operand_b < 2 {
                    return Err(SheetError::invalid_input(
                        "operand_b",
                        operand_b.to_string(),
                        "Divisor must be at least 2",
                    ));
                }
                (operand_a / operand_b, Some(operand_a % operand_b))
            }
        };

        Ok(ProblemRecord {
            operand_a,
            operand_b,
            operator,
            answer,
            remainder,
            display_expression: format::expression(operator, operand_a, operand_b),
            display_answer: format::answer(answer, remainder),
            vertical_layout: format::vertical(operator, operand_a, operand_b),
        })
    }

    pub fn operand_a(&self) -> u32 {
        self.operand_a
    }

    pub fn operand_b(&self) -> u32 {
        self.operand_b
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// The result; the quotient for division
    pub fn answer(&self) -> u32 {
        self.answer
    }

    /// Division remainder (0 if exact); `None` for other operators
    pub fn remainder(&self) -> Option<u32> {
        self.remainder
    }

    /// Inline form, e.g. `"12 + 7"`, always in generation order
    pub fn display_expression(&self) -> &str {
        &self.display_expression
    }

    /// Answer text, `"Q R r"` for division with a nonzero remainder
    pub fn display_answer(&self) -> &str {
        &self.display_answer
    }

    /// Multi-line layout for grid pages; the long-division form for division
    pub fn vertical_layout(&self) -> &str {
        &self.vertical_layout
    }

    /// Describe why this record is malformed, or `None` if it is consistent.
    ///
    /// Records built through [`ProblemRecord::new`] are always consistent;
    /// deserialized records may not be.
    pub fn contract_violation(&self) -> Option<String> {
        match ProblemRecord::new(self.operator, self.operand_a, self.operand_b) {
            Err(e) => Some(e.to_string()),
            Ok(expected) if expected != *self => {
                if expected.remainder.is_some() != self.remainder.is_some() {
                    Some(format!(
                        "remainder field does not match operator {}",
                        self.operator.name()
                    ))
                } else if expected.answer != self.answer || expected.remainder != self.remainder {
                    Some(format!(
                        "answer {} does not match '{}'",
                        self.display_answer, self.display_expression
                    ))
                } else {
                    Some(format!(
                        "display text does not match operands {} and {}",
                        self.operand_a, self.operand_b
                    ))
                }
            }
            Ok(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_parsing() {
        assert_eq!("Addition".parse::<Operator>().unwrap(), Operator::Addition);
        assert_eq!(" division ".parse::<Operator>().unwrap(), Operator::Division);
        assert_eq!("×".parse::<Operator>().unwrap(), Operator::Multiplication);
        assert_eq!("-".parse::<Operator>().unwrap(), Operator::Subtraction);
    }

    #[test]
    fn test_unsupported_operator_fails_fast() {
        let err = "modulo".parse::<Operator>().unwrap_err();
        assert_eq!(err, SheetError::unsupported_operator("modulo"));
    }

    #[test]
    fn test_operator_serde_names() {
        let json = serde_json::to_string(&Operator::Multiplication).unwrap();
        assert_eq!(json, "\"multiplication\"");
        assert!(serde_json::from_str::<Operator>("\"exponent\"").is_err());
    }

    #[test]
    fn test_division_record() {
        let exact = ProblemRecord::new(Operator::Division, 42, 6).unwrap();
        assert_eq!(exact.answer(), 7);
        assert_eq!(exact.remainder(), Some(0));
        assert_eq!(exact.display_answer(), "7");
        assert_eq!(exact.display_expression(), "42 ÷ 6");
        assert_eq!(exact.vertical_layout(), "6)42");
    }

    #[test]
    fn test_non_division_has_no_remainder() {
        for op in [Operator::Addition, Operator::Subtraction, Operator::Multiplication] {
            let p = ProblemRecord::new(op, 9, 4).unwrap();
            assert_eq!(p.remainder(), None);
        }
    }

    #[test]
    fn test_rejects_negative_subtraction() {
        assert!(ProblemRecord::new(Operator::Subtraction, 3, 8).is_err());
        assert_eq!(ProblemRecord::new(Operator::Subtraction, 8, 8).unwrap().answer(), 0);
    }

    #[test]
    fn test_rejects_small_divisor() {
        assert!(ProblemRecord::new(Operator::Division, 10, 1).is_err());
    }

    #[test]
    fn test_contract_violation_detects_tampering() {
        let good = ProblemRecord::new(Operator::Addition, 12, 30).unwrap();
        assert_eq!(good.contract_violation(), None);

        let mut json: serde_json::Value = serde_json::to_value(&good).unwrap();
        json["answer"] = serde_json::json!(41);
        let bad: ProblemRecord = serde_json::from_value(json).unwrap();
        assert!(bad.contract_violation().unwrap().contains("answer"));

        let mut json = serde_json::to_value(ProblemRecord::new(Operator::Division, 20, 4).unwrap()).unwrap();
        json.as_object_mut().unwrap().remove("remainder");
        let bad: ProblemRecord = serde_json::from_value(json).unwrap();
        assert!(bad.contract_violation().unwrap().contains("remainder"));
    }
}
