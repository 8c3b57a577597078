//! # Problem Generator
//!
//! Bounded random sampling per operator. The random source is always passed
//! in by the caller; nothing here holds state between calls.
//!
//! ## Example
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use worksheet_core::problems::{generate, DifficultyConfig, Operator};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let config = DifficultyConfig::Addition { max_num: 50 };
//! let problems = generate(Operator::Addition, 20, &config, &mut rng).unwrap();
//! assert_eq!(problems.len(), 20);
//! ```

use std::ops::RangeInclusive;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::config::{DifficultyConfig, RemainderMode};
use super::{Operator, ProblemRecord};
use crate::errors::{SheetError, SheetResult};

/// Generate exactly `count` problems for `operator`.
///
/// # Errors
///
/// * `InvalidInput` if `count` is zero
/// * `InvalidConfig` if `config` does not validate for `operator`
pub fn generate<R: Rng + ?Sized>(
    operator: Operator,
    count: usize,
    config: &DifficultyConfig,
    rng: &mut R,
) -> SheetResult<Vec<ProblemRecord>> {
    if count == 0 {
        return Err(SheetError::invalid_input(
            "count",
            "0",
            "Problem count must be a positive integer",
        ));
    }
    config.check(operator)?;

    debug!(operator = operator.name(), count, difficulty = %config.describe(), "generating problems");

    (0..count).map(|_| draw(config, rng)).collect()
}

/// Return a shuffled copy of `problems`.
pub fn shuffle_problems<R: Rng + ?Sized>(problems: &[ProblemRecord], rng: &mut R) -> Vec<ProblemRecord> {
    let mut shuffled = problems.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

/// Operand range for a digit count: `[10^(d-1), 10^d - 1]`, or `[1, 9]` for one digit
pub fn digit_range(digits: u32) -> RangeInclusive<u32> {
    let low = if digits > 1 { 10u32.pow(digits - 1) } else { 1 };
    low..=10u32.pow(digits) - 1
}

fn draw<R: Rng + ?Sized>(config: &DifficultyConfig, rng: &mut R) -> SheetResult<ProblemRecord> {
    match *config {
        DifficultyConfig::Addition { max_num } => {
            let a = rng.gen_range(1..=max_num);
            let b = rng.gen_range(1..=max_num);
            ProblemRecord::new(Operator::Addition, a, b)
        }
        DifficultyConfig::Subtraction { max_num } => {
            let b = rng.gen_range(1..=max_num);
            let a = rng.gen_range(b..=max_num);
            ProblemRecord::new(Operator::Subtraction, a, b)
        }
        DifficultyConfig::Multiplication { digits_a, digits_b } => {
            let a = rng.gen_range(digit_range(digits_a));
            let b = rng.gen_range(digit_range(digits_b));
            ProblemRecord::new(Operator::Multiplication, a, b)
        }
        DifficultyConfig::Division {
            max_dividend,
            max_divisor,
            remainder_mode,
        } => draw_division(max_dividend, max_divisor, remainder_mode, rng),
    }
}

/// Whether a remainder is wanted is decided first, since it sets the divisor
/// cap: with a remainder the smallest dividend is `2 * divisor - 1`, without
/// one it is the divisor itself.
fn draw_division<R: Rng + ?Sized>(
    max_dividend: u32,
    max_divisor: u32,
    mode: RemainderMode,
    rng: &mut R,
) -> SheetResult<ProblemRecord> {
    let with_remainder = match mode {
        RemainderMode::None => false,
        RemainderMode::Required => true,
        RemainderMode::Mixed => rng.gen_bool(0.5),
    };

    let divisor_cap = if with_remainder {
        max_divisor.min((max_dividend + 1) / 2)
    } else {
        max_divisor.min(max_dividend)
    };
    let divisor = rng.gen_range(2..=divisor_cap.max(2));

    let remainder = if with_remainder {
        rng.gen_range(1..divisor)
    } else {
        0
    };

    let max_quotient = (max_dividend.saturating_sub(remainder) / divisor).max(1);
    let quotient = rng.gen_range(1..=max_quotient);

    ProblemRecord::new(Operator::Division, quotient * divisor + remainder, divisor)
}
