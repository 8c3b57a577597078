//! # Difficulty Configuration
//!
//! Per-operator numeric bounds. A config is only meaningful for the operator
//! whose variant it is; [`validate`] rejects mismatches as well as
//! out-of-range values.
//!
//! | Operator       | Field            | Range              | Default |
//! |----------------|------------------|--------------------|---------|
//! | addition       | `max_num`        | 1..=999            | 100     |
//! | subtraction    | `max_num`        | 1..=999            | 100     |
//! | multiplication | `digits_a`/`_b`  | 1..=4              | 1       |
//! | division       | `max_dividend`   | 10..=999           | 100     |
//! | division       | `max_divisor`    | 2..=20             | 10      |
//! | division       | `remainder_mode` | none/required/mixed| none    |

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Operator;
use crate::errors::{SheetError, SheetResult};

pub const MAX_NUM_RANGE: RangeInclusive<u32> = 1..=999;
pub const DIGITS_RANGE: RangeInclusive<u32> = 1..=4;
pub const MAX_DIVIDEND_RANGE: RangeInclusive<u32> = 10..=999;
pub const MAX_DIVISOR_RANGE: RangeInclusive<u32> = 2..=20;

/// Whether division problems divide evenly, always leave a remainder, or mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemainderMode {
    #[default]
    #[serde(alias = "No remainders")]
    None,
    #[serde(alias = "With remainders")]
    Required,
    #[serde(alias = "Mixed")]
    Mixed,
}

impl RemainderMode {
    pub fn label(&self) -> &'static str {
        match self {
            RemainderMode::None => "No remainders",
            RemainderMode::Required => "With remainders",
            RemainderMode::Mixed => "Mixed",
        }
    }
}

impl fmt::Display for RemainderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RemainderMode {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "no remainders" => Ok(RemainderMode::None),
            "required" | "with remainders" => Ok(RemainderMode::Required),
            "mixed" => Ok(RemainderMode::Mixed),
            _ => Err(SheetError::invalid_config(
                Operator::Division.name(),
                format!("unknown remainder mode '{}' (expected none, required or mixed)", s),
            )),
        }
    }
}

/// Difficulty bounds, one variant per operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operator", rename_all = "lowercase")]
pub enum DifficultyConfig {
    Addition {
        #[serde(default = "default_max_num")]
        max_num: u32,
    },
    Subtraction {
        #[serde(default = "default_max_num")]
        max_num: u32,
    },
    Multiplication {
        #[serde(default = "default_digits")]
        digits_a: u32,
        #[serde(default = "default_digits")]
        digits_b: u32,
    },
    Division {
        #[serde(default = "default_max_dividend")]
        max_dividend: u32,
        #[serde(default = "default_max_divisor")]
        max_divisor: u32,
        #[serde(default)]
        remainder_mode: RemainderMode,
    },
}

fn default_max_num() -> u32 {
    100
}

fn default_digits() -> u32 {
    1
}

fn default_max_dividend() -> u32 {
    100
}

fn default_max_divisor() -> u32 {
    10
}

impl DifficultyConfig {
    /// Default bounds for an operator
    pub fn default_for(operator: Operator) -> Self {
        match operator {
            Operator::Addition => DifficultyConfig::Addition {
                max_num: default_max_num(),
            },
            Operator::Subtraction => DifficultyConfig::Subtraction {
                max_num: default_max_num(),
            },
            Operator::Multiplication => DifficultyConfig::Multiplication {
                digits_a: default_digits(),
                digits_b: default_digits(),
            },
            Operator::Division => DifficultyConfig::Division {
                max_dividend: default_max_dividend(),
                max_divisor: default_max_divisor(),
                remainder_mode: RemainderMode::default(),
            },
        }
    }

    /// The operator this config belongs to
    pub fn operator(&self) -> Operator {
        match self {
            DifficultyConfig::Addition { .. } => Operator::Addition,
            DifficultyConfig::Subtraction { .. } => Operator::Subtraction,
            DifficultyConfig::Multiplication { .. } => Operator::Multiplication,
            DifficultyConfig::Division { .. } => Operator::Division,
        }
    }

    /// Check this config against `operator`, describing the first problem found.
    pub fn check(&self, operator: Operator) -> SheetResult<()> {
        if self.operator() != operator {
            return Err(SheetError::invalid_config(
                operator.name(),
                format!("settings are for {}", self.operator().name()),
            ));
        }

        match *self {
            DifficultyConfig::Addition { max_num } | DifficultyConfig::Subtraction { max_num } => {
                in_range(operator, "max_num", max_num, MAX_NUM_RANGE)
            }
            DifficultyConfig::Multiplication { digits_a, digits_b } => {
                in_range(operator, "digits_a", digits_a, DIGITS_RANGE)?;
                in_range(operator, "digits_b", digits_b, DIGITS_RANGE)
            }
            DifficultyConfig::Division {
                max_dividend,
                max_divisor,
                ..
            } => {
                in_range(operator, "max_dividend", max_dividend, MAX_DIVIDEND_RANGE)?;
                in_range(operator, "max_divisor", max_divisor, MAX_DIVISOR_RANGE)
            }
        }
    }

    /// Human-readable summary of the bounds
    pub fn describe(&self) -> String {
        match *self {
            DifficultyConfig::Addition { max_num } => format!("Numbers up to {}", max_num),
            DifficultyConfig::Subtraction { max_num } => {
                format!("Numbers up to {} (positive results only)", max_num)
            }
            DifficultyConfig::Multiplication { digits_a, digits_b } => {
                format!("{}-digit × {}-digit numbers", digits_a, digits_b)
            }
            DifficultyConfig::Division {
                max_dividend,
                max_divisor,
                remainder_mode,
            } => format!(
                "Up to {} ÷ {}, {}",
                max_dividend,
                max_divisor,
                remainder_mode.label().to_lowercase()
            ),
        }
    }
}

fn in_range(operator: Operator, field: &str, value: u32, range: RangeInclusive<u32>) -> SheetResult<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(SheetError::invalid_config(
            operator.name(),
            format!(
                "{} = {} is outside {}..={}",
                field,
                value,
                range.start(),
                range.end()
            ),
        ))
    }
}

/// True if `config` is a valid difficulty for `operator`. Never panics.
pub fn validate(operator: Operator, config: &DifficultyConfig) -> bool {
    config.check(operator).is_ok()
}

/// Validate loosely typed settings, e.g. `{"max_num": 50}`.
///
/// Missing fields take their defaults. Malformed values (wrong types,
/// negative numbers, unknown remainder modes, a conflicting `operator` tag)
/// yield `false`.
pub fn validate_json(operator: Operator, settings: &serde_json::Value) -> bool {
    let Some(map) = settings.as_object() else {
        return false;
    };

    let mut tagged = map.clone();
    match tagged.get("operator") {
        Some(tag) if tag.as_str() != Some(operator.name()) => return false,
        Some(_) => {}
        None => {
            tagged.insert("operator".to_string(), operator.name().into());
        }
    }

    match serde_json::from_value::<DifficultyConfig>(serde_json::Value::Object(tagged)) {
        Ok(config) => validate(operator, &config),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_are_valid() {
        for op in Operator::ALL {
            assert!(validate(op, &DifficultyConfig::default_for(op)), "{:?}", op);
        }
    }

    #[test]
    fn test_range_edges() {
        assert!(validate(Operator::Addition, &DifficultyConfig::Addition { max_num: 1 }));
        assert!(validate(Operator::Addition, &DifficultyConfig::Addition { max_num: 999 }));
        assert!(!validate(Operator::Addition, &DifficultyConfig::Addition { max_num: 0 }));
        assert!(!validate(Operator::Subtraction, &DifficultyConfig::Subtraction { max_num: 1000 }));
        assert!(!validate(
            Operator::Multiplication,
            &DifficultyConfig::Multiplication { digits_a: 5, digits_b: 1 }
        ));
        assert!(!validate(
            Operator::Division,
            &DifficultyConfig::Division {
                max_dividend: 9,
                max_divisor: 5,
                remainder_mode: RemainderMode::None,
            }
        ));
        assert!(!validate(
            Operator::Division,
            &DifficultyConfig::Division {
                max_dividend: 100,
                max_divisor: 21,
                remainder_mode: RemainderMode::Mixed,
            }
        ));
    }

    #[test]
    fn test_operator_mismatch_is_invalid() {
        let config = DifficultyConfig::Addition { max_num: 10 };
        assert!(!validate(Operator::Subtraction, &config));
        let err = config.check(Operator::Subtraction).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_validate_is_idempotent() {
        let config = DifficultyConfig::Division {
            max_dividend: 100,
            max_divisor: 10,
            remainder_mode: RemainderMode::Required,
        };
        let first = validate(Operator::Division, &config);
        let second = validate(Operator::Division, &config);
        assert_eq!(first, second);
        assert!(first);
    }

    #[test]
    fn test_validate_json() {
        assert!(validate_json(Operator::Addition, &json!({ "max_num": 50 })));
        assert!(validate_json(Operator::Addition, &json!({})));
        assert!(!validate_json(Operator::Addition, &json!({ "max_num": -3 })));
        assert!(!validate_json(Operator::Addition, &json!({ "max_num": "lots" })));
        assert!(!validate_json(Operator::Addition, &json!([1, 2])));
        assert!(!validate_json(Operator::Addition, &json!({ "operator": "division" })));
        assert!(validate_json(
            Operator::Division,
            &json!({ "max_dividend": 200, "max_divisor": 12, "remainder_mode": "With remainders" })
        ));
        assert!(!validate_json(
            Operator::Division,
            &json!({ "remainder_mode": "sometimes" })
        ));
    }

    #[test]
    fn test_remainder_mode_parsing() {
        assert_eq!("mixed".parse::<RemainderMode>().unwrap(), RemainderMode::Mixed);
        assert_eq!("No remainders".parse::<RemainderMode>().unwrap(), RemainderMode::None);
        assert!("often".parse::<RemainderMode>().is_err());
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            DifficultyConfig::default_for(Operator::Subtraction).describe(),
            "Numbers up to 100 (positive results only)"
        );
        assert_eq!(
            DifficultyConfig::Multiplication { digits_a: 2, digits_b: 1 }.describe(),
            "2-digit × 1-digit numbers"
        );
        assert_eq!(
            DifficultyConfig::default_for(Operator::Division).describe(),
            "Up to 100 ÷ 10, no remainders"
        );
    }

    #[test]
    fn test_serde_shape() {
        let config: DifficultyConfig =
            serde_json::from_value(json!({ "operator": "multiplication", "digits_a": 3 })).unwrap();
        assert_eq!(config, DifficultyConfig::Multiplication { digits_a: 3, digits_b: 1 });
    }
}
