//! Subcommands and their arguments.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use worksheet_core::file_io::load_request;
use worksheet_core::problems::{DifficultyConfig, Operator, RemainderMode};
use worksheet_core::worksheet::WorksheetRequest;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate worksheets and answer keys
    Generate(GenerateArgs),

    /// Render previously dumped problem sets
    Render(RenderArgs),

    /// Print the default difficulty for each operation
    Defaults,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Request file (JSON); flags below override its fields
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// addition, subtraction, multiplication or division
    #[arg(long, short = 'o')]
    pub operator: Option<String>,

    /// Largest operand for addition and subtraction (1-999)
    #[arg(long)]
    pub max_num: Option<u32>,

    /// Digits in the first factor (1-4)
    #[arg(long)]
    pub digits_a: Option<u32>,

    /// Digits in the second factor (1-4)
    #[arg(long)]
    pub digits_b: Option<u32>,

    /// Largest dividend (10-999)
    #[arg(long)]
    pub max_dividend: Option<u32>,

    /// Largest divisor (2-20)
    #[arg(long)]
    pub max_divisor: Option<u32>,

    /// none, required or mixed
    #[arg(long)]
    pub remainder: Option<String>,

    /// Pages in the 4 x 5 grid layout (0-50)
    #[arg(long)]
    pub grid_pages: Option<u32>,

    /// Pages in the list layout (0-50)
    #[arg(long)]
    pub list_pages: Option<u32>,

    /// List layout columns (1-3)
    #[arg(long)]
    pub columns: Option<usize>,

    /// List layout rows per column (10-15)
    #[arg(long)]
    pub rows: Option<usize>,

    /// Seed for a reproducible batch
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output directory
    #[arg(long, default_value = "worksheets")]
    pub out: PathBuf,

    /// Also write the generated problem sets as JSON
    #[arg(long)]
    pub dump_problems: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Problem sets written by `generate --dump-problems`
    #[arg(long)]
    pub problems: PathBuf,

    /// Output directory
    #[arg(long, default_value = "worksheets")]
    pub out: PathBuf,
}

impl GenerateArgs {
    /// Build the request: file (or defaults) first, then flag overrides.
    /// The result is validated before it is returned.
    pub fn to_request(&self) -> Result<WorksheetRequest> {
        let mut request = match &self.config {
            Some(path) => load_request(path)?,
            None => WorksheetRequest::new(Operator::Addition),
        };

        if let Some(name) = &self.operator {
            let operator: Operator = name.parse()?;
            if operator != request.operator {
                request.operator = operator;
                request.difficulty = DifficultyConfig::default_for(operator);
            }
        }

        request.difficulty = self.apply_difficulty(request.difficulty)?;

        if let Some(pages) = self.grid_pages {
            request.grid_pages = pages;
        }
        if let Some(pages) = self.list_pages {
            request.list_pages = pages;
        }
        if let Some(columns) = self.columns {
            request.list_columns = columns;
        }
        if let Some(rows) = self.rows {
            request.list_rows_per_column = rows;
        }
        if self.seed.is_some() {
            request.seed = self.seed;
        }

        request.validate()?;
        Ok(request)
    }

    fn apply_difficulty(&self, config: DifficultyConfig) -> Result<DifficultyConfig> {
        let remainder = self.remainder.as_deref().map(str::parse::<RemainderMode>).transpose()?;

        let updated = match config {
            DifficultyConfig::Addition { max_num } => DifficultyConfig::Addition {
                max_num: self.max_num.unwrap_or(max_num),
            },
            DifficultyConfig::Subtraction { max_num } => DifficultyConfig::Subtraction {
                max_num: self.max_num.unwrap_or(max_num),
            },
            DifficultyConfig::Multiplication { digits_a, digits_b } => DifficultyConfig::Multiplication {
                digits_a: self.digits_a.unwrap_or(digits_a),
                digits_b: self.digits_b.unwrap_or(digits_b),
            },
            DifficultyConfig::Division {
                max_dividend,
                max_divisor,
                remainder_mode,
            } => DifficultyConfig::Division {
                max_dividend: self.max_dividend.unwrap_or(max_dividend),
                max_divisor: self.max_divisor.unwrap_or(max_divisor),
                remainder_mode: remainder.unwrap_or(remainder_mode),
            },
        };

        let stray = match updated {
            DifficultyConfig::Addition { .. } | DifficultyConfig::Subtraction { .. } => {
                self.digits_a.is_some()
                    || self.digits_b.is_some()
                    || self.max_dividend.is_some()
                    || self.max_divisor.is_some()
                    || remainder.is_some()
            }
            DifficultyConfig::Multiplication { .. } => {
                self.max_num.is_some() || self.max_dividend.is_some() || self.max_divisor.is_some() || remainder.is_some()
            }
            DifficultyConfig::Division { .. } => {
                self.max_num.is_some() || self.digits_a.is_some() || self.digits_b.is_some()
            }
        };
        if stray {
            bail!(
                "difficulty flags given that do not apply to {}",
                updated.operator().name()
            );
        }

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        args: GenerateArgs,
    }

    fn parse(args: &[&str]) -> GenerateArgs {
        let mut argv = vec!["worksheet"];
        argv.extend_from_slice(args);
        TestCli::parse_from(argv).args
    }

    #[test]
    fn test_defaults_to_one_addition_grid_page() {
        let request = parse(&[]).to_request().unwrap();
        assert_eq!(request.operator, Operator::Addition);
        assert_eq!(request.grid_pages, 1);
        assert_eq!(request.list_pages, 0);
    }

    #[test]
    fn test_division_flags() {
        let request = parse(&[
            "--operator",
            "division",
            "--max-dividend",
            "200",
            "--remainder",
            "mixed",
            "--list-pages",
            "2",
            "--columns",
            "3",
        ])
        .to_request()
        .unwrap();

        assert_eq!(
            request.difficulty,
            DifficultyConfig::Division {
                max_dividend: 200,
                max_divisor: 10,
                remainder_mode: RemainderMode::Mixed,
            }
        );
        assert_eq!(request.list_pages, 2);
        assert_eq!(request.list_columns, 3);
    }

    #[test]
    fn test_unknown_operator_rejected() {
        let err = parse(&["--operator", "modulo"]).to_request().unwrap_err();
        assert!(err.to_string().contains("modulo"));
    }

    #[test]
    fn test_oversized_page_counts_rejected() {
        let err = parse(&["--grid-pages", "4294967295", "--list-pages", "1"])
            .to_request()
            .unwrap_err();
        assert!(err.to_string().contains("grid_pages"));
    }

    #[test]
    fn test_zero_pages_still_builds() {
        let request = parse(&["--grid-pages", "0"]).to_request().unwrap();
        assert_eq!(request.total_pages(), 0);
    }

    #[test]
    fn test_flags_for_other_operator_rejected() {
        assert!(parse(&["--operator", "addition", "--digits-a", "2"]).to_request().is_err());
    }
}
